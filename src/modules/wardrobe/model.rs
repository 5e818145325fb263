use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub season: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    pub product_name: String,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
}
