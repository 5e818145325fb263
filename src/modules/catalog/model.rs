use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub availability: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}
