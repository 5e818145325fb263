use serde::{Deserialize, Serialize};

use crate::modules::catalog::model::Product;

fn unknown_brand() -> String {
    "Unknown".to_string()
}

fn various_color() -> String {
    "Various".to_string()
}

fn usd() -> String {
    "USD".to_string()
}

/// One hit from outfit search or composition. Composed items may omit the
/// retail fields, so those fall back to neutral values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "unknown_brand")]
    pub brand: String,
    #[serde(default = "various_color")]
    pub color: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "usd")]
    pub currency: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<OutfitItem> for Product {
    fn from(item: OutfitItem) -> Self {
        Product {
            id: item.id,
            name: item.name,
            brand: item.brand,
            category: item.category,
            price: item.price,
            currency: item.currency,
            image_url: item.image_url,
            colors: vec![item.color],
            sizes: Vec::new(),
            description: item.description.unwrap_or_default(),
            rating: item.rating.unwrap_or_default(),
            availability: true,
            tags: Vec::new(),
        }
    }
}
