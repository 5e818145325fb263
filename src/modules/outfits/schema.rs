use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::catalog::schema::toggle;
use crate::modules::outfits::model::OutfitItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitFilter {
    pub colors: Vec<String>,
    pub categories: Vec<String>,
}

impl OutfitFilter {
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color);
    }

    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }
}

#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<OutfitItem>,
}

#[derive(Debug, Serialize)]
pub struct ComposeRequest {
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    pub include_wardrobe_items: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposedOutfit {
    #[serde(default)]
    pub search_items: Vec<OutfitItem>,
}

#[derive(Debug, Deserialize)]
pub struct ComposeResponse {
    #[serde(default)]
    pub outfit: ComposedOutfit,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct WardrobeDetails {
    pub product_id: String,
    #[validate(length(min = 1, message = "Product name and category are required for wardrobe items"))]
    pub category: String,
    pub color: String,
    pub brand: String,
    pub image_url: String,
    #[validate(length(min = 1, message = "Product name and category are required for wardrobe items"))]
    pub product_name: String,
}

impl From<&OutfitItem> for WardrobeDetails {
    fn from(item: &OutfitItem) -> Self {
        Self {
            product_id: item.id.clone(),
            category: item.category.clone(),
            color: item.color.clone(),
            brand: item.brand.clone(),
            image_url: item.image_url.clone(),
            product_name: item.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddToWardrobeRequest<'a> {
    pub item_id: &'a str,
    pub item_details: &'a WardrobeDetails,
}

#[derive(Debug, Deserialize)]
pub struct AddToWardrobeResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub item_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_request_omits_unset_fields() {
        let request = ComposeRequest {
            theme: "beach wedding".to_string(),
            occasion: None,
            color_scheme: None,
            include_wardrobe_items: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("occasion").is_none());
        assert!(json.get("color_scheme").is_none());
        assert_eq!(json["include_wardrobe_items"], true);
    }

    #[test]
    fn composed_items_fill_retail_defaults() {
        let response: ComposeResponse = serde_json::from_str(
            r#"{"outfit": {"search_items": [{"id": "w1", "name": "Linen Shirt", "category": "Tops"}]}}"#,
        )
        .unwrap();
        let item = &response.outfit.search_items[0];
        assert_eq!(item.brand, "Unknown");
        assert_eq!(item.color, "Various");
        assert_eq!(item.currency, "USD");
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn wardrobe_details_need_name_and_category() {
        let mut details = WardrobeDetails {
            product_id: "p1".to_string(),
            category: String::new(),
            color: "Blue".to_string(),
            brand: "Zara".to_string(),
            image_url: String::new(),
            product_name: "Denim Jacket".to_string(),
        };
        assert!(details.validate().is_err());
        details.category = "Jackets".to_string();
        assert!(details.validate().is_ok());
    }
}
