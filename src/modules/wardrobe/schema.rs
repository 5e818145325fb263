use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::wardrobe::model::WardrobeItem;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/300x300";

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct NewWardrobeItem {
    #[validate(length(min = 1, message = "Please fill out category and name fields"))]
    pub category: String,
    pub color: String,
    pub style: String,
    pub season: Vec<String>,
    pub occasions: Vec<String>,
    pub image_url: String,
    #[validate(length(min = 1, message = "Please fill out category and name fields"))]
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WardrobeListResponse {
    #[serde(default)]
    pub data: Vec<WardrobeItem>,
}

#[derive(Debug, Deserialize)]
pub struct WardrobeItemResponse {
    pub data: WardrobeItem,
}

/// Empty fields don't filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardrobeFilter {
    pub search: String,
    pub category: String,
    pub color: String,
    pub season: String,
    pub occasion: String,
}
