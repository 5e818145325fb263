use serde::Deserialize;

use crate::modules::catalog::schema::{toggle, PRICE_CEILING, PRICE_FLOOR};
use crate::modules::favorites::model::FavoriteProduct;

#[derive(Debug, Deserialize)]
pub struct FavoritesResponse {
    #[serde(default)]
    pub data: Vec<FavoriteProduct>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FavoriteSort {
    /// Most recently added first.
    #[default]
    Date,
    PriceLow,
    PriceHigh,
    Name,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesQuery {
    pub search: String,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub min_rating: Option<f32>,
    pub sort: FavoriteSort,
}

impl Default for FavoritesQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: Vec::new(),
            brands: Vec::new(),
            price_min: PRICE_FLOOR,
            price_max: PRICE_CEILING,
            min_rating: None,
            sort: FavoriteSort::Date,
        }
    }
}

impl FavoritesQuery {
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }
}

/// Filter options derived from the loaded favorites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteFacets {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub max_price: f64,
}
