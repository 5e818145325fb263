use serde::{Deserialize, Serialize};

pub const PRICE_FLOOR: f64 = 0.0;
pub const PRICE_CEILING: f64 = 1000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Server order.
    #[default]
    Recommended,
    PriceLow,
    PriceHigh,
    Newest,
    Popularity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: String,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub colors: Vec<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub sort: SortOption,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: Vec::new(),
            brands: Vec::new(),
            colors: Vec::new(),
            price_min: PRICE_FLOOR,
            price_max: PRICE_CEILING,
            sort: SortOption::Recommended,
        }
    }
}

impl ProductQuery {
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }

    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color);
    }

    /// Number of filter groups that narrow the result; search and sort don't count.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.categories.is_empty(),
            !self.brands.is_empty(),
            !self.colors.is_empty(),
            self.price_min > PRICE_FLOOR || self.price_max < PRICE_CEILING,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub(crate) fn toggle(selected: &mut Vec<String>, value: &str) {
    if let Some(pos) = selected.iter().position(|v| v == value) {
        selected.remove(pos);
    } else {
        selected.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut query = ProductQuery::default();
        query.toggle_brand("Zara");
        query.toggle_brand("Mango");
        assert_eq!(query.brands, vec!["Zara", "Mango"]);
        query.toggle_brand("Zara");
        assert_eq!(query.brands, vec!["Mango"]);
    }

    #[test]
    fn active_filter_count_groups_filters() {
        let mut query = ProductQuery::default();
        assert_eq!(query.active_filter_count(), 0);

        query.search = "linen".to_string();
        query.sort = SortOption::PriceHigh;
        assert_eq!(query.active_filter_count(), 0);

        query.toggle_category("Dresses");
        query.toggle_category("Tops");
        query.toggle_color("Black");
        query.price_max = 200.0;
        assert_eq!(query.active_filter_count(), 3);

        query.reset();
        assert_eq!(query, ProductQuery::default());
    }

    #[test]
    fn sort_option_uses_kebab_case() {
        let parsed: SortOption = serde_json::from_str("\"price-low\"").unwrap();
        assert_eq!(parsed, SortOption::PriceLow);
    }
}
