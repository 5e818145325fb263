use std::cmp::Ordering;

use crate::modules::catalog::controller::cmp_f64;
use crate::modules::favorites::{
    model::FavoriteProduct,
    schema::{FavoriteFacets, FavoriteSort, FavoritesQuery},
};

pub fn apply_filters(items: &[FavoriteProduct], query: &FavoritesQuery) -> Vec<FavoriteProduct> {
    let needle = query.search.trim().to_lowercase();

    let mut results: Vec<FavoriteProduct> = items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.brand.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
        })
        .filter(|item| query.categories.is_empty() || query.categories.contains(&item.category))
        .filter(|item| query.brands.is_empty() || query.brands.contains(&item.brand))
        .filter(|item| item.price >= query.price_min && item.price <= query.price_max)
        .filter(|item| query.min_rating.map_or(true, |min| item.rating >= min))
        .cloned()
        .collect();

    match query.sort {
        // Undated entries sink to the bottom.
        FavoriteSort::Date => results.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
        FavoriteSort::PriceLow => results.sort_by(|a, b| cmp_f64(a.price, b.price)),
        FavoriteSort::PriceHigh => results.sort_by(|a, b| cmp_f64(b.price, a.price)),
        FavoriteSort::Name => results.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
    }

    results
}

/// Distinct categories and brands in first-seen order, plus the highest price
/// rounded up to the next hundred.
pub fn facets(items: &[FavoriteProduct]) -> FavoriteFacets {
    let mut facets = FavoriteFacets::default();

    for item in items {
        if !facets.categories.contains(&item.category) {
            facets.categories.push(item.category.clone());
        }
        if !facets.brands.contains(&item.brand) {
            facets.brands.push(item.brand.clone());
        }
    }

    let max = items
        .iter()
        .map(|item| item.price)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .unwrap_or(0.0);
    facets.max_price = (max / 100.0).ceil() * 100.0;

    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fav(id: &str, name: &str, brand: &str, price: f64, rating: f32, day: Option<u32>) -> FavoriteProduct {
        FavoriteProduct {
            id: id.to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            category: "Dresses".to_string(),
            price,
            currency: "USD".to_string(),
            image_url: String::new(),
            rating,
            color: "Black".to_string(),
            size: None,
            date_added: day.map(|d| Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap()),
            available: true,
        }
    }

    fn ids(items: &[FavoriteProduct]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn default_sort_is_newest_first() {
        let items = vec![
            fav("a", "Slip dress", "Zara", 40.0, 4.0, Some(1)),
            fav("b", "Wrap dress", "Mango", 60.0, 3.0, None),
            fav("c", "Maxi dress", "H&M", 30.0, 5.0, Some(9)),
        ];
        assert_eq!(ids(&apply_filters(&items, &FavoritesQuery::default())), vec!["c", "a", "b"]);
    }

    #[test]
    fn rating_and_brand_filters() {
        let items = vec![
            fav("a", "Slip dress", "Zara", 40.0, 4.0, Some(1)),
            fav("b", "Wrap dress", "Zara", 60.0, 2.0, Some(2)),
            fav("c", "Maxi dress", "H&M", 30.0, 5.0, Some(3)),
        ];
        let mut query = FavoritesQuery {
            min_rating: Some(3.0),
            sort: FavoriteSort::Name,
            ..FavoritesQuery::default()
        };
        query.toggle_brand("Zara");
        assert_eq!(ids(&apply_filters(&items, &query)), vec!["a"]);
    }

    #[test]
    fn facets_round_max_price_up() {
        let mut items = vec![
            fav("a", "Slip dress", "Zara", 40.0, 4.0, None),
            fav("b", "Wrap dress", "Mango", 250.5, 3.0, None),
            fav("c", "Maxi dress", "Zara", 30.0, 5.0, None),
        ];
        items[1].category = "Skirts".to_string();

        let found = facets(&items);
        assert_eq!(found.categories, vec!["Dresses", "Skirts"]);
        assert_eq!(found.brands, vec!["Zara", "Mango"]);
        assert_eq!(found.max_price, 300.0);
        assert_eq!(facets(&[]).max_price, 0.0);
    }
}
