use std::cmp::Ordering;

use crate::modules::catalog::{
    model::Product,
    schema::{ProductQuery, SortOption},
};

/// Filters then sorts a product list for the browse screen. Sorting is stable,
/// so ties keep their incoming order.
pub fn apply_filters(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let needle = query.search.trim().to_lowercase();

    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.brand.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .filter(|p| query.categories.is_empty() || query.categories.contains(&p.category))
        .filter(|p| query.brands.is_empty() || query.brands.contains(&p.brand))
        .filter(|p| p.price >= query.price_min && p.price <= query.price_max)
        .filter(|p| query.colors.is_empty() || p.colors.iter().any(|c| query.colors.contains(c)))
        .cloned()
        .collect();

    match query.sort {
        SortOption::Recommended => {}
        SortOption::PriceLow => filtered.sort_by(|a, b| cmp_f64(a.price, b.price)),
        SortOption::PriceHigh => filtered.sort_by(|a, b| cmp_f64(b.price, a.price)),
        SortOption::Newest => filtered.sort_by(|a, b| a.id.cmp(&b.id)),
        SortOption::Popularity => {
            filtered.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
        }
    }

    filtered
}

pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, brand: &str, category: &str, price: f64, rating: f32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {id}"),
            brand: brand.to_string(),
            category: category.to_string(),
            price,
            currency: "USD".to_string(),
            image_url: format!("https://picsum.photos/seed/{id}/400/600"),
            colors: vec!["Black".to_string()],
            sizes: vec!["S".to_string(), "M".to_string()],
            description: "A stylish fashion item for any occasion.".to_string(),
            rating,
            availability: true,
            tags: vec![],
        }
    }

    fn sample() -> Vec<Product> {
        let mut red = product("product-3", "Mango", "Dresses", 120.0, 5.0);
        red.colors = vec!["Red".to_string()];
        vec![
            product("product-2", "Zara", "Tops", 35.0, 3.0),
            product("product-1", "Nike", "Shoes", 90.0, 4.0),
            red,
            product("product-4", "Zara", "Jackets", 1500.0, 2.0),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn default_query_keeps_server_order_within_price_range() {
        let result = apply_filters(&sample(), &ProductQuery::default());
        assert_eq!(ids(&result), vec!["product-2", "product-1", "product-3"]);
    }

    #[test]
    fn search_matches_brand_case_insensitively() {
        let query = ProductQuery {
            search: "  zARA ".to_string(),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &query)), vec!["product-2"]);
    }

    #[test]
    fn colors_match_on_any_overlap() {
        let mut query = ProductQuery::default();
        query.toggle_color("Red");
        query.toggle_color("Green");
        assert_eq!(ids(&apply_filters(&sample(), &query)), vec!["product-3"]);
    }

    #[test]
    fn sort_orders() {
        let mut query = ProductQuery {
            price_max: 10_000.0,
            sort: SortOption::PriceHigh,
            ..ProductQuery::default()
        };
        assert_eq!(
            ids(&apply_filters(&sample(), &query)),
            vec!["product-4", "product-3", "product-1", "product-2"]
        );

        query.sort = SortOption::PriceLow;
        assert_eq!(
            ids(&apply_filters(&sample(), &query)),
            vec!["product-2", "product-1", "product-3", "product-4"]
        );

        query.sort = SortOption::Newest;
        assert_eq!(
            ids(&apply_filters(&sample(), &query)),
            vec!["product-1", "product-2", "product-3", "product-4"]
        );

        query.sort = SortOption::Popularity;
        assert_eq!(
            ids(&apply_filters(&sample(), &query)),
            vec!["product-3", "product-1", "product-2", "product-4"]
        );
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let query = ProductQuery {
            price_min: 35.0,
            price_max: 90.0,
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &query)), vec!["product-2", "product-1"]);
    }
}
