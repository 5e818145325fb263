use crate::modules::catalog::{controller::apply_filters, model::Product, schema::ProductQuery};
use crate::modules::outfits::{
    crud::OutfitsCrud,
    model::OutfitItem,
    schema::{ComposeRequest, OutfitFilter},
};
use crate::services::api::TransportError;
use crate::AppState;

pub const NO_SEARCH_RESULTS: &str = "No results found for your search. Try a different query.";
pub const NO_OUTFIT_ITEMS: &str = "No outfit items found. Try a different search query.";

/// Colours go in front of the query, categories after it.
pub fn enhance_query(query: &str, filter: &OutfitFilter) -> String {
    let mut enhanced = query.trim().to_string();
    if !filter.colors.is_empty() {
        enhanced = format!("{} {}", filter.colors.join(" "), enhanced);
    }
    if !filter.categories.is_empty() {
        enhanced = format!("{} {}", enhanced, filter.categories.join(" "));
    }
    enhanced
}

/// The first category doubles as the occasion.
pub fn compose_request(theme: &str, filter: &OutfitFilter) -> ComposeRequest {
    ComposeRequest {
        theme: theme.trim().to_string(),
        occasion: filter.categories.first().cloned(),
        color_scheme: (!filter.colors.is_empty()).then(|| filter.colors.join(" and ")),
        include_wardrobe_items: true,
    }
}

fn require_query(query: &str) -> Result<(), TransportError> {
    if query.trim().is_empty() {
        return Err(TransportError::Validation("Please enter a search query".to_string()));
    }
    Ok(())
}

pub async fn search(state: &AppState, query: &str, filter: &OutfitFilter) -> Result<Vec<OutfitItem>, TransportError> {
    require_query(query)?;
    OutfitsCrud::new(&state.api).search(enhance_query(query, filter)).await
}

pub async fn compose(state: &AppState, theme: &str, filter: &OutfitFilter) -> Result<Vec<OutfitItem>, TransportError> {
    require_query(theme)?;
    OutfitsCrud::new(&state.api).compose(&compose_request(theme, filter)).await
}

/// Narrows and sorts previously fetched results with the catalog filter.
pub fn browse(items: &[OutfitItem], query: &ProductQuery) -> Vec<Product> {
    let products: Vec<Product> = items.iter().cloned().map(Product::from).collect();
    apply_filters(&products, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::schema::SortOption;

    fn item(id: &str, brand: &str, color: &str, price: f64) -> OutfitItem {
        OutfitItem {
            id: id.to_string(),
            name: format!("Look {id}"),
            category: "Dresses".to_string(),
            brand: brand.to_string(),
            color: color.to_string(),
            price,
            currency: "EUR".to_string(),
            image_url: String::new(),
            rating: None,
            description: None,
        }
    }

    #[test]
    fn query_is_wrapped_by_filters() {
        let mut filter = OutfitFilter::default();
        assert_eq!(enhance_query(" summer dress ", &filter), "summer dress");

        filter.toggle_color("red");
        filter.toggle_color("white");
        filter.toggle_category("Dresses");
        assert_eq!(enhance_query("summer", &filter), "red white summer Dresses");
    }

    #[test]
    fn compose_uses_first_category_and_joined_colors() {
        let filter = OutfitFilter {
            colors: vec!["navy".to_string(), "cream".to_string()],
            categories: vec!["Wedding".to_string(), "Party".to_string()],
        };
        let request = compose_request("garden party", &filter);
        assert_eq!(request.occasion.as_deref(), Some("Wedding"));
        assert_eq!(request.color_scheme.as_deref(), Some("navy and cream"));
        assert!(request.include_wardrobe_items);

        let bare = compose_request("garden party", &OutfitFilter::default());
        assert!(bare.occasion.is_none());
        assert!(bare.color_scheme.is_none());
    }

    #[test]
    fn browse_applies_catalog_filters() {
        let items = vec![
            item("a", "Zara", "Red", 80.0),
            item("b", "Mango", "Black", 40.0),
            item("c", "Zara", "Black", 25.0),
        ];
        let mut query = ProductQuery::default();
        query.toggle_color("Black");
        query.sort = SortOption::PriceLow;

        let found: Vec<String> = browse(&items, &query).into_iter().map(|p| p.id).collect();
        assert_eq!(found, vec!["c", "b"]);
    }
}
