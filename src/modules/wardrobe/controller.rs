use crate::modules::wardrobe::{model::WardrobeItem, schema::WardrobeFilter};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn matches(item: &WardrobeItem, filter: &WardrobeFilter) -> bool {
    let needle = filter.search.trim().to_lowercase();
    if !needle.is_empty() {
        let hit = contains_ci(&item.product_name, &needle)
            || item
                .custom_name
                .as_deref()
                .is_some_and(|name| contains_ci(name, &needle))
            || contains_ci(&item.category, &needle)
            || contains_ci(&item.color, &needle);
        if !hit {
            return false;
        }
    }

    if !filter.category.is_empty() && item.category != filter.category {
        return false;
    }
    if !filter.color.is_empty() && item.color != filter.color {
        return false;
    }
    if !filter.season.is_empty() && !item.season.contains(&filter.season) {
        return false;
    }
    if !filter.occasion.is_empty() && !item.occasions.contains(&filter.occasion) {
        return false;
    }

    true
}

pub fn filter_items<'a>(items: &'a [WardrobeItem], filter: &WardrobeFilter) -> Vec<&'a WardrobeItem> {
    items.iter().filter(|item| matches(item, filter)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, category: &str, color: &str, season: &[&str]) -> WardrobeItem {
        WardrobeItem {
            id: id.to_string(),
            category: category.to_string(),
            color: color.to_string(),
            style: "casual".to_string(),
            season: season.iter().map(|s| s.to_string()).collect(),
            occasions: vec!["Casual".to_string()],
            image_url: String::new(),
            product_name: name.to_string(),
            custom_name: None,
            added_at: None,
        }
    }

    #[test]
    fn search_covers_custom_name_and_color() {
        let mut tee = item("1", "Basic Tee", "Tops", "White", &["Summer"]);
        tee.custom_name = Some("Gym favourite".to_string());
        let coat = item("2", "Wool Coat", "Outerwear", "Navy", &["Winter"]);
        let items = vec![tee, coat];

        let by_custom = WardrobeFilter {
            search: "GYM".to_string(),
            ..WardrobeFilter::default()
        };
        assert_eq!(filter_items(&items, &by_custom)[0].id, "1");

        let by_color = WardrobeFilter {
            search: "navy".to_string(),
            ..WardrobeFilter::default()
        };
        assert_eq!(filter_items(&items, &by_color)[0].id, "2");
    }

    #[test]
    fn exact_and_membership_filters_combine() {
        let items = vec![
            item("1", "Tee", "Tops", "White", &["Summer", "Spring"]),
            item("2", "Tank", "Tops", "White", &["Summer"]),
            item("3", "Coat", "Outerwear", "White", &["Spring"]),
        ];
        let filter = WardrobeFilter {
            category: "Tops".to_string(),
            season: "Spring".to_string(),
            occasion: "Casual".to_string(),
            ..WardrobeFilter::default()
        };
        let found: Vec<&str> = filter_items(&items, &filter).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(found, vec!["1"]);
    }
}
