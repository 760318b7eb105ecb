//! Tag and free-text narrowing over a category's items.

use crate::model::{Category, Item};
use crate::sort::sort_items;

/// Narrows a category's items by active tag and search query, then orders
/// the survivors with the category's sort policy.
///
/// Both filters are optional and compose: the tag filter keeps items whose
/// tag set contains `tag_filter` exactly; a non-empty query (trimmed,
/// case-insensitive) keeps items where it occurs in the name, the
/// description, or any tag. No category means nothing to show, so `None`
/// yields an empty vec rather than an error.
///
/// Pure function over a read view; callers re-run it whenever the category,
/// tag, query, or item set changes. Nothing is cached.
pub fn filter_and_sort(
    category: Option<&Category>,
    tag_filter: Option<&str>,
    query: &str,
) -> Vec<Item> {
    let Some(category) = category else {
        return Vec::new();
    };
    let query = query.trim().to_lowercase();
    let matches: Vec<Item> = category
        .items
        .iter()
        .filter(|item| tag_filter.is_none_or(|tag| item.has_tag(tag)))
        .filter(|item| query.is_empty() || matches_query(item, &query))
        .cloned()
        .collect();
    sort_items(&matches, category.sort_order)
}

fn matches_query(item: &Item, query: &str) -> bool {
    item.name.to_lowercase().contains(query)
        || item.description.to_lowercase().contains(query)
        || item.tags.iter().any(|t| t.to_lowercase().contains(query))
}
