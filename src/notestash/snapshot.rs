//! Snapshot export/import.
//!
//! A snapshot is the complete serialized form of every category and item,
//! the one shape the outside world sees:
//!
//! ```text
//! { "categories": [ { "id", "name", "sortOrder",
//!     "items": [ { "id", "name", "description", "tags",
//!                  "createdAt", "updatedAt" } ] } ] }
//! ```
//!
//! Import runs in two stages. [`validate_import`] inspects the raw JSON and
//! reports problems as a value (it never panics and never returns `Err`);
//! [`process_import`] then normalizes the validated data into internal
//! categories. External ids are never trusted; every imported entity gets a
//! fresh one. Missing `sortOrder`, `description`, `tags`, or timestamps fall
//! back to documented defaults. The store is only touched after both stages
//! succeed, so a failed import can never leave partial data behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Category, Item, SortOrder};

/// A complete, self-describing export of all categories and items.
/// Feeding it back through [`process_import`] reconstructs the same data,
/// field for field, modulo regenerated ids.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub categories: Vec<Category>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Serializes the store's categories into a snapshot for backup/sharing.
pub fn export_data(categories: &[Category]) -> Snapshot {
    Snapshot {
        categories: categories.to_vec(),
    }
}

/// Outcome of checking raw import data. `error` is a human-readable message
/// for the caller to display; it is always present when `valid` is false.
#[derive(Debug, Clone)]
pub struct ImportValidation {
    pub valid: bool,
    pub error: Option<String>,
}

impl ImportValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Checks that `raw` matches the snapshot schema well enough to import:
/// an object with a `categories` array, every category an object with a
/// non-empty `name` that no other category in the snapshot already uses
/// (case-insensitive, after trimming), every item with a non-empty `name`,
/// and any `sortOrder` one of the recognized policies. Malformed input
/// produces a descriptive message, never a panic.
pub fn validate_import(raw: &Value) -> ImportValidation {
    let Some(root) = raw.as_object() else {
        return ImportValidation::fail("import data must be a JSON object");
    };
    let Some(categories) = root.get("categories") else {
        return ImportValidation::fail("import data is missing a \"categories\" array");
    };
    let Some(categories) = categories.as_array() else {
        return ImportValidation::fail("\"categories\" must be an array");
    };

    let mut seen_names = HashSet::new();
    for (ci, category) in categories.iter().enumerate() {
        let n = ci + 1;
        let Some(category) = category.as_object() else {
            return ImportValidation::fail(format!("category {} is not an object", n));
        };
        match category.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {
                // Same policy the store enforces on add/rename.
                if !seen_names.insert(name.trim().to_lowercase()) {
                    return ImportValidation::fail(format!(
                        "category {} duplicates the name {:?}",
                        n,
                        name.trim()
                    ));
                }
            }
            _ => {
                return ImportValidation::fail(format!(
                    "category {} has a missing or empty name",
                    n
                ))
            }
        }
        if let Some(order) = category.get("sortOrder") {
            let recognized = order
                .as_str()
                .is_some_and(|s| s.parse::<SortOrder>().is_ok());
            if !recognized {
                return ImportValidation::fail(format!(
                    "category {} has an unrecognized sortOrder",
                    n
                ));
            }
        }
        let Some(items) = category.get("items") else {
            continue;
        };
        let Some(items) = items.as_array() else {
            return ImportValidation::fail(format!("items of category {} must be an array", n));
        };
        for (ii, item) in items.iter().enumerate() {
            let Some(item) = item.as_object() else {
                return ImportValidation::fail(format!(
                    "item {} of category {} is not an object",
                    ii + 1,
                    n
                ));
            };
            match item.get("name").and_then(Value::as_str) {
                Some(name) if !name.trim().is_empty() => {}
                _ => {
                    return ImportValidation::fail(format!(
                        "item {} of category {} has a missing or empty name",
                        ii + 1,
                        n
                    ))
                }
            }
            if let Some(description) = item.get("description") {
                if !description.is_string() {
                    return ImportValidation::fail(format!(
                        "item {} of category {} has a non-string description",
                        ii + 1,
                        n
                    ));
                }
            }
            if let Some(tags) = item.get("tags") {
                let all_strings = tags
                    .as_array()
                    .is_some_and(|tags| tags.iter().all(Value::is_string));
                if !all_strings {
                    return ImportValidation::fail(format!(
                        "item {} of category {} has tags that are not an array of strings",
                        ii + 1,
                        n
                    ));
                }
            }
        }
    }

    ImportValidation::ok()
}

/// Normalizes already-validated raw data into internal categories.
///
/// Every category and item gets a fresh id, and category names are trimmed
/// the same way `add_category` trims them. Missing `sortOrder` defaults to
/// alphabetical; missing `description`/`tags` to empty. A missing or
/// unparseable `createdAt` becomes `imported_at`; `updatedAt` falls back to
/// `created_at` and is never allowed to precede it.
pub fn process_import(raw: &Value, imported_at: DateTime<Utc>) -> Result<Vec<Category>> {
    let snapshot: RawSnapshot = serde_json::from_value(raw.clone())?;
    let categories = snapshot
        .categories
        .into_iter()
        .map(|category| Category {
            id: Uuid::new_v4(),
            name: category.name.trim().to_string(),
            sort_order: category.sort_order.unwrap_or_default(),
            items: category
                .items
                .into_iter()
                .map(|item| {
                    let created_at = item.created_at.unwrap_or(imported_at);
                    let updated_at = item.updated_at.unwrap_or(created_at).max(created_at);
                    Item {
                        id: Uuid::new_v4(),
                        name: item.name,
                        description: item.description,
                        tags: item.tags.into_iter().collect(),
                        created_at,
                        updated_at,
                    }
                })
                .collect(),
        })
        .collect();
    Ok(categories)
}

// Lenient wire shapes for import. External ids are deliberately absent:
// serde drops unknown fields, and fresh ids are minted in process_import.

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    name: String,
    #[serde(default)]
    sort_order: Option<SortOrder>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    updated_at: Option<DateTime<Utc>>,
}

// Timestamps in foreign snapshots may be absent, null, or garbage; anything
// that is not a parseable RFC 3339 string becomes None.
fn lenient_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemDraft;
    use crate::store::Store;
    use serde_json::json;

    fn sample_store() -> Store {
        let mut store = Store::new();
        let groceries = store.add_category("Groceries").unwrap().unwrap();
        store
            .add_item(
                groceries,
                ItemDraft {
                    name: "Milk".into(),
                    description: "two liters".into(),
                    tags: vec!["dairy".into(), "fridge".into()],
                },
            )
            .unwrap();
        store.update_category_sort_order(groceries, SortOrder::Newest).unwrap();
        store.add_category("Work").unwrap();
        store
    }

    #[test]
    fn validate_rejects_non_objects() {
        for raw in [json!(null), json!(42), json!("categories"), json!([])] {
            let report = validate_import(&raw);
            assert!(!report.valid);
            assert!(!report.error.unwrap().is_empty());
        }
    }

    #[test]
    fn validate_requires_a_categories_array() {
        let report = validate_import(&json!({}));
        assert!(!report.valid);
        assert!(report.error.unwrap().contains("categories"));

        let report = validate_import(&json!({ "categories": "nope" }));
        assert!(!report.valid);
    }

    #[test]
    fn validate_rejects_empty_category_name() {
        let report = validate_import(&json!({ "categories": [{ "name": "" }] }));
        assert!(!report.valid);
        let error = report.error.unwrap();
        assert!(!error.is_empty());
        assert!(error.contains("category 1"));
    }

    #[test]
    fn validate_rejects_missing_item_name() {
        let raw = json!({
            "categories": [{ "name": "Groceries", "items": [{ "description": "?" }] }]
        });
        let report = validate_import(&raw);
        assert!(!report.valid);
        assert!(report.error.unwrap().contains("item 1"));
    }

    #[test]
    fn validate_rejects_duplicate_category_names() {
        let raw = json!({
            "categories": [{ "name": "Work" }, { "name": "work" }]
        });
        let report = validate_import(&raw);
        assert!(!report.valid);
        assert!(report.error.unwrap().contains("duplicates"));

        // Trimming happens before the comparison, same as add_category.
        let raw = json!({
            "categories": [{ "name": "Work" }, { "name": "  Work " }]
        });
        assert!(!validate_import(&raw).valid);
    }

    #[test]
    fn validate_rejects_unrecognized_sort_order() {
        let raw = json!({ "categories": [{ "name": "Groceries", "sortOrder": "reverse" }] });
        let report = validate_import(&raw);
        assert!(!report.valid);
        assert!(report.error.unwrap().contains("sortOrder"));
    }

    #[test]
    fn validate_rejects_malformed_tags() {
        let raw = json!({
            "categories": [{ "name": "G", "items": [{ "name": "Milk", "tags": [1, 2] }] }]
        });
        assert!(!validate_import(&raw).valid);
    }

    #[test]
    fn validate_accepts_minimal_and_full_shapes() {
        assert!(validate_import(&json!({ "categories": [] })).valid);
        assert!(validate_import(&json!({ "categories": [{ "name": "G" }] })).valid);
        let full = json!({
            "categories": [{
                "id": "external-id",
                "name": "Groceries",
                "sortOrder": "oldest",
                "items": [{
                    "id": "also-external",
                    "name": "Milk",
                    "description": "two liters",
                    "tags": ["dairy"],
                    "createdAt": "2024-05-01T10:00:00Z",
                    "updatedAt": "2024-05-02T10:00:00Z"
                }]
            }]
        });
        assert!(validate_import(&full).valid);
    }

    #[test]
    fn process_defaults_missing_fields() {
        let imported_at = Utc::now();
        let raw = json!({ "categories": [{ "name": "Groceries", "items": [{ "name": "Milk" }] }] });
        let categories = process_import(&raw, imported_at).unwrap();

        assert_eq!(categories.len(), 1);
        let category = &categories[0];
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.sort_order, SortOrder::Alphabetical);

        let item = &category.items[0];
        assert_eq!(item.name, "Milk");
        assert_eq!(item.description, "");
        assert!(item.tags.is_empty());
        assert_eq!(item.created_at, imported_at);
        assert_eq!(item.updated_at, imported_at);
    }

    #[test]
    fn process_trims_category_names() {
        let raw = json!({ "categories": [{ "name": "  Work " }] });
        let categories = process_import(&raw, Utc::now()).unwrap();
        assert_eq!(categories[0].name, "Work");
    }

    #[test]
    fn imported_updated_at_never_precedes_created_at() {
        let imported_at = Utc::now();
        let raw = json!({
            "categories": [{
                "name": "G",
                "items": [
                    { "name": "a", "updatedAt": "2020-01-01T00:00:00Z" },
                    { "name": "b", "createdAt": "2024-05-01T10:00:00Z" }
                ]
            }]
        });
        let categories = process_import(&raw, imported_at).unwrap();

        // updatedAt alone would land before the defaulted createdAt; it is
        // pulled up to it instead.
        let a = &categories[0].items[0];
        assert_eq!(a.created_at, imported_at);
        assert_eq!(a.updated_at, a.created_at);

        // Missing updatedAt follows createdAt, not the import instant.
        let b = &categories[0].items[1];
        assert_eq!(b.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(b.updated_at, b.created_at);
    }

    #[test]
    fn process_never_trusts_external_ids() {
        let raw = json!({
            "categories": [{
                "id": "11111111-1111-1111-1111-111111111111",
                "name": "Groceries",
                "items": [{ "id": "not-even-a-uuid", "name": "Milk" }]
            }]
        });
        let categories = process_import(&raw, Utc::now()).unwrap();
        let forbidden: Uuid = "11111111-1111-1111-1111-111111111111".parse().unwrap();
        assert_ne!(categories[0].id, forbidden);
    }

    #[test]
    fn process_tolerates_garbage_timestamps() {
        let imported_at = Utc::now();
        let raw = json!({
            "categories": [{
                "name": "G",
                "items": [
                    { "name": "a", "createdAt": "not a date", "updatedAt": null },
                    { "name": "b", "createdAt": 12345 }
                ]
            }]
        });
        let categories = process_import(&raw, imported_at).unwrap();
        for item in &categories[0].items {
            assert_eq!(item.created_at, imported_at);
            assert_eq!(item.updated_at, imported_at);
        }
    }

    #[test]
    fn process_preserves_supplied_timestamps() {
        let raw = json!({
            "categories": [{
                "name": "G",
                "items": [{
                    "name": "Milk",
                    "createdAt": "2024-05-01T10:00:00Z",
                    "updatedAt": "2024-05-02T11:30:00Z"
                }]
            }]
        });
        let categories = process_import(&raw, Utc::now()).unwrap();
        let item = &categories[0].items[0];
        assert_eq!(item.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(item.updated_at.to_rfc3339(), "2024-05-02T11:30:00+00:00");
    }

    #[test]
    fn export_uses_the_wire_field_names() {
        let store = sample_store();
        let value = export_data(store.categories()).to_value().unwrap();
        let category = &value["categories"][0];
        assert_eq!(category["name"], "Groceries");
        assert_eq!(category["sortOrder"], "newest");
        let item = &category["items"][0];
        assert_eq!(item["name"], "Milk");
        assert_eq!(item["tags"], json!(["dairy", "fridge"]));
        assert!(item["createdAt"].is_string());
        assert!(item["updatedAt"].is_string());
    }

    #[test]
    fn export_import_round_trip_preserves_fields() {
        let store = sample_store();
        let exported = export_data(store.categories()).to_value().unwrap();

        let report = validate_import(&exported);
        assert!(report.valid, "own exports must validate: {:?}", report.error);

        let reimported = process_import(&exported, Utc::now()).unwrap();
        assert_eq!(reimported.len(), store.categories().len());
        for (original, copy) in store.categories().iter().zip(&reimported) {
            assert_eq!(original.name, copy.name);
            assert_eq!(original.sort_order, copy.sort_order);
            assert_ne!(original.id, copy.id);
            assert_eq!(original.items.len(), copy.items.len());
            for (a, b) in original.items.iter().zip(&copy.items) {
                assert_eq!(a.name, b.name);
                assert_eq!(a.description, b.description);
                assert_eq!(a.tags, b.tags);
                assert_eq!(a.created_at, b.created_at);
                assert_eq!(a.updated_at, b.updated_at);
                assert_ne!(a.id, b.id);
            }
        }
    }
}
