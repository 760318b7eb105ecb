//! End-to-end exercise of the facade: build up a dataset, export it, wipe
//! everything, import the snapshot back, and check nothing of substance was
//! lost along the way.

use notestash::api::NoteStashApi;
use notestash::model::{ItemDraft, ItemPatch, SortOrder};

fn draft(name: &str, description: &str, tags: &[&str]) -> ItemDraft {
    ItemDraft {
        name: name.into(),
        description: description.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn full_lifecycle_survives_an_export_import_round_trip() {
    let mut api = NoteStashApi::new();

    // Blank names do nothing.
    assert!(api.add_category("").unwrap().is_none());
    assert!(api.add_category("   ").unwrap().is_none());
    assert!(api.categories().is_empty());

    let groceries = api.add_category("  Groceries ").unwrap().unwrap();
    let work = api.add_category("Work").unwrap().unwrap();

    let milk = api
        .add_item(groceries, draft("Milk", "two liters", &["dairy", "fridge"]))
        .unwrap();
    api.add_item(groceries, draft("Bread", "whole grain", &["bakery"]))
        .unwrap();
    api.add_item(work, draft("Standup notes", "daily", &["meeting"]))
        .unwrap();

    api.update_category_sort_order(groceries, SortOrder::Oldest)
        .unwrap();

    // An edit moves updated_at but never created_at.
    let before = api.store().item(milk).unwrap().clone();
    api.edit_item(
        milk,
        ItemPatch {
            description: Some("three liters".into()),
            ..Default::default()
        },
    )
    .unwrap();
    let after = api.store().item(milk).unwrap().clone();
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);

    let exported = api.export().to_value().unwrap();

    // Wipe and restore.
    api.clear_all_data();
    assert!(api.categories().is_empty());
    let count = api.import(&exported).unwrap();
    assert_eq!(count, 2);

    let restored: Vec<&str> = api.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(restored, vec!["Groceries", "Work"]);

    let restored_groceries = &api.categories()[0];
    assert_eq!(restored_groceries.sort_order, SortOrder::Oldest);
    assert_ne!(restored_groceries.id, groceries);

    let restored_milk = restored_groceries
        .items
        .iter()
        .find(|i| i.name == "Milk")
        .unwrap();
    assert_eq!(restored_milk.description, "three liters");
    assert!(restored_milk.has_tag("dairy"));
    assert!(restored_milk.has_tag("fridge"));
    assert_eq!(restored_milk.created_at, after.created_at);
    assert_eq!(restored_milk.updated_at, after.updated_at);
    assert_ne!(restored_milk.id, milk);

    // Listing still works against the restored data.
    let id = restored_groceries.id;
    let listed = api.list_items(id, Some("dairy"), "liters");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Milk");

    // Deleting a category takes its items with it.
    api.delete_category(id).unwrap();
    assert!(api.list_items(id, None, "").is_empty());
    assert!(api
        .categories()
        .iter()
        .all(|c| c.items.iter().all(|i| i.name != "Milk")));
}
