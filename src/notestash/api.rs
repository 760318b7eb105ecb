//! # API Facade
//!
//! [`NoteStashApi`] is the single entry point a UI needs: it owns the
//! [`Store`] and exposes CRUD, listing (filter + sort), and snapshot
//! import/export. It is a thin facade in the strict sense: inputs are
//! normalized here, work happens in the operation modules, and every method
//! returns structured values for the presentation layer to render. No
//! stdout, no files, no panics.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{NoteStashError, Result};
use crate::model::{Category, Item, ItemDraft, ItemPatch, SortOrder};
use crate::search::filter_and_sort;
use crate::snapshot::{export_data, process_import, validate_import, Snapshot};
use crate::store::Store;

#[derive(Debug, Default)]
pub struct NoteStashApi {
    store: Store,
}

impl NoteStashApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// Read view of the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn categories(&self) -> &[Category] {
        self.store.categories()
    }

    pub fn add_category(&mut self, name: &str) -> Result<Option<Uuid>> {
        self.store.add_category(name)
    }

    pub fn rename_category(&mut self, id: Uuid, new_name: &str) -> Result<bool> {
        self.store.rename_category(id, new_name)
    }

    pub fn delete_category(&mut self, id: Uuid) -> Result<Category> {
        self.store.delete_category(id)
    }

    pub fn add_item(&mut self, category_id: Uuid, draft: ItemDraft) -> Result<Uuid> {
        self.store.add_item(category_id, draft)
    }

    pub fn edit_item(&mut self, item_id: Uuid, patch: ItemPatch) -> Result<()> {
        self.store.edit_item(item_id, patch)
    }

    pub fn delete_item(&mut self, item_id: Uuid) -> Result<Item> {
        self.store.delete_item(item_id)
    }

    pub fn update_category_sort_order(&mut self, id: Uuid, order: SortOrder) -> Result<()> {
        self.store.update_category_sort_order(id, order)
    }

    pub fn tags_for(&self, category_id: Uuid) -> Result<Vec<String>> {
        self.store.tags_for(category_id)
    }

    pub fn clear_all_data(&mut self) {
        self.store.clear_all_data()
    }

    /// The list a screen renders: the category's items narrowed by tag and
    /// query, ordered by the category's sort policy. An unknown category id
    /// yields an empty list, matching "nothing selected, nothing shown".
    pub fn list_items(&self, category_id: Uuid, tag_filter: Option<&str>, query: &str) -> Vec<Item> {
        filter_and_sort(self.store.category(category_id), tag_filter, query)
    }

    /// Validates and normalizes `raw`, then replaces the store's contents.
    /// Returns the number of imported categories. On any failure the store
    /// is untouched and the error message is ready to show the user.
    pub fn import(&mut self, raw: &Value) -> Result<usize> {
        let report = validate_import(raw);
        if !report.valid {
            let message = report
                .error
                .unwrap_or_else(|| "invalid import data".to_string());
            return Err(NoteStashError::Validation(message));
        }
        let categories = process_import(raw, Utc::now())?;
        let count = categories.len();
        self.store.import_categories(categories);
        Ok(count)
    }

    /// A fully computed snapshot of everything, ready for an external
    /// collaborator to persist or share.
    pub fn export(&self) -> Snapshot {
        export_data(self.store.categories())
    }
}
