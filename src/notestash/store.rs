//! # Category/Item Store
//!
//! The [`Store`] owns the canonical in-memory collection of categories and
//! their items, and is the only component that mutates them. Everything else
//! (search, sort, export) reads through `&` views or works on copies.
//!
//! ## Contract
//!
//! - Mutations are synchronous: a read immediately after a write observes
//!   the write.
//! - Blank names (after trimming) on add/rename are silent no-ops, encoded
//!   in the return type rather than as errors.
//! - Duplicate category names are rejected case-insensitively.
//! - Missing ids surface as `CategoryNotFound` / `ItemNotFound`; the store
//!   is left untouched on any failure.
//! - Selection ("which category is open") is presentation state and lives
//!   with the caller; after `delete_category` the caller clears it.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{NoteStashError, Result};
use crate::model::{Category, Item, ItemDraft, ItemPatch, SortOrder};

#[derive(Debug, Default)]
pub struct Store {
    categories: Vec<Category>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// All categories, in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: Uuid) -> Option<&Item> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|i| i.id == id)
    }

    /// Creates an empty category with the default sort order.
    ///
    /// Returns `Ok(None)` without touching the store when the trimmed name
    /// is blank; rejects a name already in use (case-insensitive).
    pub fn add_category(&mut self, name: &str) -> Result<Option<Uuid>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.ensure_name_free(name, None)?;
        let category = Category::new(name.to_string());
        let id = category.id;
        self.categories.push(category);
        Ok(Some(id))
    }

    /// Renames a category in place, preserving id, items, and sort order.
    /// Returns `Ok(false)` (no-op) when the trimmed name is blank.
    pub fn rename_category(&mut self, id: Uuid, new_name: &str) -> Result<bool> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(false);
        }
        if self.category(id).is_none() {
            return Err(NoteStashError::CategoryNotFound(id));
        }
        self.ensure_name_free(new_name, Some(id))?;
        let category = self.category_mut(id)?;
        category.name = new_name.to_string();
        Ok(true)
    }

    /// Removes the category and every item it holds. Irrecoverable.
    pub fn delete_category(&mut self, id: Uuid) -> Result<Category> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(NoteStashError::CategoryNotFound(id))?;
        Ok(self.categories.remove(pos))
    }

    /// Creates an item under the category with a fresh id and
    /// `created_at = updated_at = now`, appended after existing items.
    pub fn add_item(&mut self, category_id: Uuid, draft: ItemDraft) -> Result<Uuid> {
        let category = self.category_mut(category_id)?;
        let item = Item::new(draft.name, draft.description, draft.tags);
        let id = item.id;
        category.items.push(item);
        Ok(id)
    }

    /// Merges the present fields of `patch` into the item and refreshes
    /// `updated_at`. `created_at` is never touched.
    pub fn edit_item(&mut self, item_id: Uuid, patch: ItemPatch) -> Result<()> {
        let item = self.item_mut(item_id)?;
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(tags) = patch.tags {
            item.tags = tags.into_iter().collect();
        }
        item.updated_at = Utc::now();
        Ok(())
    }

    /// Removes the item from its owning category and returns it.
    pub fn delete_item(&mut self, item_id: Uuid) -> Result<Item> {
        for category in &mut self.categories {
            if let Some(pos) = category.items.iter().position(|i| i.id == item_id) {
                return Ok(category.items.remove(pos));
            }
        }
        Err(NoteStashError::ItemNotFound(item_id))
    }

    /// Sets the category's default presentation order. `SortOrder` is a
    /// closed enum, so unrecognized policies are rejected upstream at the
    /// parse boundary and can never arrive here.
    pub fn update_category_sort_order(&mut self, id: Uuid, order: SortOrder) -> Result<()> {
        self.category_mut(id)?.sort_order = order;
        Ok(())
    }

    /// Distinct tags across the category's items, sorted.
    pub fn tags_for(&self, category_id: Uuid) -> Result<Vec<String>> {
        self.category(category_id)
            .map(Category::tags)
            .ok_or(NoteStashError::CategoryNotFound(category_id))
    }

    /// Resets the store to an empty collection. Destructive, irreversible.
    pub fn clear_all_data(&mut self) {
        self.categories.clear();
    }

    /// Replaces the whole collection with already-normalized categories.
    /// Only called after snapshot validation and transformation succeed.
    pub fn import_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    fn category_mut(&mut self, id: Uuid) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(NoteStashError::CategoryNotFound(id))
    }

    fn item_mut(&mut self, id: Uuid) -> Result<&mut Item> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.items.iter_mut())
            .find(|i| i.id == id)
            .ok_or(NoteStashError::ItemNotFound(id))
    }

    fn ensure_name_free(&self, name: &str, excluding: Option<Uuid>) -> Result<()> {
        let lowered = name.to_lowercase();
        let taken = self
            .categories
            .iter()
            .any(|c| Some(c.id) != excluding && c.name.to_lowercase() == lowered);
        if taken {
            return Err(NoteStashError::Validation(format!(
                "a category named {:?} already exists",
                name
            )));
        }
        Ok(())
    }
}
