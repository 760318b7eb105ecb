use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::NoteStashError;

/// Default presentation order for a category's items.
///
/// This is a closed set: anything else is rejected at the parse boundary
/// ([`SortOrder::from_str`]) so an unrecognized policy can never be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Alphabetical,
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Alphabetical => "alphabetical",
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = NoteStashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetical" => Ok(SortOrder::Alphabetical),
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(NoteStashError::Validation(format!(
                "unrecognized sort order: {:?}",
                other
            ))),
        }
    }
}

/// A single note-like record. `created_at` is fixed at creation and is the
/// only field temporal sorting looks at; `updated_at` moves on every edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    // Set semantics: re-adding an existing tag is a no-op, comparison is
    // case-sensitive.
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        name: String,
        description: String,
        tags: impl IntoIterator<Item = String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            tags: tags.into_iter().collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// A named grouping of items with a default sort policy. Items keep their
/// insertion order; `sort_order` only shapes what readers are shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub sort_order: SortOrder,
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            sort_order: SortOrder::default(),
            items: Vec::new(),
        }
    }

    /// Distinct tags across all items, sorted. Feeds the tag dropdown.
    pub fn tags(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.items.iter().flat_map(|i| i.tags.iter()).collect();
        set.into_iter().cloned().collect()
    }
}

/// Input for creating an item.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Partial update for an existing item. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}
