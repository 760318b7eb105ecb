//! # Notestash Architecture
//!
//! Notestash is a **UI-agnostic note-organizing library**: categories hold
//! tagged items, and the library owns everything with real logic in such an
//! app: CRUD, natural-order and temporal sorting, tag and free-text search,
//! and snapshot export/import with validation. Screens, modals, navigation,
//! and persistence are clients of this crate, never part of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (external)                                    │
//! │  - Renders lists, owns selection state, confirms deletes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - Single entry point: CRUD, list_items, import, export     │
//! │  - Returns structured Result types, never panics            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Operations (store.rs, search.rs, sort.rs, snapshot.rs)     │
//! │  - Store: the only mutator of categories and items          │
//! │  - search/sort: pure functions over read views              │
//! │  - snapshot: validate → normalize → (de)serialize           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing in this crate touches the filesystem, the network, or a terminal.
//! Export produces a fully computed [`snapshot::Snapshot`]; whoever writes or
//! shares it is an external collaborator. Import takes an already-parsed
//! [`serde_json::Value`]; nothing is applied to the store unless validation
//! and normalization both succeed.
//!
//! ## Ownership Model
//!
//! [`store::Store`] exclusively owns all [`model::Category`] and
//! [`model::Item`] values. Consumers get `&` views or owned copies; the sort
//! and search paths return fresh `Vec<Item>` so a render can never alias a
//! pending mutation.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`store`]: canonical in-memory collection, CRUD and reordering
//! - [`search`]: tag and free-text narrowing
//! - [`sort`]: natural-order comparator and the three sort policies
//! - [`snapshot`]: import validation/normalization and export
//! - [`model`]: core data types (`Category`, `Item`, `SortOrder`)
//! - [`error`]: error types

pub mod api;
pub mod error;
pub mod model;
pub mod search;
pub mod snapshot;
pub mod sort;
pub mod store;
