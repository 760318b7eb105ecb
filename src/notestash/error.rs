use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NoteStashError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NoteStashError>;
