//! Error types for structural table edits

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridResizeError {
    #[error("selection does not resolve to a table position")]
    InvalidSelection,

    #[error(transparent)]
    Model(#[from] doc_model::DocModelError),
}

pub type Result<T> = std::result::Result<T, GridResizeError>;
