//! Error types for markup conversion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("element is not a table: <{0}>")]
    NotATable(String),

    #[error(transparent)]
    Model(#[from] doc_model::DocModelError),
}

pub type Result<T> = std::result::Result<T, MarkupError>;
