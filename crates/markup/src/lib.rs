//! Markup conversion - external markup in, document model, sanitized markup out
//!
//! This crate converts between external markup (pasted HTML-like trees or
//! tab-delimited spreadsheet text) and the internal document model, and
//! serializes the model back to sanitized markup. Style precedence is
//! resolved through a CSS-like cascade with last-wins merging.

mod cascade;
mod element;
mod error;
mod export;
mod import;
mod presets;
mod sanitize;

pub use cascade::*;
pub use element::*;
pub use error::*;
pub use export::*;
pub use import::*;
pub use presets::*;
pub use sanitize::*;
