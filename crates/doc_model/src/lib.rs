//! Document Model - Core document tree structure and types
//!
//! This crate provides the foundational document model for the rich-text
//! extension layer, implementing an arena-backed tree with stable node IDs
//! and per-node inline style strings.

mod node;
mod node_id;
mod block;
mod inline;
mod image;
mod selection;
mod tree;
mod error;
pub mod style;
pub mod table;

pub use node::*;
pub use node_id::*;
pub use block::*;
pub use inline::*;
pub use image::*;
pub use selection::*;
pub use tree::*;
pub use error::*;
pub use style::*;
pub use table::*;
