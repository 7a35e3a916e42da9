//! Table grid resizing - pointer-driven column/row/table resize with
//! deferred commit
//!
//! A drag is an explicit [`ResizeSession`] value advanced by the
//! [`ResizeEngine`]: pointer-down near a cell edge opens a session,
//! pointer moves update previews (coalesced to one per frame), and every
//! termination path commits the final sizes into the document model's
//! styles. Merged cells are normalized away before a session starts.

mod engine;
mod error;
mod geometry;
mod host;
mod normalize;
mod session;
mod structure;

pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use normalize::*;
pub use session::*;
pub use structure::*;
