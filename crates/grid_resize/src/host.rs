//! Capabilities the host editor provides to the resize engine
//!
//! The engine never touches the screen itself: it reads on-screen boxes
//! through [`CellGeometry`] and asks for pointer capture through
//! [`PointerCapture`]. Both are narrow by design; a missing rect or a
//! refused capture degrades the interaction, never fails it.

use crate::Rect;
use doc_model::NodeId;

/// On-screen box lookup by node ID
pub trait CellGeometry {
    /// The rendered box of a table cell, if it is currently on screen
    fn cell_rect(&self, cell_id: NodeId) -> Option<Rect>;

    /// The rendered box of a table, if it is currently on screen
    fn table_rect(&self, table_id: NodeId) -> Option<Rect>;
}

/// Pointer capture during a drag. Returning `false` means capture was not
/// grantable; the drag proceeds without it.
pub trait PointerCapture {
    fn capture(&mut self) -> bool;
    fn release(&mut self);
}

/// Capture stub for hosts (and tests) without a pointer capture facility
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&mut self) -> bool {
        false
    }

    fn release(&mut self) {}
}
