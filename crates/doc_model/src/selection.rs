//! Cell selection - the focused table position structural edits act on
//!
//! The host's selection listener resolves the current selection to a table
//! key plus row/column indices; this crate only consumes that triple.

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// The currently focused cell inside a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSelection {
    /// The table containing the focused cell
    pub table_id: NodeId,
    /// Row index of the focused cell
    pub row_index: usize,
    /// Column index of the focused cell
    pub col_index: usize,
}

impl CellSelection {
    /// Create a selection at a table position
    pub fn new(table_id: NodeId, row_index: usize, col_index: usize) -> Self {
        Self {
            table_id,
            row_index,
            col_index,
        }
    }
}
