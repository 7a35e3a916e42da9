//! Resize session state - the in-progress drag as plain data
//!
//! A session records, at pointer-down, the initial pointer position and the
//! initial size of every affected node. Pointer moves only recompute the
//! preview sizes; nothing touches the document model until commit.

use crate::Point;
use doc_model::NodeId;

/// Minimum committed column width in pixels
pub const MIN_COLUMN_WIDTH: f64 = 40.0;
/// Minimum committed row height in pixels
pub const MIN_ROW_HEIGHT: f64 = 24.0;
/// Minimum committed table width in pixels
pub const MIN_TABLE_WIDTH: f64 = 100.0;
/// Minimum committed table height in pixels
pub const MIN_TABLE_HEIGHT: f64 = 40.0;

/// One resized node: its identity, size at pointer-down, and current preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTarget {
    pub cell_id: NodeId,
    pub initial: f64,
    pub preview: f64,
}

impl ResizeTarget {
    pub fn new(cell_id: NodeId, initial: f64) -> Self {
        Self {
            cell_id,
            initial,
            preview: initial,
        }
    }
}

/// What one axis of the drag resizes
#[derive(Debug, Clone, PartialEq)]
pub enum AxisTarget {
    /// Every cell of one column, resized in width
    Column { index: usize, cells: Vec<ResizeTarget> },
    /// Every cell of one row, resized in height; the row node itself gets
    /// the same height at commit
    Row {
        index: usize,
        row_id: NodeId,
        cells: Vec<ResizeTarget>,
    },
    /// The table's own width
    TableWidth { initial: f64, preview: f64 },
    /// The table's own height
    TableHeight { initial: f64, preview: f64 },
}

impl AxisTarget {
    fn minimum(&self) -> f64 {
        match self {
            AxisTarget::Column { .. } => MIN_COLUMN_WIDTH,
            AxisTarget::Row { .. } => MIN_ROW_HEIGHT,
            AxisTarget::TableWidth { .. } => MIN_TABLE_WIDTH,
            AxisTarget::TableHeight { .. } => MIN_TABLE_HEIGHT,
        }
    }

    /// Recompute previews for a pointer delta along this axis
    pub fn apply_delta(&mut self, delta: f64) {
        let min = self.minimum();
        match self {
            AxisTarget::Column { cells, .. } | AxisTarget::Row { cells, .. } => {
                for target in cells {
                    target.preview = (target.initial + delta).round().max(min);
                }
            }
            AxisTarget::TableWidth { initial, preview }
            | AxisTarget::TableHeight { initial, preview } => {
                *preview = (*initial + delta).round().max(min);
            }
        }
    }
}

/// An in-progress drag. Created at pointer-down, consumed at commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub table_id: NodeId,
    /// Pointer position at pointer-down
    pub origin: Point,
    /// Horizontal work: a column or the table width
    pub x_axis: Option<AxisTarget>,
    /// Vertical work: a row or the table height
    pub y_axis: Option<AxisTarget>,
}

impl ResizeSession {
    /// Recompute all previews for a new pointer position
    pub fn update(&mut self, point: Point) {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;
        if let Some(axis) = &mut self.x_axis {
            axis.apply_delta(dx);
        }
        if let Some(axis) = &mut self.y_axis {
            axis.apply_delta(dy);
        }
    }

    /// Whether the drag resizes the table's own box on either axis
    pub fn is_whole_table(&self) -> bool {
        matches!(self.x_axis, Some(AxisTarget::TableWidth { .. }))
            || matches!(self.y_axis, Some(AxisTarget::TableHeight { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_preview_rounds_and_clamps() {
        let mut axis = AxisTarget::Column {
            index: 0,
            cells: vec![ResizeTarget::new(NodeId::new(), 100.0)],
        };
        axis.apply_delta(50.4);
        match &axis {
            AxisTarget::Column { cells, .. } => assert_eq!(cells[0].preview, 150.0),
            _ => unreachable!(),
        }
        axis.apply_delta(-200.0);
        match &axis {
            AxisTarget::Column { cells, .. } => assert_eq!(cells[0].preview, MIN_COLUMN_WIDTH),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_table_height_minimum() {
        let mut axis = AxisTarget::TableHeight {
            initial: 60.0,
            preview: 60.0,
        };
        axis.apply_delta(-100.0);
        match axis {
            AxisTarget::TableHeight { preview, .. } => assert_eq!(preview, MIN_TABLE_HEIGHT),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_session_update_both_axes() {
        let cell = NodeId::new();
        let mut session = ResizeSession {
            table_id: NodeId::new(),
            origin: Point::new(10.0, 20.0),
            x_axis: Some(AxisTarget::Column {
                index: 1,
                cells: vec![ResizeTarget::new(cell, 80.0)],
            }),
            y_axis: Some(AxisTarget::Row {
                index: 0,
                row_id: NodeId::new(),
                cells: vec![ResizeTarget::new(cell, 30.0)],
            }),
        };
        session.update(Point::new(40.0, 25.0));
        match session.x_axis.as_ref().unwrap() {
            AxisTarget::Column { cells, .. } => assert_eq!(cells[0].preview, 110.0),
            _ => unreachable!(),
        }
        match session.y_axis.as_ref().unwrap() {
            AxisTarget::Row { cells, .. } => assert_eq!(cells[0].preview, 35.0),
            _ => unreachable!(),
        }
    }
}
