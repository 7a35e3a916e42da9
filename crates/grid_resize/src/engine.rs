//! The drag state machine: Idle -> Dragging -> Idle
//!
//! All five termination paths (pointer-up, pointer-cancel, capture loss,
//! window blur, page hidden) funnel into the same commit-and-reset routine;
//! a drag is never discarded. Pointer moves are coalesced: the host calls
//! [`ResizeEngine::on_frame`] once per animation frame and only the latest
//! move is applied.

use crate::{
    hit_edges, normalize_merged_cells, AxisTarget, CellGeometry, Point, PointerCapture,
    ResizeCursor, ResizeSession, ResizeTarget, EDGE_MARGIN,
};
use doc_model::{set_style_prop, DocumentTree, NodeId};
use tracing::{debug, warn};

/// Pointer-driven column/row/table resizing over a document tree
#[derive(Debug, Default)]
pub struct ResizeEngine {
    session: Option<ResizeSession>,
    pending_move: Option<Point>,
}

impl ResizeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag session is open
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, for preview rendering
    pub fn session(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    /// Cursor to show while hovering, before any drag starts
    pub fn hover_cursor<G: CellGeometry>(
        &self,
        geometry: &G,
        cell_id: NodeId,
        point: Point,
    ) -> Option<ResizeCursor> {
        if self.session.is_some() {
            return None;
        }
        let rect = geometry.cell_rect(cell_id)?;
        ResizeCursor::from_hits(hit_edges(point, rect))
    }

    /// Pointer-down over a cell. Opens a session when the pointer is within
    /// the edge margin of a resizable edge; returns whether a drag started.
    ///
    /// Whole-table resize wins on an axis only when the hit cell is the
    /// trailing cell of that axis and the pointer is also within the edge
    /// margin of the table's own boundary.
    pub fn begin_drag<G: CellGeometry, C: PointerCapture>(
        &mut self,
        tree: &mut DocumentTree,
        geometry: &G,
        capture: &mut C,
        cell_id: NodeId,
        point: Point,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(cell_rect) = geometry.cell_rect(cell_id) else {
            return false;
        };
        let hits = hit_edges(point, cell_rect);
        if !hits.any() {
            return false;
        }
        let Some(table_id) = tree.find_table_for_node(cell_id) else {
            return false;
        };
        let Some(table_rect) = geometry.table_rect(table_id) else {
            return false;
        };

        // Merged cells are incompatible with independent per-column resize.
        normalize_merged_cells(tree, table_id);

        let Some((row_index, col_index)) = tree.cell_position(cell_id) else {
            return false;
        };
        let row_count = tree.get_table(table_id).map(|t| t.row_count()).unwrap_or(0);
        let col_count = tree.row_cells(table_id, row_index).len();

        let x_axis = if hits.right {
            let trailing = col_index + 1 == col_count;
            let near_table_edge = (table_rect.right() - point.x).abs() <= EDGE_MARGIN;
            if trailing && near_table_edge {
                Some(AxisTarget::TableWidth {
                    initial: table_rect.width,
                    preview: table_rect.width,
                })
            } else {
                column_axis(tree, geometry, table_id, col_index)
            }
        } else if hits.left {
            // First column has no previous neighbor; its left edge resizes
            // the column itself.
            column_axis(tree, geometry, table_id, col_index.saturating_sub(1))
        } else {
            None
        };

        let y_axis = if hits.bottom {
            let trailing = row_index + 1 == row_count;
            let near_table_edge = (table_rect.bottom() - point.y).abs() <= EDGE_MARGIN;
            if trailing && near_table_edge {
                Some(AxisTarget::TableHeight {
                    initial: table_rect.height,
                    preview: table_rect.height,
                })
            } else {
                row_axis(tree, geometry, table_id, row_index)
            }
        } else if hits.top {
            row_axis(tree, geometry, table_id, row_index.saturating_sub(1))
        } else {
            None
        };

        if x_axis.is_none() && y_axis.is_none() {
            return false;
        }

        if !capture.capture() {
            warn!("pointer capture unavailable; dragging without capture");
        }

        self.session = Some(ResizeSession {
            table_id,
            origin: point,
            x_axis,
            y_axis,
        });
        self.pending_move = None;
        true
    }

    /// Record a pointer move. Replaces any move not yet applied; the host
    /// applies the latest one via [`ResizeEngine::on_frame`].
    pub fn pointer_move(&mut self, point: Point) {
        if self.session.is_some() {
            self.pending_move = Some(point);
        }
    }

    /// Apply the pending pointer move, once per animation frame. Returns
    /// the session with fresh previews when anything changed.
    pub fn on_frame(&mut self) -> Option<&ResizeSession> {
        let point = self.pending_move.take()?;
        self.session.as_mut()?.update(point);
        self.session.as_ref()
    }

    /// Pointer released: commit and reset
    pub fn pointer_up<C: PointerCapture>(&mut self, tree: &mut DocumentTree, capture: &mut C) {
        self.finish(tree, capture);
    }

    /// Pointer cancelled by the host: commit and reset
    pub fn pointer_cancel<C: PointerCapture>(&mut self, tree: &mut DocumentTree, capture: &mut C) {
        self.finish(tree, capture);
    }

    /// Pointer capture lost: commit and reset
    pub fn capture_lost<C: PointerCapture>(&mut self, tree: &mut DocumentTree, capture: &mut C) {
        self.finish(tree, capture);
    }

    /// Window lost focus: commit and reset
    pub fn window_blur<C: PointerCapture>(&mut self, tree: &mut DocumentTree, capture: &mut C) {
        self.finish(tree, capture);
    }

    /// Page became hidden: commit and reset
    pub fn page_hidden<C: PointerCapture>(&mut self, tree: &mut DocumentTree, capture: &mut C) {
        self.finish(tree, capture);
    }

    fn finish<C: PointerCapture>(&mut self, tree: &mut DocumentTree, capture: &mut C) {
        let Some(mut session) = self.session.take() else {
            self.pending_move = None;
            return;
        };
        if let Some(point) = self.pending_move.take() {
            session.update(point);
        }
        commit_session(tree, &session);
        capture.release();
    }
}

fn column_axis<G: CellGeometry>(
    tree: &DocumentTree,
    geometry: &G,
    table_id: NodeId,
    index: usize,
) -> Option<AxisTarget> {
    let cells: Vec<ResizeTarget> = tree
        .column_cells(table_id, index)
        .into_iter()
        .filter_map(|id| geometry.cell_rect(id).map(|r| ResizeTarget::new(id, r.width)))
        .collect();
    (!cells.is_empty()).then_some(AxisTarget::Column { index, cells })
}

fn row_axis<G: CellGeometry>(
    tree: &DocumentTree,
    geometry: &G,
    table_id: NodeId,
    index: usize,
) -> Option<AxisTarget> {
    let row_id = tree.get_table(table_id)?.row_at(index)?;
    let cells: Vec<ResizeTarget> = tree
        .row_cells(table_id, index)
        .into_iter()
        .filter_map(|id| geometry.cell_rect(id).map(|r| ResizeTarget::new(id, r.height)))
        .collect();
    (!cells.is_empty()).then_some(AxisTarget::Row {
        index,
        row_id,
        cells,
    })
}

fn commit_session(tree: &mut DocumentTree, session: &ResizeSession) {
    if tree.get_table(session.table_id).is_none() {
        debug!("resize commit skipped; table no longer in document");
        return;
    }
    if let Some(axis) = &session.x_axis {
        commit_axis(tree, session.table_id, axis);
    }
    if let Some(axis) = &session.y_axis {
        commit_axis(tree, session.table_id, axis);
    }
}

fn commit_axis(tree: &mut DocumentTree, table_id: NodeId, axis: &AxisTarget) {
    match axis {
        AxisTarget::Column { cells, .. } => {
            for target in cells {
                if let Some(cell) = tree.get_table_cell_mut(target.cell_id) {
                    cell.style = upsert_size(&cell.style, "width", "min-width", target.preview);
                }
            }
        }
        AxisTarget::Row { row_id, cells, .. } => {
            for target in cells {
                if let Some(cell) = tree.get_table_cell_mut(target.cell_id) {
                    cell.style = upsert_size(&cell.style, "height", "min-height", target.preview);
                }
            }
            let committed = cells.iter().map(|t| t.preview).fold(0.0_f64, f64::max);
            if committed > 0.0 {
                if let Some(row) = tree.get_table_row_mut(*row_id) {
                    // Rows carry only a fixed height; the minimum lives on
                    // the cells.
                    let px = format!("{}px", committed as i64);
                    row.style = set_style_prop(&row.style, "height", Some(&px));
                    row.height = Some(committed as u32);
                }
            }
        }
        AxisTarget::TableWidth { preview, .. } => {
            if let Some(table) = tree.get_table_mut(table_id) {
                table.style = upsert_size(&table.style, "width", "min-width", *preview);
            }
        }
        AxisTarget::TableHeight { preview, .. } => {
            if let Some(table) = tree.get_table_mut(table_id) {
                table.style = upsert_size(&table.style, "height", "min-height", *preview);
            }
        }
    }
}

fn upsert_size(style: &str, prop: &str, min_prop: &str, size: f64) -> String {
    let px = format!("{}px", size as i64);
    set_style_prop(&set_style_prop(style, prop, Some(&px)), min_prop, Some(&px))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use doc_model::{Paragraph, Table, TableCell, TableRow};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockGeometry {
        cells: HashMap<NodeId, Rect>,
        tables: HashMap<NodeId, Rect>,
    }

    impl CellGeometry for MockGeometry {
        fn cell_rect(&self, cell_id: NodeId) -> Option<Rect> {
            self.cells.get(&cell_id).copied()
        }

        fn table_rect(&self, table_id: NodeId) -> Option<Rect> {
            self.tables.get(&table_id).copied()
        }
    }

    #[derive(Default)]
    struct RecordingCapture {
        grant: bool,
        released: bool,
    }

    impl PointerCapture for RecordingCapture {
        fn capture(&mut self) -> bool {
            self.grant
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    /// 2x2 table; cells are 100x30, laid out from the origin
    fn fixture() -> (DocumentTree, MockGeometry, NodeId) {
        let mut tree = DocumentTree::new();
        let table_id = tree.insert_table(Table::new(), None);
        let mut geometry = MockGeometry::default();
        geometry.tables.insert(table_id, Rect::new(0.0, 0.0, 200.0, 60.0));

        for r in 0..2 {
            let row_id = tree.insert_table_row(TableRow::new(), table_id, None).unwrap();
            for c in 0..2 {
                let cell_id = tree
                    .insert_table_cell(TableCell::new(), row_id, None)
                    .unwrap();
                tree.insert_paragraph_into_cell(Paragraph::new(), cell_id, None)
                    .unwrap();
                geometry.cells.insert(
                    cell_id,
                    Rect::new(c as f64 * 100.0, r as f64 * 30.0, 100.0, 30.0),
                );
            }
        }
        (tree, geometry, table_id)
    }

    #[test]
    fn test_column_drag_commits_width_and_preserves_style() {
        let (mut tree, geometry, table_id) = fixture();
        let dragged = tree.cell_at(table_id, 0, 0).unwrap();
        tree.get_table_cell_mut(dragged).unwrap().style = "color: red".to_string();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, dragged, Point::new(98.0, 15.0)));

        engine.pointer_move(Point::new(148.0, 15.0));
        assert!(engine.on_frame().is_some());
        engine.pointer_up(&mut tree, &mut capture);

        let style = &tree.get_table_cell(dragged).unwrap().style;
        assert!(style.contains("color: red"));
        assert!(style.contains("width: 150px"));
        assert!(style.contains("min-width: 150px"));

        // Both cells of the column committed.
        let below = tree.cell_at(table_id, 1, 0).unwrap();
        assert!(tree.get_table_cell(below).unwrap().style.contains("width: 150px"));

        assert!(capture.released);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_corner_drag_on_trailing_cell_resizes_table_only() {
        let (mut tree, geometry, table_id) = fixture();
        let corner_cell = tree.cell_at(table_id, 1, 1).unwrap();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(
            &mut tree,
            &geometry,
            &mut capture,
            corner_cell,
            Point::new(198.0, 58.0)
        ));
        assert!(engine.session().unwrap().is_whole_table());

        engine.pointer_move(Point::new(228.0, 78.0));
        engine.on_frame();
        engine.pointer_up(&mut tree, &mut capture);

        let table_style = &tree.get_table(table_id).unwrap().style;
        assert!(table_style.contains("width: 230px"));
        assert!(table_style.contains("min-width: 230px"));
        assert!(table_style.contains("height: 80px"));
        assert!(table_style.contains("min-height: 80px"));

        for r in 0..2 {
            for c in 0..2 {
                let cell_id = tree.cell_at(table_id, r, c).unwrap();
                assert!(tree.get_table_cell(cell_id).unwrap().style.is_empty());
            }
        }
    }

    #[test]
    fn test_trailing_cell_away_from_table_edge_is_column_resize() {
        let (mut tree, mut geometry, table_id) = fixture();
        // Table box wider than its cells; the cell's right edge is far from
        // the table's own boundary.
        geometry.tables.insert(table_id, Rect::new(0.0, 0.0, 260.0, 60.0));
        let cell = tree.cell_at(table_id, 0, 1).unwrap();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(198.0, 15.0)));
        assert!(!engine.session().unwrap().is_whole_table());
        engine.pointer_up(&mut tree, &mut capture);
    }

    #[test]
    fn test_left_edge_targets_previous_column() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 1).unwrap();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(102.0, 15.0)));
        match engine.session().unwrap().x_axis.as_ref().unwrap() {
            AxisTarget::Column { index, .. } => assert_eq!(*index, 0),
            other => panic!("expected column axis, got {:?}", other),
        }
        engine.pointer_cancel(&mut tree, &mut capture);
    }

    #[test]
    fn test_first_column_left_edge_resizes_first_column() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(2.0, 15.0)));
        match engine.session().unwrap().x_axis.as_ref().unwrap() {
            AxisTarget::Column { index, .. } => assert_eq!(*index, 0),
            other => panic!("expected column axis, got {:?}", other),
        }

        engine.pointer_move(Point::new(22.0, 15.0));
        engine.pointer_up(&mut tree, &mut capture);
        assert!(tree.get_table_cell(cell).unwrap().style.contains("width: 120px"));
    }

    #[test]
    fn test_first_row_top_edge_resizes_first_row() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(50.0, 2.0)));
        match engine.session().unwrap().y_axis.as_ref().unwrap() {
            AxisTarget::Row { index, .. } => assert_eq!(*index, 0),
            other => panic!("expected row axis, got {:?}", other),
        }
        engine.pointer_cancel(&mut tree, &mut capture);
    }

    #[test]
    fn test_row_drag_commits_cells_and_row() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();

        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(50.0, 28.0)));
        engine.pointer_move(Point::new(50.0, 38.0));
        engine.on_frame();
        engine.pointer_up(&mut tree, &mut capture);

        for c in 0..2 {
            let id = tree.cell_at(table_id, 0, c).unwrap();
            let style = &tree.get_table_cell(id).unwrap().style;
            assert!(style.contains("height: 40px"));
            assert!(style.contains("min-height: 40px"));
        }
        let row_id = tree.get_table(table_id).unwrap().row_at(0).unwrap();
        let row = tree.get_table_row(row_id).unwrap();
        assert_eq!(row.height, Some(40));
        assert!(row.style.contains("height: 40px"));
        assert!(!row.style.contains("min-height"));
    }

    #[test]
    fn test_all_termination_paths_commit() {
        type Terminator =
            fn(&mut ResizeEngine, &mut DocumentTree, &mut RecordingCapture);
        let terminators: [Terminator; 5] = [
            ResizeEngine::pointer_up,
            ResizeEngine::pointer_cancel,
            ResizeEngine::capture_lost,
            ResizeEngine::window_blur,
            ResizeEngine::page_hidden,
        ];

        for terminate in terminators {
            let (mut tree, geometry, table_id) = fixture();
            let cell = tree.cell_at(table_id, 0, 0).unwrap();
            let mut engine = ResizeEngine::new();
            let mut capture = RecordingCapture { grant: true, ..Default::default() };

            assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0)));
            engine.pointer_move(Point::new(118.0, 15.0));
            terminate(&mut engine, &mut tree, &mut capture);

            let style = &tree.get_table_cell(cell).unwrap().style;
            assert!(style.contains("width: 120px"), "commit missing after termination");
            assert!(!engine.is_dragging());
            assert!(capture.released);
        }
    }

    #[test]
    fn test_moves_coalesce_to_latest() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0));

        engine.pointer_move(Point::new(110.0, 15.0));
        engine.pointer_move(Point::new(158.0, 15.0));
        let session = engine.on_frame().unwrap();
        match session.x_axis.as_ref().unwrap() {
            AxisTarget::Column { cells, .. } => assert_eq!(cells[0].preview, 160.0),
            other => panic!("expected column axis, got {:?}", other),
        }
        assert!(engine.on_frame().is_none(), "no second pending move");
        engine.pointer_up(&mut tree, &mut capture);
    }

    #[test]
    fn test_pending_move_applies_at_commit_without_frame() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0));

        engine.pointer_move(Point::new(128.0, 15.0));
        engine.pointer_up(&mut tree, &mut capture);
        assert!(tree.get_table_cell(cell).unwrap().style.contains("width: 130px"));
    }

    #[test]
    fn test_minimum_width_enforced() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0));

        engine.pointer_move(Point::new(-100.0, 15.0));
        engine.pointer_up(&mut tree, &mut capture);
        assert!(tree.get_table_cell(cell).unwrap().style.contains("width: 40px"));
    }

    #[test]
    fn test_interior_pointer_down_does_not_start() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        assert!(!engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(50.0, 15.0)));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_begin_normalizes_merged_cells() {
        let (mut tree, mut geometry, table_id) = fixture();
        let row_id = tree.get_table(table_id).unwrap().row_at(0).unwrap();
        let merged = tree
            .insert_table_cell(TableCell::with_spans(false, 2, 2, ""), row_id, None)
            .unwrap();
        geometry.cells.insert(merged, Rect::new(200.0, 0.0, 100.0, 30.0));

        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0));

        assert!(!tree.get_table_cell(merged).unwrap().is_merged());
        engine.pointer_up(&mut tree, &mut capture);
    }

    #[test]
    fn test_commit_is_noop_when_table_removed_mid_drag() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture { grant: true, ..Default::default() };
        engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0));
        engine.pointer_move(Point::new(148.0, 15.0));

        tree.remove_table(table_id).unwrap();
        engine.pointer_up(&mut tree, &mut capture);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_capture_refusal_still_drags() {
        let (mut tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let mut engine = ResizeEngine::new();
        let mut capture = RecordingCapture::default();
        assert!(engine.begin_drag(&mut tree, &geometry, &mut capture, cell, Point::new(98.0, 15.0)));
        engine.pointer_up(&mut tree, &mut capture);
    }

    #[test]
    fn test_hover_cursor_classification() {
        let (tree, geometry, table_id) = fixture();
        let cell = tree.cell_at(table_id, 0, 0).unwrap();
        let engine = ResizeEngine::new();
        assert_eq!(
            engine.hover_cursor(&geometry, cell, Point::new(98.0, 15.0)),
            Some(ResizeCursor::Column)
        );
        assert_eq!(
            engine.hover_cursor(&geometry, cell, Point::new(50.0, 28.0)),
            Some(ResizeCursor::Row)
        );
        assert_eq!(engine.hover_cursor(&geometry, cell, Point::new(50.0, 15.0)), None);
    }
}
