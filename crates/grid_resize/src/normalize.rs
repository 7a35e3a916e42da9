//! Merged-cell normalization
//!
//! Independent per-column and per-row resize assumes a rectangular grid, so
//! every cell's span is forced back to 1x1 before a drag session starts.
//! Spans survive in exported markup as attributes only; this engine never
//! reintroduces a merge.

use doc_model::{DocumentTree, NodeId};
use tracing::debug;

/// Force every cell in a table to `col_span = row_span = 1`.
///
/// Returns the number of cells that were merged.
pub fn normalize_merged_cells(tree: &mut DocumentTree, table_id: NodeId) -> usize {
    let cell_ids: Vec<NodeId> = (0..tree
        .get_table(table_id)
        .map(|t| t.row_count())
        .unwrap_or(0))
        .flat_map(|row| tree.row_cells(table_id, row))
        .collect();

    let mut normalized = 0;
    for cell_id in cell_ids {
        if let Some(cell) = tree.get_table_cell_mut(cell_id) {
            if cell.is_merged() {
                cell.normalize_spans();
                normalized += 1;
            }
        }
    }

    if normalized > 0 {
        debug!(normalized, "normalized merged cells before resize");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Table, TableCell, TableRow};

    #[test]
    fn test_normalize_resets_spans() {
        let mut tree = DocumentTree::new();
        let table_id = tree.insert_table(Table::new(), None);
        let row_id = tree.insert_table_row(TableRow::new(), table_id, None).unwrap();
        let merged = tree
            .insert_table_cell(TableCell::with_spans(false, 2, 3, ""), row_id, None)
            .unwrap();
        let plain = tree
            .insert_table_cell(TableCell::new(), row_id, None)
            .unwrap();

        assert_eq!(normalize_merged_cells(&mut tree, table_id), 1);
        assert!(!tree.get_table_cell(merged).unwrap().is_merged());
        assert!(!tree.get_table_cell(plain).unwrap().is_merged());

        // Second pass finds nothing.
        assert_eq!(normalize_merged_cells(&mut tree, table_id), 0);
    }

    #[test]
    fn test_normalize_missing_table_is_noop() {
        let mut tree = DocumentTree::new();
        assert_eq!(normalize_merged_cells(&mut tree, NodeId::new()), 0);
    }
}
