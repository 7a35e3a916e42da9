//! Structural table edits driven by the current cell selection
//!
//! Inserted rows and columns replicate the styles of their reference
//! neighbors so new cells are not visually blank next to their siblings.
//! New cells always start at span 1x1 with one empty paragraph.

use crate::{GridResizeError, Result};
use doc_model::{CellSelection, DocumentTree, Node, NodeId, Paragraph, TableCell, TableRow};
use tracing::debug;

/// Where to insert relative to the selected row/column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSide {
    Before,
    After,
}

/// Insert a row next to the selected one, replicating the reference row's
/// style and each reference cell's style. Returns the new row's ID.
pub fn insert_row(
    tree: &mut DocumentTree,
    selection: &CellSelection,
    side: InsertSide,
) -> Result<NodeId> {
    let table = tree
        .get_table(selection.table_id)
        .ok_or(GridResizeError::InvalidSelection)?;
    let ref_row_id = table
        .row_at(selection.row_index)
        .ok_or(GridResizeError::InvalidSelection)?;
    let ref_row = tree
        .get_table_row(ref_row_id)
        .ok_or(GridResizeError::InvalidSelection)?;

    let row_style = ref_row.style.clone();
    let cell_styles: Vec<String> = ref_row
        .children()
        .iter()
        .filter_map(|&id| tree.get_table_cell(id))
        .map(|cell| cell.style.clone())
        .collect();

    let index = match side {
        InsertSide::Before => selection.row_index,
        InsertSide::After => selection.row_index + 1,
    };
    let row_id = tree.insert_table_row(
        TableRow::with_style(row_style),
        selection.table_id,
        Some(index),
    )?;
    for style in cell_styles {
        let cell_id =
            tree.insert_table_cell(TableCell::with_spans(false, 1, 1, style), row_id, None)?;
        tree.insert_paragraph_into_cell(Paragraph::new(), cell_id, None)?;
    }
    Ok(row_id)
}

/// Delete the selected row. Deleting the last remaining row removes the
/// whole table.
pub fn delete_row(tree: &mut DocumentTree, selection: &CellSelection) -> Result<()> {
    let table = tree
        .get_table(selection.table_id)
        .ok_or(GridResizeError::InvalidSelection)?;
    let row_id = table
        .row_at(selection.row_index)
        .ok_or(GridResizeError::InvalidSelection)?;

    tree.remove_table_row(row_id)?;
    if tree
        .get_table(selection.table_id)
        .is_some_and(|t| t.row_count() == 0)
    {
        debug!("last row deleted; removing table");
        tree.remove_table(selection.table_id)?;
    }
    Ok(())
}

/// Insert a column next to the selected one in every row, replicating per
/// row the style of that row's cell at the selection column. Returns the
/// new cell IDs, top to bottom.
pub fn insert_column(
    tree: &mut DocumentTree,
    selection: &CellSelection,
    side: InsertSide,
) -> Result<Vec<NodeId>> {
    let table = tree
        .get_table(selection.table_id)
        .ok_or(GridResizeError::InvalidSelection)?;
    if table.row_count() == 0 {
        return Err(GridResizeError::InvalidSelection);
    }
    let row_ids: Vec<NodeId> = (0..table.row_count())
        .filter_map(|i| table.row_at(i))
        .collect();

    let index = match side {
        InsertSide::Before => selection.col_index,
        InsertSide::After => selection.col_index + 1,
    };

    let mut new_cells = Vec::with_capacity(row_ids.len());
    for row_id in row_ids {
        let style = tree
            .get_table_row(row_id)
            .and_then(|row| row.cell_at(selection.col_index))
            .and_then(|cell_id| tree.get_table_cell(cell_id))
            .map(|cell| cell.style.clone())
            .unwrap_or_default();

        let cell_id = tree.insert_table_cell(
            TableCell::with_spans(false, 1, 1, style),
            row_id,
            Some(index),
        )?;
        tree.insert_paragraph_into_cell(Paragraph::new(), cell_id, None)?;
        new_cells.push(cell_id);
    }
    Ok(new_cells)
}

/// Delete the selected column from every row. Deleting the last remaining
/// column removes the whole table.
pub fn delete_column(tree: &mut DocumentTree, selection: &CellSelection) -> Result<()> {
    let table = tree
        .get_table(selection.table_id)
        .ok_or(GridResizeError::InvalidSelection)?;
    let row_ids: Vec<NodeId> = (0..table.row_count())
        .filter_map(|i| table.row_at(i))
        .collect();
    if row_ids.is_empty() {
        return Err(GridResizeError::InvalidSelection);
    }

    for &row_id in &row_ids {
        let cell_id = tree
            .get_table_row(row_id)
            .and_then(|row| row.cell_at(selection.col_index));
        if let Some(cell_id) = cell_id {
            tree.remove_table_cell(cell_id)?;
        }
    }

    let all_empty = row_ids
        .iter()
        .all(|&id| tree.get_table_row(id).map_or(true, |row| row.cell_count() == 0));
    if all_empty {
        debug!("last column deleted; removing table");
        tree.remove_table(selection.table_id)?;
    }
    Ok(())
}

/// Delete a table and everything in it
pub fn delete_table(tree: &mut DocumentTree, table_id: NodeId) -> Result<()> {
    tree.remove_table(table_id)?;
    Ok(())
}

/// Commit a new display size for an image, clamped by the image's own
/// maximum width
pub fn update_image_size(
    tree: &mut DocumentTree,
    image_id: NodeId,
    width: u32,
    height: u32,
) -> Result<()> {
    tree.set_image_size(image_id, width, height)?;
    Ok(())
}
