//! Document tree operations and storage

use crate::{
    DocModelError, Heading, ImageNode, LineBreak, Node, NodeId, NodeType, Paragraph, Quote,
    Result, Table, TableCell, TableRow, TextRun,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage for different node types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeStorage {
    pub paragraphs: HashMap<NodeId, Paragraph>,
    pub headings: HashMap<NodeId, Heading>,
    pub quotes: HashMap<NodeId, Quote>,
    pub runs: HashMap<NodeId, TextRun>,
    pub breaks: HashMap<NodeId, LineBreak>,
    pub images: HashMap<NodeId, ImageNode>,
    pub tables: HashMap<NodeId, Table>,
    pub table_rows: HashMap<NodeId, TableRow>,
    pub table_cells: HashMap<NodeId, TableCell>,
}

/// The complete document tree structure
///
/// Ownership lives in the body list and each container's children list;
/// parent references are lookup-only back-references, never ownership edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Top-level block node IDs in document order
    pub body: Vec<NodeId>,
    /// Storage for all nodes
    pub nodes: NodeStorage,
}

impl DocumentTree {
    /// Create a new empty document tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document tree with a single empty paragraph
    pub fn with_empty_paragraph() -> Self {
        let mut tree = Self::new();
        let para = Paragraph::new();
        let para_id = para.id();
        tree.nodes.paragraphs.insert(para_id, para);
        tree.body.push(para_id);
        tree
    }

    /// Get the node type for a given ID
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        if self.nodes.paragraphs.contains_key(&id) {
            return Some(NodeType::Paragraph);
        }
        if self.nodes.headings.contains_key(&id) {
            return Some(NodeType::Heading);
        }
        if self.nodes.quotes.contains_key(&id) {
            return Some(NodeType::Quote);
        }
        if self.nodes.runs.contains_key(&id) {
            return Some(NodeType::TextRun);
        }
        if self.nodes.breaks.contains_key(&id) {
            return Some(NodeType::LineBreak);
        }
        if self.nodes.images.contains_key(&id) {
            return Some(NodeType::Image);
        }
        if self.nodes.tables.contains_key(&id) {
            return Some(NodeType::Table);
        }
        if self.nodes.table_rows.contains_key(&id) {
            return Some(NodeType::TableRow);
        }
        if self.nodes.table_cells.contains_key(&id) {
            return Some(NodeType::TableCell);
        }
        None
    }

    /// Get the stored style string for any node
    pub fn style_of(&self, id: NodeId) -> Option<&str> {
        self.as_node(id).map(|n| n.style())
    }

    /// Get the parent of any node
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.as_node(id).and_then(|n| n.parent())
    }

    /// Get the ordered children of any node
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.as_node(id).map(|n| n.children()).unwrap_or(&[])
    }

    fn as_node(&self, id: NodeId) -> Option<&dyn Node> {
        if let Some(n) = self.nodes.paragraphs.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.headings.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.quotes.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.runs.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.breaks.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.images.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.tables.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.table_rows.get(&id) {
            return Some(n);
        }
        if let Some(n) = self.nodes.table_cells.get(&id) {
            return Some(n);
        }
        None
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Get a paragraph by ID
    pub fn get_paragraph(&self, id: NodeId) -> Option<&Paragraph> {
        self.nodes.paragraphs.get(&id)
    }

    /// Get a mutable paragraph by ID
    pub fn get_paragraph_mut(&mut self, id: NodeId) -> Option<&mut Paragraph> {
        self.nodes.paragraphs.get_mut(&id)
    }

    /// Get a heading by ID
    pub fn get_heading(&self, id: NodeId) -> Option<&Heading> {
        self.nodes.headings.get(&id)
    }

    /// Get a quote by ID
    pub fn get_quote(&self, id: NodeId) -> Option<&Quote> {
        self.nodes.quotes.get(&id)
    }

    /// Get a run by ID
    pub fn get_run(&self, id: NodeId) -> Option<&TextRun> {
        self.nodes.runs.get(&id)
    }

    /// Get a mutable run by ID
    pub fn get_run_mut(&mut self, id: NodeId) -> Option<&mut TextRun> {
        self.nodes.runs.get_mut(&id)
    }

    /// Get an image by ID
    pub fn get_image(&self, id: NodeId) -> Option<&ImageNode> {
        self.nodes.images.get(&id)
    }

    /// Get a mutable image by ID
    pub fn get_image_mut(&mut self, id: NodeId) -> Option<&mut ImageNode> {
        self.nodes.images.get_mut(&id)
    }

    /// Get a table by ID
    pub fn get_table(&self, id: NodeId) -> Option<&Table> {
        self.nodes.tables.get(&id)
    }

    /// Get a mutable table by ID
    pub fn get_table_mut(&mut self, id: NodeId) -> Option<&mut Table> {
        self.nodes.tables.get_mut(&id)
    }

    /// Get a table row by ID
    pub fn get_table_row(&self, id: NodeId) -> Option<&TableRow> {
        self.nodes.table_rows.get(&id)
    }

    /// Get a mutable table row by ID
    pub fn get_table_row_mut(&mut self, id: NodeId) -> Option<&mut TableRow> {
        self.nodes.table_rows.get_mut(&id)
    }

    /// Get a table cell by ID
    pub fn get_table_cell(&self, id: NodeId) -> Option<&TableCell> {
        self.nodes.table_cells.get(&id)
    }

    /// Get a mutable table cell by ID
    pub fn get_table_cell_mut(&mut self, id: NodeId) -> Option<&mut TableCell> {
        self.nodes.table_cells.get_mut(&id)
    }

    // =========================================================================
    // Body-level insertion
    // =========================================================================

    /// Insert a paragraph at the top level of the document
    pub fn insert_paragraph(&mut self, mut para: Paragraph, index: Option<usize>) -> NodeId {
        let para_id = para.id();
        para.set_parent(None);
        self.insert_body_child(para_id, index);
        self.nodes.paragraphs.insert(para_id, para);
        para_id
    }

    /// Insert a heading at the top level of the document
    pub fn insert_heading(&mut self, mut heading: Heading, index: Option<usize>) -> NodeId {
        let heading_id = heading.id();
        heading.set_parent(None);
        self.insert_body_child(heading_id, index);
        self.nodes.headings.insert(heading_id, heading);
        heading_id
    }

    /// Insert a quote at the top level of the document
    pub fn insert_quote(&mut self, mut quote: Quote, index: Option<usize>) -> NodeId {
        let quote_id = quote.id();
        quote.set_parent(None);
        self.insert_body_child(quote_id, index);
        self.nodes.quotes.insert(quote_id, quote);
        quote_id
    }

    /// Insert a table at the top level of the document
    pub fn insert_table(&mut self, mut table: Table, index: Option<usize>) -> NodeId {
        let table_id = table.id();
        table.set_parent(None);
        self.insert_body_child(table_id, index);
        self.nodes.tables.insert(table_id, table);
        table_id
    }

    /// Insert an image directly after the top-level block containing a node.
    /// Falls back to appending at the end of the document when the anchor
    /// cannot be resolved.
    pub fn insert_image_after_block(&mut self, image: ImageNode, anchor: Option<NodeId>) -> NodeId {
        let image_id = image.id();
        let index = anchor
            .and_then(|id| self.top_level_ancestor(id))
            .and_then(|top| self.body.iter().position(|&id| id == top))
            .map(|pos| pos + 1);
        self.insert_body_child(image_id, index);
        self.nodes.images.insert(image_id, image);
        image_id
    }

    fn insert_body_child(&mut self, id: NodeId, index: Option<usize>) {
        match index {
            Some(idx) => self.body.insert(idx.min(self.body.len()), id),
            None => self.body.push(id),
        }
    }

    /// Walk ancestors until a node whose parent is None (a body child)
    pub fn top_level_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            match self.parent_of(current) {
                Some(parent) => current = parent,
                None => {
                    return self.body.contains(&current).then_some(current);
                }
            }
        }
    }

    // =========================================================================
    // Inline insertion
    // =========================================================================

    /// Insert a text run into a block (paragraph, heading, or quote)
    pub fn insert_run(&mut self, mut run: TextRun, block_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        let run_id = run.id();
        run.set_parent(Some(block_id));
        self.push_inline_child(block_id, run_id, index)?;
        self.nodes.runs.insert(run_id, run);
        Ok(run_id)
    }

    /// Insert a line break into a block
    pub fn insert_line_break(&mut self, block_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        let mut lb = LineBreak::new();
        let lb_id = lb.id();
        lb.set_parent(Some(block_id));
        self.push_inline_child(block_id, lb_id, index)?;
        self.nodes.breaks.insert(lb_id, lb);
        Ok(lb_id)
    }

    /// Insert an image inline into a block
    pub fn insert_image(&mut self, mut image: ImageNode, block_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        let image_id = image.id();
        image.set_parent(Some(block_id));
        self.push_inline_child(block_id, image_id, index)?;
        self.nodes.images.insert(image_id, image);
        Ok(image_id)
    }

    fn push_inline_child(&mut self, block_id: NodeId, child_id: NodeId, index: Option<usize>) -> Result<()> {
        if let Some(para) = self.nodes.paragraphs.get_mut(&block_id) {
            match index {
                Some(idx) => para.insert_child(idx, child_id),
                None => para.add_child(child_id),
            }
            return Ok(());
        }
        if let Some(heading) = self.nodes.headings.get_mut(&block_id) {
            heading.add_child(child_id);
            return Ok(());
        }
        if let Some(quote) = self.nodes.quotes.get_mut(&block_id) {
            quote.add_child(child_id);
            return Ok(());
        }
        Err(DocModelError::NodeNotFound(block_id.as_uuid()))
    }

    // =========================================================================
    // Table structure
    // =========================================================================

    /// Insert a row into a table
    pub fn insert_table_row(&mut self, mut row: TableRow, table_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        let row_id = row.id();
        row.set_parent(Some(table_id));

        let table = self
            .nodes
            .tables
            .get_mut(&table_id)
            .ok_or(DocModelError::NodeNotFound(table_id.as_uuid()))?;

        match index {
            Some(idx) => table.insert_row(idx, row_id),
            None => table.add_row(row_id),
        }

        self.nodes.table_rows.insert(row_id, row);
        Ok(row_id)
    }

    /// Insert a cell into a row
    pub fn insert_table_cell(&mut self, mut cell: TableCell, row_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        let cell_id = cell.id();
        cell.set_parent(Some(row_id));

        let row = self
            .nodes
            .table_rows
            .get_mut(&row_id)
            .ok_or(DocModelError::NodeNotFound(row_id.as_uuid()))?;

        match index {
            Some(idx) => row.insert_cell(idx, cell_id),
            None => row.add_cell(cell_id),
        }

        self.nodes.table_cells.insert(cell_id, cell);
        Ok(cell_id)
    }

    /// Insert a paragraph into a table cell
    pub fn insert_paragraph_into_cell(&mut self, mut para: Paragraph, cell_id: NodeId, index: Option<usize>) -> Result<NodeId> {
        let para_id = para.id();
        para.set_parent(Some(cell_id));

        let cell = self
            .nodes
            .table_cells
            .get_mut(&cell_id)
            .ok_or(DocModelError::NodeNotFound(cell_id.as_uuid()))?;

        match index {
            Some(idx) => cell.insert_child(idx, para_id),
            None => cell.add_child(para_id),
        }

        self.nodes.paragraphs.insert(para_id, para);
        Ok(para_id)
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove a top-level block (paragraph, heading, quote, table, or image)
    /// and all of its contents
    pub fn remove_body_child(&mut self, id: NodeId) -> Result<()> {
        let pos = self
            .body
            .iter()
            .position(|&b| b == id)
            .ok_or(DocModelError::NodeNotFound(id.as_uuid()))?;
        self.body.remove(pos);
        self.remove_subtree(id);
        Ok(())
    }

    /// Remove a table and all of its rows, cells, and cell contents
    pub fn remove_table(&mut self, table_id: NodeId) -> Result<Table> {
        let table = self
            .nodes
            .tables
            .remove(&table_id)
            .ok_or(DocModelError::NodeNotFound(table_id.as_uuid()))?;

        for &row_id in table.children() {
            self.remove_row_contents(row_id);
        }

        self.body.retain(|&id| id != table_id);
        Ok(table)
    }

    /// Remove a row from its table, including cell contents
    pub fn remove_table_row(&mut self, row_id: NodeId) -> Result<TableRow> {
        let row = self
            .nodes
            .table_rows
            .remove(&row_id)
            .ok_or(DocModelError::NodeNotFound(row_id.as_uuid()))?;

        for &cell_id in row.children() {
            self.remove_cell_contents(cell_id);
        }

        if let Some(table_id) = row.parent() {
            if let Some(table) = self.nodes.tables.get_mut(&table_id) {
                table.remove_row(row_id);
            }
        }

        Ok(row)
    }

    /// Remove a cell from its row, including contents
    pub fn remove_table_cell(&mut self, cell_id: NodeId) -> Result<TableCell> {
        let cell = self
            .nodes
            .table_cells
            .get(&cell_id)
            .cloned()
            .ok_or(DocModelError::NodeNotFound(cell_id.as_uuid()))?;

        self.remove_cell_contents(cell_id);

        if let Some(row_id) = cell.parent() {
            if let Some(row) = self.nodes.table_rows.get_mut(&row_id) {
                row.remove_cell(cell_id);
            }
        }

        Ok(cell)
    }

    fn remove_row_contents(&mut self, row_id: NodeId) {
        if let Some(row) = self.nodes.table_rows.remove(&row_id) {
            for &cell_id in row.children() {
                self.remove_cell_contents(cell_id);
            }
        }
    }

    fn remove_cell_contents(&mut self, cell_id: NodeId) {
        if let Some(cell) = self.nodes.table_cells.remove(&cell_id) {
            for &child_id in cell.children() {
                self.remove_subtree(child_id);
            }
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.children_of(id).to_vec();
        for child in children {
            self.remove_subtree(child);
        }
        self.nodes.paragraphs.remove(&id);
        self.nodes.headings.remove(&id);
        self.nodes.quotes.remove(&id);
        self.nodes.runs.remove(&id);
        self.nodes.breaks.remove(&id);
        self.nodes.images.remove(&id);
        self.nodes.table_rows.remove(&id);
        self.nodes.table_cells.remove(&id);
        self.nodes.tables.remove(&id);
    }

    // =========================================================================
    // Grid addressing
    // =========================================================================

    /// Get cell position in its table as (row index, column index)
    pub fn cell_position(&self, cell_id: NodeId) -> Option<(usize, usize)> {
        let cell = self.nodes.table_cells.get(&cell_id)?;
        let row_id = cell.parent()?;
        let row = self.nodes.table_rows.get(&row_id)?;
        let table_id = row.parent()?;
        let table = self.nodes.tables.get(&table_id)?;

        let row_index = table.children().iter().position(|&id| id == row_id)?;
        let col_index = row.children().iter().position(|&id| id == cell_id)?;
        Some((row_index, col_index))
    }

    /// Get the cell at a specific position in a table
    pub fn cell_at(&self, table_id: NodeId, row_index: usize, col_index: usize) -> Option<NodeId> {
        let table = self.nodes.tables.get(&table_id)?;
        let row_id = table.row_at(row_index)?;
        let row = self.nodes.table_rows.get(&row_id)?;
        row.cell_at(col_index)
    }

    /// Every cell ID in a column, top to bottom (rows lacking the column are skipped)
    pub fn column_cells(&self, table_id: NodeId, col_index: usize) -> Vec<NodeId> {
        let Some(table) = self.nodes.tables.get(&table_id) else {
            return Vec::new();
        };
        table
            .children()
            .iter()
            .filter_map(|row_id| self.nodes.table_rows.get(row_id))
            .filter_map(|row| row.cell_at(col_index))
            .collect()
    }

    /// Every cell ID in a row, left to right
    pub fn row_cells(&self, table_id: NodeId, row_index: usize) -> Vec<NodeId> {
        let Some(table) = self.nodes.tables.get(&table_id) else {
            return Vec::new();
        };
        table
            .row_at(row_index)
            .and_then(|row_id| self.nodes.table_rows.get(&row_id))
            .map(|row| row.children().to_vec())
            .unwrap_or_default()
    }

    /// Find the table containing a node (the node itself when it is a table)
    pub fn find_table_for_node(&self, node_id: NodeId) -> Option<NodeId> {
        let mut current = node_id;
        loop {
            if self.nodes.tables.contains_key(&current) {
                return Some(current);
            }
            current = self.parent_of(current)?;
        }
    }

    /// Find the cell containing a node (the node itself when it is a cell)
    pub fn find_cell_for_node(&self, node_id: NodeId) -> Option<NodeId> {
        let mut current = node_id;
        loop {
            if self.nodes.table_cells.contains_key(&current) {
                return Some(current);
            }
            current = self.parent_of(current)?;
        }
    }

    // =========================================================================
    // Content queries and mutation
    // =========================================================================

    /// Update an image's display size
    pub fn set_image_size(&mut self, image_id: NodeId, width: u32, height: u32) -> Result<()> {
        let image = self
            .nodes
            .images
            .get_mut(&image_id)
            .ok_or(DocModelError::NodeNotFound(image_id.as_uuid()))?;
        image.set_size(width, height);
        Ok(())
    }

    /// Concatenated run text of a block's inline children
    pub fn block_text(&self, block_id: NodeId) -> String {
        self.children_of(block_id)
            .iter()
            .filter_map(|id| self.nodes.runs.get(id))
            .map(|run| run.content.as_str())
            .collect()
    }

    /// Concatenated text of a cell's paragraphs
    pub fn cell_text(&self, cell_id: NodeId) -> String {
        self.children_of(cell_id)
            .to_vec()
            .into_iter()
            .map(|block_id| self.block_text(block_id))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The total text content of the document
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        for &block_id in &self.body {
            result.push_str(&self.block_text(block_id));
            result.push('\n');
        }
        result
    }

    /// Iterate over all tables in document order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|id| self.nodes.tables.get(id))
    }

    /// Serialize the tree to JSON for the host's save path
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize a tree from the host's load path
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table(tree: &mut DocumentTree, rows: usize, cols: usize) -> NodeId {
        let table_id = tree.insert_table(Table::new(), None);
        for _ in 0..rows {
            let row_id = tree.insert_table_row(TableRow::new(), table_id, None).unwrap();
            for _ in 0..cols {
                let cell_id = tree.insert_table_cell(TableCell::new(), row_id, None).unwrap();
                tree.insert_paragraph_into_cell(Paragraph::new(), cell_id, None).unwrap();
            }
        }
        table_id
    }

    #[test]
    fn test_cell_position_round_trip() {
        let mut tree = DocumentTree::new();
        let table_id = small_table(&mut tree, 3, 2);
        let cell_id = tree.cell_at(table_id, 2, 1).unwrap();
        assert_eq!(tree.cell_position(cell_id), Some((2, 1)));
    }

    #[test]
    fn test_column_cells_spans_all_rows() {
        let mut tree = DocumentTree::new();
        let table_id = small_table(&mut tree, 3, 2);
        assert_eq!(tree.column_cells(table_id, 0).len(), 3);
        assert_eq!(tree.column_cells(table_id, 5).len(), 0);
    }

    #[test]
    fn test_find_table_from_run() {
        let mut tree = DocumentTree::new();
        let table_id = small_table(&mut tree, 1, 1);
        let cell_id = tree.cell_at(table_id, 0, 0).unwrap();
        let para_id = tree.children_of(cell_id)[0];
        let run_id = tree.insert_run(TextRun::new("x"), para_id, None).unwrap();
        assert_eq!(tree.find_table_for_node(run_id), Some(table_id));
        assert_eq!(tree.find_cell_for_node(run_id), Some(cell_id));
    }

    #[test]
    fn test_remove_table_drops_contents() {
        let mut tree = DocumentTree::new();
        let table_id = small_table(&mut tree, 2, 2);
        tree.remove_table(table_id).unwrap();
        assert!(tree.body.is_empty());
        assert!(tree.nodes.table_rows.is_empty());
        assert!(tree.nodes.table_cells.is_empty());
        assert!(tree.nodes.paragraphs.is_empty());
    }

    #[test]
    fn test_insert_image_after_block() {
        let mut tree = DocumentTree::with_empty_paragraph();
        let first_para = tree.body[0];
        tree.insert_paragraph(Paragraph::new(), None);
        let image_id =
            tree.insert_image_after_block(ImageNode::new("a.png", ""), Some(first_para));
        assert_eq!(tree.body[1], image_id);
    }

    #[test]
    fn test_insert_image_after_block_without_anchor_appends() {
        let mut tree = DocumentTree::with_empty_paragraph();
        let image_id = tree.insert_image_after_block(ImageNode::new("a.png", ""), None);
        assert_eq!(*tree.body.last().unwrap(), image_id);
    }

    #[test]
    fn test_json_round_trip() {
        let mut tree = DocumentTree::new();
        let table_id = small_table(&mut tree, 2, 2);
        let json = tree.to_json().unwrap();
        let restored = DocumentTree::from_json(&json).unwrap();
        assert_eq!(restored.body.len(), 1);
        assert_eq!(restored.get_table(table_id).unwrap().row_count(), 2);
    }

    #[test]
    fn test_cell_text() {
        let mut tree = DocumentTree::new();
        let table_id = small_table(&mut tree, 1, 1);
        let cell_id = tree.cell_at(table_id, 0, 0).unwrap();
        let para_id = tree.children_of(cell_id)[0];
        tree.insert_run(TextRun::new("hello"), para_id, None).unwrap();
        assert_eq!(tree.cell_text(cell_id), "hello");
    }
}
