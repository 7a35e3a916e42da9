//! Table model - tables, rows, and cells
//!
//! A table's direct children are rows; a row's direct children are cells.
//! Cells carry colspan/rowspan as imported, but the resize engine normalizes
//! every span to 1x1 before a drag session starts, so layout code may assume
//! a rectangular grid addressed by `(row_index, col_index)`.

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// A table containing rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    id: NodeId,
    parent: Option<NodeId>,
    rows: Vec<NodeId>,
    /// Inline style string
    pub style: String,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            rows: Vec::new(),
            style: String::new(),
        }
    }

    /// Create a table with a style string
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            ..Self::new()
        }
    }

    /// Add a row ID
    pub fn add_row(&mut self, row_id: NodeId) {
        self.rows.push(row_id);
    }

    /// Insert a row at a specific index
    pub fn insert_row(&mut self, index: usize, row_id: NodeId) {
        self.rows.insert(index.min(self.rows.len()), row_id);
    }

    /// Remove a row by ID
    pub fn remove_row(&mut self, row_id: NodeId) -> bool {
        if let Some(pos) = self.rows.iter().position(|&id| id == row_id) {
            self.rows.remove(pos);
            true
        } else {
            false
        }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the row at a specific index
    pub fn row_at(&self, index: usize) -> Option<NodeId> {
        self.rows.get(index).copied()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Table {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Table
    }

    fn children(&self) -> &[NodeId] {
        &self.rows
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn style(&self) -> &str {
        &self.style
    }

    fn set_style(&mut self, style: String) {
        self.style = style;
    }
}

/// A row in a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    id: NodeId,
    parent: Option<NodeId>,
    cells: Vec<NodeId>,
    /// Committed row height in pixels
    pub height: Option<u32>,
    /// Inline style string
    pub style: String,
}

impl TableRow {
    /// Create a new empty row
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            cells: Vec::new(),
            height: None,
            style: String::new(),
        }
    }

    /// Create a row with a style string
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            ..Self::new()
        }
    }

    /// Add a cell ID
    pub fn add_cell(&mut self, cell_id: NodeId) {
        self.cells.push(cell_id);
    }

    /// Insert a cell at a specific index
    pub fn insert_cell(&mut self, index: usize, cell_id: NodeId) {
        self.cells.insert(index.min(self.cells.len()), cell_id);
    }

    /// Remove a cell by ID
    pub fn remove_cell(&mut self, cell_id: NodeId) -> bool {
        if let Some(pos) = self.cells.iter().position(|&id| id == cell_id) {
            self.cells.remove(pos);
            true
        } else {
            false
        }
    }

    /// Get the number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get the cell at a specific index
    pub fn cell_at(&self, index: usize) -> Option<NodeId> {
        self.cells.get(index).copied()
    }
}

impl Default for TableRow {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for TableRow {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::TableRow
    }

    fn children(&self) -> &[NodeId] {
        &self.cells
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn style(&self) -> &str {
        &self.style
    }

    fn set_style(&mut self, style: String) {
        self.style = style;
    }
}

/// A cell in a table row, containing block children (paragraphs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Whether this cell renders as a header cell
    pub is_header: bool,
    /// Columns spanned (normalized to 1 before resize)
    pub col_span: u32,
    /// Rows spanned (normalized to 1 before resize)
    pub row_span: u32,
    /// Inline style string
    pub style: String,
}

impl TableCell {
    /// Create a new empty body cell
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            children: Vec::new(),
            is_header: false,
            col_span: 1,
            row_span: 1,
            style: String::new(),
        }
    }

    /// Create a cell with explicit header flag, spans, and style
    pub fn with_spans(
        is_header: bool,
        col_span: u32,
        row_span: u32,
        style: impl Into<String>,
    ) -> Self {
        Self {
            is_header,
            col_span: col_span.max(1),
            row_span: row_span.max(1),
            style: style.into(),
            ..Self::new()
        }
    }

    /// Whether this cell spans more than one grid position
    pub fn is_merged(&self) -> bool {
        self.col_span > 1 || self.row_span > 1
    }

    /// Force the spans back to 1x1
    pub fn normalize_spans(&mut self) {
        self.col_span = 1;
        self.row_span = 1;
    }

    /// Add a child node ID
    pub fn add_child(&mut self, child_id: NodeId) {
        self.children.push(child_id);
    }

    /// Insert a child at a specific index
    pub fn insert_child(&mut self, index: usize, child_id: NodeId) {
        self.children.insert(index.min(self.children.len()), child_id);
    }

    /// Remove a child by ID
    pub fn remove_child(&mut self, child_id: NodeId) -> bool {
        if let Some(pos) = self.children.iter().position(|&id| id == child_id) {
            self.children.remove(pos);
            true
        } else {
            false
        }
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for TableCell {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::TableCell
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn style(&self) -> &str {
        &self.style
    }

    fn set_style(&mut self, style: String) {
        self.style = style;
    }
}
