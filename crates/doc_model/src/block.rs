//! Block-level nodes - paragraphs, headings, and quotes
//!
//! Block nodes own inline children (text runs, line breaks, inline images).
//! A paragraph's alignment is tracked separately from its style string so
//! the importer can fall back to a cell-level alignment without disturbing
//! the run styles.

use crate::{Node, NodeId, NodeType, TextAlign};
use serde::{Deserialize, Serialize};

/// A paragraph of inline content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Inline style string
    pub style: String,
    /// Resolved text alignment (from style or cell fallback)
    pub alignment: Option<TextAlign>,
}

impl Paragraph {
    /// Create a new empty paragraph
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            children: Vec::new(),
            style: String::new(),
            alignment: None,
        }
    }

    /// Create a paragraph with a style string
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            ..Self::new()
        }
    }

    /// Set the alignment
    pub fn set_alignment(&mut self, alignment: Option<TextAlign>) {
        self.alignment = alignment;
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

    /// Whether the paragraph has no inline children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Paragraph {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Paragraph
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

/// A heading block with a level from 1 to 6
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Heading level, clamped to 1..=6
    pub level: u8,
    /// Inline style string
    pub style: String,
}

impl Heading {
    /// Create a new heading of the given level
    pub fn new(level: u8) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            children: Vec::new(),
            level: level.clamp(1, 6),
            style: String::new(),
        }
    }

    /// The markup tag for this heading ("h1".."h6")
    pub fn tag(&self) -> &'static str {
        match self.level {
            1 => "h1",
            2 => "h2",
            3 => "h3",
            4 => "h4",
            5 => "h5",
            _ => "h6",
        }
    }

    /// Add a child node ID
    pub fn add_child(&mut self, child_id: NodeId) {
        self.children.push(child_id);
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

impl Node for Heading {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Heading
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

/// A block quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Inline style string
    pub style: String,
}

impl Quote {
    /// Create a new empty quote
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            children: Vec::new(),
            style: String::new(),
        }
    }

    /// Add a child node ID
    pub fn add_child(&mut self, child_id: NodeId) {
        self.children.push(child_id);
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

impl Default for Quote {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Quote {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Quote
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
