//! Core node trait and types

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Enumeration of all node types in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Paragraph,
    Heading,
    Quote,
    TextRun,
    LineBreak,
    Image,
    Table,
    TableRow,
    TableCell,
}

impl NodeType {
    /// Whether this node type accepts child nodes
    pub fn is_container(&self) -> bool {
        !matches!(self, NodeType::TextRun | NodeType::LineBreak | NodeType::Image)
    }
}

/// Common interface for all document nodes
pub trait Node: std::fmt::Debug {
    /// Get the unique ID of this node
    fn id(&self) -> NodeId;

    /// Get the type of this node
    fn node_type(&self) -> NodeType;

    /// Get the IDs of child nodes
    fn children(&self) -> &[NodeId];

    /// Get the ID of the parent node (None when detached or top-level)
    fn parent(&self) -> Option<NodeId>;

    /// Set the parent node ID
    fn set_parent(&mut self, parent: Option<NodeId>);

    /// Get the inline style string (semicolon-joined `property: value` pairs)
    fn style(&self) -> &str {
        ""
    }

    /// Replace the inline style string
    fn set_style(&mut self, _style: String) {}

    /// Get the text content of this node (if any)
    fn text_content(&self) -> Option<&str> {
        None
    }
}
