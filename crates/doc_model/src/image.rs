//! Image nodes
//!
//! Images are leaf nodes holding only a reference (`src`) produced by an
//! external upload collaborator; the model never performs I/O itself.

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// An image reference with optional display size in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageNode {
    id: NodeId,
    parent: Option<NodeId>,
    /// Image source reference (URL or data reference supplied by the host)
    pub src: String,
    /// Alternative text
    pub alt: String,
    /// Display width in pixels
    pub width: Option<u32>,
    /// Display height in pixels
    pub height: Option<u32>,
    /// Upper bound on width, used by the host's resize overlay
    pub max_width: Option<u32>,
    /// Inline style string
    pub style: String,
}

impl ImageNode {
    /// Create an image from a source reference
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            src: src.into(),
            alt: alt.into(),
            width: None,
            height: None,
            max_width: None,
            style: String::new(),
        }
    }

    /// Set the display size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the maximum width
    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Update the display size, clamping width to `max_width` when set
    pub fn set_size(&mut self, width: u32, height: u32) {
        let width = match self.max_width {
            Some(max) => width.min(max),
            None => width,
        };
        self.width = Some(width);
        self.height = Some(height);
    }
}

impl Node for ImageNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Image
    }

    fn children(&self) -> &[NodeId] {
        &[]
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
