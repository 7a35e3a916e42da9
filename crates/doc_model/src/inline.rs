//! Inline nodes - text runs and explicit line breaks
//!
//! Run content never contains literal newline characters; line breaks exist
//! only as explicit [`LineBreak`] siblings so external markup cannot render
//! a break twice.

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// A run of text with an inherited/computed style
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    id: NodeId,
    parent: Option<NodeId>,
    /// Run text; invariant: no `\n` or `\r` characters
    pub content: String,
    /// Inline style string
    pub style: String,
}

impl TextRun {
    /// Create a run, stripping any literal newlines from the content
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into().replace(['\r', '\n'], "");
        Self {
            id: NodeId::new(),
            parent: None,
            content,
            style: String::new(),
        }
    }

    /// Create a run with a style string
    pub fn styled(content: impl Into<String>, style: impl Into<String>) -> Self {
        let mut run = Self::new(content);
        run.style = style.into();
        run
    }

    /// Whether the run's text is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Node for TextRun {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::TextRun
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

    fn text_content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

/// An explicit line break inside a block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineBreak {
    id: NodeId,
    parent: Option<NodeId>,
}

impl LineBreak {
    /// Create a new line break
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
        }
    }
}

impl Default for LineBreak {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for LineBreak {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::LineBreak
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_strips_newlines() {
        let run = TextRun::new("line1\nline2\r\n");
        assert_eq!(run.content, "line1line2");
    }

    #[test]
    fn test_styled_run() {
        let run = TextRun::styled("hi", "color: red");
        assert_eq!(run.style(), "color: red");
        assert_eq!(run.text_content(), Some("hi"));
    }
}
