//! Markup element tree - the DOM-like input/output shape
//!
//! The host hands pasted markup to the importer as a tree of [`MarkupNode`]s
//! and receives the exporter's output in the same shape. Tag and attribute
//! names are lower-cased on construction.

use serde::{Deserialize, Serialize};

/// A node in a markup tree: an element or a text chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

impl MarkupNode {
    /// Text chunk constructor
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    /// The element, when this node is one
    pub fn as_element(&self) -> Option<&MarkupElement> {
        match self {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        }
    }

    /// Concatenated descendant text
    pub fn text_content(&self) -> String {
        match self {
            MarkupNode::Text(t) => t.clone(),
            MarkupNode::Element(el) => el.text_content(),
        }
    }
}

impl From<MarkupElement> for MarkupNode {
    fn from(el: MarkupElement) -> Self {
        MarkupNode::Element(el)
    }
}

/// An element with a tag, attributes, and ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupElement {
    /// Lower-cased tag name
    pub tag: String,
    /// Attributes in document order, names lower-cased
    pub attrs: Vec<(String, String)>,
    /// Ordered children
    pub children: Vec<MarkupNode>,
}

impl MarkupElement {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: add a child node
    pub fn child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder: add a text child
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(MarkupNode::text(content));
        self
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        self.attrs.retain(|(n, _)| *n != name);
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `style` attribute, or empty
    pub fn style_attr(&self) -> &str {
        self.get_attr("style").unwrap_or("")
    }

    /// Whitespace-separated class names from the `class` attribute
    pub fn class_names(&self) -> Vec<&str> {
        self.get_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Child elements with a given tag
    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a MarkupElement> {
        self.children
            .iter()
            .filter_map(MarkupNode::as_element)
            .filter(move |el| el.tag == tag)
    }

    /// First child element with a given tag
    pub fn first_child_with_tag(&self, tag: &str) -> Option<&MarkupElement> {
        self.children
            .iter()
            .filter_map(MarkupNode::as_element)
            .find(|el| el.tag == tag)
    }

    /// Concatenated descendant text
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                MarkupNode::Text(t) => out.push_str(t),
                MarkupNode::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }

    /// Find the first descendant element with a given tag, including self
    pub fn find_descendant(&self, tag: &str) -> Option<&MarkupElement> {
        if self.tag == tag {
            return Some(self);
        }
        for child in &self.children {
            if let MarkupNode::Element(el) = child {
                if let Some(found) = el.find_descendant(tag) {
                    return Some(found);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_attr_names_lowercased() {
        let el = MarkupElement::new("TD").attr("ALIGN", "center");
        assert_eq!(el.tag, "td");
        assert_eq!(el.get_attr("align"), Some("center"));
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let el = MarkupElement::new("p")
            .text("a")
            .child(MarkupElement::new("b").text("b"))
            .text("c");
        assert_eq!(el.text_content(), "abc");
    }

    #[test]
    fn test_first_child_with_tag_borrows_past_tag() {
        let el = MarkupElement::new("table")
            .child(MarkupElement::new("caption"))
            .child(MarkupElement::new("colgroup").attr("span", "2"));
        let found = {
            let tag = String::from("colgroup");
            el.first_child_with_tag(&tag)
        };
        assert_eq!(found.map(|c| c.tag.as_str()), Some("colgroup"));
        assert!(el.first_child_with_tag("tbody").is_none());
    }

    #[test]
    fn test_find_descendant() {
        let el = MarkupElement::new("div")
            .child(MarkupElement::new("table").child(MarkupElement::new("tr")));
        assert!(el.find_descendant("tr").is_some());
        assert!(el.find_descendant("img").is_none());
    }
}
