//! Document-model to sanitized markup export
//!
//! For each node the exporter builds a bare element, then applies the style
//! policy: `class` and `dir="ltr"` are stripped, the stored style wins over
//! the tag preset, the candidate passes through the sanitizer, and an empty
//! result drops the attribute entirely. Export is pure; running it twice
//! yields identical markup.

use crate::{block_preset, MarkupElement, MarkupNode, StyleSanitizer, WhitelistSanitizer};
use doc_model::{set_style_prop, DocumentTree, NodeId, NodeType, StyleMap};

/// Serializes document subtrees to markup through a style sanitizer
#[derive(Debug, Clone, Default)]
pub struct MarkupExporter<S: StyleSanitizer = WhitelistSanitizer> {
    sanitizer: S,
}

impl MarkupExporter<WhitelistSanitizer> {
    /// Exporter with the default sanitizer
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: StyleSanitizer> MarkupExporter<S> {
    /// Exporter with a custom sanitizer
    pub fn with_sanitizer(sanitizer: S) -> Self {
        Self { sanitizer }
    }

    /// Export the whole document body
    pub fn export_document(&self, tree: &DocumentTree) -> Vec<MarkupNode> {
        tree.body
            .iter()
            .filter_map(|&id| self.export_node(tree, id))
            .collect()
    }

    /// Export one node and its subtree. Unknown IDs yield `None`.
    pub fn export_node(&self, tree: &DocumentTree, id: NodeId) -> Option<MarkupNode> {
        match tree.node_type(id)? {
            NodeType::Paragraph => {
                let para = tree.get_paragraph(id)?;
                let mut stored = para.style.clone();
                if let Some(align) = para.alignment {
                    if StyleMap::parse(&stored).get("text-align").is_none() {
                        stored = set_style_prop(&stored, "text-align", Some(align.as_css()));
                    }
                }
                let mut el = MarkupElement::new("p");
                self.apply_style_policy(&mut el, &stored);
                self.export_inline_children(tree, id, &mut el);
                Some(el.into())
            }
            NodeType::Heading => {
                let heading = tree.get_heading(id)?;
                let mut el = MarkupElement::new(heading.tag());
                self.apply_style_policy(&mut el, &heading.style);
                self.export_inline_children(tree, id, &mut el);
                Some(el.into())
            }
            NodeType::Quote => {
                let quote = tree.get_quote(id)?;
                let mut el = MarkupElement::new("blockquote");
                self.apply_style_policy(&mut el, &quote.style);
                self.export_inline_children(tree, id, &mut el);
                Some(el.into())
            }
            NodeType::TextRun => {
                let run = tree.get_run(id)?;
                if run.style.is_empty() {
                    return Some(MarkupNode::text(run.content.clone()));
                }
                let mut el = MarkupElement::new("span");
                self.apply_style_policy(&mut el, &run.style);
                el.children.push(MarkupNode::text(run.content.clone()));
                Some(el.into())
            }
            NodeType::LineBreak => Some(MarkupElement::new("br").into()),
            NodeType::Image => {
                let image = tree.get_image(id)?;
                let mut el = MarkupElement::new("img").attr("src", &image.src);
                if !image.alt.is_empty() {
                    el.set_attr("alt", &image.alt);
                }
                if let Some(w) = image.width {
                    el.set_attr("width", w.to_string());
                }
                if let Some(h) = image.height {
                    el.set_attr("height", h.to_string());
                }
                self.apply_style_policy(&mut el, &image.style);
                Some(el.into())
            }
            NodeType::Table => {
                let table = tree.get_table(id)?;
                let mut el = MarkupElement::new("table");
                self.apply_style_policy(&mut el, &table.style);
                for &row_id in tree.children_of(id) {
                    if let Some(row) = self.export_node(tree, row_id) {
                        el.children.push(row);
                    }
                }
                Some(el.into())
            }
            NodeType::TableRow => {
                let row = tree.get_table_row(id)?;
                let mut el = MarkupElement::new("tr");
                self.apply_style_policy(&mut el, &row.style);
                for &cell_id in tree.children_of(id) {
                    if let Some(cell) = self.export_node(tree, cell_id) {
                        el.children.push(cell);
                    }
                }
                Some(el.into())
            }
            NodeType::TableCell => {
                let cell = tree.get_table_cell(id)?;
                let mut el = MarkupElement::new(if cell.is_header { "th" } else { "td" });
                if cell.col_span > 1 {
                    el.set_attr("colspan", cell.col_span.to_string());
                }
                if cell.row_span > 1 {
                    el.set_attr("rowspan", cell.row_span.to_string());
                }
                self.apply_style_policy(&mut el, &cell.style);
                for &block_id in tree.children_of(id) {
                    if let Some(block) = self.export_node(tree, block_id) {
                        el.children.push(block);
                    }
                }
                Some(el.into())
            }
        }
    }

    /// Strip presentation attributes and assign the sanitized style.
    ///
    /// A non-empty stored style always replaces the tag preset, never
    /// concatenates with it. Paragraphs additionally get a margin reset so
    /// external rendering stays consistent.
    pub fn apply_style_policy(&self, el: &mut MarkupElement, stored_style: &str) {
        el.remove_attr("class");
        if el.get_attr("dir") == Some("ltr") {
            el.remove_attr("dir");
        }

        let mut candidate = if stored_style.is_empty() {
            block_preset(&el.tag).unwrap_or("").to_string()
        } else {
            stored_style.to_string()
        };
        if el.tag == "p" {
            candidate = set_style_prop(&candidate, "margin", Some("0"));
        }

        match self.sanitizer.sanitize(&el.tag, &candidate) {
            Some(style) => el.set_attr("style", style),
            None => el.remove_attr("style"),
        }
    }

    fn export_inline_children(&self, tree: &DocumentTree, id: NodeId, el: &mut MarkupElement) {
        for &child_id in tree.children_of(id) {
            if let Some(child) = self.export_node(tree, child_id) {
                el.children.push(child);
            }
        }
    }
}

/// Tags serialized without a closing tag
const VOID_TAGS: &[&str] = &["br", "img", "col"];

/// Serialize markup nodes to an HTML string with escaped text and attributes
pub fn to_html(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &MarkupNode) {
    match node {
        MarkupNode::Text(text) => {
            out.push_str(&html_escape::encode_text(text));
        }
        MarkupNode::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&el.tag.as_str()) {
                return;
            }
            for child in &el.children {
                write_node(out, child);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}
