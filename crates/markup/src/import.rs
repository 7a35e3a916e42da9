//! Markup and delimited-text import
//!
//! Two entry modes: a table-shaped markup tree, and flat tab/newline
//! delimited text (spreadsheet paste). Both produce document-model subtrees.
//! The block/inline walk keeps a current-block accumulator: inline content
//! flows into it, block elements flush it and open their own, and nested
//! blocks flatten rather than nest.

use crate::{
    column_width_hints, compute_pasted_style, CssRuleSet, MarkupElement, MarkupError, MarkupNode,
    Result,
};
use doc_model::{
    merge_styles, pick_text_align, DocumentTree, ImageNode, Node, NodeId, NodeType, Paragraph,
    Quote, Table, TableCell, TableRow, TextAlign, TextRun,
};
use tracing::debug;

/// Style applied to tables imported from delimited text or unstyled markup
pub const DEFAULT_TABLE_STYLE: &str =
    "border-collapse: collapse; table-layout: fixed; width: 100%";

/// Tags that open a block boundary during the walk
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "blockquote",
    "thead", "tbody", "tfoot", "tr", "td", "th",
];

fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Converts external markup trees and delimited text into document nodes.
///
/// The rule set is passed in explicitly so styling is a pure function of
/// the input; there is no shared cache between imports.
#[derive(Debug, Default)]
pub struct MarkupImporter {
    rules: CssRuleSet,
}

impl MarkupImporter {
    /// Create an importer over a parsed rule set
    pub fn new(rules: CssRuleSet) -> Self {
        Self { rules }
    }

    /// Create an importer from embedded stylesheet text
    pub fn from_stylesheet(css: &str) -> Self {
        Self::new(CssRuleSet::parse(css))
    }

    /// Import a general pasted fragment, appending the resulting blocks to
    /// the document body. Returns the appended block IDs.
    pub fn import_fragment(
        &self,
        nodes: &[MarkupNode],
        tree: &mut DocumentTree,
    ) -> Result<Vec<NodeId>> {
        let blocks = self.walk_blocks(nodes, "", None, tree)?;
        for &block_id in &blocks {
            set_block_parent(tree, block_id, None);
            tree.body.push(block_id);
        }
        Ok(blocks)
    }

    /// Import a table element, appending the table to the document body
    pub fn import_table(&self, element: &MarkupElement, tree: &mut DocumentTree) -> Result<NodeId> {
        let table_id = self.build_table(element, tree)?;
        tree.body.push(table_id);
        Ok(table_id)
    }

    /// Import flat tab/newline delimited text as a table. Returns `None`
    /// when no row has any non-empty field.
    pub fn import_delimited(&self, text: &str, tree: &mut DocumentTree) -> Result<Option<NodeId>> {
        let rows: Vec<Vec<String>> = parse_delimited(text)
            .into_iter()
            .filter(|fields| !fields.iter().all(|f| f.trim().is_empty()))
            .collect();
        if rows.is_empty() {
            return Ok(None);
        }

        let table = Table::with_style(merge_styles([DEFAULT_TABLE_STYLE]));
        let table_id = table.id();
        tree.nodes.tables.insert(table_id, table);

        for fields in rows {
            let row_id = tree.insert_table_row(TableRow::new(), table_id, None)?;
            for field in fields {
                let cell_id = tree.insert_table_cell(TableCell::new(), row_id, None)?;
                let para_id = tree.insert_paragraph_into_cell(Paragraph::new(), cell_id, None)?;
                for (i, segment) in field.split('\n').enumerate() {
                    if i > 0 {
                        tree.insert_line_break(para_id, None)?;
                    }
                    if !segment.is_empty() {
                        tree.insert_run(TextRun::new(segment), para_id, None)?;
                    }
                }
            }
        }

        tree.body.push(table_id);
        Ok(Some(table_id))
    }

    fn build_table(&self, element: &MarkupElement, tree: &mut DocumentTree) -> Result<NodeId> {
        if element.tag != "table" {
            return Err(MarkupError::NotATable(element.tag.clone()));
        }

        // Pasted tables always carry the default geometry; source
        // declarations overlay it once active content is stripped.
        let style = merge_styles([
            DEFAULT_TABLE_STYLE.to_string(),
            compute_pasted_style(element, &self.rules, ""),
        ]);
        let table = Table::with_style(style);
        let table_id = table.id();
        tree.nodes.tables.insert(table_id, table);

        let hints = column_width_hints(element);

        for row_el in collect_rows(element) {
            let cells: Vec<&MarkupElement> = row_el
                .children
                .iter()
                .filter_map(MarkupNode::as_element)
                .filter(|el| el.tag == "td" || el.tag == "th")
                .collect();

            if cells
                .iter()
                .all(|cell| cell.text_content().trim().is_empty())
            {
                debug!("skipping table row with no cell text");
                continue;
            }

            let row_style = compute_pasted_style(row_el, &self.rules, "");
            let row_id = tree.insert_table_row(TableRow::with_style(row_style), table_id, None)?;

            let mut col_index = 0usize;
            for cell_el in cells {
                let col_span = parse_span(cell_el.get_attr("colspan"));
                let row_span = parse_span(cell_el.get_attr("rowspan"));

                let mut cell_style = compute_pasted_style(cell_el, &self.rules, "");
                if let Some(Some(hint)) = hints.get(col_index) {
                    cell_style = merge_styles([cell_style.as_str(), hint.as_str()]);
                }

                let cell_align = pick_text_align(&cell_style);
                let cell = TableCell::with_spans(
                    cell_el.tag == "th",
                    col_span,
                    row_span,
                    cell_style,
                );
                let cell_id = tree.insert_table_cell(cell, row_id, None)?;

                let mut blocks = self.walk_blocks(&cell_el.children, "", cell_align, tree)?;
                if blocks.is_empty() {
                    let mut para = Paragraph::new();
                    para.set_alignment(cell_align);
                    let para_id = para.id();
                    tree.nodes.paragraphs.insert(para_id, para);
                    blocks.push(para_id);
                }
                for block_id in blocks {
                    set_block_parent(tree, block_id, Some(cell_id));
                    if let Some(cell) = tree.get_table_cell_mut(cell_id) {
                        cell.add_child(block_id);
                    }
                }

                col_index += col_span as usize;
            }
        }

        Ok(table_id)
    }

    fn walk_blocks(
        &self,
        nodes: &[MarkupNode],
        inherited: &str,
        cell_align: Option<TextAlign>,
        tree: &mut DocumentTree,
    ) -> Result<Vec<NodeId>> {
        let mut sink = BlockSink::default();
        self.walk(nodes, inherited, cell_align, tree, &mut sink)?;
        sink.flush(tree);
        Ok(sink.blocks)
    }

    fn walk(
        &self,
        nodes: &[MarkupNode],
        inherited: &str,
        cell_align: Option<TextAlign>,
        tree: &mut DocumentTree,
        sink: &mut BlockSink,
    ) -> Result<()> {
        for node in nodes {
            match node {
                MarkupNode::Text(text) => {
                    let content = text.replace(['\r', '\n'], "");
                    if content.trim().is_empty() {
                        continue;
                    }
                    let block_id = sink.ensure_block(tree, cell_align);
                    // Runs hold only whitelisted text styling.
                    let run_style = crate::sanitize_pasted_style(inherited);
                    tree.insert_run(TextRun::styled(content, run_style), block_id, None)?;
                }
                MarkupNode::Element(el) => {
                    self.walk_element(el, inherited, cell_align, tree, sink)?;
                }
            }
        }
        Ok(())
    }

    fn walk_element(
        &self,
        el: &MarkupElement,
        inherited: &str,
        cell_align: Option<TextAlign>,
        tree: &mut DocumentTree,
        sink: &mut BlockSink,
    ) -> Result<()> {
        match el.tag.as_str() {
            "br" => {
                let block_id = sink.ensure_block(tree, cell_align);
                tree.insert_line_break(block_id, None)?;
            }
            "img" => {
                let Some(src) = el.get_attr("src") else {
                    return Ok(());
                };
                let mut image = ImageNode::new(src, el.get_attr("alt").unwrap_or(""));
                image.width = el.get_attr("width").and_then(|w| w.trim().parse().ok());
                image.height = el.get_attr("height").and_then(|h| h.trim().parse().ok());
                let block_id = sink.ensure_block(tree, cell_align);
                tree.insert_image(image, block_id, None)?;
            }
            "table" => {
                sink.flush(tree);
                let table_id = self.build_table(el, tree)?;
                sink.blocks.push(table_id);
            }
            "style" | "script" | "colgroup" | "col" | "meta" | "link" | "title" => {}
            tag if is_block_tag(tag) => {
                sink.flush(tree);
                let effective = compute_pasted_style(el, &self.rules, inherited);
                let align = pick_text_align(&effective).or(cell_align);
                let block_id = new_block_node(tree, tag, &effective, align);

                if el.children.is_empty() {
                    // Containers must never end up with zero paragraphs.
                    sink.blocks.push(block_id);
                } else {
                    sink.current = Some(block_id);
                    self.walk(&el.children, &effective, align, tree, sink)?;
                    sink.flush(tree);
                }
            }
            _ => {
                // Inline element: pass the computed style down, no boundary.
                let effective = compute_pasted_style(el, &self.rules, inherited);
                self.walk(&el.children, &effective, cell_align, tree, sink)?;
            }
        }
        Ok(())
    }
}

/// Accumulator for the block/inline walk. `current` holds an open block
/// not yet committed to `blocks`; empty open blocks are discarded on flush.
#[derive(Debug, Default)]
struct BlockSink {
    blocks: Vec<NodeId>,
    current: Option<NodeId>,
}

impl BlockSink {
    fn ensure_block(&mut self, tree: &mut DocumentTree, cell_align: Option<TextAlign>) -> NodeId {
        if let Some(id) = self.current {
            return id;
        }
        let mut para = Paragraph::new();
        para.set_alignment(cell_align);
        let id = para.id();
        tree.nodes.paragraphs.insert(id, para);
        self.current = Some(id);
        id
    }

    fn flush(&mut self, tree: &mut DocumentTree) {
        let Some(id) = self.current.take() else {
            return;
        };
        if tree.children_of(id).is_empty() {
            tree.nodes.paragraphs.remove(&id);
            tree.nodes.headings.remove(&id);
            tree.nodes.quotes.remove(&id);
        } else {
            self.blocks.push(id);
        }
    }
}

fn new_block_node(
    tree: &mut DocumentTree,
    tag: &str,
    style: &str,
    align: Option<TextAlign>,
) -> NodeId {
    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag.as_bytes()[1] - b'0';
            let mut heading = doc_model::Heading::new(level);
            heading.style = style.to_string();
            let id = heading.id();
            tree.nodes.headings.insert(id, heading);
            id
        }
        "blockquote" => {
            let mut quote = Quote::new();
            quote.style = style.to_string();
            let id = quote.id();
            tree.nodes.quotes.insert(id, quote);
            id
        }
        _ => {
            let mut para = Paragraph::with_style(style);
            para.set_alignment(align);
            let id = para.id();
            tree.nodes.paragraphs.insert(id, para);
            id
        }
    }
}

fn set_block_parent(tree: &mut DocumentTree, block_id: NodeId, parent: Option<NodeId>) {
    match tree.node_type(block_id) {
        Some(NodeType::Paragraph) => {
            if let Some(n) = tree.nodes.paragraphs.get_mut(&block_id) {
                n.set_parent(parent);
            }
        }
        Some(NodeType::Heading) => {
            if let Some(n) = tree.nodes.headings.get_mut(&block_id) {
                n.set_parent(parent);
            }
        }
        Some(NodeType::Quote) => {
            if let Some(n) = tree.nodes.quotes.get_mut(&block_id) {
                n.set_parent(parent);
            }
        }
        Some(NodeType::Table) => {
            if let Some(n) = tree.nodes.tables.get_mut(&block_id) {
                n.set_parent(parent);
            }
        }
        _ => {}
    }
}

fn collect_rows<'a>(table: &'a MarkupElement) -> Vec<&'a MarkupElement> {
    let mut rows = Vec::new();
    for child in table.children.iter().filter_map(MarkupNode::as_element) {
        match child.tag.as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(child.children_with_tag("tr")),
            _ => {}
        }
    }
    rows
}

fn parse_span(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Split delimited clipboard text into rows of fields. Double-quoted fields
/// may contain tabs and newlines; `""` inside a quoted field is a literal
/// quote. Non-breaking spaces are replaced and fields trimmed.
fn parse_delimited(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            '\t' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }

    for row in &mut rows {
        for field in row.iter_mut() {
            *field = field.replace('\u{00A0}', " ").trim().to_string();
        }
    }
    rows
}
