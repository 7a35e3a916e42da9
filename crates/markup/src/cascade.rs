//! Style cascade - stylesheet rules, presentational attributes, tag effects
//!
//! Effective style for an element is computed lowest-precedence-first:
//! inherited style, tag rule, class rules in declared order, inline `style`
//! attribute, tag-implied effects (`<b>`, `<font>`, ...), then presentational
//! `align`/`valign` attributes. Column width hints are appended last by the
//! table importer. Malformed stylesheet text degrades to partial or empty
//! rule sets, never an error.

use crate::MarkupElement;
use doc_model::{merge_styles, TextAlign};
use std::collections::HashMap;

/// Tag and class rules parsed from embedded stylesheet text.
///
/// Declarations are pre-normalized (lower-cased properties, trimmed values,
/// last occurrence winning) so a lookup can be merged directly.
#[derive(Debug, Clone, Default)]
pub struct CssRuleSet {
    by_tag: HashMap<String, String>,
    by_class: HashMap<String, String>,
}

impl CssRuleSet {
    /// An empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `selector { declarations }` blocks from stylesheet text.
    ///
    /// Comments and HTML comment guards are stripped. Comma-separated
    /// selectors are split; bare identifiers go to the tag table, `.name`
    /// selectors to the class table, anything else is ignored.
    pub fn parse(css: &str) -> Self {
        let css = strip_comments(css);
        let mut rules = Self::new();

        for block in css.split('}') {
            let Some((selectors, declarations)) = block.split_once('{') else {
                continue;
            };
            let declarations = merge_styles([declarations]);
            if declarations.is_empty() {
                continue;
            }
            for selector in selectors.split(',') {
                let selector = selector.trim();
                if let Some(class) = selector.strip_prefix('.') {
                    if is_identifier(class) {
                        rules.add_class(class, &declarations);
                    }
                } else if is_identifier(selector) {
                    rules.add_tag(selector, &declarations);
                }
            }
        }

        rules
    }

    fn add_tag(&mut self, tag: &str, declarations: &str) {
        let tag = tag.to_ascii_lowercase();
        let merged = match self.by_tag.get(&tag) {
            Some(existing) => merge_styles([existing.as_str(), declarations]),
            None => declarations.to_string(),
        };
        self.by_tag.insert(tag, merged);
    }

    fn add_class(&mut self, class: &str, declarations: &str) {
        let merged = match self.by_class.get(class) {
            Some(existing) => merge_styles([existing.as_str(), declarations]),
            None => declarations.to_string(),
        };
        self.by_class.insert(class.to_string(), merged);
    }

    /// Declarations for a tag selector
    pub fn tag_rule(&self, tag: &str) -> Option<&str> {
        self.by_tag.get(&tag.to_ascii_lowercase()).map(String::as_str)
    }

    /// Declarations for a class selector
    pub fn class_rule(&self, class: &str) -> Option<&str> {
        self.by_class.get(class).map(String::as_str)
    }

    /// Whether no rules were parsed
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty() && self.by_class.is_empty()
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start..].find("*/") {
            Some(end) => rest = &rest[start + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out.replace("<!--", "").replace("-->", "")
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Compute an element's effective style from the cascade.
///
/// `inherited` is the accumulated style from the ancestor walk; the element's
/// own sources are layered on top of it.
pub fn compute_element_style(element: &MarkupElement, rules: &CssRuleSet, inherited: &str) -> String {
    compute_with(element, rules, inherited, element.style_attr())
}

/// Cascade for pasted content: identical layering, but the inline `style`
/// attribute is stripped of declarations carrying active content first.
/// The property whitelist applies later, when styles attach to text runs.
pub fn compute_pasted_style(element: &MarkupElement, rules: &CssRuleSet, inherited: &str) -> String {
    let inline = crate::strip_dangerous_declarations(element.style_attr());
    compute_with(element, rules, inherited, &inline)
}

fn compute_with(
    element: &MarkupElement,
    rules: &CssRuleSet,
    inherited: &str,
    inline: &str,
) -> String {
    let mut sources: Vec<String> = vec![inherited.to_string()];

    if let Some(tag_rule) = rules.tag_rule(&element.tag) {
        sources.push(tag_rule.to_string());
    }
    for class in element.class_names() {
        if let Some(class_rule) = rules.class_rule(class) {
            sources.push(class_rule.to_string());
        }
    }
    sources.push(inline.to_string());
    if let Some(effect) = inline_effect(element) {
        sources.push(effect);
    }
    if let Some(align) = element.get_attr("align").and_then(TextAlign::parse) {
        sources.push(format!("text-align: {}", align.as_css()));
    }
    if let Some(valign) = element.get_attr("valign") {
        let valign = valign.trim().to_ascii_lowercase();
        if matches!(valign.as_str(), "top" | "middle" | "bottom" | "baseline") {
            sources.push(format!("vertical-align: {}", valign));
        }
    }

    merge_styles(sources)
}

/// The style a tag itself implies, independent of any attribute
pub fn inline_effect(element: &MarkupElement) -> Option<String> {
    match element.tag.as_str() {
        "b" | "strong" => Some("font-weight: bold".to_string()),
        "i" | "em" => Some("font-style: italic".to_string()),
        "u" => Some("text-decoration: underline".to_string()),
        "s" | "strike" => Some("text-decoration: line-through".to_string()),
        "sub" => Some("vertical-align: sub".to_string()),
        "sup" => Some("vertical-align: super".to_string()),
        "font" => {
            let mut parts = Vec::new();
            if let Some(color) = element.get_attr("color") {
                parts.push(format!("color: {}", color.trim()));
            }
            if let Some(face) = element.get_attr("face") {
                parts.push(format!("font-family: {}", face.trim()));
            }
            if let Some(px) = element.get_attr("size").and_then(legacy_font_size_px) {
                parts.push(format!("font-size: {}px", px));
            }
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// Map a legacy `<font size>` value to pixels
fn legacy_font_size_px(size: &str) -> Option<u32> {
    let n: i32 = size.trim().parse().ok()?;
    Some(match n {
        1 => 10,
        2 => 12,
        3 => 14,
        4 => 16,
        5 => 18,
        6 => 24,
        _ => 32,
    })
}

/// Column width hints from a table's `<colgroup>`/`<col>` children, indexed
/// by column position. A `<col>` contributes either its `width` attribute
/// (bare numbers become pixels) or a `width` declaration from its style.
pub fn column_width_hints(table: &MarkupElement) -> Vec<Option<String>> {
    let cols: Vec<&MarkupElement> = match table.first_child_with_tag("colgroup") {
        Some(group) => group.children_with_tag("col").collect(),
        None => table.children_with_tag("col").collect(),
    };

    cols.iter()
        .map(|col| {
            if let Some(width) = col.get_attr("width") {
                let width = width.trim();
                if width.is_empty() {
                    return None;
                }
                let css_width = if width.chars().all(|c| c.is_ascii_digit()) {
                    format!("{}px", width)
                } else {
                    width.to_string()
                };
                return Some(format!("width: {}", css_width));
            }
            let style = doc_model::StyleMap::parse(col.style_attr());
            style.get("width").map(|w| format!("width: {}", w))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_and_class_rules() {
        let rules = CssRuleSet::parse("td { Color: Red; } .note, .warn { font-weight: bold }");
        assert_eq!(rules.tag_rule("td"), Some("color: Red"));
        assert_eq!(rules.class_rule("note"), Some("font-weight: bold"));
        assert_eq!(rules.class_rule("warn"), Some("font-weight: bold"));
    }

    #[test]
    fn test_parse_strips_comments_and_guards() {
        let rules = CssRuleSet::parse("<!-- /* x */ p { color: blue } -->");
        assert_eq!(rules.tag_rule("p"), Some("color: blue"));
    }

    #[test]
    fn test_malformed_css_degrades_to_empty() {
        let rules = CssRuleSet::parse("td color red } { } garbage");
        assert!(rules.is_empty());
    }

    #[test]
    fn test_complex_selectors_ignored() {
        let rules = CssRuleSet::parse("td > p { color: red } #id { color: blue }");
        assert!(rules.tag_rule("td").is_none());
        assert!(rules.tag_rule("p").is_none());
    }

    #[test]
    fn test_cascade_precedence() {
        let rules = CssRuleSet::parse("td { color: red } .hot { color: orange }");
        let el = MarkupElement::new("td")
            .attr("class", "hot")
            .attr("style", "color: green")
            .attr("align", "center");
        let style = compute_element_style(&el, &rules, "color: black; font-size: 12px");
        assert!(style.contains("color: green"));
        assert!(style.contains("font-size: 12px"));
        assert!(style.contains("text-align: center"));
    }

    #[test]
    fn test_inline_effects() {
        assert_eq!(
            inline_effect(&MarkupElement::new("strong")),
            Some("font-weight: bold".to_string())
        );
        let font = MarkupElement::new("font").attr("color", "#333").attr("size", "5");
        assert_eq!(
            inline_effect(&font),
            Some("color: #333; font-size: 18px".to_string())
        );
        assert_eq!(inline_effect(&MarkupElement::new("span")), None);
    }

    #[test]
    fn test_legacy_font_size_caps_at_32() {
        let font = MarkupElement::new("font").attr("size", "7");
        assert_eq!(inline_effect(&font), Some("font-size: 32px".to_string()));
    }

    #[test]
    fn test_column_width_hints() {
        let table = MarkupElement::new("table").child(
            MarkupElement::new("colgroup")
                .child(MarkupElement::new("col").attr("width", "120"))
                .child(MarkupElement::new("col").attr("style", "width: 30%"))
                .child(MarkupElement::new("col")),
        );
        let hints = column_width_hints(&table);
        assert_eq!(hints[0].as_deref(), Some("width: 120px"));
        assert_eq!(hints[1].as_deref(), Some("width: 30%"));
        assert_eq!(hints[2], None);
    }
}
