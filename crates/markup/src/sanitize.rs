//! Style sanitization for untrusted input and emitted markup
//!
//! Pasted element styles are stripped of declarations carrying active
//! content; styles attached to text runs additionally pass a property
//! whitelist. Exported styles pass through a [`StyleSanitizer`] that drops
//! dangerous declarations and refuses tags outside the set the exporter
//! emits.

use doc_model::StyleMap;
use regex_lite::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Properties a pasted style may carry onto a text run
const PASTE_STYLE_WHITELIST: &[&str] = &[
    "color",
    "background-color",
    "font-weight",
    "font-style",
    "text-decoration",
    "text-decoration-line",
    "font-size",
    "font-family",
    "letter-spacing",
    "line-height",
    "white-space",
    "word-break",
    "text-transform",
    "vertical-align",
    "text-align",
];

/// Tags the exporter emits; anything else is refused outright
const EXPORT_TAG_WHITELIST: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "span", "br", "img", "table",
    "colgroup", "col", "thead", "tbody", "tr", "td", "th",
];

fn dangerous_value_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)expression\s*\(|url\s*\(|javascript:").expect("static pattern")
    })
}

/// Whether a declaration value smuggles active content
pub fn is_dangerous_value(value: &str) -> bool {
    dangerous_value_pattern().is_match(value)
}

/// Filter a pasted inline style down to whitelisted, safe declarations.
///
/// Unknown properties and dangerous values are dropped silently; the result
/// may be empty.
pub fn sanitize_pasted_style(style: &str) -> String {
    let parsed = StyleMap::parse(style);
    let mut kept = StyleMap::new();
    for (prop, value) in parsed.iter() {
        if !PASTE_STYLE_WHITELIST.contains(&prop) {
            continue;
        }
        if is_dangerous_value(value) {
            debug!(prop, "dropping pasted declaration with active content");
            continue;
        }
        kept.set(prop, value);
    }
    kept.to_style_string()
}

/// Drop declarations carrying active content, keeping every property.
///
/// Element-level styles (tables, rows, cells, blocks) keep their geometry
/// and border declarations; only run styles pass the property whitelist.
pub fn strip_dangerous_declarations(style: &str) -> String {
    let parsed = StyleMap::parse(style);
    let mut kept = StyleMap::new();
    for (prop, value) in parsed.iter() {
        if is_dangerous_value(value) {
            debug!(prop, "dropping pasted declaration with active content");
            continue;
        }
        kept.set(prop, value);
    }
    kept.to_style_string()
}

/// The exporter's hook for style sanitization, keyed by the emitted tag
pub trait StyleSanitizer {
    /// Sanitize a candidate style for a tag. `None` means the whole
    /// attribute is dropped.
    fn sanitize(&self, tag: &str, style: &str) -> Option<String>;
}

/// Default sanitizer: refuses foreign tags, drops declarations with active
/// content, keeps everything else (committed geometry included)
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitelistSanitizer;

impl StyleSanitizer for WhitelistSanitizer {
    fn sanitize(&self, tag: &str, style: &str) -> Option<String> {
        if !EXPORT_TAG_WHITELIST.contains(&tag) {
            debug!(tag, "refusing style for tag outside export whitelist");
            return None;
        }
        let parsed = StyleMap::parse(style);
        let mut kept = StyleMap::new();
        for (prop, value) in parsed.iter() {
            if is_dangerous_value(value) {
                debug!(prop, "dropping exported declaration with active content");
                continue;
            }
            kept.set(prop, value);
        }
        (!kept.is_empty()).then(|| kept.to_style_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_whitelist_keeps_known_props() {
        let out = sanitize_pasted_style("color: red; position: absolute; font-size: 14px");
        assert_eq!(out, "color: red; font-size: 14px");
    }

    #[test]
    fn test_paste_drops_dangerous_values() {
        let out = sanitize_pasted_style("color: expression(alert(1)); font-weight: bold");
        assert_eq!(out, "font-weight: bold");
    }

    #[test]
    fn test_strip_dangerous_keeps_all_other_props() {
        let out = strip_dangerous_declarations(
            "width: 64pt; border: 1px solid black; color: expression(alert(1))",
        );
        assert_eq!(out, "width: 64pt; border: 1px solid black");
    }

    #[test]
    fn test_export_sanitizer_refuses_foreign_tag() {
        assert_eq!(WhitelistSanitizer.sanitize("script", "color: red"), None);
    }

    #[test]
    fn test_export_sanitizer_keeps_geometry() {
        let out = WhitelistSanitizer.sanitize("td", "width: 150px; min-width: 150px");
        assert_eq!(out, Some("width: 150px; min-width: 150px".to_string()));
    }

    #[test]
    fn test_export_sanitizer_drops_url_values() {
        let out = WhitelistSanitizer.sanitize("td", "background: url(javascript:x); color: red");
        assert_eq!(out, Some("color: red".to_string()));
    }

    #[test]
    fn test_export_sanitizer_empty_result_drops_attribute() {
        assert_eq!(WhitelistSanitizer.sanitize("td", ""), None);
    }
}
