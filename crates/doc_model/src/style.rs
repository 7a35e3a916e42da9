//! Style maps - parsed inline style strings with last-wins merge
//!
//! Every styled node stores its style as a semicolon-joined
//! `property: value` string. This module is the single point of precedence
//! policy: import, export and resize commit all go through [`StyleMap`] so
//! that merging is deterministic and a round trip is idempotent.

use serde::{Deserialize, Serialize};

/// Text alignment recognized from a `text-align` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Parse a `text-align` value (case-insensitive); unknown values are None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }

    /// The CSS value for this alignment
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// An insertion-ordered property → value mapping parsed from a style string.
///
/// Property names are lower-cased and unique; setting an existing property
/// overwrites its value in place, preserving the original position. Malformed
/// pairs (no colon, empty property) are dropped silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Create an empty style map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a semicolon-joined declaration list
    pub fn parse(style: &str) -> Self {
        let mut map = Self::new();
        map.merge_str(style);
        map
    }

    /// Merge declarations from a style string, later entries winning
    pub fn merge_str(&mut self, style: &str) {
        for pair in style.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some(i) = pair.find(':') else { continue };
            let prop = pair[..i].trim().to_ascii_lowercase();
            let value = pair[i + 1..].trim();
            if prop.is_empty() {
                continue;
            }
            self.set(&prop, value);
        }
    }

    /// Get a property value
    pub fn get(&self, prop: &str) -> Option<&str> {
        let prop = prop.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Upsert a property, keeping its position when already present
    pub fn set(&mut self, prop: &str, value: &str) {
        let prop = prop.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == prop) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((prop, value.to_string())),
        }
    }

    /// Remove a property, returning its previous value
    pub fn remove(&mut self, prop: &str) -> Option<String> {
        let prop = prop.to_ascii_lowercase();
        let pos = self.entries.iter().position(|(k, _)| *k == prop)?;
        Some(self.entries.remove(pos).1)
    }

    /// Check if the map has no declarations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(property, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as `"prop: value; prop: value"` in insertion order
    pub fn to_style_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The `text-align` declaration, if present and recognized
    pub fn text_align(&self) -> Option<TextAlign> {
        self.get("text-align").and_then(TextAlign::parse)
    }
}

impl std::fmt::Display for StyleMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_style_string())
    }
}

/// Merge style strings left-to-right, rightmost source winning per property.
///
/// Empty sources contribute nothing. The output is normalized (lower-cased
/// properties, single spacing), so `merge_styles([merge_styles(s)])` equals
/// `merge_styles(s)`.
pub fn merge_styles<I, S>(sources: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = StyleMap::new();
    for source in sources {
        map.merge_str(source.as_ref());
    }
    map.to_style_string()
}

/// Upsert (or remove, when `value` is None) a single property on a style
/// string, preserving all other declarations.
pub fn set_style_prop(style: &str, prop: &str, value: Option<&str>) -> String {
    let mut map = StyleMap::parse(style);
    match value {
        Some(v) => map.set(prop, v),
        None => {
            map.remove(prop);
        }
    }
    map.to_style_string()
}

/// Extract a recognized `text-align` value from a style string
pub fn pick_text_align(style: &str) -> Option<TextAlign> {
    StyleMap::parse(style).text_align()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let map = StyleMap::parse("Color: red; font-size:16px ;");
        assert_eq!(map.get("color"), Some("red"));
        assert_eq!(map.get("font-size"), Some("16px"));
        assert_eq!(map.to_style_string(), "color: red; font-size: 16px");
    }

    #[test]
    fn test_malformed_pairs_dropped() {
        let map = StyleMap::parse("color red; : blue; width: 10px");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("width"), Some("10px"));
    }

    #[test]
    fn test_merge_rightmost_wins() {
        let merged = merge_styles(["color: red; width: 10px", "color: blue"]);
        assert_eq!(merged, "color: blue; width: 10px");
    }

    #[test]
    fn test_merge_idempotent() {
        let a = "color: Red;; font-weight:bold ; color: green";
        let once = merge_styles([a]);
        let twice = merge_styles([once.as_str()]);
        assert_eq!(once, twice);
        assert_eq!(once, "color: green; font-weight: bold");
    }

    #[test]
    fn test_set_preserves_position() {
        let next = set_style_prop("color: red; width: 10px", "color", Some("blue"));
        assert_eq!(next, "color: blue; width: 10px");
    }

    #[test]
    fn test_set_appends_new_prop() {
        let next = set_style_prop("color: red", "min-width", Some("40px"));
        assert_eq!(next, "color: red; min-width: 40px");
    }

    #[test]
    fn test_remove_prop() {
        let next = set_style_prop("color: red; width: 10px", "width", None);
        assert_eq!(next, "color: red");
    }

    #[test]
    fn test_text_align_pick() {
        assert_eq!(pick_text_align("text-align: CENTER"), Some(TextAlign::Center));
        assert_eq!(pick_text_align("text-align: bogus"), None);
        assert_eq!(pick_text_align("color: red"), None);
    }
}
