//! Tag-default style presets applied on export when a block carries no style

/// The fallback inline style for a block tag, if one exists.
///
/// Presets are stored in normalized declaration form so they pass through
/// the style pipeline byte-for-byte unchanged.
pub fn block_preset(tag: &str) -> Option<&'static str> {
    match tag {
        "p" => Some("font-size: 16px; line-height: 1.5; margin: 0"),
        "blockquote" => Some(
            "margin: 12px 0; padding-left: 12px; border-left: 4px solid #e5e7eb; color: #475569; font-style: italic; line-height: 1.6",
        ),
        "h1" => Some("font-size: 32px; line-height: 1.3; font-weight: 700; margin: 24px 0 16px"),
        "h2" => Some("font-size: 28px; line-height: 1.35; font-weight: 700; margin: 20px 0 14px"),
        "h3" => Some("font-size: 24px; line-height: 1.4; font-weight: 600; margin: 18px 0 12px"),
        "h4" => Some("font-size: 20px; line-height: 1.45; font-weight: 600; margin: 16px 0 10px"),
        "h5" => Some("font-size: 18px; line-height: 1.5; font-weight: 500; margin: 14px 0 8px"),
        "h6" => Some("font-size: 16px; line-height: 1.5; font-weight: 500; margin: 12px 0 6px"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_exist_for_headings() {
        for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            assert!(block_preset(tag).is_some());
        }
        assert!(block_preset("td").is_none());
    }
}
