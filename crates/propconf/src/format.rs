//! Line-oriented `key=value` properties text
//!
//! The accepted grammar is deliberately small:
//!
//! - blank lines are skipped
//! - lines starting with `#` or `!` (after leading whitespace) are comments
//! - otherwise the key runs up to the first `=`, or the first `:` when the
//!   line has no `=`; a line with neither is a key with an empty value
//! - the key is trimmed, the value is kept verbatim
//!
//! There is no line continuation and no escape processing. Output of
//! [`ConfigItem`]'s `Display` parses back to the same pairs as long as no
//! value contains a line break and every field is non-empty, has no
//! surrounding whitespace, contains no `=`, and does not start with `#` or `!`.

use crate::item::{ConfigItem, HEADER_TAG};

/// Parse properties text into a [`ConfigItem`].
///
/// Later occurrences of a key replace earlier ones.
pub fn parse(text: &str) -> ConfigItem {
    let mut item = ConfigItem::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = split_entry(line);
        item.add_one_item(key, value);
    }

    item
}

fn split_entry(line: &str) -> (&str, &str) {
    let separator = line.find('=').or_else(|| line.find(':'));
    match separator {
        Some(idx) => (line[..idx].trim(), &line[idx + 1..]),
        None => (line.trim_end(), ""),
    }
}

/// Render an optional header followed by the item's lines.
///
/// Each header line, split on `\n`, is prefixed with [`HEADER_TAG`].
/// Trailing empty lines of the header are dropped.
pub fn render(header: Option<&str>, item: Option<&ConfigItem>) -> String {
    let mut out = String::new();

    if let Some(header) = header {
        for line in header.trim_end_matches('\n').split('\n') {
            out.push_str(HEADER_TAG);
            out.push_str(line);
            out.push('\n');
        }
    }

    if let Some(item) = item {
        out.push_str(&item.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let item = parse("# header\n\n  ! other\nk=v\n");
        assert_eq!(item.size(), 1);
        assert_eq!(item.get("k"), Some("v"));
    }

    #[test]
    fn parse_splits_on_first_equals() {
        let item = parse("url=jdbc:db://h/x?a=b\n");
        assert_eq!(item.get("url"), Some("jdbc:db://h/x?a=b"));
    }

    #[test]
    fn parse_falls_back_to_colon() {
        let item = parse("host:example\n");
        assert_eq!(item.get("host"), Some("example"));
    }

    #[test]
    fn parse_key_without_separator_has_empty_value() {
        let item = parse("flag\n");
        assert_eq!(item.get("flag"), Some(""));
    }

    #[test]
    fn parse_strips_carriage_returns() {
        let item = parse("a=1\r\nb=2\r\n");
        assert_eq!(item.get("a"), Some("1"));
        assert_eq!(item.get("b"), Some("2"));
    }

    #[test]
    fn parse_keeps_value_whitespace_and_trims_key() {
        let item = parse(" k =  v \n");
        assert_eq!(item.get("k"), Some("  v "));
    }

    #[test]
    fn leading_value_whitespace_survives_render_and_parse() {
        let item: ConfigItem = [("k", "  v"), ("path", " /opt/a ")].into_iter().collect();
        assert_eq!(parse(&render(None, Some(&item))), item);
    }

    #[test]
    fn fields_starting_with_comment_markers_are_not_read_back() {
        let item: ConfigItem = [("#c", "x"), ("!b", "y"), ("k", "v")].into_iter().collect();
        let parsed = parse(&item.to_string());
        assert_eq!(parsed.size(), 1);
        assert_eq!(parsed.get("k"), Some("v"));
    }

    #[test]
    fn render_without_header() {
        let item: ConfigItem = [("k", "v")].into_iter().collect();
        assert_eq!(render(None, Some(&item)), "k=v\n");
    }

    #[test]
    fn render_header_only() {
        assert_eq!(render(Some("only"), None), "# only\n");
    }

    #[test]
    fn render_drops_trailing_empty_header_lines() {
        let item: ConfigItem = [("k", "v")].into_iter().collect();
        assert_eq!(render(Some("H1\n"), Some(&item)), "# H1\nk=v\n");
        assert_eq!(render(Some("H1\n\nH2\n\n"), None), "# H1\n# \n# H2\n");
    }
}
