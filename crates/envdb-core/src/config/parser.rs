//! Line parser for `KEY=VALUE` env files.
//!
//! Rules, applied per line:
//! - blank or whitespace-only lines are skipped
//! - `#` as the first non-whitespace character marks a full-line comment
//! - lines without `=` are skipped silently
//! - the first `=` splits key from value, both trimmed
//! - one matching pair of `"` or `'` around the value is stripped
//!
//! There is no escape processing, interpolation, or multi-line support.

/// A single parsed entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Parse a whole file body into entries, in file order.
///
/// Duplicate keys are kept; the store applies last-write-wins.
pub fn parse_str(content: &str) -> Vec<Entry> {
    content.lines().filter_map(parse_line).collect()
}

/// Parse one line. Returns `None` for blanks, comments, and lines without `=`.
pub fn parse_line(line: &str) -> Option<Entry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    // An empty key can't be mirrored into the environment.
    if key.is_empty() {
        return None;
    }

    Some(Entry {
        key: key.to_string(),
        value: strip_quotes(value.trim()).to_string(),
    })
}

/// Strip a single layer of matching `"` or `'` quotes.
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(line: &str) -> Option<(String, String)> {
        parse_line(line).map(|e| (e.key, e.value))
    }

    #[test]
    fn test_plain_pair_is_trimmed() {
        assert_eq!(
            pair("  DB_HOST =  localhost  "),
            Some(("DB_HOST".into(), "localhost".into()))
        );
    }

    #[test]
    fn test_double_and_single_quotes_stripped() {
        assert_eq!(pair(r#"NAME="Alice""#).unwrap().1, "Alice");
        assert_eq!(pair("NAME='Alice'").unwrap().1, "Alice");
    }

    #[test]
    fn test_mismatched_quotes_kept() {
        assert_eq!(pair(r#"NAME="Alice'"#).unwrap().1, r#""Alice'"#);
    }

    #[test]
    fn test_only_one_layer_stripped() {
        assert_eq!(pair(r#"NAME=""Alice"""#).unwrap().1, r#""Alice""#);
    }

    #[test]
    fn test_lone_quote_kept() {
        assert_eq!(pair(r#"Q=""#).unwrap().1, "\"");
    }

    #[test]
    fn test_empty_quoted_value() {
        assert_eq!(pair(r#"EMPTY="""#).unwrap().1, "");
    }

    #[test]
    fn test_quoted_value_keeps_inner_whitespace() {
        assert_eq!(pair(r#"GREETING=" hi there ""#).unwrap().1, " hi there ");
    }

    #[test]
    fn test_no_escape_processing() {
        assert_eq!(pair(r#"PATTERN="a\nb""#).unwrap().1, r"a\nb");
    }

    #[test]
    fn test_split_on_first_equals() {
        assert_eq!(pair("A=B=C"), Some(("A".into(), "B=C".into())));
        assert_eq!(
            pair("KEY4=value=with=equals").unwrap().1,
            "value=with=equals"
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(pair("# DB_HOST=localhost"), None);
        assert_eq!(pair("    # indented=comment"), None);
        assert_eq!(pair("\t#tab"), None);
    }

    #[test]
    fn test_hash_inside_value_is_literal() {
        assert_eq!(pair("COLOR=#ff0000").unwrap().1, "#ff0000");
    }

    #[test]
    fn test_line_without_equals_skipped() {
        assert_eq!(pair("FOO"), None);
        assert_eq!(pair("just some garbage"), None);
    }

    #[test]
    fn test_blank_lines_skipped() {
        assert_eq!(pair(""), None);
        assert_eq!(pair("   \t "), None);
    }

    #[test]
    fn test_empty_key_skipped() {
        assert_eq!(pair("=orphan"), None);
        assert_eq!(pair("   = orphan"), None);
    }

    #[test]
    fn test_empty_value_allowed() {
        assert_eq!(pair("EMPTY="), Some(("EMPTY".into(), String::new())));
    }

    #[test]
    fn test_parse_str_keeps_order_and_duplicates() {
        let entries = parse_str("A=1\n\n# note\nB=2\nFOO\nA=3\r\n");
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "A"]);
        assert_eq!(entries[2].value, "3");
    }
}
