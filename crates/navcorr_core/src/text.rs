//! Paragraph text normalization.
//!
//! # Responsibility
//! - Canonicalize user-entered paragraph content and titles at mutation time.
//!
//! # Invariants
//! - Normalized text contains no line breaks.
//! - Normalized text contains no non-breaking, figure or narrow no-break spaces.
//! - Normalized text never contains two consecutive spaces.

use once_cell::sync::Lazy;
use regex::Regex;

static SPECIAL_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{00A0}\x{2007}\x{202F}]").expect("valid special space regex"));
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|[\r\n\x{2028}\x{2029}]").expect("valid line break regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Normalizes raw paragraph content.
///
/// Leading and trailing spaces are kept (collapsed to one) so that text being
/// typed is not rewritten under the cursor; emptiness checks trim separately.
pub fn normalize_content(raw: &str) -> String {
    let spaced = SPECIAL_SPACE_RE.replace_all(raw, " ");
    let joined = LINE_BREAK_RE.replace_all(&spaced, " ");
    WHITESPACE_RE.replace_all(&joined, " ").into_owned()
}

/// Normalizes a paragraph title; blank titles collapse to `None`.
pub fn normalize_title(raw: &str) -> Option<String> {
    let normalized = normalize_content(raw);
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_content, normalize_title};

    #[test]
    fn normalize_content_replaces_special_spaces_and_breaks() {
        assert_eq!(
            normalize_content("foo\u{00A0}bar\r\nbaz   qux"),
            "foo bar baz qux"
        );
    }

    #[test]
    fn normalize_content_handles_figure_and_narrow_spaces() {
        assert_eq!(normalize_content("10\u{2007}000\u{202F}ft"), "10 000 ft");
    }

    #[test]
    fn normalize_content_collapses_tabs_and_bare_carriage_returns() {
        assert_eq!(normalize_content("a\t\tb\rc\n\nd"), "a b c d");
    }

    #[test]
    fn normalize_content_keeps_single_edge_space() {
        assert_eq!(normalize_content("draft   "), "draft ");
    }

    #[test]
    fn normalize_title_trims_and_drops_blank() {
        assert_eq!(normalize_title("  Purpose \n"), Some("Purpose".to_string()));
        assert_eq!(normalize_title(" \u{00A0}\r\n"), None);
    }
}
