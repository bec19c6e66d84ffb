//! mdreflow Parser
//!
//! Line-oriented recognition of the Markdown structure mdreflow cares
//! about. There is no syntax tree: every line is mapped to one
//! [`LineKind`] by a fixed sequence of recognizers, and the only state
//! carried between lines is whether a fence is open.
//!
//! # Example
//!
//! ```
//! use mdreflow_parser::classify;
//! use mdreflow_core::LineKind;
//!
//! let (kind, fence_open) = classify("```rust", false);
//! assert_eq!(kind, LineKind::FenceDelimiter);
//! assert!(fence_open);
//!
//! let (kind, _) = classify("| a | b |", fence_open);
//! assert_eq!(kind, LineKind::InsideFence);
//! ```

pub mod links;

pub use links::{
    collapse_double_links, convert_code_paths, extract_links, find_code_regions, rewrite_links,
    unwrap_code_wrapped_links,
};

use mdreflow_core::LineKind;
use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// Regex patterns
// =============================================================================

/// Regex for fence delimiters, matched against the trimmed line
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(```|~~~)").unwrap());

/// Regex for table rows, matched against the untrimmed line
static TABLE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\|.*\|\s*$").unwrap());

/// Regex for unordered list items: -, *, +
static UNORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-*+])\s+(.*)$").unwrap());

/// Regex for ordered list items: 1. style
static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").unwrap());

/// Regex for blockquotes
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(>+)\s?(.*)$").unwrap());

/// Exact trimmed lines read as a horizontal rule.
pub const RULE_TOKENS: [&str; 3] = ["---", "***", "___"];

/// Lines indented this far are code.
const HARD_INDENT: &str = "    ";

// =============================================================================
// Classification
// =============================================================================

/// Whether a line opens or closes a fence.
pub fn is_fence_delimiter(line: &str) -> bool {
    FENCE_RE.is_match(line.trim())
}

/// Classify a line given the fence state before it.
///
/// Returns the line's kind and the fence state after it. Total over all
/// strings and free of side effects.
pub fn classify(line: &str, fence_open: bool) -> (LineKind, bool) {
    if is_fence_delimiter(line) {
        return (LineKind::FenceDelimiter, !fence_open);
    }
    if fence_open {
        return (LineKind::InsideFence, true);
    }
    (classify_outside_fence(line), false)
}

fn classify_outside_fence(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('#') {
        return LineKind::Heading;
    }
    if RULE_TOKENS.contains(&trimmed) {
        return LineKind::HorizontalRule;
    }
    if TABLE_ROW_RE.is_match(line) {
        return LineKind::TableRow;
    }

    let line = line.trim_end();
    let content = line.trim_start();
    let indent = &line[..line.len() - content.len()];

    if line.starts_with(HARD_INDENT) {
        return LineKind::HardIndentedCode {
            indent: indent.to_string(),
            content: content.to_string(),
        };
    }

    if !indent.is_empty() && indent.chars().count() <= 3 {
        // An indented marker is a nested list entry, not a continuation.
        return list_item(indent, content).unwrap_or_else(|| LineKind::SoftIndentedContinuation {
            indent: indent.to_string(),
            content: content.to_string(),
        });
    }

    if let Some(item) = list_item("", trimmed) {
        return item;
    }

    if let Some(caps) = QUOTE_RE.captures(trimmed) {
        return LineKind::BlockQuote {
            depth: caps[1].len(),
            content: caps[2].to_string(),
        };
    }

    LineKind::PlainText {
        content: trimmed.to_string(),
    }
}

fn list_item(indent: &str, text: &str) -> Option<LineKind> {
    if let Some(caps) = UNORDERED_RE.captures(text) {
        let marker = caps[1].chars().next()?;
        return Some(LineKind::UnorderedListItem {
            indent: indent.to_string(),
            marker,
            content: caps[2].to_string(),
        });
    }
    if let Some(caps) = ORDERED_RE.captures(text) {
        return Some(LineKind::OrderedListItem {
            indent: indent.to_string(),
            number: caps[1].to_string(),
            content: caps[2].to_string(),
        });
    }
    None
}

/// Classify every line of a document, threading the fence state.
pub fn classify_all<'a, I>(lines: I) -> Vec<LineKind>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fence_open = false;
    lines
        .into_iter()
        .map(|line| {
            let (kind, after) = classify(line, fence_open);
            fence_open = after;
            kind
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(line: &str) -> LineKind {
        classify(line, false).0
    }

    fn plain(content: &str) -> LineKind {
        LineKind::PlainText {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_fence_toggles() {
        assert_eq!(classify("```", false), (LineKind::FenceDelimiter, true));
        assert_eq!(classify("~~~", true), (LineKind::FenceDelimiter, false));
        assert_eq!(classify("  ```python", false), (LineKind::FenceDelimiter, true));
    }

    #[test]
    fn test_inside_fence_wins_over_structure() {
        for line in ["# heading", "| a | b |", "- item", "", "    code"] {
            assert_eq!(classify(line, true), (LineKind::InsideFence, true));
        }
    }

    #[test]
    fn test_blank() {
        assert_eq!(kind(""), LineKind::Blank);
        assert_eq!(kind("   \t"), LineKind::Blank);
    }

    #[test]
    fn test_heading() {
        assert_eq!(kind("# Title"), LineKind::Heading);
        assert_eq!(kind("  ### Deep"), LineKind::Heading);
        assert_eq!(kind("#hashtag"), LineKind::Heading);
    }

    #[test]
    fn test_horizontal_rule_beats_list() {
        assert_eq!(kind("---"), LineKind::HorizontalRule);
        assert_eq!(kind("***"), LineKind::HorizontalRule);
        assert_eq!(kind("  ___  "), LineKind::HorizontalRule);
        // Not a rule token, so it falls through to the list recognizer
        assert!(kind("- - -").is_list_item());
    }

    #[test]
    fn test_table_row_uses_untrimmed_line() {
        assert_eq!(kind("| a | b |"), LineKind::TableRow);
        assert_eq!(kind("      | indented | row |"), LineKind::TableRow);
        assert_eq!(kind("| not closed"), plain("| not closed"));
    }

    #[test]
    fn test_hard_indented_code() {
        assert_eq!(
            kind("    let x = 1;"),
            LineKind::HardIndentedCode {
                indent: "    ".into(),
                content: "let x = 1;".into()
            }
        );
        // Even a list marker is code at four spaces
        assert!(matches!(
            kind("    - item"),
            LineKind::HardIndentedCode { .. }
        ));
    }

    #[test]
    fn test_soft_indented_continuation() {
        assert_eq!(
            kind("  continued text  "),
            LineKind::SoftIndentedContinuation {
                indent: "  ".into(),
                content: "continued text".into()
            }
        );
    }

    #[test]
    fn test_indented_list_item_captures_indent() {
        assert_eq!(
            kind("  - nested"),
            LineKind::UnorderedListItem {
                indent: "  ".into(),
                marker: '-',
                content: "nested".into()
            }
        );
        assert_eq!(
            kind(" 2. second"),
            LineKind::OrderedListItem {
                indent: " ".into(),
                number: "2".into(),
                content: "second".into()
            }
        );
    }

    #[test]
    fn test_unordered_items() {
        for marker in ['-', '*', '+'] {
            assert_eq!(
                kind(&format!("{} entry", marker)),
                LineKind::UnorderedListItem {
                    indent: String::new(),
                    marker,
                    content: "entry".into()
                }
            );
        }
        assert_eq!(kind("-dash"), plain("-dash"));
        assert_eq!(kind("**bold** start"), plain("**bold** start"));
    }

    #[test]
    fn test_ordered_items() {
        assert_eq!(
            kind("12. twelfth item"),
            LineKind::OrderedListItem {
                indent: String::new(),
                number: "12".into(),
                content: "twelfth item".into()
            }
        );
        assert_eq!(kind("1.5 million"), plain("1.5 million"));
    }

    #[test]
    fn test_block_quote() {
        assert_eq!(
            kind("> quoted"),
            LineKind::BlockQuote {
                depth: 1,
                content: "quoted".into()
            }
        );
        assert_eq!(
            kind(">>nested"),
            LineKind::BlockQuote {
                depth: 2,
                content: "nested".into()
            }
        );
        assert_eq!(
            kind(">"),
            LineKind::BlockQuote {
                depth: 1,
                content: String::new()
            }
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(kind("Just words."), plain("Just words."));
    }

    #[test]
    fn test_classify_all_threads_fence_state() {
        let kinds = classify_all(["text", "```", "# not heading", "```", "# heading"]);
        assert_eq!(
            kinds,
            vec![
                plain("text"),
                LineKind::FenceDelimiter,
                LineKind::InsideFence,
                LineKind::FenceDelimiter,
                LineKind::Heading,
            ]
        );
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let kinds = classify_all(["```", "a", "b"]);
        assert_eq!(kinds[1], LineKind::InsideFence);
        assert_eq!(kinds[2], LineKind::InsideFence);
    }
}
