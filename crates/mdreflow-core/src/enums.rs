//! Core enums for mdreflow.
//!
//! These enums describe what the classifier sees on a line, how a link was
//! written, and what processing did to a document.

use serde::{Deserialize, Serialize};

/// The shape of a single source line.
///
/// Variants are mutually exclusive. The classifier decides them in the
/// order they are declared here, so an earlier variant always wins over a
/// later one when a line could match both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A line opening or closing a fenced block (``` or ~~~)
    FenceDelimiter,
    /// Any line while a fence is open
    InsideFence,
    /// Empty or whitespace-only line
    Blank,
    /// ATX heading (`#` after trimming)
    Heading,
    /// Thematic break (`---`, `***`, `___`)
    HorizontalRule,
    /// Table row (`| ... |`, indentation allowed)
    TableRow,
    /// Four or more leading spaces
    HardIndentedCode { indent: String, content: String },
    /// One to three leading whitespace characters before ordinary text
    SoftIndentedContinuation { indent: String, content: String },
    /// `-`, `*` or `+` list entry
    UnorderedListItem {
        indent: String,
        marker: char,
        content: String,
    },
    /// `1.` style list entry
    OrderedListItem {
        indent: String,
        number: String,
        content: String,
    },
    /// One or more `>` markers
    BlockQuote { depth: usize, content: String },
    /// Everything else
    PlainText { content: String },
}

impl LineKind {
    /// Whether lines of this kind take part in paragraph reflow.
    pub fn is_reflowable(&self) -> bool {
        matches!(
            self,
            LineKind::SoftIndentedContinuation { .. }
                | LineKind::UnorderedListItem { .. }
                | LineKind::OrderedListItem { .. }
                | LineKind::BlockQuote { .. }
                | LineKind::PlainText { .. }
        )
    }

    /// Whether this line opens a list entry.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            LineKind::UnorderedListItem { .. } | LineKind::OrderedListItem { .. }
        )
    }

    /// Text carried by the line, without indent or markers.
    pub fn content(&self) -> Option<&str> {
        match self {
            LineKind::HardIndentedCode { content, .. }
            | LineKind::SoftIndentedContinuation { content, .. }
            | LineKind::UnorderedListItem { content, .. }
            | LineKind::OrderedListItem { content, .. }
            | LineKind::BlockQuote { content, .. }
            | LineKind::PlainText { content } => Some(content),
            _ => None,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::FenceDelimiter => "fence",
            LineKind::InsideFence => "inside-fence",
            LineKind::Blank => "blank",
            LineKind::Heading => "heading",
            LineKind::HorizontalRule => "rule",
            LineKind::TableRow => "table-row",
            LineKind::HardIndentedCode { .. } => "indented-code",
            LineKind::SoftIndentedContinuation { .. } => "soft-indent",
            LineKind::UnorderedListItem { .. } => "unordered-item",
            LineKind::OrderedListItem { .. } => "ordered-item",
            LineKind::BlockQuote { .. } => "quote",
            LineKind::PlainText { .. } => "text",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a link was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStyle {
    /// `[label](target)`
    Inline,
    /// `[label]: target`
    Reference,
}

impl std::fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkStyle::Inline => write!(f, "inline"),
            LinkStyle::Reference => write!(f, "reference"),
        }
    }
}

/// Result of processing one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Formatting changed the text (or would, in a dry run)
    Changed,
    /// Text was already formatted
    Unchanged,
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Changed => write!(f, "changed"),
            Outcome::Unchanged => write!(f, "unchanged"),
        }
    }
}
