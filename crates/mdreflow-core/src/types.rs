//! Core types for mdreflow

use crate::enums::{LineKind, LinkStyle};
use serde::{Deserialize, Serialize};

/// Indentation in force for an open paragraph buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphContext {
    /// Prefix for the first wrapped line (includes any list or quote marker)
    pub initial: String,
    /// Prefix for every following line
    pub subsequent: String,
}

impl ParagraphContext {
    /// Create a context from explicit prefixes.
    pub fn new(initial: impl Into<String>, subsequent: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            subsequent: subsequent.into(),
        }
    }

    /// Context where both lines share one prefix.
    pub fn uniform(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            initial: prefix.clone(),
            subsequent: prefix,
        }
    }

    /// Derive the context a reflowable line opens.
    ///
    /// Returns `None` for kinds that never start a paragraph.
    pub fn for_kind(kind: &LineKind) -> Option<Self> {
        match kind {
            LineKind::UnorderedListItem { indent, marker, .. } => Some(Self::new(
                format!("{}{} ", indent, marker),
                format!("{}{}", indent, " ".repeat(marker.len_utf8() + 1)),
            )),
            LineKind::OrderedListItem { indent, number, .. } => Some(Self::new(
                format!("{}{}. ", indent, number),
                format!("{}{}", indent, " ".repeat(number.len() + 2)),
            )),
            LineKind::BlockQuote { depth, .. } => Some(Self::uniform(quote_prefix(*depth))),
            LineKind::SoftIndentedContinuation { indent, .. } => {
                Some(Self::uniform(indent.clone()))
            }
            LineKind::PlainText { .. } => Some(Self::default()),
            _ => None,
        }
    }
}

/// Normalized block quote prefix: one `>` per level and a single space.
pub fn quote_prefix(depth: usize) -> String {
    format!("{} ", ">".repeat(depth.max(1)))
}

/// A link found in a line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReference {
    /// Visible label (inline) or reference name (reference style)
    pub label: String,
    /// Target as written, before any resolution
    pub target: String,
    /// How the link was written
    pub style: LinkStyle,
}

impl LinkReference {
    pub fn inline(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            style: LinkStyle::Inline,
        }
    }

    pub fn reference(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            style: LinkStyle::Reference,
        }
    }
}

/// Outcome of resolving a single link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedLink {
    /// Leave the target as written
    Unchanged,
    /// Replace the target with this string
    Rewritten(String),
}

impl ResolvedLink {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, ResolvedLink::Rewritten(_))
    }

    /// The rewritten target, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            ResolvedLink::Rewritten(target) => Some(target),
            ResolvedLink::Unchanged => None,
        }
    }
}
