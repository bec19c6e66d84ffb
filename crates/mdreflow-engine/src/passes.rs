//! Line passes run before reflow.
//!
//! Each pass sees one line at a time, outside fences only, and returns it
//! borrowed when it has nothing to change.

use mdreflow_links::LinkResolver;
use mdreflow_parser::{collapse_double_links, convert_code_paths, unwrap_code_wrapped_links};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

/// What a pass knows about the line it is looking at.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    /// Document the line belongs to
    pub document: &'a Path,
}

/// A line-level rewrite applied before reflow.
pub trait LinePass: Send + Sync {
    /// Pass name for identification and logging.
    fn name(&self) -> &str;

    /// Rewrite one line. Return `Cow::Borrowed` to leave it alone.
    fn apply<'a>(&self, line: &'a str, ctx: &PassContext<'_>) -> Cow<'a, str>;
}

/// Characters rendered as a space but not treated as one by Markdown tools.
const NON_BREAKING_SPACES: [char; 2] = ['\u{00A0}', '\u{202F}'];

/// Replaces non-breaking spaces with plain spaces.
#[derive(Debug, Default)]
pub struct SpaceNormalizer;

impl LinePass for SpaceNormalizer {
    fn name(&self) -> &str {
        "spaces"
    }

    fn apply<'a>(&self, line: &'a str, _ctx: &PassContext<'_>) -> Cow<'a, str> {
        if line.contains(NON_BREAKING_SPACES) {
            Cow::Owned(line.replace(NON_BREAKING_SPACES, " "))
        } else {
            Cow::Borrowed(line)
        }
    }
}

/// Collapses `[[label](inner)](outer)` into `[label](outer)`.
#[derive(Debug, Default)]
pub struct DoubleLinkCollapser;

impl LinePass for DoubleLinkCollapser {
    fn name(&self) -> &str {
        "double-links"
    }

    fn apply<'a>(&self, line: &'a str, _ctx: &PassContext<'_>) -> Cow<'a, str> {
        collapse_double_links(line)
    }
}

/// Unwraps code-spanned links and links code spans naming a document.
pub struct CodeSpanLinker {
    resolver: Arc<LinkResolver>,
}

impl CodeSpanLinker {
    pub fn new(resolver: Arc<LinkResolver>) -> Self {
        Self { resolver }
    }
}

impl LinePass for CodeSpanLinker {
    fn name(&self) -> &str {
        "code-span-links"
    }

    fn apply<'a>(&self, line: &'a str, _ctx: &PassContext<'_>) -> Cow<'a, str> {
        match unwrap_code_wrapped_links(line) {
            Cow::Borrowed(_) => convert_code_paths(line, |raw| self.resolver.code_path_target(raw)),
            Cow::Owned(unwrapped) => {
                let converted =
                    convert_code_paths(&unwrapped, |raw| self.resolver.code_path_target(raw))
                        .into_owned();
                Cow::Owned(converted)
            }
        }
    }
}

/// Resolves and respells link targets.
pub struct LinkRewriter {
    resolver: Arc<LinkResolver>,
}

impl LinkRewriter {
    pub fn new(resolver: Arc<LinkResolver>) -> Self {
        Self { resolver }
    }
}

impl LinePass for LinkRewriter {
    fn name(&self) -> &str {
        "links"
    }

    fn apply<'a>(&self, line: &'a str, ctx: &PassContext<'_>) -> Cow<'a, str> {
        self.resolver.rewrite_line(ctx.document, line)
    }
}
