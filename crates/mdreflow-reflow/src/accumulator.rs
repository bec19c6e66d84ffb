//! Paragraph accumulation.
//!
//! The accumulator is a fold: [`ReflowState::step`] takes the state and
//! one source line, pushes any finished output lines, and hands back the
//! new state. Reflowable lines collect into a buffer of words that is
//! wrapped when something ends the paragraph.

use crate::wrap::wrap;
use mdreflow_core::{quote_prefix, LineKind, ParagraphContext};
use mdreflow_parser::classify;

/// State carried between lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflowState {
    /// Whether a fence is open after the last line seen
    pub fence_open: bool,
    /// Words of the open paragraph
    pub fragments: Vec<String>,
    /// Prefixes of the open paragraph, `None` when no paragraph is open
    pub context: Option<ParagraphContext>,
}

impl ReflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a paragraph is being collected.
    pub fn is_buffering(&self) -> bool {
        self.context.is_some()
    }

    /// Feed one source line.
    pub fn step(mut self, line: &str, width: usize, out: &mut Vec<String>) -> Self {
        let (kind, fence_open) = classify(line, self.fence_open);
        self.fence_open = fence_open;

        match &kind {
            LineKind::InsideFence => {
                self.flush(width, out);
                out.push(line.to_string());
            }
            LineKind::FenceDelimiter
            | LineKind::Blank
            | LineKind::Heading
            | LineKind::HorizontalRule
            | LineKind::TableRow => {
                self.flush(width, out);
                out.push(line.trim_end().to_string());
            }
            _ if self.continues(&kind) => {
                if let Some(content) = kind.content() {
                    self.push_words(content);
                }
            }
            LineKind::HardIndentedCode { .. } => {
                self.flush(width, out);
                out.push(line.trim_end().to_string());
            }
            LineKind::BlockQuote { content, .. } if content.is_empty() => {
                self.flush(width, out);
                out.push(line.trim_end().to_string());
            }
            _ => {
                self.flush(width, out);
                self.context = ParagraphContext::for_kind(&kind);
                if let Some(content) = kind.content() {
                    self.push_words(content);
                }
            }
        }

        self
    }

    /// Flush whatever is still buffered at end of input.
    pub fn finish(mut self, width: usize, out: &mut Vec<String>) {
        self.flush(width, out);
    }

    /// Whether `kind` extends the open paragraph instead of starting one.
    fn continues(&self, kind: &LineKind) -> bool {
        let Some(context) = &self.context else {
            return false;
        };
        match kind {
            LineKind::PlainText { .. } => true,
            LineKind::SoftIndentedContinuation { indent, .. }
            | LineKind::HardIndentedCode { indent, .. } => *indent == context.subsequent,
            LineKind::BlockQuote { depth, content } => {
                !content.is_empty() && quote_prefix(*depth) == context.subsequent
            }
            _ => false,
        }
    }

    fn push_words(&mut self, content: &str) {
        self.fragments
            .extend(content.split_whitespace().map(str::to_string));
    }

    fn flush(&mut self, width: usize, out: &mut Vec<String>) {
        let Some(context) = self.context.take() else {
            return;
        };
        let fragments = std::mem::take(&mut self.fragments);
        out.extend(wrap(fragments.iter().map(String::as_str), width, &context));
    }
}

/// Reflow a sequence of lines.
pub fn reflow_lines<'a, I>(lines: I, width: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    let state = lines
        .into_iter()
        .fold(ReflowState::new(), |state, line| state.step(line, width, &mut out));
    state.finish(width, &mut out);
    out
}

/// Reflow a whole document.
///
/// Line endings are normalized to `\n` and the result ends with a single
/// newline. An empty document stays empty.
pub fn reflow(text: &str, width: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = reflow_lines(text.lines(), width).join("\n");
    result.push('\n');
    result
}
