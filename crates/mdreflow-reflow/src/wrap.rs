//! Greedy word wrapping.
//!
//! Words are first grouped into unbreakable units, then packed onto lines
//! no wider than the target width. Width is measured in terminal columns.

use mdreflow_core::ParagraphContext;
use mdreflow_parser::RULE_TOKENS;
use unicode_width::UnicodeWidthStr;

/// Whether a word would be read back as structure if it started a line.
///
/// Such words are glued to the word before them so a wrapped line never
/// begins with a heading, quote, table, fence, list marker or rule.
pub fn is_hazard(word: &str) -> bool {
    if word.starts_with('#') || word.starts_with('>') || word.starts_with('|') {
        return true;
    }
    if word.starts_with("```") || word.starts_with("~~~") {
        return true;
    }
    if matches!(word, "-" | "*" | "+") || RULE_TOKENS.contains(&word) {
        return true;
    }
    is_ordinal(word)
}

fn is_ordinal(word: &str) -> bool {
    match word.strip_suffix('.') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Group words into units that must stay on one line.
pub fn units<'a, I>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut units: Vec<String> = Vec::new();
    for word in words {
        match units.last_mut() {
            Some(last) if is_hazard(word) => {
                last.push(' ');
                last.push_str(word);
            }
            _ => units.push(word.to_string()),
        }
    }
    units
}

/// Wrap words to `width` columns using the context's prefixes.
///
/// The first line carries `context.initial`, every later line
/// `context.subsequent`. A unit wider than the remaining space starts a
/// new line; a unit wider than the whole line overflows on its own.
/// No words means no lines.
pub fn wrap<'a, I>(words: I, width: usize, context: &ParagraphContext) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut empty = true;

    for unit in units(words) {
        let unit_width = UnicodeWidthStr::width(unit.as_str());

        if empty {
            let prefix = if lines.is_empty() {
                &context.initial
            } else {
                &context.subsequent
            };
            current.push_str(prefix);
            current.push_str(&unit);
            current_width = UnicodeWidthStr::width(prefix.as_str()) + unit_width;
            empty = false;
        } else if current_width + 1 + unit_width <= width {
            current.push(' ');
            current.push_str(&unit);
            current_width += 1 + unit_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(&context.subsequent);
            current.push_str(&unit);
            current_width = UnicodeWidthStr::width(context.subsequent.as_str()) + unit_width;
        }
    }

    if !empty {
        lines.push(current);
    }

    lines
}

/// Wrap free text, splitting it on whitespace first.
pub fn wrap_text(text: &str, width: usize, context: &ParagraphContext) -> Vec<String> {
    wrap(text.split_whitespace(), width, context)
}
