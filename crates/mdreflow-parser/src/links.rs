//! Link syntax scanning.
//!
//! Finds inline `[label](target)` and reference `[label]: target` links in
//! a single line and repairs a few link-shaped artifacts. Nothing here
//! decides where a link should point; callers supply that through
//! closures.

use mdreflow_core::{LinkReference, LinkStyle};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Regex for inline links: [label](target), target without whitespace
static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^\s)]+)\)").unwrap());

/// Regex for reference definitions: [label]: target
static REFERENCE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\[([^\]]+)\]:[ \t]+)(\S+)").unwrap());

/// Regex for doubled links: [[label](inner)](outer)
static DOUBLE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\(([^)]+)\)\]\(([^)]+)\)").unwrap());

/// Regex for a link wrapped in a code span: `[label](target)`
static CODE_WRAPPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(\[[^`\]]+\]\([^`]+\))`").unwrap());

/// Regex for a code span holding a bare document path: `dir/file.md#anchor`
static CODE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`([^`\s\[\]()<>]+\.(?:md|MD)(?:[#?][^`\s]*)?)`").unwrap()
});

/// Regex for inline code spans: `code` or ``code``
static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"``[^`]+``|`[^`]+`").unwrap());

/// Regex for anything link-shaped, used to keep code-span conversion out of labels
static LINK_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").unwrap());

/// Find byte ranges of inline code spans in a line.
pub fn find_code_regions(line: &str) -> Vec<(usize, usize)> {
    CODE_SPAN_RE
        .find_iter(line)
        .map(|m| (m.start(), m.end()))
        .collect()
}

fn inside(regions: &[(usize, usize)], offset: usize) -> bool {
    regions
        .iter()
        .any(|&(start, end)| offset >= start && offset < end)
}

/// Collect the links written on a line.
///
/// Inline links inside code spans are ignored.
pub fn extract_links(line: &str) -> Vec<LinkReference> {
    let code = find_code_regions(line);
    let mut links: Vec<LinkReference> = INLINE_LINK_RE
        .captures_iter(line)
        .filter(|caps| !inside(&code, caps.get(0).map_or(0, |m| m.start())))
        .map(|caps| LinkReference::inline(&caps[1], &caps[2]))
        .collect();

    if let Some(caps) = REFERENCE_LINK_RE.captures(line) {
        links.push(LinkReference::reference(&caps[2], &caps[3]));
    }

    links
}

/// Rewrite the links on a line.
///
/// `rewrite` sees every link [`extract_links`] would report and returns a
/// replacement, or `None` to keep the link as written. Reference
/// definitions keep their label; only the target is replaced.
pub fn rewrite_links<F>(line: &str, mut rewrite: F) -> Cow<'_, str>
where
    F: FnMut(&LinkReference) -> Option<LinkReference>,
{
    let code = find_code_regions(line);
    let mut changed = false;

    let inline = INLINE_LINK_RE.replace_all(line, |caps: &Captures| {
        let whole = &caps[0];
        if caps.get(0).is_some_and(|m| inside(&code, m.start())) {
            return whole.to_string();
        }
        let link = LinkReference::inline(&caps[1], &caps[2]);
        match rewrite(&link) {
            Some(new) if new != link => {
                changed = true;
                format!("[{}]({})", new.label, new.target)
            }
            _ => whole.to_string(),
        }
    });

    let mut result = inline.into_owned();
    if let Some(caps) = REFERENCE_LINK_RE.captures(&result) {
        let link = LinkReference::reference(&caps[2], &caps[3]);
        if let Some(new) = rewrite(&link) {
            if new.target != link.target && new.style == LinkStyle::Reference {
                let end = caps.get(0).map_or(0, |m| m.end());
                result = format!("{}{}{}", &caps[1], new.target, &result[end..]);
                changed = true;
            }
        }
    }

    if changed {
        Cow::Owned(result)
    } else {
        Cow::Borrowed(line)
    }
}

/// Collapse `[[label](inner)](outer)` into `[label](outer)`.
pub fn collapse_double_links(line: &str) -> Cow<'_, str> {
    DOUBLE_LINK_RE.replace_all(line, "[$1]($3)")
}

/// Drop a code span that wraps nothing but a link.
pub fn unwrap_code_wrapped_links(line: &str) -> Cow<'_, str> {
    CODE_WRAPPED_LINK_RE.replace_all(line, "$1")
}

/// Turn code spans holding a bare document path into links.
///
/// `target_for` receives the span's text and returns the link target, or
/// `None` to keep the code span. Spans that sit inside a link (for
/// example as its label) are never converted.
pub fn convert_code_paths<F>(line: &str, mut target_for: F) -> Cow<'_, str>
where
    F: FnMut(&str) -> Option<String>,
{
    let links: Vec<(usize, usize)> = LINK_SPAN_RE
        .find_iter(line)
        .map(|m| (m.start(), m.end()))
        .collect();

    CODE_PATH_RE.replace_all(line, |caps: &Captures| {
        let whole = &caps[0];
        if caps.get(0).is_some_and(|m| inside(&links, m.start())) {
            return whole.to_string();
        }
        let raw = &caps[1];
        match target_for(raw) {
            Some(target) => format!("[{}]({})", raw, target),
            None => whole.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_inline_links() {
        let links = extract_links("See [setup](../setup.md) and [site](https://example.com).");
        assert_eq!(
            links,
            vec![
                LinkReference::inline("setup", "../setup.md"),
                LinkReference::inline("site", "https://example.com"),
            ]
        );
    }

    #[test]
    fn test_extract_reference_link() {
        let links = extract_links("[guide]: docs/guide.md");
        assert_eq!(links, vec![LinkReference::reference("guide", "docs/guide.md")]);
    }

    #[test]
    fn test_extract_skips_code_spans() {
        let links = extract_links("Use `[x](y.md)` literally, but [z](w.md) is real.");
        assert_eq!(links, vec![LinkReference::inline("z", "w.md")]);
    }

    #[test]
    fn test_extract_ignores_targets_with_spaces() {
        assert!(extract_links("[a](b.md \"title\")").is_empty());
    }

    #[test]
    fn test_rewrite_inline_target() {
        let out = rewrite_links("Read [intro](intro.md) first.", |link| {
            Some(LinkReference::inline(link.label.clone(), "/docs/intro.md"))
        });
        assert_eq!(out, "Read [intro](/docs/intro.md) first.");
    }

    #[test]
    fn test_rewrite_none_borrows() {
        let line = "Read [intro](intro.md) first.";
        let out = rewrite_links(line, |_| None);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, line);
    }

    #[test]
    fn test_rewrite_reference_keeps_label() {
        let out = rewrite_links("[intro]: intro.md", |link| {
            Some(LinkReference::reference("ignored", format!("/{}", link.target)))
        });
        assert_eq!(out, "[intro]: /intro.md");
    }

    #[test]
    fn test_rewrite_skips_code_spans() {
        let line = "`[a](b.md)` and [c](d.md)";
        let out = rewrite_links(line, |link| {
            Some(LinkReference::inline(link.label.clone(), "x.md"))
        });
        assert_eq!(out, "`[a](b.md)` and [c](x.md)");
    }

    #[test]
    fn test_collapse_double_links() {
        assert_eq!(
            collapse_double_links("[[caption](inner/path.md)](outer/path.md)"),
            "[caption](outer/path.md)"
        );
        assert_eq!(collapse_double_links("[plain](link.md)"), "[plain](link.md)");
    }

    #[test]
    fn test_unwrap_code_wrapped_links() {
        assert_eq!(
            unwrap_code_wrapped_links("See `[notes](notes.md)` here"),
            "See [notes](notes.md) here"
        );
        assert_eq!(unwrap_code_wrapped_links("`code` stays"), "`code` stays");
    }

    #[test]
    fn test_convert_code_paths() {
        let out = convert_code_paths("Open `context/plan.md#goals` now", |raw| {
            Some(format!("/{}", raw))
        });
        assert_eq!(out, "Open [context/plan.md#goals](/context/plan.md#goals) now");
    }

    #[test]
    fn test_convert_code_paths_declined() {
        let out = convert_code_paths("Open `missing.md` now", |_| None);
        assert_eq!(out, "Open `missing.md` now");
    }

    #[test]
    fn test_convert_code_paths_skips_link_labels() {
        let line = "[`plan.md`](context/plan.md)";
        let out = convert_code_paths(line, |raw| Some(raw.to_string()));
        assert_eq!(out, line);
    }

    #[test]
    fn test_convert_code_paths_ignores_non_paths() {
        let line = "`let x = a.md` and `README.txt`";
        let out = convert_code_paths(line, |raw| Some(raw.to_string()));
        assert_eq!(out, line);
    }
}
