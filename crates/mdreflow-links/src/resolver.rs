//! Link target resolution.

use crate::path::{
    has_scheme, normalize, percent_decode, percent_encode, relative_path, split_target,
};
use crate::policy::LinkPolicy;
use crate::probe::TreeProbe;
use log::trace;
use mdreflow_core::{LinkReference, LinkStyle, ResolvedLink};
use mdreflow_parser::rewrite_links;
use std::borrow::Cow;
use std::path::{Component, Path};

/// Prefixes of targets that never point into the tree.
const SKIP_PREFIXES: [&str; 9] = [
    "http://", "https://", "mailto:", "#", "ftp://", "urn:", "data:", "//", "<",
];

/// Whether a target is left alone without looking at the tree.
pub fn should_skip(raw: &str) -> bool {
    raw.is_empty()
        || raw.starts_with('`')
        || SKIP_PREFIXES.iter().any(|prefix| raw.starts_with(prefix))
        || has_scheme(raw)
}

/// Resolves link targets written in documents of one tree.
pub struct LinkResolver {
    probe: Box<dyn TreeProbe>,
    policy: LinkPolicy,
}

impl LinkResolver {
    pub fn new(probe: impl TreeProbe + 'static, policy: LinkPolicy) -> Self {
        Self {
            probe: Box::new(probe),
            policy,
        }
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    pub fn root(&self) -> &Path {
        self.probe.root()
    }

    /// Directory of `document` as root-relative segments.
    ///
    /// Relative document paths are read from the tree root. `None` when
    /// the document lies outside the tree.
    fn document_dir(&self, document: &Path) -> Option<Vec<String>> {
        let relative = if document.is_absolute() {
            document.strip_prefix(self.probe.root()).ok()?
        } else {
            document
        };
        let mut segments = Vec::new();
        for component in relative.parent()?.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_str()?.to_string()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(segments)
    }

    fn exists(&self, path: &[String]) -> bool {
        self.probe.exists(&path.join("/"))
    }

    /// Decide where `raw`, written in `document`, should point.
    ///
    /// Anything that cannot be resolved with confidence is `Unchanged`.
    pub fn resolve(&self, document: &Path, raw: &str) -> ResolvedLink {
        if should_skip(raw) {
            return ResolvedLink::Unchanged;
        }

        let (path, query, fragment) = split_target(raw);
        if path.is_empty() {
            return ResolvedLink::Unchanged;
        }

        let decoded = percent_decode(path);
        let document_dir = self.document_dir(document);

        let resolved = if decoded.starts_with('/') {
            normalize(&[], decoded.trim_start_matches('/'))
        } else if self.policy.is_namespaced(&decoded) {
            normalize(&[], &decoded)
        } else {
            match &document_dir {
                Some(dir) => normalize(dir, &decoded),
                None => {
                    trace!("{}: document outside tree, keeping {}", document.display(), raw);
                    return ResolvedLink::Unchanged;
                }
            }
        };

        let mut target = match resolved {
            Some(target) if !target.is_empty() => target,
            _ => {
                trace!("{}: {} escapes the tree root", document.display(), raw);
                return ResolvedLink::Unchanged;
            }
        };

        if !self.exists(&target) {
            match self.policy.repair(&target) {
                Some(candidate) if self.exists(&candidate) => {
                    trace!("{}: repaired {} to {}", document.display(), raw, candidate.join("/"));
                    target = candidate;
                }
                _ => {
                    trace!("{}: {} does not exist", document.display(), raw);
                    return ResolvedLink::Unchanged;
                }
            }
        }

        let new_path = if self.policy.is_task_specific(&target) {
            match &document_dir {
                Some(dir) => relative_path(dir, &target),
                None => return ResolvedLink::Unchanged,
            }
        } else {
            self.policy.absolute(&target)
        };

        let mut new_target = percent_encode(&new_path);
        if !query.is_empty() {
            new_target.push('?');
            new_target.push_str(query);
        }
        if !fragment.is_empty() {
            new_target.push('#');
            new_target.push_str(fragment);
        }

        if new_target == raw {
            ResolvedLink::Unchanged
        } else {
            trace!("{}: {} -> {}", document.display(), raw, new_target);
            ResolvedLink::Rewritten(new_target)
        }
    }

    /// Resolve one link, applying the sentinel label rule to inline links.
    pub fn rewrite_link(&self, document: &Path, link: &LinkReference) -> Option<LinkReference> {
        let ResolvedLink::Rewritten(target) = self.resolve(document, &link.target) else {
            return None;
        };
        let label = if link.style == LinkStyle::Inline && self.policy.is_sentinel(&target) {
            self.policy.sentinel().to_string()
        } else {
            link.label.clone()
        };
        Some(LinkReference {
            label,
            target,
            style: link.style,
        })
    }

    /// Rewrite every link on a line written in `document`.
    pub fn rewrite_line<'a>(&self, document: &Path, line: &'a str) -> Cow<'a, str> {
        rewrite_links(line, |link| self.rewrite_link(document, link))
    }

    /// Link target for a code span naming a document, if that document
    /// exists relative to the tree root.
    ///
    /// The returned target is root-absolute and may still be respelled by
    /// [`LinkResolver::resolve`].
    pub fn code_path_target(&self, raw: &str) -> Option<String> {
        if should_skip(raw) || raw.starts_with('.') {
            return None;
        }
        let (path, _, _) = split_target(raw);
        let decoded = percent_decode(path);
        let target = normalize(&[], &decoded).filter(|target| !target.is_empty())?;
        if !self.exists(&target) {
            return None;
        }
        Some(format!("/{}", raw.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryTree;
    use mdreflow_config::LinksConfig;

    fn resolver() -> LinkResolver {
        resolver_with(LinksConfig::default())
    }

    fn resolver_with(config: LinksConfig) -> LinkResolver {
        let tree = MemoryTree::with_files(
            "/repo",
            [
                "docs/setup.md",
                "docs/guide/intro.md",
                "docs/my file.md",
                "context/plan.md",
                "context/backlog.md",
                "context/tasks/ICLI-019/a.md",
                "context/tasks/ICLI-019/notes.md",
                "context/tasks/archive/ICLI-007/summary.md",
            ],
        );
        LinkResolver::new(tree, LinkPolicy::from_config(&config).unwrap())
    }

    fn rewritten(target: &str) -> ResolvedLink {
        ResolvedLink::Rewritten(target.to_string())
    }

    #[test]
    fn test_relative_becomes_root_absolute() {
        let r = resolver();
        let doc = Path::new("docs/guide/intro.md");
        assert_eq!(r.resolve(doc, "../setup.md"), rewritten("/docs/setup.md"));
        assert_eq!(r.resolve(doc, "/docs/setup.md"), ResolvedLink::Unchanged);
    }

    #[test]
    fn test_absolute_document_path() {
        let r = resolver();
        let doc = Path::new("/repo/docs/guide/intro.md");
        assert_eq!(r.resolve(doc, "../setup.md"), rewritten("/docs/setup.md"));
    }

    #[test]
    fn test_task_subtree_stays_relative() {
        let r = resolver();
        let doc = Path::new("context/tasks/ICLI-019/a.md");
        assert_eq!(r.resolve(doc, "./notes.md"), rewritten("notes.md"));
        assert_eq!(r.resolve(doc, "notes.md"), ResolvedLink::Unchanged);
        assert_eq!(
            r.resolve(doc, "/context/tasks/ICLI-019/notes.md"),
            rewritten("notes.md")
        );
    }

    #[test]
    fn test_archived_task_relative_from_elsewhere() {
        let r = resolver();
        let doc = Path::new("context/plan.md");
        assert_eq!(
            r.resolve(doc, "context/tasks/archive/ICLI-007/summary.md"),
            rewritten("tasks/archive/ICLI-007/summary.md")
        );
    }

    #[test]
    fn test_namespace_is_root_relative() {
        let r = resolver();
        let doc = Path::new("docs/guide/intro.md");
        assert_eq!(r.resolve(doc, "context/plan.md"), rewritten("/context/plan.md"));
    }

    #[test]
    fn test_passthrough() {
        let r = resolver();
        let doc = Path::new("docs/guide/intro.md");
        for raw in [
            "https://example.com/a.md",
            "http://x",
            "#section",
            "mailto:someone@example.com",
            "ftp://host/file",
            "vscode://file/x",
            "//cdn/x.md",
            "<setup.md>",
            "`setup.md`",
            "",
        ] {
            assert_eq!(r.resolve(doc, raw), ResolvedLink::Unchanged, "{raw}");
        }
    }

    #[test]
    fn test_missing_target_unchanged() {
        let r = resolver();
        assert_eq!(
            r.resolve(Path::new("docs/guide/intro.md"), "nowhere.md"),
            ResolvedLink::Unchanged
        );
    }

    #[test]
    fn test_escape_and_root_unchanged() {
        let r = resolver();
        let doc = Path::new("docs/guide/intro.md");
        assert_eq!(r.resolve(doc, "../../../etc/passwd"), ResolvedLink::Unchanged);
        assert_eq!(r.resolve(doc, "../.."), ResolvedLink::Unchanged);
        assert_eq!(r.resolve(doc, "/"), ResolvedLink::Unchanged);
    }

    #[test]
    fn test_repair_drops_tasks_segment() {
        let r = resolver();
        assert_eq!(
            r.resolve(Path::new("docs/setup.md"), "/context/tasks/backlog.md"),
            rewritten("/context/backlog.md")
        );
    }

    #[test]
    fn test_query_fragment_and_encoding() {
        let r = resolver();
        let doc = Path::new("docs/guide/intro.md");
        assert_eq!(
            r.resolve(doc, "../setup.md?plain=1#install"),
            rewritten("/docs/setup.md?plain=1#install")
        );
        assert_eq!(r.resolve(doc, "../my%20file.md"), rewritten("/docs/my%20file.md"));
        assert_eq!(r.resolve(doc, "/docs/my%20file.md"), ResolvedLink::Unchanged);
    }

    #[test]
    fn test_document_outside_tree() {
        let r = resolver();
        let doc = Path::new("/elsewhere/readme.md");
        assert_eq!(r.resolve(doc, "setup.md"), ResolvedLink::Unchanged);
        assert_eq!(r.resolve(doc, "/docs/setup.md"), ResolvedLink::Unchanged);
        assert_eq!(r.resolve(doc, "docs/setup.md"), ResolvedLink::Unchanged);
    }

    #[test]
    fn test_leading_slash_disabled() {
        let config = LinksConfig {
            leading_slash: false,
            ..LinksConfig::default()
        };
        let r = resolver_with(config);
        assert_eq!(
            r.resolve(Path::new("docs/setup.md"), "/context/plan.md"),
            rewritten("context/plan.md")
        );
    }

    #[test]
    fn test_sentinel_label() {
        let r = resolver();
        let doc = Path::new("docs/setup.md");
        let link = LinkReference::inline("the backlog", "../context/backlog.md");
        assert_eq!(
            r.rewrite_link(doc, &link),
            Some(LinkReference::inline("backlog.md", "/context/backlog.md"))
        );

        let reference = LinkReference::reference("todo", "../context/backlog.md");
        assert_eq!(
            r.rewrite_link(doc, &reference),
            Some(LinkReference::reference("todo", "/context/backlog.md"))
        );
    }

    #[test]
    fn test_rewrite_line() {
        let r = resolver();
        let doc = Path::new("docs/guide/intro.md");
        assert_eq!(
            r.rewrite_line(doc, "See [setup](../setup.md) and [web](https://x.org)."),
            "See [setup](/docs/setup.md) and [web](https://x.org)."
        );
        assert_eq!(r.rewrite_line(doc, "[setup]: ../setup.md"), "[setup]: /docs/setup.md");
    }

    #[test]
    fn test_code_path_target() {
        let r = resolver();
        assert_eq!(
            r.code_path_target("context/plan.md#goals"),
            Some("/context/plan.md#goals".to_string())
        );
        assert_eq!(r.code_path_target("docs/setup.md"), Some("/docs/setup.md".to_string()));
        assert_eq!(r.code_path_target("./docs/setup.md"), None);
        assert_eq!(r.code_path_target("missing.md"), None);
        assert_eq!(r.code_path_target("https://x.org/a.md"), None);
    }
}
