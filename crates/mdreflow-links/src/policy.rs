//! Where a resolved target should point and how it is spelled.

use mdreflow_config::LinksConfig;
use mdreflow_core::{MdreflowError, Result};
use regex::Regex;

/// Link policy compiled from [`LinksConfig`].
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    namespace: String,
    tasks_root: Vec<String>,
    archive_marker: String,
    task_id: Regex,
    sentinel: String,
    leading_slash: bool,
}

impl LinkPolicy {
    pub fn from_config(config: &LinksConfig) -> Result<Self> {
        let task_id = Regex::new(&config.task_id_pattern).map_err(|e| {
            MdreflowError::Config(format!(
                "Invalid TaskIdPattern {:?}: {}",
                config.task_id_pattern, e
            ))
        })?;
        let tasks_root: Vec<String> = config
            .tasks_root_segments()
            .into_iter()
            .map(String::from)
            .collect();
        if tasks_root.is_empty() {
            return Err(MdreflowError::Config("TasksRoot must not be empty".into()));
        }
        Ok(Self {
            namespace: config.namespace.trim_matches('/').to_string(),
            tasks_root,
            archive_marker: config.archive_marker.clone(),
            task_id,
            sentinel: config.sentinel.clone(),
            leading_slash: config.leading_slash,
        })
    }

    /// Whether a decoded path without a leading slash still names the root.
    pub fn is_namespaced(&self, path: &str) -> bool {
        path.strip_prefix(self.namespace.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Segments below the tasks root, if `path` lies under it.
    fn below_tasks_root<'a>(&self, path: &'a [String]) -> Option<&'a [String]> {
        if path.len() > self.tasks_root.len() && path.starts_with(&self.tasks_root) {
            Some(&path[self.tasks_root.len()..])
        } else {
            None
        }
    }

    /// Whether `path` lies inside one task's dossier, live or archived,
    /// with at least one segment below the task directory.
    pub fn is_task_specific(&self, path: &[String]) -> bool {
        let Some(rest) = self.below_tasks_root(path) else {
            return false;
        };
        if rest[0] == self.archive_marker {
            rest.len() >= 3 && self.task_id.is_match(&rest[1])
        } else {
            rest.len() >= 2 && self.task_id.is_match(&rest[0])
        }
    }

    /// Candidate for a missing target under the tasks root: the same path
    /// with the tasks directory itself dropped.
    pub fn repair(&self, path: &[String]) -> Option<Vec<String>> {
        let rest = self.below_tasks_root(path)?;
        let parent = &self.tasks_root[..self.tasks_root.len() - 1];
        Some(parent.iter().chain(rest).cloned().collect())
    }

    /// Root-absolute spelling of a path.
    pub fn absolute(&self, path: &[String]) -> String {
        let joined = path.join("/");
        if self.leading_slash {
            format!("/{}", joined)
        } else {
            joined
        }
    }

    /// Whether a target's final path segment is the sentinel file.
    pub fn is_sentinel(&self, target: &str) -> bool {
        let (path, _, _) = crate::path::split_target(target);
        path.rsplit('/').next() == Some(self.sentinel.as_str())
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LinkPolicy {
        LinkPolicy::from_config(&LinksConfig::default()).unwrap()
    }

    fn segs(path: &str) -> Vec<String> {
        path.split('/').map(String::from).collect()
    }

    #[test]
    fn test_is_namespaced() {
        let policy = policy();
        assert!(policy.is_namespaced("context/plan.md"));
        assert!(!policy.is_namespaced("contextual/plan.md"));
        assert!(!policy.is_namespaced("context"));
        assert!(!policy.is_namespaced("docs/context/plan.md"));
    }

    #[test]
    fn test_task_specific() {
        let policy = policy();
        assert!(policy.is_task_specific(&segs("context/tasks/ICLI-019/notes.md")));
        assert!(policy.is_task_specific(&segs("context/tasks/archive/ICLI-007/a/b.md")));
        assert!(!policy.is_task_specific(&segs("context/tasks/ICLI-019")));
        assert!(!policy.is_task_specific(&segs("context/tasks/archive/ICLI-007")));
        assert!(!policy.is_task_specific(&segs("context/tasks/lowercase-id/x.md")));
        assert!(!policy.is_task_specific(&segs("context/tasks/backlog.md")));
        assert!(!policy.is_task_specific(&segs("docs/tasks/ICLI-019/x.md")));
    }

    #[test]
    fn test_repair_drops_tasks_segment() {
        let policy = policy();
        assert_eq!(
            policy.repair(&segs("context/tasks/backlog.md")),
            Some(segs("context/backlog.md"))
        );
        assert_eq!(policy.repair(&segs("docs/backlog.md")), None);
        assert_eq!(policy.repair(&segs("context/tasks")), None);
    }

    #[test]
    fn test_absolute_spelling() {
        let mut config = LinksConfig::default();
        assert_eq!(policy().absolute(&segs("docs/setup.md")), "/docs/setup.md");
        config.leading_slash = false;
        let bare = LinkPolicy::from_config(&config).unwrap();
        assert_eq!(bare.absolute(&segs("docs/setup.md")), "docs/setup.md");
    }

    #[test]
    fn test_is_sentinel() {
        let policy = policy();
        assert!(policy.is_sentinel("/context/backlog.md"));
        assert!(policy.is_sentinel("../backlog.md#next"));
        assert!(!policy.is_sentinel("/context/backlog.md.bak"));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = LinksConfig {
            task_id_pattern: "[".into(),
            ..LinksConfig::default()
        };
        assert!(matches!(
            LinkPolicy::from_config(&config),
            Err(MdreflowError::Config(_))
        ));
    }

    #[test]
    fn test_empty_tasks_root_rejected() {
        for root in ["", "/", "//"] {
            let config = LinksConfig {
                tasks_root: root.into(),
                ..LinksConfig::default()
            };
            let err = LinkPolicy::from_config(&config).unwrap_err();
            assert!(err.to_string().contains("TasksRoot"), "{root:?}: {err}");
        }
    }
}
