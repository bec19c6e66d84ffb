//! Link policy configuration.
//!
//! This module contains the `LinksConfig` struct which describes the
//! document tree's namespaces and how rewritten targets are spelled.

use serde::{Deserialize, Serialize};

/// Link policy configuration.
///
/// Controls which links are resolved and whether a resolved target is
/// written root-absolute or relative to the referencing document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinksConfig {
    /// Resolve and rewrite internal links.
    /// Default: true
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Top-level segment whose paths are read as root-relative even
    /// without a leading slash.
    /// Default: "context"
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Directory holding per-task dossiers.
    /// Default: "context/tasks"
    #[serde(default = "default_tasks_root")]
    pub tasks_root: String,

    /// Segment under `tasks_root` holding archived dossiers.
    /// Default: "archive"
    #[serde(default = "default_archive_marker")]
    pub archive_marker: String,

    /// Regex a task directory name must match.
    /// Default: "^[A-Z0-9]+-[A-Z0-9-]+$"
    #[serde(default = "default_task_id_pattern")]
    pub task_id_pattern: String,

    /// File name that forces a rewritten inline link's label.
    /// Default: "backlog.md"
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Spell root-absolute targets with a leading `/`.
    /// Default: true
    #[serde(default = "default_true")]
    pub leading_slash: bool,

    /// Turn code spans naming an existing document into links.
    /// Default: true
    #[serde(default = "default_true")]
    pub code_span_links: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: default_namespace(),
            tasks_root: default_tasks_root(),
            archive_marker: default_archive_marker(),
            task_id_pattern: default_task_id_pattern(),
            sentinel: default_sentinel(),
            leading_slash: true,
            code_span_links: true,
        }
    }
}

impl LinksConfig {
    /// `tasks_root` split into path segments.
    pub fn tasks_root_segments(&self) -> Vec<&str> {
        self.tasks_root
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_namespace() -> String {
    "context".to_string()
}

fn default_tasks_root() -> String {
    "context/tasks".to_string()
}

fn default_archive_marker() -> String {
    "archive".to_string()
}

fn default_task_id_pattern() -> String {
    "^[A-Z0-9]+-[A-Z0-9-]+$".to_string()
}

fn default_sentinel() -> String {
    "backlog.md".to_string()
}
