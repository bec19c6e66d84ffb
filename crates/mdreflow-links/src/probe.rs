//! Existence checks against the document tree.

use mdreflow_core::{MdreflowError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Answers whether a root-relative path exists.
///
/// Paths are `/`-separated and never start with `/`.
pub trait TreeProbe: Send + Sync {
    /// Absolute root of the tree.
    fn root(&self) -> &Path;

    /// Whether the file or directory exists.
    fn exists(&self, relative: &str) -> bool;
}

/// A tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskTree {
    root: PathBuf,
}

impl DiskTree {
    /// Open a tree rooted at `root`, which must exist.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|e| {
            MdreflowError::Config(format!("Cannot open tree root {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }
}

impl TreeProbe for DiskTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }
}

/// A tree held in memory as a set of file paths.
///
/// Directories exist implicitly when some file lies beneath them.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    root: PathBuf,
    files: BTreeSet<String>,
}

impl MemoryTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeSet::new(),
        }
    }

    /// Build a tree from root-relative file paths.
    pub fn with_files<I, S>(root: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree = Self::new(root);
        for file in files {
            tree.insert(file);
        }
        tree
    }

    pub fn insert(&mut self, file: impl Into<String>) {
        let file = file.into();
        self.files.insert(file.trim_start_matches('/').to_string());
    }
}

impl TreeProbe for MemoryTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, relative: &str) -> bool {
        if self.files.contains(relative) {
            return true;
        }
        let dir = format!("{}/", relative.trim_end_matches('/'));
        self.files
            .range(dir.clone()..)
            .next()
            .is_some_and(|file| file.starts_with(&dir))
    }
}
