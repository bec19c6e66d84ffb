//! Turning command-line paths into a document list.

use log::{debug, warn};
use mdreflow_config::FormatConfig;
use mdreflow_core::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 1] = [".git"];

fn is_document(path: &Path, format: &FormatConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| format.matches_extension(ext))
}

fn scan_directory_recursive(
    dir: &Path,
    format: &FormatConfig,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            let skipped = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| SKIPPED_DIRS.contains(&name));
            if !skipped {
                scan_directory_recursive(&path, format, files)?;
            }
        } else if is_document(&path, format) {
            files.push(path);
        }
    }

    Ok(())
}

/// Expand files and directories into the documents to process.
///
/// Directories are walked recursively and their documents sorted. A
/// document reached twice (same canonical path) is kept at its first
/// position. Missing paths are skipped with a warning.
pub fn gather_documents(paths: &[PathBuf], format: &FormatConfig) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for path in paths {
        if !path.exists() {
            warn!("Skipping {}: no such file or directory", path.display());
            continue;
        }

        let mut found = Vec::new();
        if path.is_dir() {
            scan_directory_recursive(path, format, &mut found)?;
            found.sort();
        } else if is_document(path, format) {
            found.push(path.clone());
        } else {
            debug!("Skipping {}: not a document", path.display());
        }

        for document in found {
            let key = document.canonicalize()?;
            if seen.insert(key) {
                documents.push(document);
            }
        }
    }

    Ok(documents)
}
