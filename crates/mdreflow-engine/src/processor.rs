//! Per-document pipeline.
//!
//! A document is read whole, its lines run through the configured
//! [`LinePass`]es outside fences, the result is reflowed, and the file is
//! replaced only when the text actually changed.

use crate::passes::{
    CodeSpanLinker, DoubleLinkCollapser, LinePass, LinkRewriter, PassContext, SpaceNormalizer,
};
use log::{debug, info, trace};
use mdreflow_config::Config;
use mdreflow_core::{MdreflowError, Outcome, Result};
use mdreflow_links::{DiskTree, LinkPolicy, LinkResolver};
use mdreflow_parser::is_fence_delimiter;
use mdreflow_reflow::reflow_lines;
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of processing a batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Documents that changed, or would change in a dry run
    pub changed: Vec<PathBuf>,
    /// Whether files were left untouched
    pub dry_run: bool,
}

impl BatchSummary {
    /// Process exit status: non-zero when a dry run found work to do.
    pub fn exit_code(&self) -> i32 {
        if self.dry_run && !self.changed.is_empty() {
            1
        } else {
            0
        }
    }
}

/// Formats documents in place.
pub struct DocumentProcessor {
    width: usize,
    passes: Vec<Box<dyn LinePass>>,
}

impl DocumentProcessor {
    /// A processor that only reflows.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            passes: Vec::new(),
        }
    }

    /// Build the full pipeline described by `config` for the tree at `root`.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self> {
        config.validate()?;

        let mut processor = Self::new(config.format.width);
        if config.format.normalize_spaces {
            processor.add_pass(Box::new(SpaceNormalizer));
        }
        if config.links.enabled {
            let policy = LinkPolicy::from_config(&config.links)?;
            let resolver = LinkResolver::new(DiskTree::new(root)?, policy);
            processor = processor.with_links(resolver, config.links.code_span_links);
        }
        Ok(processor)
    }

    /// Append the link passes, all sharing one resolver.
    pub fn with_links(mut self, resolver: LinkResolver, code_span_links: bool) -> Self {
        let resolver = Arc::new(resolver);
        self.add_pass(Box::new(DoubleLinkCollapser));
        if code_span_links {
            self.add_pass(Box::new(CodeSpanLinker::new(Arc::clone(&resolver))));
        }
        self.add_pass(Box::new(LinkRewriter::new(resolver)));
        self
    }

    /// Append a pass; passes run in the order they were added.
    pub fn add_pass(&mut self, pass: Box<dyn LinePass>) {
        debug!("Registered pass: {}", pass.name());
        self.passes.push(pass);
    }

    pub fn with_pass(mut self, pass: impl LinePass + 'static) -> Self {
        self.add_pass(Box::new(pass));
        self
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn apply_passes<'a>(&self, line: &'a str, ctx: &PassContext<'_>) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(line);
        for pass in &self.passes {
            let changed = match pass.apply(&current, ctx) {
                Cow::Owned(changed) => Some(changed),
                Cow::Borrowed(_) => None,
            };
            if let Some(changed) = changed {
                trace!("{}: {:?} -> {:?}", pass.name(), current, changed);
                current = Cow::Owned(changed);
            }
        }
        current
    }

    /// Format `text` as the contents of `document`.
    ///
    /// Touches the filesystem only through link existence checks.
    pub fn transform(&self, document: &Path, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let ctx = PassContext { document };
        let mut fence_open = false;
        let lines: Vec<Cow<'_, str>> = text
            .lines()
            .map(|line| {
                if is_fence_delimiter(line) {
                    fence_open = !fence_open;
                    Cow::Borrowed(line)
                } else if fence_open {
                    Cow::Borrowed(line)
                } else {
                    self.apply_passes(line, &ctx)
                }
            })
            .collect();

        let mut formatted =
            reflow_lines(lines.iter().map(|line| line.as_ref()), self.width).join("\n");
        formatted.push('\n');
        formatted
    }

    /// Format one document, writing it back unless `dry_run` is set.
    pub fn process(&self, path: &Path, dry_run: bool) -> Result<Outcome> {
        let document = path.canonicalize().map_err(|source| MdreflowError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        let bytes = std::fs::read(&document).map_err(|source| MdreflowError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| MdreflowError::Encoding {
            path: path.to_path_buf(),
        })?;

        let formatted = self.transform(&document, &text);
        if formatted == text {
            debug!("{}: unchanged", path.display());
            return Ok(Outcome::Unchanged);
        }

        if dry_run {
            debug!("{}: would change", path.display());
        } else {
            write_atomic(&document, &formatted)?;
            info!("Formatted {}", path.display());
        }
        Ok(Outcome::Changed)
    }

    /// Format documents in order, stopping at the first error.
    ///
    /// Documents already written stay written.
    pub fn process_all(&self, paths: &[PathBuf], dry_run: bool) -> Result<BatchSummary> {
        let mut summary = BatchSummary {
            changed: Vec::new(),
            dry_run,
        };
        for path in paths {
            if self.process(path, dry_run)?.is_changed() {
                summary.changed.push(path.clone());
            }
        }
        debug!(
            "{} of {} documents {}",
            summary.changed.len(),
            paths.len(),
            if dry_run { "need formatting" } else { "formatted" }
        );
        Ok(summary)
    }
}

/// Replace `path` by writing a sibling temporary file and renaming it over.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source: std::io::Error| MdreflowError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }
    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
