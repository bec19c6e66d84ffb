//! mdreflow Links
//!
//! Resolves link targets written in Markdown documents against the tree
//! they live in and decides how each target should be spelled.
//!
//! # Policy
//!
//! - Targets that leave the tree, use a URL scheme or point at an anchor
//!   are never touched
//! - Targets inside one task's dossier are written relative to the
//!   referencing document
//! - Every other existing target is written from the tree root
//! - A target that does not exist (after one repair attempt) is kept
//!
//! # Example
//!
//! ```
//! use mdreflow_config::LinksConfig;
//! use mdreflow_core::ResolvedLink;
//! use mdreflow_links::{LinkPolicy, LinkResolver, MemoryTree};
//! use std::path::Path;
//!
//! let tree = MemoryTree::with_files("/repo", ["docs/setup.md", "docs/guide/intro.md"]);
//! let policy = LinkPolicy::from_config(&LinksConfig::default()).unwrap();
//! let resolver = LinkResolver::new(tree, policy);
//!
//! assert_eq!(
//!     resolver.resolve(Path::new("docs/guide/intro.md"), "../setup.md"),
//!     ResolvedLink::Rewritten("/docs/setup.md".into())
//! );
//! ```

pub mod path;
pub mod policy;
pub mod probe;
pub mod resolver;

pub use policy::LinkPolicy;
pub use probe::{DiskTree, MemoryTree, TreeProbe};
pub use resolver::{should_skip, LinkResolver};
