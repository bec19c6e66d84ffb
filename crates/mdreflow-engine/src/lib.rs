//! mdreflow Engine
//!
//! Ties the pipeline together: document discovery, the line passes that
//! repair and resolve links, reflow, and atomic write-back.
//!
//! # Example
//!
//! ```
//! use mdreflow_engine::DocumentProcessor;
//! use std::path::Path;
//!
//! let processor = DocumentProcessor::new(20);
//! let out = processor.transform(Path::new("notes.md"), "# Notes\nshort lines\nget joined\n");
//! assert_eq!(out, "# Notes\nshort lines get\njoined\n");
//! ```

pub mod discovery;
pub mod passes;
pub mod processor;

pub use discovery::gather_documents;
pub use passes::{
    CodeSpanLinker, DoubleLinkCollapser, LinePass, LinkRewriter, PassContext, SpaceNormalizer,
};
pub use processor::{BatchSummary, DocumentProcessor};
