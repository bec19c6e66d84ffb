//! mdreflow Reflow
//!
//! Re-wraps Markdown paragraphs to a fixed width while passing every
//! structural line through untouched.
//!
//! # Example
//!
//! ```
//! use mdreflow_reflow::reflow;
//!
//! let text = "A paragraph split\nacross two lines.\n\n```\nkept   as is\n```\n";
//! assert_eq!(
//!     reflow(text, 80),
//!     "A paragraph split across two lines.\n\n```\nkept   as is\n```\n"
//! );
//! ```

pub mod accumulator;
pub mod wrap;

pub use accumulator::{reflow, reflow_lines, ReflowState};
pub use wrap::{is_hazard, units, wrap, wrap_text};
