//! mdreflow Core
//!
//! This crate provides the types shared by every stage of the mdreflow
//! pipeline, plus the error type they all report through.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`LineKind`] - The closed set of line shapes the classifier recognises
//! - [`ParagraphContext`] - Indentation in force for an open paragraph
//! - [`LinkReference`], [`LinkStyle`], [`ResolvedLink`] - Link scanning and resolution results
//! - [`Outcome`] - Per-document processing result
//! - [`MdreflowError`] - Error types

pub mod enums;
pub mod error;
pub mod types;

pub use enums::{LineKind, LinkStyle, Outcome};
pub use error::{MdreflowError, Result};
pub use types::{quote_prefix, LinkReference, ParagraphContext, ResolvedLink};
