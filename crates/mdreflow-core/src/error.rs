//! Error types for mdreflow

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mdreflow operations
#[derive(Error, Debug)]
pub enum MdreflowError {
    /// IO error outside of a specific document (config files, directory walks)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document is missing or unreadable
    #[error("Cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid UTF-8
    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    /// Changed document could not be persisted
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for mdreflow operations
pub type Result<T> = std::result::Result<T, MdreflowError>;
