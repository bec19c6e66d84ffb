//! Formatting configuration.
//!
//! This module contains the `FormatConfig` struct which holds the
//! reflow width and the text normalizations applied before reflow.

use serde::{Deserialize, Serialize};

/// Default wrap width in columns.
pub const DEFAULT_WIDTH: usize = 120;

/// Formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormatConfig {
    /// Target wrap width in terminal columns.
    /// Default: 120
    #[serde(default = "default_width")]
    pub width: usize,

    /// Replace non-breaking space variants with a plain space.
    /// Default: true
    #[serde(default = "default_true")]
    pub normalize_spaces: bool,

    /// File extensions picked up when walking directories (without the dot).
    /// Default: ["md"]
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            normalize_spaces: true,
            extensions: default_extensions(),
        }
    }
}

impl FormatConfig {
    /// Whether a file extension (without the dot) is a document extension.
    ///
    /// Comparison ignores ASCII case.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}
