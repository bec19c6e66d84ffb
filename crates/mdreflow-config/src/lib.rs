//! mdreflow Config
//!
//! This crate handles configuration loading and management
//! for mdreflow, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/mdreflow/config.toml`
//! - macOS: `~/Library/Application Support/mdreflow/config.toml`
//! - Windows: `%APPDATA%\mdreflow\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use mdreflow_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./mdreflow.toml")).unwrap();
//! ```

mod format;
mod links;

pub use format::{FormatConfig, DEFAULT_WIDTH};
pub use links::LinksConfig;

use mdreflow_core::{MdreflowError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[format]
Width           = 120
NormalizeSpaces = true
Extensions      = ["md"]

[links]
Enabled       = true
Namespace     = "context"
TasksRoot     = "context/tasks"
ArchiveMarker = "archive"
TaskIdPattern = "^[A-Z0-9]+-[A-Z0-9-]+$"
Sentinel      = "backlog.md"
LeadingSlash  = true
CodeSpanLinks = true
"#;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Reflow configuration
    #[serde(default)]
    pub format: FormatConfig,

    /// Link policy configuration
    #[serde(default)]
    pub links: LinksConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use mdreflow_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[format]"));
    /// assert!(toml.contains("[links]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdreflow")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MdreflowError::Config(format!("Parse error in {}: {}", path.display(), e))
        })
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` is given, layer it on top with [`Config::apply_override`]
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            config.apply_override(override_str)?;
        }

        Ok(config)
    }

    /// Layer an override on top of this config.
    ///
    /// `override_config` is read as a file when it names an existing path
    /// and parsed as inline TOML otherwise.
    pub fn apply_override(&mut self, override_config: &str) -> Result<()> {
        let override_path = Path::new(override_config);

        let override_toml = if override_path.exists() {
            std::fs::read_to_string(override_path)?
        } else {
            override_config.to_string()
        };

        let overlay: toml::Table = toml::from_str(&override_toml)
            .map_err(|e| MdreflowError::Config(format!("Override parse error: {}", e)))?;

        self.merge(&overlay)
    }

    /// Merge a TOML table into this config.
    ///
    /// Only keys present in `overlay` change; nested tables merge key by key.
    ///
    /// # Example
    ///
    /// ```
    /// use mdreflow_config::Config;
    ///
    /// let mut base = Config::default();
    /// base.format.width = 72;
    /// let overlay: toml::Table = toml::from_str("links.Enabled = false").unwrap();
    ///
    /// base.merge(&overlay).unwrap();
    /// assert_eq!(base.format.width, 72);
    /// assert!(!base.links.enabled);
    /// ```
    pub fn merge(&mut self, overlay: &toml::Table) -> Result<()> {
        let mut table = toml::Table::try_from(&*self)
            .map_err(|e| MdreflowError::Config(format!("Serialization error: {}", e)))?;
        merge_tables(&mut table, overlay);
        *self = table
            .try_into()
            .map_err(|e| MdreflowError::Config(format!("Override error: {}", e)))?;
        Ok(())
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| MdreflowError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> Result<()> {
        if self.format.width == 0 {
            return Err(MdreflowError::Config("Width must be positive".into()));
        }
        if self.format.extensions.is_empty() {
            return Err(MdreflowError::Config(
                "At least one document extension is required".into(),
            ));
        }
        if self.links.namespace.trim_matches('/').is_empty() {
            return Err(MdreflowError::Config("Namespace must not be empty".into()));
        }
        if self.links.tasks_root_segments().is_empty() {
            return Err(MdreflowError::Config("TasksRoot must not be empty".into()));
        }
        Regex::new(&self.links.task_id_pattern).map_err(|e| {
            MdreflowError::Config(format!(
                "Invalid TaskIdPattern {:?}: {}",
                self.links.task_id_pattern, e
            ))
        })?;
        Ok(())
    }
}

/// Deep-merge `overlay` into `base`. Non-table values replace what was there.
fn merge_tables(base: &mut toml::Table, overlay: &toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(key) {
                merge_tables(existing, incoming);
                continue;
            }
        }
        base.insert(key.clone(), value.clone());
    }
}
