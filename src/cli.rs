//! Command-line interface for mdreflow.

use clap::Parser;
use std::path::PathBuf;

/// mdreflow - Reflow Markdown paragraphs and normalize internal links.
///
/// Rewrites documents in place. Fenced code, tables, headings and rules
/// pass through untouched.
#[derive(Parser, Debug)]
#[command(
    name = "mdreflow",
    author = "mdreflow Contributors",
    version,
    about = "Reflow Markdown paragraphs and normalize internal links",
    after_help = "Examples:\n  \
                  mdreflow\n  \
                  mdreflow -w 100 docs/ README.md\n  \
                  mdreflow --check --root . context/\n  \
                  mdreflow -c 'links.Enabled = false' notes.md"
)]
pub struct Cli {
    /// Files or directories to format
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Wrap width in columns (overrides the config file)
    #[arg(short = 'w', long = "width")]
    pub width: Option<usize>,

    /// Report documents that would change without writing them
    #[arg(long = "check")]
    pub check: bool,

    /// Root of the document tree that links resolve against
    #[arg(short = 'r', long = "root", default_value = ".")]
    pub root: PathBuf,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Only reflow; leave links alone
    #[arg(long = "no-links")]
    pub no_links: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

/// Show paths information.
pub fn show_paths() {
    use mdreflow_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
