//! mdreflow - Reflow Markdown paragraphs and normalize internal links.
//!
//! This binary provides the CLI interface to the mdreflow crates: it
//! gathers documents, formats them in place and reports the outcome
//! through its exit status.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use mdreflow_config::Config;
use mdreflow_core::Result;
use mdreflow_engine::{gather_documents, DocumentProcessor};
use std::io::Write;

/// Exit status for any error.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    // Set up logging
    setup_logging(&cli.log_level);
    info!("mdreflow v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic. Returns the process exit status.
fn run(cli: &Cli) -> Result<i32> {
    let config = load_config(cli)?;
    debug!("Loaded config: {:?}", config);

    let documents = gather_documents(&cli.paths, &config.format)?;
    debug!("Found {} documents", documents.len());

    let processor = DocumentProcessor::from_config(&config, &cli.root)?;
    let summary = processor.process_all(&documents, cli.check)?;

    if cli.check {
        for path in &summary.changed {
            println!("{}", path.display());
        }
    }

    Ok(summary.exit_code())
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_with_override(cli.config.as_deref())?;

    if let Some(width) = cli.width {
        debug!("Width overridden to {}", width);
        config.format.width = width;
    }
    if cli.no_links {
        config.links.enabled = false;
    }

    config.validate()?;
    Ok(config)
}
