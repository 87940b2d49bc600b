//! Command-line interface for asset-report.
//!
//! Every command reads one registry snapshot and analyses it offline:
//!
//! - `report` - stats and the list view per asset kind
//! - `tree` - dependency trees under each queued item
//! - `why` - which queued items caused a given item to load
//!
//! Global flags control logging (`--verbose`, `--quiet`), the config file
//! (`--config`) and terminal colors (`--no-color`).

pub mod common;
mod report;
mod tree;
mod why;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can run commands without touching
/// process-wide logging or color state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set. `None` keeps logging off.
    pub log_level: Option<String>,

    /// Disable ANSI colors in command output.
    pub no_color: bool,

    /// Config file named with `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tracing subscriber and color override.
    ///
    /// Logs go to stderr so report output on stdout stays machine-readable.
    /// Calling this twice is harmless; the second subscriber is ignored.
    pub fn apply(&self) {
        if self.no_color {
            colored::control::set_override(false);
        }

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(format!("asset_report={level}"))
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(!self.no_color)
            .try_init();
    }
}

/// Audit script, style and module registries exported from a web host.
#[derive(Parser)]
#[command(
    name = "asset-report",
    about = "Audit asset dependency registries: load order, dependents, duplicates and provenance",
    version,
    long_about = "asset-report reads a registry snapshot (JSON, TOML or YAML) exported from a page \
                  request and explains which assets load, in what order, and why."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a config file (overrides ASSET_REPORT_CONFIG and ./asset-report.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stats and the loaded items for each asset kind.
    ///
    /// See [`report::ReportCommand`] for options.
    Report(report::ReportCommand),

    /// Show the dependency tree below each queued item.
    ///
    /// See [`tree::TreeCommand`] for options.
    Tree(tree::TreeCommand),

    /// Explain why an item is loaded.
    ///
    /// See [`why::WhyCommand`] for options.
    Why(why::WhyCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            no_color: self.no_color,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply();

        match self.command {
            Commands::Report(cmd) => cmd.execute(config.config_path).await,
            Commands::Tree(cmd) => cmd.execute(config.config_path).await,
            Commands::Why(cmd) => cmd.execute(config.config_path).await,
        }
    }
}
