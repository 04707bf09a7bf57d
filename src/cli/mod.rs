//! Command-line interface for catalog-check.
//!
//! # Command Structure
//!
//! ```text
//! catalog-check [GLOBAL OPTIONS] <COMMAND>
//!
//! Global options:
//!   -v, --verbose        Debug logging on stderr
//!   -q, --quiet          Only report failures
//!   -c, --config <PATH>  Configuration file
//!
//! Commands:
//!   validate             Validate version catalogs
//! ```
//!
//! Global options are turned into a [`CliConfig`] once and handed to the
//! command, so commands never read the process environment for them.

pub mod validate;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default `tracing` filter; `RUST_LOG` takes precedence when set
    pub log_level: String,

    /// Suppress successes and warnings in text output
    pub quiet: bool,

    /// Explicit configuration file from `--config`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global `tracing` subscriber writing to stderr.
    ///
    /// Calling this more than once keeps the first subscriber.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "catalog-check",
    about = "Validate Gradle version catalogs (libs.versions.toml)",
    version,
    long_about = "catalog-check validates Gradle version catalogs: TOML syntax, coordinate and version formats, duplicate keys, version references, bundles, and known incompatible or vulnerable versions."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print failing catalogs and their errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    ///
    /// Defaults to `CATALOG_CHECK_CONFIG`, then
    /// `<config dir>/catalog-check/config.toml`.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more version catalogs
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Set up logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with; `main` turns it into a
    /// message and exit status 1.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Run the selected command with an already-built [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Validate(cmd) => cmd.execute(&config).await,
        }
    }
}
