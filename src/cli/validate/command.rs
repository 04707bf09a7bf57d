//! Command structure and output format definitions for validation.

use clap::Args;
use std::path::PathBuf;

/// Validate one or more version catalogs.
///
/// # Examples
///
/// ```rust,ignore
/// use catalog_check::cli::validate::{OutputFormat, ValidateCommand};
///
/// // Search upward for gradle/libs.versions.toml
/// let cmd = ValidateCommand {
///     files: Vec::new(),
///     format: OutputFormat::Text,
///     strict: false,
///     advisories: None,
/// };
///
/// // CI: every catalog below the repository, machine-readable, warnings fail
/// let cmd = ValidateCommand {
///     files: vec![".".into()],
///     format: OutputFormat::Json,
///     strict: true,
///     advisories: Some("ci/advisories.toml".into()),
/// };
/// ```
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Catalog files or directories to validate
    ///
    /// Directories are searched for `*.versions.toml` files. Without any
    /// path, `gradle/libs.versions.toml` or `libs.versions.toml` is searched
    /// for in the current directory and its parents.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Treat warnings as errors
    ///
    /// Also enabled by `strict = true` in the configuration file.
    #[arg(long)]
    pub strict: bool,

    /// TOML file replacing the built-in advisory tables
    #[arg(long, value_name = "FILE")]
    pub advisories: Option<PathBuf>,
}

/// Output format for validation results.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored text with ✓ / ✗ / ⚠ markers
    Text,

    /// Pretty-printed JSON; one object for a single catalog, an array otherwise
    Json,
}
