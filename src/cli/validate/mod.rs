//! Validate version catalogs from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Search upward for gradle/libs.versions.toml or libs.versions.toml
//! catalog-check validate
//!
//! # Explicit files and directories
//! catalog-check validate gradle/libs.versions.toml build-logic/
//!
//! # JSON for tooling, warnings fail the run
//! catalog-check validate --format json --strict
//!
//! # Replace the built-in advisory tables
//! catalog-check validate --advisories ci/advisories.toml
//! ```
//!
//! # Exit status
//!
//! - 0: every catalog is valid (and, with `--strict`, has no warnings)
//! - 1: a catalog is invalid, strict mode saw warnings, or the command
//!   itself failed (no catalog found, bad configuration)

mod command;
mod executor;
mod results;

#[cfg(test)]
mod tests;

pub use command::{OutputFormat, ValidateCommand};
pub use results::{FileReport, ValidationResults};
