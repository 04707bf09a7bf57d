//! Configuration for catalog-check.
//!
//! An optional TOML file sets defaults for the command line and can replace
//! the advisory tables the validator applies. Lookup order:
//!
//! 1. `--config PATH`
//! 2. the `CATALOG_CHECK_CONFIG` environment variable
//! 3. `<config dir>/catalog-check/config.toml` (for example
//!    `~/.config/catalog-check/config.toml` on Linux)
//!
//! A missing file is not an error. A separate advisory file, passed with
//! `--advisories`, holds only the tables and takes precedence over the
//! `[advisories]` table of the configuration file.
//!
//! # Modules
//!
//! - `check` - [`CheckConfig`] and advisory file loading
//! - `parser` - TOML file loading with error context

mod check;
pub mod parser;

pub use check::{CheckConfig, load_advisories};
