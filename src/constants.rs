//! Global constants used throughout the catalog-check codebase.
//!
//! Limits and well-known names that more than one module relies on.

/// Maximum number of characters of an offending line quoted in a syntax error.
pub const MAX_SNIPPET_CHARS: usize = 80;

/// Maximum depth of nested inline tables accepted by the entry parser.
///
/// Real catalogs never go beyond two levels (`version = { strictly = ".." }`).
/// The limit keeps parsing of hostile input bounded.
pub const MAX_NESTING_DEPTH: usize = 4;

/// Catalog locations searched, in order, when no file is given on the
/// command line. Each is tried relative to the current directory and then to
/// every parent directory.
pub const DEFAULT_CATALOG_PATHS: &[&str] = &["gradle/libs.versions.toml", "libs.versions.toml"];

/// Suffix identifying catalog files when a directory is validated.
pub const CATALOG_FILE_SUFFIX: &str = ".versions.toml";

/// Environment variable that overrides the global configuration file location.
pub const CONFIG_ENV_VAR: &str = "CATALOG_CHECK_CONFIG";

/// Name of the per-user configuration directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "catalog-check";

/// Names longer than this (in characters) never get a "did you mean"
/// suggestion.
pub const MAX_SUGGESTION_NAME_LEN: usize = 64;

/// Dangling references per catalog that are matched against declared names.
/// Later ones are reported without a suggestion.
pub const MAX_SUGGESTED_REFERENCES: usize = 100;

/// Edit-distance computations per catalog spent on suggestions.
pub const MAX_SUGGESTION_COMPARISONS: usize = 50_000;
