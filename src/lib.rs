//! catalog-check - validation for Gradle version catalogs
//!
//! A version catalog (`gradle/libs.versions.toml`) centralizes the versions,
//! library coordinates, plugin ids and bundles a Gradle build uses. Gradle
//! itself only reports problems in a catalog when a build happens to touch
//! the broken entry; catalog-check validates the whole file up front.
//!
//! # Checks
//!
//! - TOML syntax of the subset catalogs use, with absolute line numbers
//! - Required `[versions]` and `[libraries]` sections
//! - Version, module (`group:artifact`) and plugin-id formats
//! - Duplicate keys and keys that collide as Gradle accessors
//! - `version.ref` targets and bundle members, with "did you mean" hints
//! - Versions declared but never referenced (warning)
//! - Known incompatible version pairs, vulnerable releases and catalogs with
//!   no test dependency (advisories, configurable)
//!
//! # Core Modules
//!
//! - [`catalog`] - The validation engine and catalog discovery
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration file and advisory table loading
//! - [`core`] - Operational errors and their user-facing presentation
//! - [`constants`] - Shared limits and well-known paths
//!
//! # Example
//!
//! ```rust
//! use catalog_check::catalog::CatalogValidator;
//!
//! let result = CatalogValidator::new().validate_str(
//!     r#"
//! [versions]
//! agp = "8.11.1"
//! kotlin = "1.8.0"
//!
//! [libraries]
//! androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
//! "#,
//! );
//!
//! assert!(!result.is_valid());
//! assert!(result.errors()[0].contains("kotlin"));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
