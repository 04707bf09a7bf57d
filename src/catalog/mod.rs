//! Version catalog validation engine.
//!
//! A version catalog (`libs.versions.toml`) declares reusable versions,
//! library coordinates, plugin ids and bundles of libraries for a Gradle
//! build. This module parses the subset of TOML catalogs use, lifts it into a
//! typed [`Catalog`], and runs a fixed sequence of passes over it:
//!
//! 1. **Sections** ([`sections`]): split the text into `[versions]`,
//!    `[libraries]`, `[plugins]` and `[bundles]`; required sections must exist
//! 2. **Syntax** ([`parser`]): parse each section body; any syntax error ends
//!    validation after all sections were tried
//! 3. **Formats** ([`formats`]): version, module and plugin-id grammars plus
//!    entry-shape problems
//! 4. **Duplicates** ([`duplicates`]): repeated keys within a section
//! 5. **References** ([`references`]): `version.ref` targets, bundle members and
//!    unused versions
//! 6. **Advisories** ([`advisories`]): known incompatible version pairs,
//!    vulnerable releases and the critical-dependency heuristic
//!
//! Findings are collected in that order and returned as a
//! [`ValidationResult`]. Validation never fails: unreadable input is itself
//! reported as an error in the result.
//!
//! # Example
//!
//! ```rust
//! use catalog_check::catalog::CatalogValidator;
//!
//! let catalog = r#"
//! [versions]
//! agp = "8.11.1"
//!
//! [libraries]
//! androidx-junit = { module = "androidx.test.ext:junit", version.ref = "agp" }
//! "#;
//!
//! let result = CatalogValidator::new().validate_str(catalog);
//! assert!(result.is_valid());
//! assert!(result.warnings().is_empty());
//! ```

pub mod advisories;
pub mod duplicates;
pub mod formats;
pub mod helpers;
pub mod issue;
pub mod model;
pub mod parser;
pub mod references;
pub mod result;
pub mod sections;
pub mod validator;


pub use advisories::{AdvisoryChecker, AdvisoryTables, IncompatibilityRule, VulnerableRelease};
pub use helpers::{collect_catalogs, find_catalog, find_catalog_from};
pub use issue::{CatalogIssue, Section, Severity, SyntaxError};
pub use model::Catalog;
pub use result::ValidationResult;
pub use validator::CatalogValidator;
