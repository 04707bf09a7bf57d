//! Test utilities for catalog-check
//!
//! Shared helpers for unit tests and, through the `test-utils` feature, for
//! the integration and stress suites.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_check::catalog::CatalogValidator;
//! use catalog_check::test_utils::{CatalogBuilder, init_test_logging};
//!
//! init_test_logging(None);
//! let text = CatalogBuilder::new()
//!     .version("agp", "8.11.1")
//!     .library("androidx-junit", "androidx.test.ext:junit", "agp")
//!     .build();
//! assert!(CatalogValidator::new().validate_str(&text).is_valid());
//! ```

pub mod builder;

pub use builder::CatalogBuilder;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=catalog_check=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
