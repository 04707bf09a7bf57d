//! Stress test suite for catalog-check
//!
//! Large catalogs and many files, to catch quadratic passes and contention in
//! the parallel file validation. Timings are printed for manual review
//! rather than asserted.
//!
//! ```bash
//! cargo test --release --test stress -- --nocapture
//! ```

#[path = "../common/mod.rs"]
mod common;

mod large_catalogs;
mod many_files;
