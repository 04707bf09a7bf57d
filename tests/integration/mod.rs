//! Integration test suite for catalog-check
//!
//! End-to-end tests that run the compiled binary against catalogs in
//! temporary project directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: Configuration file lookup, strict mode and advisory tables
//! - **discovery**: Locating catalogs by searching upward and walking directories
//! - **validate**: Text and JSON output, exit status and findings

#[path = "../common/mod.rs"]
mod common;
#[path = "../fixtures/mod.rs"]
mod fixtures;

mod config;
mod discovery;
mod validate;
