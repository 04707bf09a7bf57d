//! Core types shared across catalog-check.
//!
//! Currently the operational error type and its user-facing presentation;
//! validation findings live in [`crate::catalog`].

pub mod error;

pub use error::{CatalogCheckError, ErrorContext, user_friendly_error};
