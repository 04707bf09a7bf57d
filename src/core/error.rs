//! Error handling for catalog-check
//!
//! Validation findings are not errors in this sense: the engine reports them
//! inside a [`ValidationResult`](crate::catalog::ValidationResult). This
//! module covers everything around it that can stop the command itself:
//! a catalog that cannot be found, a broken configuration file, or a run
//! whose results should fail the process.
//!
//! # Architecture
//!
//! - [`CatalogCheckError`] - Enumerated operational failures
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an
//! [`ErrorContext`] for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use catalog_check::core::{CatalogCheckError, user_friendly_error};
//!
//! let ctx = user_friendly_error(CatalogCheckError::CatalogNotFound.into());
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Operational failures of the catalog-check command.
#[derive(Error, Debug)]
pub enum CatalogCheckError {
    /// No catalog file was given and none was found by searching upward
    #[error("No version catalog found in current directory or any parent directory")]
    CatalogNotFound,

    /// A directory argument contained no catalog files
    #[error("No *.versions.toml files found in {path}")]
    NoCatalogsInDirectory {
        /// The directory that was walked
        path: String,
    },

    /// The configuration file could not be read or parsed
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigError {
        /// Path of the configuration file
        path: String,
        /// Parser or I/O error text
        reason: String,
    },

    /// Advisory tables (from `--advisories` or the config file) are unusable
    #[error("Invalid advisory tables in {path}: {reason}")]
    InvalidAdvisories {
        /// Where the tables came from
        path: String,
        /// Why they were rejected
        reason: String,
    },

    /// One or more catalogs are invalid
    #[error("{failed} of {total} catalog(s) failed validation")]
    ValidationFailed {
        /// Number of invalid catalogs
        failed: usize,
        /// Number of catalogs validated
        total: usize,
    },

    /// Strict mode found warnings in otherwise valid catalogs
    #[error("Strict mode: {count} warning(s) treated as errors")]
    StrictModeFailed {
        /// Total warnings across all catalogs
        count: usize,
    },

    /// Any other failure, with its full message
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// An error paired with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CatalogCheckError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: CatalogCheckError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add an explanation of the error, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable
/// suggestions.
///
/// Recognizes [`CatalogCheckError`], [`std::io::Error`] and
/// [`toml::de::Error`]; anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(check_error) = error.downcast_ref::<CatalogCheckError>() {
        return create_error_context(check_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CatalogCheckError::Other {
                    message: error_chain(&error),
                })
                .with_suggestion("Check the permissions of the catalog file and its directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CatalogCheckError::Other {
                    message: error_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CatalogCheckError::ConfigError {
            path: "configuration".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the configuration file");
    }

    ErrorContext::new(CatalogCheckError::Other {
        message: error_chain(&error),
    })
}

/// The error message followed by its numbered causes.
fn error_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

/// Tailored details and suggestions for each [`CatalogCheckError`].
fn create_error_context(error: &CatalogCheckError) -> ErrorContext {
    match error {
        CatalogCheckError::CatalogNotFound => ErrorContext::new(CatalogCheckError::CatalogNotFound)
            .with_suggestion("Pass the catalog path explicitly: catalog-check validate path/to/libs.versions.toml")
            .with_details("catalog-check looks for gradle/libs.versions.toml, then libs.versions.toml, in the current directory and its parents"),
        CatalogCheckError::NoCatalogsInDirectory { path } => {
            ErrorContext::new(CatalogCheckError::NoCatalogsInDirectory { path: path.clone() })
                .with_details("Directories are searched for files ending in .versions.toml; hidden and build directories are skipped")
        }
        CatalogCheckError::ConfigError { path, reason } => {
            ErrorContext::new(CatalogCheckError::ConfigError {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_suggestion("Fix the file or point --config at a different one")
        }
        CatalogCheckError::InvalidAdvisories { path, reason } => {
            ErrorContext::new(CatalogCheckError::InvalidAdvisories {
                path: path.clone(),
                reason: reason.clone(),
            })
            .with_suggestion("Rule requirements use semver syntax such as \">=8.0.0\" and minimums are plain versions such as \"1.9.0\"")
        }
        CatalogCheckError::ValidationFailed { failed, total } => {
            ErrorContext::new(CatalogCheckError::ValidationFailed {
                failed: *failed,
                total: *total,
            })
        }
        CatalogCheckError::StrictModeFailed { count } => {
            ErrorContext::new(CatalogCheckError::StrictModeFailed { count: *count })
                .with_suggestion("Resolve the warnings or run without --strict")
        }
        CatalogCheckError::Other { message } => ErrorContext::new(CatalogCheckError::Other {
            message: message.clone(),
        }),
    }
}
