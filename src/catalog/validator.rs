//! The validation pipeline.

use std::path::Path;

use super::advisories::{AdvisoryChecker, AdvisoryTables};
use super::issue::{CatalogIssue, Section};
use super::model::Catalog;
use super::parser::parse_section;
use super::result::{Findings, ValidationResult};
use super::sections::{extract, normalize};
use super::{duplicates, formats, references};

/// Validates version catalogs.
///
/// A validator holds nothing but its advisory tables, so one instance can be
/// shared freely between threads (it is `Send + Sync`) and every call is
/// independent of the others.
///
/// # Examples
///
/// ```rust
/// use catalog_check::catalog::CatalogValidator;
///
/// let validator = CatalogValidator::new();
/// let result = validator.validate_str("[versions]\n[libraries]\n");
/// assert!(!result.is_valid());
/// assert_eq!(result.errors().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogValidator {
    advisories: AdvisoryChecker,
}

impl CatalogValidator {
    /// A validator using the built-in advisory tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator using `tables` instead of the built-in advisories.
    #[must_use]
    pub fn with_tables(tables: AdvisoryTables) -> Self {
        Self { advisories: AdvisoryChecker::new(tables) }
    }

    #[must_use]
    pub fn tables(&self) -> &AdvisoryTables {
        self.advisories.tables()
    }

    /// Reads and validates the catalog at `path`.
    ///
    /// A missing or unreadable file produces a failed result with a single
    /// error; this never returns an `Err` and never panics.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> ValidationResult {
        let path = path.as_ref();
        tracing::debug!("validating catalog {}", path.display());
        match std::fs::read(path) {
            Ok(bytes) => self.validate_bytes(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ValidationResult::failure(&CatalogIssue::FileNotFound {
                    path: path.display().to_string(),
                })
            }
            Err(e) => ValidationResult::failure(&CatalogIssue::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Validates raw bytes, decoding invalid UTF-8 lossily.
    pub fn validate_bytes(&self, bytes: &[u8]) -> ValidationResult {
        self.validate_str(&String::from_utf8_lossy(bytes))
    }

    /// Validates catalog text.
    pub fn validate_str(&self, text: &str) -> ValidationResult {
        let findings = self.run(text);
        let result = findings.into_result();
        tracing::debug!(
            "catalog validated: {} error(s), {} warning(s)",
            result.errors().len(),
            result.warnings().len()
        );
        result
    }

    fn run(&self, text: &str) -> Findings {
        let text = normalize(text);
        let mut findings = Findings::default();

        let sections = match extract(&text) {
            Ok(sections) => sections,
            Err(issues) => {
                findings.extend(issues);
                return findings;
            }
        };

        for (name, line) in &sections.unknown {
            findings.push(CatalogIssue::UnknownSection { name: name.clone(), line: *line });
        }

        let mut parsed = Vec::new();
        let mut syntax_failed = false;
        for (section, body) in sections.iter() {
            match parse_section(body) {
                Ok(entries) => parsed.push((section, entries)),
                Err(e) => {
                    tracing::debug!("syntax error in [{section}]: {e}");
                    findings.push(e.into());
                    syntax_failed = true;
                }
            }
        }
        if syntax_failed {
            return findings;
        }

        for section in Section::ALL.into_iter().filter(|s| s.is_required()) {
            if sections.get(section).is_some_and(|body| body.is_blank()) {
                findings.push(CatalogIssue::EmptySection { section });
            }
        }

        let catalog = Catalog::lift(parsed);
        formats::check(&catalog, &mut findings);
        duplicates::check(&catalog, &mut findings);
        references::check(&catalog, &mut findings);
        self.advisories.check(&catalog, &mut findings);
        findings
    }
}
