//! The validation report and the accumulator the passes write into.

use serde::Serialize;

use super::issue::{CatalogIssue, Severity};

/// Findings collected by the validation passes, in the order they ran.
#[derive(Debug, Default)]
pub struct Findings {
    issues: Vec<CatalogIssue>,
}

impl Findings {
    pub fn push(&mut self, issue: CatalogIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = CatalogIssue>) {
        self.issues.extend(issues);
    }

    /// Findings recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[CatalogIssue] {
        &self.issues
    }

    /// Splits the findings by severity and stamps the report.
    #[must_use]
    pub fn into_result(self) -> ValidationResult {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.issues.into_iter().partition(|issue| issue.severity() == Severity::Error);
        ValidationResult::new(
            errors.iter().map(ToString::to_string).collect(),
            warnings.iter().map(ToString::to_string).collect(),
        )
    }
}

/// Outcome of validating one catalog.
///
/// Fields are private so that `is_valid` always equals `errors.is_empty()`.
///
/// # JSON Output Example
///
/// ```json
/// {
///   "isValid": false,
///   "errors": ["Bundle 'ui' references undefined library 'compose-ui'"],
///   "warnings": ["Version 'coil' is declared but never referenced"],
///   "timestamp": 1760659200000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    timestamp: i64,
}

impl ValidationResult {
    fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// A failed result holding a single error.
    #[must_use]
    pub fn failure(issue: &CatalogIssue) -> Self {
        Self::new(vec![issue.to_string()], Vec::new())
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Milliseconds since the Unix epoch at which the result was produced.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }
}
