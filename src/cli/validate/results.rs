//! Validation results and their rendering.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::catalog::ValidationResult;

/// The result for one catalog file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl FileReport {
    #[must_use]
    pub fn new(path: &Path, result: ValidationResult) -> Self {
        Self { path: path.display().to_string(), result }
    }
}

/// Results for every catalog validated in one run, in argument order.
#[derive(Debug, Default)]
pub struct ValidationResults {
    pub reports: Vec<FileReport>,
}

impl ValidationResults {
    /// Number of catalogs with at least one error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| !r.result.is_valid()).count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.reports.iter().map(|r| r.result.warnings().len()).sum()
    }

    /// Pretty JSON: the bare result for a single catalog, otherwise an array
    /// of results each carrying its `path`.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self.reports.as_slice() {
            [single] => serde_json::to_string_pretty(&single.result),
            reports => serde_json::to_string_pretty(reports),
        }
    }

    /// Human-readable report. `quiet` keeps only failing catalogs and their
    /// errors.
    #[must_use]
    pub fn to_text(&self, quiet: bool) -> String {
        let mut out = String::new();
        for report in &self.reports {
            let result = &report.result;
            if result.is_valid() {
                if quiet {
                    continue;
                }
                let _ = writeln!(out, "{} {} is valid", "✓".green(), report.path);
            } else {
                let _ = writeln!(
                    out,
                    "{} {} has {} error(s)",
                    "✗".red(),
                    report.path,
                    result.errors().len()
                );
                for error in result.errors() {
                    let _ = writeln!(out, "  {} {error}", "✗".red());
                }
            }
            if !quiet {
                for warning in result.warnings() {
                    let _ = writeln!(out, "  {} Warning: {warning}", "⚠".yellow());
                }
            }
        }

        if !quiet && self.reports.len() > 1 {
            let failed = self.failed();
            let _ = writeln!(
                out,
                "\nValidated {} catalog(s): {} valid, {} invalid",
                self.reports.len(),
                self.reports.len() - failed,
                failed
            );
        }
        out
    }
}
