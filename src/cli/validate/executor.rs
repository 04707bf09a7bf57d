//! Execution of the validate command.

use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{CatalogValidator, collect_catalogs, find_catalog};
use crate::cli::CliConfig;
use crate::config::{CheckConfig, load_advisories};
use crate::core::CatalogCheckError;

use super::command::{OutputFormat, ValidateCommand};
use super::results::{FileReport, ValidationResults};

impl ValidateCommand {
    /// Validate the requested catalogs, print the report and turn failures
    /// into an error for the exit status.
    ///
    /// # Errors
    ///
    /// - No catalog could be located, or a directory holds none
    /// - The configuration or advisory file is invalid
    /// - Any catalog is invalid ([`CatalogCheckError::ValidationFailed`])
    /// - Strict mode is on and warnings were reported
    ///   ([`CatalogCheckError::StrictModeFailed`])
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = CheckConfig::load_with_optional(cli.config_path.clone()).await?;
        let strict = self.strict || config.strict;
        let validator = match &self.advisories {
            Some(path) => CatalogValidator::with_tables(load_advisories(path).await?),
            None => config.validator(),
        };

        let targets = self.resolve_targets()?;
        tracing::debug!("validating {} catalog(s)", targets.len());
        let results = run_all(validator, targets).await?;

        match self.format {
            OutputFormat::Json => println!("{}", results.to_json()?),
            OutputFormat::Text => print!("{}", results.to_text(cli.quiet)),
        }

        let failed = results.failed();
        if failed > 0 {
            return Err(CatalogCheckError::ValidationFailed {
                failed,
                total: results.reports.len(),
            }
            .into());
        }

        let warnings = results.warning_count();
        if strict && warnings > 0 {
            return Err(CatalogCheckError::StrictModeFailed { count: warnings }.into());
        }
        Ok(())
    }

    /// Files to validate, in argument order.
    ///
    /// Directories expand to the catalogs below them. Paths that do not exist
    /// are kept so the validator reports them like any other broken catalog.
    fn resolve_targets(&self) -> Result<Vec<PathBuf>> {
        if self.files.is_empty() {
            return Ok(vec![find_catalog()?]);
        }

        let mut targets = Vec::new();
        for path in &self.files {
            if path.is_dir() {
                let found = collect_catalogs(path)?;
                if found.is_empty() {
                    return Err(CatalogCheckError::NoCatalogsInDirectory {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                targets.extend(found);
            } else {
                targets.push(path.clone());
            }
        }
        Ok(targets)
    }
}

/// Validate every file on the blocking pool and collect the results in
/// input order.
async fn run_all(validator: CatalogValidator, paths: Vec<PathBuf>) -> Result<ValidationResults> {
    let validator = Arc::new(validator);
    let tasks = paths.into_iter().map(|path| {
        let validator = Arc::clone(&validator);
        tokio::task::spawn_blocking(move || {
            let result = validator.validate_file(&path);
            FileReport::new(&path, result)
        })
    });

    let mut reports = Vec::new();
    for joined in join_all(tasks).await {
        reports.push(joined.context("Validation task failed")?);
    }
    Ok(ValidationResults { reports })
}
