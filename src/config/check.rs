//! The user configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::parser::parse_config;
use crate::catalog::{AdvisoryTables, CatalogValidator};
use crate::constants::{CONFIG_DIR_NAME, CONFIG_ENV_VAR};
use crate::core::CatalogCheckError;

/// Settings read from `config.toml`.
///
/// ```toml
/// strict = true
///
/// [advisories]
/// critical_fragments = ["junit", "kotest"]
///
/// [[advisories.incompatible]]
/// subject = ["agp", "android-gradle-plugin"]
/// subject_versions = ">=8.0.0"
/// dependency = ["kotlin"]
/// minimum = "1.9.0"
/// ```
///
/// Every field is optional. Tables left out of `[advisories]` keep their
/// built-in contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Treat warnings as failures unless overridden on the command line
    pub strict: bool,
    /// Replacement advisory tables
    pub advisories: Option<AdvisoryTables>,
}

impl CheckConfig {
    /// Load the configuration, preferring `explicit`, then the
    /// `CATALOG_CHECK_CONFIG` environment variable, then [`Self::default_path`].
    ///
    /// A file that does not exist yields the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use catalog_check::config::CheckConfig;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let config = CheckConfig::load_with_optional(None).await?;
    /// println!("strict by default: {}", config.strict);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed, or if its
    /// advisory tables are invalid.
    pub async fn load_with_optional(explicit: Option<PathBuf>) -> Result<Self> {
        let Some(path) = choose_path(explicit, std::env::var_os(CONFIG_ENV_VAR)) else {
            tracing::debug!("no configuration directory available, using defaults");
            return Ok(Self::default());
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("no configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load the configuration from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, or contains
    /// advisory rules that cannot be applied.
    pub async fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("loading configuration from {}", path.display());
        let config: Self = parse_config(path).await?;
        if let Some(tables) = &config.advisories {
            tables.validate().map_err(|e| CatalogCheckError::InvalidAdvisories {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(config)
    }

    /// `<config dir>/catalog-check/config.toml`.
    ///
    /// # Errors
    ///
    /// Fails if the platform has no configuration directory.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Unable to determine configuration directory")?;
        Ok(dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// A validator using the configured advisory tables, or the built-in ones.
    #[must_use]
    pub fn validator(&self) -> CatalogValidator {
        match &self.advisories {
            Some(tables) => CatalogValidator::with_tables(tables.clone()),
            None => CatalogValidator::new(),
        }
    }
}

/// Load a standalone advisory table file as used by `--advisories`.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, or holds a rule that cannot
/// be applied.
pub async fn load_advisories(path: &Path) -> Result<AdvisoryTables> {
    let tables: AdvisoryTables = parse_config(path).await?;
    tables.validate().map_err(|e| CatalogCheckError::InvalidAdvisories {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(
        "loaded {} incompatibility rule(s) and {} vulnerable release(s) from {}",
        tables.incompatible.len(),
        tables.vulnerable.len(),
        path.display()
    );
    Ok(tables)
}

fn choose_path(explicit: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
    explicit
        .or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or_else(|| CheckConfig::default_path().ok())
}
