//! TOML loading shared by the configuration file and advisory tables.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

use crate::core::CatalogCheckError;

/// Read `path` and deserialize it as TOML.
///
/// # Errors
///
/// Read failures keep the underlying [`std::io::Error`] as their source.
/// Parse failures are reported as [`CatalogCheckError::ConfigError`] naming
/// the file.
pub async fn parse_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        CatalogCheckError::ConfigError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        }
        .into()
    })
}
