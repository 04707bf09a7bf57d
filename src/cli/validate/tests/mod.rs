//! Tests for the validate command.
//!
//! - `command_tests`: target expansion and exit decisions
//! - `strict_tests`: warnings treated as errors, from the flag or the config file
//! - `advisories_tests`: replacing and rejecting advisory tables


use crate::cli::CliConfig;
use crate::test_utils::CatalogBuilder;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::{OutputFormat, ValidateCommand};

fn cli_config(temp: &TempDir) -> CliConfig {
    CliConfig {
        log_level: "warn".to_string(),
        quiet: true,
        config_path: Some(temp.path().join("no-config.toml")),
    }
}

fn command(files: Vec<PathBuf>) -> ValidateCommand {
    ValidateCommand { files, format: OutputFormat::Text, strict: false, advisories: None }
}

fn valid_catalog() -> CatalogBuilder {
    CatalogBuilder::new().version("agp", "8.11.1").library(
        "androidx-junit",
        "androidx.test.ext:junit",
        "agp",
    )
}

fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}
