//! Common test utilities for catalog-check integration tests

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// An isolated project directory with no user configuration.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    config_path: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;
        let config_path = temp_dir.path().join("config.toml");

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            config_path,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Write `content` to `gradle/libs.versions.toml`.
    pub fn write_catalog(&self, content: &str) -> Result<PathBuf> {
        self.write_file("gradle/libs.versions.toml", content)
    }

    /// Write a file relative to the project directory, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write the configuration file the binary reads through
    /// `CATALOG_CHECK_CONFIG`.
    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(&self.config_path, content).context("Failed to write config")
    }

    /// Run the binary in the project directory.
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_catalog-check"))
            .args(args)
            .current_dir(&self.project_dir)
            .env("CATALOG_CHECK_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run catalog-check")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// An `assert_cmd` command set up like [`Self::run`].
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("catalog-check").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("CATALOG_CHECK_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Captured output of a finished command
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.success,
            "Command unexpectedly succeeded\nStdout: {}\nStderr: {}",
            self.stdout, self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, expected: &str) -> &Self {
        assert!(
            self.stdout.contains(expected),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            expected, self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, expected: &str) -> &Self {
        assert!(
            self.stderr.contains(expected),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            expected, self.stderr
        );
        self
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}
