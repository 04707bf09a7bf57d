//! Fluent builder for catalog text used by unit, integration and stress tests.

use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Builds `libs.versions.toml` content entry by entry.
///
/// `[versions]` and `[libraries]` headers are always emitted (possibly with
/// an empty body); `[plugins]` and `[bundles]` only when they have entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    versions: Vec<String>,
    libraries: Vec<String>,
    plugins: Vec<String>,
    bundles: Vec<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key = "value"` in `[versions]`
    pub fn version(mut self, key: &str, value: &str) -> Self {
        self.versions.push(format!("{key} = \"{value}\""));
        self
    }

    /// A library with a `module` coordinate and a `version.ref`
    pub fn library(mut self, key: &str, module: &str, version_ref: &str) -> Self {
        self.libraries
            .push(format!("{key} = {{ module = \"{module}\", version.ref = \"{version_ref}\" }}"));
        self
    }

    /// A library whose value is written verbatim, e.g. a string notation
    pub fn library_raw(mut self, key: &str, value: &str) -> Self {
        self.libraries.push(format!("{key} = {value}"));
        self
    }

    /// A plugin with an `id` and a `version.ref`
    pub fn plugin(mut self, key: &str, id: &str, version_ref: &str) -> Self {
        self.plugins.push(format!("{key} = {{ id = \"{id}\", version.ref = \"{version_ref}\" }}"));
        self
    }

    pub fn bundle(mut self, key: &str, members: &[&str]) -> Self {
        let members: Vec<String> = members.iter().map(|m| format!("\"{m}\"")).collect();
        self.bundles.push(format!("{key} = [{}]", members.join(", ")));
        self
    }

    /// Adds `count` versions and libraries that reference them.
    pub fn generated_libraries(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self
                .version(&format!("v{i}"), &format!("1.{i}.0"))
                .library(&format!("lib{i}"), &format!("com.example:lib{i}"), &format!("v{i}"));
        }
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        let sections = [
            ("versions", &self.versions, true),
            ("libraries", &self.libraries, true),
            ("plugins", &self.plugins, false),
            ("bundles", &self.bundles, false),
        ];
        for (name, entries, always) in sections {
            if entries.is_empty() && !always {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "[{name}]");
            for entry in entries {
                let _ = writeln!(out, "{entry}");
            }
        }
        out
    }

    /// Writes the catalog to `dir/gradle/libs.versions.toml`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("gradle").join("libs.versions.toml");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.build())?;
        Ok(path)
    }
}
