//! Catalog file discovery.
//!
//! When no file is given, the catalog is searched for the way Gradle lays it
//! out: `gradle/libs.versions.toml` first, then `libs.versions.toml`, in the
//! starting directory and then in each parent. A directory argument is
//! walked for every `*.versions.toml` file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::{CATALOG_FILE_SUFFIX, DEFAULT_CATALOG_PATHS};
use crate::core::CatalogCheckError;

/// Find a catalog by searching up the directory tree from the current
/// directory.
///
/// # Examples
///
/// ```rust,no_run
/// use catalog_check::catalog::find_catalog;
///
/// match find_catalog() {
///     Ok(path) => println!("Found catalog at: {}", path.display()),
///     Err(e) => println!("No catalog found: {}", e),
/// }
/// ```
///
/// # Errors
///
/// Fails if the current directory cannot be determined or no catalog exists
/// between it and the filesystem root.
pub fn find_catalog() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory. This may indicate a permission issue or corrupted filesystem")?;
    find_catalog_from(current)
}

/// Find a catalog by searching up from `current`.
///
/// At each level every entry of [`DEFAULT_CATALOG_PATHS`] is tried before
/// moving to the parent, so `gradle/libs.versions.toml` in a project wins over
/// a `libs.versions.toml` further up.
///
/// # Errors
///
/// Returns [`CatalogCheckError::CatalogNotFound`] wrapped in an
/// [`anyhow::Error`] once the filesystem root is reached.
pub fn find_catalog_from(mut current: PathBuf) -> Result<PathBuf> {
    loop {
        for candidate in DEFAULT_CATALOG_PATHS {
            let path = current.join(candidate);
            if path.is_file() {
                tracing::debug!("found catalog at {}", path.display());
                return Ok(path);
            }
        }

        if !current.pop() {
            return Err(CatalogCheckError::CatalogNotFound.into());
        }
    }
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| name.starts_with('.') || name == "build")
}

/// Every `*.versions.toml` file below `dir`, sorted by path.
///
/// Hidden directories and `build` output directories are not entered.
///
/// # Errors
///
/// Fails if the directory cannot be read.
pub fn collect_catalogs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name().into_iter().filter_entry(|e| !is_skipped_dir(e)) {
        let entry = entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
        let is_catalog = entry.file_type().is_file()
            && entry.file_name().to_str().is_some_and(|name| name.ends_with(CATALOG_FILE_SUFFIX));
        if is_catalog {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
