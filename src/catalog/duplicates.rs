//! Section-scoped duplicate key detection.

use std::collections::{HashMap, HashSet};

use super::issue::{CatalogIssue, Section};
use super::model::Catalog;
use super::result::Findings;

/// Gradle generates the same accessor for keys that differ only in their
/// separators (`androidx-core`, `androidx_core`, `androidx.core`).
fn accessor(key: &str) -> String {
    key.chars().map(|c| if matches!(c, '-' | '_') { '.' } else { c }).collect()
}

/// Reports keys that appear more than once in a section, then keys that
/// collide on their generated accessor.
pub fn check(catalog: &Catalog, findings: &mut Findings) {
    let sections: [(Section, Vec<(&str, usize)>); 4] = [
        (Section::Versions, catalog.versions.iter().map(|e| (e.key.as_str(), e.line)).collect()),
        (Section::Libraries, catalog.libraries.iter().map(|e| (e.key.as_str(), e.line)).collect()),
        (Section::Plugins, catalog.plugins.iter().map(|e| (e.key.as_str(), e.line)).collect()),
        (Section::Bundles, catalog.bundles.iter().map(|e| (e.key.as_str(), e.line)).collect()),
    ];

    for (section, keys) in &sections {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut reported: HashSet<&str> = HashSet::new();
        for &(key, line) in keys {
            match first_seen.get(key) {
                Some(&first_line) => {
                    if reported.insert(key) {
                        tracing::debug!("duplicate key '{key}' in [{section}] at line {line}");
                        findings.push(CatalogIssue::DuplicateKey {
                            section: *section,
                            key: key.to_string(),
                            first_line,
                            line,
                        });
                    }
                }
                None => {
                    first_seen.insert(key, line);
                }
            }
        }
    }

    for (section, keys) in &sections {
        let mut accessors: HashMap<String, &str> = HashMap::new();
        let mut reported: HashSet<(&str, &str)> = HashSet::new();
        for &(key, _) in keys {
            let name = accessor(key);
            match accessors.get(name.as_str()) {
                Some(&first) if first != key => {
                    if reported.insert((first, key)) {
                        findings.push(CatalogIssue::AccessorCollision {
                            section: *section,
                            first: first.to_string(),
                            second: key.to_string(),
                            accessor: name,
                        });
                    }
                }
                Some(_) => {}
                None => {
                    accessors.insert(name, key);
                }
            }
        }
    }
}
