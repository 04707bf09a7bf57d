//! Referential integrity: `version.ref` targets and bundle members.

use std::collections::HashSet;
use strsim::levenshtein;

use super::issue::{CatalogIssue, Section};
use super::model::Catalog;
use super::result::Findings;
use crate::constants::{
    MAX_SUGGESTED_REFERENCES, MAX_SUGGESTION_COMPARISONS, MAX_SUGGESTION_NAME_LEN,
};

/// Maximum edit distance, as a percentage of the name length, for a
/// declared name to be offered as a suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// "Did you mean" lookups for one catalog, bounded in total work.
///
/// Names longer than [`MAX_SUGGESTION_NAME_LEN`] characters get no
/// suggestion. Once either budget is spent, the remaining references are
/// reported without one.
struct Suggester {
    references_left: usize,
    comparisons_left: usize,
}

impl Suggester {
    fn new(references: usize, comparisons: usize) -> Self {
        Self {
            references_left: references,
            comparisons_left: comparisons,
        }
    }

    /// The candidate closest to `target`, if any is close enough.
    fn closest(&mut self, target: &str, candidates: &[(&str, usize)]) -> Option<String> {
        let target_len = target.chars().count();
        if target_len > MAX_SUGGESTION_NAME_LEN || self.references_left == 0 {
            return None;
        }
        self.references_left -= 1;

        let limit = (target_len * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
        let mut best: Option<(usize, &str)> = None;
        for &(candidate, candidate_len) in candidates {
            // The length difference is a lower bound on the edit distance.
            if candidate_len.abs_diff(target_len) > limit {
                continue;
            }
            if self.comparisons_left == 0 {
                break;
            }
            self.comparisons_left -= 1;

            let distance = levenshtein(target, candidate);
            if distance <= limit && best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, candidate));
            }
        }
        best.map(|(_, candidate)| candidate.to_string())
    }
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new(MAX_SUGGESTED_REFERENCES, MAX_SUGGESTION_COMPARISONS)
    }
}

/// Declared names paired with their length in characters. Names too long
/// to ever be suggested are left out.
fn suggestion_candidates<'a>(names: &[&'a str]) -> Vec<(&'a str, usize)> {
    names
        .iter()
        .map(|name| (*name, name.chars().count()))
        .filter(|(_, len)| *len <= MAX_SUGGESTION_NAME_LEN * 2)
        .collect()
}

/// Resolves every reference in `catalog` against the declared names.
pub fn check(catalog: &Catalog, findings: &mut Findings) {
    check_with(catalog, findings, &mut Suggester::default());
}

fn check_with(catalog: &Catalog, findings: &mut Findings, suggester: &mut Suggester) {
    let declared_versions: Vec<&str> = dedup(catalog.versions.iter().map(|v| v.key.as_str()));
    let declared_libraries: Vec<&str> = dedup(catalog.libraries.iter().map(|l| l.key.as_str()));
    let version_set: HashSet<&str> = declared_versions.iter().copied().collect();
    let library_set: HashSet<&str> = declared_libraries.iter().copied().collect();
    let version_candidates = suggestion_candidates(&declared_versions);
    let library_candidates = suggestion_candidates(&declared_libraries);

    let mut referenced: HashSet<&str> = HashSet::new();

    let specs = catalog
        .libraries
        .iter()
        .map(|l| (Section::Libraries, l.key.as_str(), &l.version))
        .chain(catalog.plugins.iter().map(|p| (Section::Plugins, p.key.as_str(), &p.version)));

    for (section, key, spec) in specs {
        let Some(reference) = spec.reference() else { continue };
        referenced.insert(reference);
        if !version_set.contains(reference) {
            findings.push(CatalogIssue::MissingVersionReference {
                section,
                key: key.to_string(),
                reference: reference.to_string(),
                suggestion: suggester.closest(reference, &version_candidates),
            });
        }
    }

    for key in declared_versions.iter().filter(|key| !referenced.contains(*key)) {
        findings.push(CatalogIssue::UnreferencedVersion { key: (*key).to_string() });
    }

    for bundle in &catalog.bundles {
        let mut reported: HashSet<&str> = HashSet::new();
        for member in &bundle.members {
            if !library_set.contains(member.as_str()) && reported.insert(member.as_str()) {
                findings.push(CatalogIssue::InvalidBundleReference {
                    bundle: bundle.key.clone(),
                    member: member.clone(),
                    suggestion: suggester.closest(member, &library_candidates),
                });
            }
        }
    }
}

/// Keeps the first occurrence of each name, preserving order.
fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(*name)).collect()
}
