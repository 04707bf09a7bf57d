//! Grammar checks for versions, module coordinates and plugin ids, plus the
//! entry-shape problems recorded while lifting the model.

use regex::Regex;
use std::sync::OnceLock;

use super::issue::{CatalogIssue, Section};
use super::model::{
    AttributeProblems, Catalog, Coordinate, DeclaredVersion, VersionConstraint, VersionSpec,
};
use super::result::Findings;

/// `MAJOR[.MINOR[.PATCH]][-pre][+build]`
const PLAIN_VERSION: &str = r"\d+(?:\.\d+){0,2}(?:-[0-9A-Za-z.\-]+)?(?:\+[0-9A-Za-z.\-]+)?";

fn plain_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^{PLAIN_VERSION}$")).unwrap())
}

fn wildcard_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)?\.\+$").unwrap())
}

fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^[\[(]({PLAIN_VERSION})?,({PLAIN_VERSION})?[\])]$")).unwrap()
    })
}

fn module_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+:[A-Za-z0-9_.\-]+$").unwrap())
}

fn coordinate_part_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap())
}

fn plugin_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)+$").unwrap())
}

/// Whether `value` is a plain version, a prefix wildcard (`1.+`, `1.2.+`) or
/// a range with at least one bound (`[1.0,2.0)`, `[1.0,)`, `(,2.0]`).
#[must_use]
pub fn is_valid_version(value: &str) -> bool {
    if plain_version_regex().is_match(value) || wildcard_regex().is_match(value) {
        return true;
    }
    range_regex()
        .captures(value)
        .is_some_and(|caps| caps.get(1).is_some() || caps.get(2).is_some())
}

/// Whether `value` is a `group:artifact` coordinate.
#[must_use]
pub fn is_valid_module(value: &str) -> bool {
    module_regex().is_match(value)
}

/// Whether `value` is a dotted plugin id with at least two segments.
#[must_use]
pub fn is_valid_plugin_id(value: &str) -> bool {
    plugin_id_regex().is_match(value)
}

/// Runs every format check over `catalog`, in section and source order.
pub fn check(catalog: &Catalog, findings: &mut Findings) {
    for entry in &catalog.versions {
        match &entry.value {
            DeclaredVersion::Literal(value) => {
                check_version(Section::Versions, &entry.key, value, findings);
            }
            DeclaredVersion::Rich(constraints) if constraints.is_empty() => {
                findings.push(CatalogIssue::UnexpectedValue {
                    section: Section::Versions,
                    key: entry.key.clone(),
                    expected: "a version string or a table of rich version constraints",
                });
            }
            DeclaredVersion::Rich(constraints) => {
                check_constraints(Section::Versions, &entry.key, constraints, findings);
            }
            DeclaredVersion::Malformed => findings.push(CatalogIssue::UnexpectedValue {
                section: Section::Versions,
                key: entry.key.clone(),
                expected: "a version string or a table of rich version constraints",
            }),
        }
        check_attributes(Section::Versions, &entry.key, &entry.attributes, findings);
    }

    for library in &catalog.libraries {
        if library.malformed {
            findings.push(CatalogIssue::UnexpectedValue {
                section: Section::Libraries,
                key: library.key.clone(),
                expected: "a \"group:artifact:version\" string or an inline table",
            });
            continue;
        }

        match &library.coordinate {
            Coordinate::Module(module) => {
                if !is_valid_module(module) {
                    findings.push(CatalogIssue::InvalidModule {
                        key: library.key.clone(),
                        value: module.clone(),
                    });
                }
            }
            Coordinate::GroupName { group, name } => {
                let part = coordinate_part_regex();
                if !part.is_match(group) || !part.is_match(name) {
                    findings.push(CatalogIssue::InvalidModule {
                        key: library.key.clone(),
                        value: format!("{group}:{name}"),
                    });
                }
            }
            Coordinate::Ambiguous { module } => {
                findings.push(CatalogIssue::AmbiguousCoordinates { key: library.key.clone() });
                if !is_valid_module(module) {
                    findings.push(CatalogIssue::InvalidModule {
                        key: library.key.clone(),
                        value: module.clone(),
                    });
                }
            }
            Coordinate::Incomplete => {
                findings.push(CatalogIssue::MissingCoordinates { key: library.key.clone() });
            }
        }

        check_spec(Section::Libraries, &library.key, &library.version, findings);
        check_attributes(Section::Libraries, &library.key, &library.attributes, findings);
    }

    for plugin in &catalog.plugins {
        if plugin.malformed {
            findings.push(CatalogIssue::UnexpectedValue {
                section: Section::Plugins,
                key: plugin.key.clone(),
                expected: "a \"plugin.id:version\" string or an inline table",
            });
            continue;
        }

        match &plugin.id {
            Some(id) if !is_valid_plugin_id(id) => {
                findings.push(CatalogIssue::InvalidPluginId {
                    key: plugin.key.clone(),
                    value: id.clone(),
                });
            }
            Some(_) => {}
            None => findings.push(CatalogIssue::MissingPluginId { key: plugin.key.clone() }),
        }

        check_spec(Section::Plugins, &plugin.key, &plugin.version, findings);
        check_attributes(Section::Plugins, &plugin.key, &plugin.attributes, findings);
    }

    for bundle in catalog.bundles.iter().filter(|b| b.malformed) {
        findings.push(CatalogIssue::UnexpectedValue {
            section: Section::Bundles,
            key: bundle.key.clone(),
            expected: "an array of library keys",
        });
    }
}

fn check_version(section: Section, key: &str, value: &str, findings: &mut Findings) {
    if !is_valid_version(value) {
        findings.push(CatalogIssue::InvalidVersion {
            section,
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

fn check_constraints(
    section: Section,
    key: &str,
    constraints: &[VersionConstraint],
    findings: &mut Findings,
) {
    for constraint in constraints {
        check_version(section, key, &constraint.value, findings);
    }
}

fn check_spec(section: Section, key: &str, spec: &VersionSpec, findings: &mut Findings) {
    match spec {
        VersionSpec::Literal(value) => check_version(section, key, value, findings),
        VersionSpec::Rich(constraints) => check_constraints(section, key, constraints, findings),
        VersionSpec::Conflicting { literal, reference } => {
            findings.push(CatalogIssue::ConflictingVersion {
                section,
                key: key.to_string(),
                version: literal.clone(),
                reference: reference.clone(),
            });
        }
        VersionSpec::Reference(_) | VersionSpec::Unspecified => {}
    }
}

fn check_attributes(
    section: Section,
    key: &str,
    attributes: &AttributeProblems,
    findings: &mut Findings,
) {
    for (attribute, expected) in &attributes.invalid {
        findings.push(CatalogIssue::InvalidAttribute {
            section,
            key: key.to_string(),
            attribute: attribute.clone(),
            expected: *expected,
        });
    }
    for attribute in &attributes.unknown {
        findings.push(CatalogIssue::UnknownAttribute {
            section,
            key: key.to_string(),
            attribute: attribute.clone(),
        });
    }
}
