//! Compatibility and security advisories.
//!
//! The facts the checker applies live in [`AdvisoryTables`], a plain data
//! value. The built-in tables cover the common Android toolchain pairings and
//! a few well-known vulnerable releases; a configuration file can replace any
//! of the three tables. Advisory findings are warnings unless an
//! incompatibility rule says otherwise.

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::issue::{CatalogIssue, Severity};
use super::model::Catalog;
use super::result::Findings;

/// "When `subject` is in `subject_versions`, `dependency` must be at least
/// `minimum`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompatibilityRule {
    /// `[versions]` keys that name the subject, tried in order
    pub subject: Vec<String>,
    /// semver requirement the subject version must match, e.g. `>=8.0.0`
    pub subject_versions: String,
    /// `[versions]` keys that name the dependency, tried in order
    pub dependency: Vec<String>,
    /// Lowest dependency version compatible with the subject
    pub minimum: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub note: Option<String>,
}

/// Releases of one module with a published advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerableRelease {
    /// `group:artifact`
    pub module: String,
    pub versions: Vec<String>,
    /// Advisory id, e.g. a CVE number
    pub advisory: String,
}

/// The data the advisory checker works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryTables {
    pub incompatible: Vec<IncompatibilityRule>,
    pub vulnerable: Vec<VulnerableRelease>,
    /// Case-insensitive fragments of which at least one should appear in a
    /// library coordinate. Empty disables the heuristic.
    pub critical_fragments: Vec<String>,
}

/// An advisory table entry that cannot be applied.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("Invalid version requirement '{requirement}' in rule for {subject:?}: {source}")]
    InvalidRequirement {
        subject: Vec<String>,
        requirement: String,
        source: semver::Error,
    },

    #[error("Invalid minimum version '{minimum}' in rule for {subject:?}")]
    InvalidMinimum { subject: Vec<String>, minimum: String },

    #[error("Incompatibility rule has an empty subject or dependency list")]
    EmptyAliases,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl Default for AdvisoryTables {
    fn default() -> Self {
        let agp = strings(&["agp", "android-gradle-plugin", "androidGradlePlugin"]);
        Self {
            incompatible: vec![
                IncompatibilityRule {
                    subject: agp.clone(),
                    subject_versions: ">=8.0.0".to_string(),
                    dependency: strings(&["kotlin", "kotlin-gradle-plugin", "kotlinVersion"]),
                    minimum: "1.9.0".to_string(),
                    severity: Severity::Error,
                    note: Some("Android Gradle Plugin 8 needs Kotlin 1.9.0 or newer".to_string()),
                },
                IncompatibilityRule {
                    subject: strings(&["kotlin", "kotlin-gradle-plugin", "kotlinVersion"]),
                    subject_versions: ">=2.0.0".to_string(),
                    dependency: strings(&["ksp"]),
                    minimum: "2.0.0".to_string(),
                    severity: Severity::Error,
                    note: Some("KSP releases are tied to the Kotlin compiler version".to_string()),
                },
                IncompatibilityRule {
                    subject: agp,
                    subject_versions: ">=8.0.0".to_string(),
                    dependency: strings(&["hilt", "dagger"]),
                    minimum: "2.44.0".to_string(),
                    severity: Severity::Warning,
                    note: Some("older Hilt releases do not support AGP 8 namespaces".to_string()),
                },
            ],
            vulnerable: vec![
                VulnerableRelease {
                    module: "junit:junit".to_string(),
                    versions: strings(&[
                        "4.7", "4.8", "4.8.1", "4.8.2", "4.9", "4.10", "4.11", "4.12", "4.13",
                    ]),
                    advisory: "CVE-2020-15250".to_string(),
                },
                VulnerableRelease {
                    module: "org.apache.logging.log4j:log4j-core".to_string(),
                    versions: strings(&["2.12.1", "2.13.3", "2.14.0", "2.14.1"]),
                    advisory: "CVE-2021-44228".to_string(),
                },
            ],
            critical_fragments: strings(&[
                "junit",
                "espresso",
                "mockito",
                "robolectric",
                "androidx.test",
                "jacoco",
                "kotest",
            ]),
        }
    }
}

impl AdvisoryTables {
    /// Checks that every rule can be applied.
    ///
    /// # Errors
    ///
    /// Returns the first rule with an unparsable requirement or minimum, or
    /// with no aliases.
    pub fn validate(&self) -> Result<(), AdvisoryError> {
        for rule in &self.incompatible {
            if rule.subject.is_empty() || rule.dependency.is_empty() {
                return Err(AdvisoryError::EmptyAliases);
            }
            VersionReq::parse(&rule.subject_versions).map_err(|source| {
                AdvisoryError::InvalidRequirement {
                    subject: rule.subject.clone(),
                    requirement: rule.subject_versions.clone(),
                    source,
                }
            })?;
            if lenient_version(&rule.minimum).is_none() {
                return Err(AdvisoryError::InvalidMinimum {
                    subject: rule.subject.clone(),
                    minimum: rule.minimum.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Reads a catalog version as semver, ignoring any pre-release or build
/// suffix and padding missing components with zero. Ranges, wildcards and
/// anything else that is not a plain dotted version yield `None`.
#[must_use]
pub fn lenient_version(raw: &str) -> Option<Version> {
    let core = raw.split(['-', '+']).next()?;
    let mut parts = core.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, patch))
}

/// Applies [`AdvisoryTables`] to a catalog.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryChecker {
    tables: AdvisoryTables,
}

impl AdvisoryChecker {
    #[must_use]
    pub fn new(tables: AdvisoryTables) -> Self {
        Self { tables }
    }

    #[must_use]
    pub fn tables(&self) -> &AdvisoryTables {
        &self.tables
    }

    /// Runs incompatibility, vulnerability and critical-dependency checks.
    pub fn check(&self, catalog: &Catalog, findings: &mut Findings) {
        self.check_incompatible(catalog, findings);
        self.check_vulnerable(catalog, findings);
        self.check_critical(catalog, findings);
    }

    fn check_incompatible(&self, catalog: &Catalog, findings: &mut Findings) {
        for rule in &self.tables.incompatible {
            let Ok(requirement) = VersionReq::parse(&rule.subject_versions) else {
                tracing::warn!(
                    "skipping incompatibility rule with invalid requirement '{}'",
                    rule.subject_versions
                );
                continue;
            };
            let Some(minimum) = lenient_version(&rule.minimum) else {
                tracing::warn!("skipping incompatibility rule with invalid minimum '{}'", rule.minimum);
                continue;
            };
            let Some((subject_key, subject_raw)) = find_version(catalog, &rule.subject) else {
                continue;
            };
            let Some((dependency_key, dependency_raw)) = find_version(catalog, &rule.dependency)
            else {
                continue;
            };
            let (Some(subject), Some(dependency)) =
                (lenient_version(subject_raw), lenient_version(dependency_raw))
            else {
                tracing::trace!("skipping non-plain versions {subject_raw} / {dependency_raw}");
                continue;
            };

            if requirement.matches(&subject) && dependency < minimum {
                findings.push(CatalogIssue::IncompatibleVersions {
                    subject_key: subject_key.to_string(),
                    subject_version: subject_raw.to_string(),
                    dependency_key: dependency_key.to_string(),
                    dependency_version: dependency_raw.to_string(),
                    minimum: rule.minimum.clone(),
                    note: rule.note.clone(),
                    severity: rule.severity,
                });
            }
        }
    }

    fn check_vulnerable(&self, catalog: &Catalog, findings: &mut Findings) {
        for library in &catalog.libraries {
            let Some(coordinate) = library.coordinate.text() else { continue };
            let Some(version) = catalog.resolve(&library.version) else { continue };
            for release in &self.tables.vulnerable {
                if release.module == coordinate && release.versions.iter().any(|v| v == version) {
                    findings.push(CatalogIssue::VulnerableVersion {
                        key: library.key.clone(),
                        coordinate: coordinate.clone(),
                        version: version.to_string(),
                        advisory: release.advisory.clone(),
                    });
                }
            }
        }
    }

    fn check_critical(&self, catalog: &Catalog, findings: &mut Findings) {
        let fragments = &self.tables.critical_fragments;
        if fragments.is_empty() {
            return;
        }
        let found = catalog
            .libraries
            .iter()
            .filter_map(|library| library.coordinate.text())
            .map(|coordinate| coordinate.to_lowercase())
            .any(|coordinate| {
                fragments.iter().any(|fragment| coordinate.contains(&fragment.to_lowercase()))
            });
        if !found {
            findings.push(CatalogIssue::MissingCriticalDependency { expected: fragments.join(", ") });
        }
    }
}

/// The first alias declared in `[versions]` and its concrete version.
fn find_version<'a>(catalog: &'a Catalog, aliases: &'a [String]) -> Option<(&'a str, &'a str)> {
    aliases.iter().find_map(|alias| {
        let entry = catalog.version(alias)?;
        Some((alias.as_str(), entry.primary()?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::issue::Section;
    use crate::catalog::parser::parse_entries;

    fn catalog(versions: &str, libraries: &str) -> Catalog {
        Catalog::lift(vec![
            (Section::Versions, parse_entries(versions, 1).unwrap()),
            (Section::Libraries, parse_entries(libraries, 1).unwrap()),
        ])
    }

    fn run(checker: &AdvisoryChecker, catalog: &Catalog) -> Vec<CatalogIssue> {
        let mut findings = Findings::default();
        checker.check(catalog, &mut findings);
        findings.issues().to_vec()
    }

    const JUNIT: &str = "junit = { module = \"junit:junit\", version = \"4.13.2\" }\n";

    #[test]
    fn test_lenient_version() {
        assert_eq!(lenient_version("8.11.1"), Some(Version::new(8, 11, 1)));
        assert_eq!(lenient_version("1.9"), Some(Version::new(1, 9, 0)));
        assert_eq!(lenient_version("2.0.21-1.0.27"), Some(Version::new(2, 0, 21)));
        assert_eq!(lenient_version("2"), Some(Version::new(2, 0, 0)));
        assert_eq!(lenient_version("1.+"), None);
        assert_eq!(lenient_version("[1.0,2.0)"), None);
        assert_eq!(lenient_version("1.2.3.4"), None);
    }

    #[test]
    fn test_default_tables_are_valid() {
        AdvisoryTables::default().validate().unwrap();
    }

    #[test]
    fn test_agp_kotlin_incompatibility() {
        let issues = run(&AdvisoryChecker::default(), &catalog("agp = \"8.11.1\"\nkotlin = \"1.8.0\"\n", JUNIT));
        assert_eq!(issues.len(), 1);
        let message = issues[0].to_string();
        assert!(message.contains("agp 8.11.1"), "{message}");
        assert!(message.contains("kotlin >= 1.9.0, found 1.8.0"), "{message}");
        assert_eq!(issues[0].severity(), Severity::Error);
    }

    #[test]
    fn test_compatible_or_out_of_scope_versions() {
        let checker = AdvisoryChecker::default();
        assert!(run(&checker, &catalog("agp = \"8.11.1\"\nkotlin = \"2.0.21\"\n", JUNIT)).is_empty());
        assert!(run(&checker, &catalog("agp = \"7.4.2\"\nkotlin = \"1.8.0\"\n", JUNIT)).is_empty());
        assert!(run(&checker, &catalog("agp = \"8.+\"\nkotlin = \"1.8.0\"\n", JUNIT)).is_empty());
    }

    #[test]
    fn test_low_severity_rule() {
        let issues = run(&AdvisoryChecker::default(), &catalog("agp = \"8.2.0\"\nhilt = \"2.40\"\n", JUNIT));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_vulnerable_version_via_reference() {
        let issues = run(
            &AdvisoryChecker::default(),
            &catalog("junit = \"4.12\"\n", "junit = { group = \"junit\", name = \"junit\", version.ref = \"junit\" }\n"),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "Library 'junit' uses junit:junit:4.12, which has a known vulnerability (CVE-2020-15250)"
        );
    }

    #[test]
    fn test_missing_critical_dependency() {
        let issues = run(
            &AdvisoryChecker::default(),
            &catalog("", "okhttp = \"com.squareup.okhttp3:okhttp:4.12.0\"\n"),
        );
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], CatalogIssue::MissingCriticalDependency { .. }));
    }

    #[test]
    fn test_substituted_tables() {
        let tables = AdvisoryTables {
            incompatible: vec![IncompatibilityRule {
                subject: vec!["compose".into()],
                subject_versions: ">=1.5.0".into(),
                dependency: vec!["kotlin".into()],
                minimum: "1.9.0".into(),
                severity: Severity::Warning,
                note: None,
            }],
            vulnerable: Vec::new(),
            critical_fragments: Vec::new(),
        };
        let issues = run(
            &AdvisoryChecker::new(tables),
            &catalog("compose = \"1.5.4\"\nkotlin = \"1.8.22\"\n", "x = \"g:a:1\"\n"),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "Incompatible versions: compose 1.5.4 requires kotlin >= 1.9.0, found 1.8.22"
        );
    }

    #[test]
    fn test_tables_deserialize_with_defaults() {
        let tables: AdvisoryTables = toml::from_str(
            r#"
critical_fragments = ["truth"]

[[vulnerable]]
module = "com.example:lib"
versions = ["1.0.0"]
advisory = "GHSA-xxxx"
"#,
        )
        .unwrap();
        assert_eq!(tables.critical_fragments, vec!["truth"]);
        assert_eq!(tables.vulnerable.len(), 1);
        assert_eq!(tables.incompatible, AdvisoryTables::default().incompatible);
    }

    #[test]
    fn test_validate_rejects_bad_requirement() {
        let mut tables = AdvisoryTables::default();
        tables.incompatible[0].subject_versions = "at least 8".into();
        assert!(matches!(tables.validate(), Err(AdvisoryError::InvalidRequirement { .. })));
    }
}
