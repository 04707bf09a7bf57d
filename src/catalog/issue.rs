//! Findings produced while validating a version catalog.
//!
//! Every problem the engine can report is a variant of [`CatalogIssue`]. The
//! `Display` output of each variant is the message that ends up in
//! [`ValidationResult`](super::ValidationResult), so messages always quote the
//! offending key, value or reference verbatim. [`CatalogIssue::severity`]
//! decides whether a finding lands in the error or the warning list.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The four sections a version catalog may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// `[versions]` - reusable version strings (required)
    Versions,
    /// `[libraries]` - library coordinates (required)
    Libraries,
    /// `[plugins]` - build plugin ids (optional)
    Plugins,
    /// `[bundles]` - named groups of libraries (optional)
    Bundles,
}

impl Section {
    /// All sections in the order the engine processes them.
    pub const ALL: [Section; 4] =
        [Section::Versions, Section::Libraries, Section::Plugins, Section::Bundles];

    /// The exact header name, as written between brackets.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Versions => "versions",
            Self::Libraries => "libraries",
            Self::Plugins => "plugins",
            Self::Bundles => "bundles",
        }
    }

    /// Matches a header name case-sensitively.
    #[must_use]
    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == name)
    }

    /// Whether a catalog is invalid without this section.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Versions | Self::Libraries)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a finding invalidates the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fatal: the catalog is invalid.
    #[default]
    Error,
    /// Advisory: reported, never changes validity.
    Warning,
}

/// A grammar violation in the catalog text.
///
/// Carries the absolute 1-based line number and the offending line so the
/// message is actionable without opening the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at line {line}: {message} (near `{snippet}`)")]
pub struct SyntaxError {
    /// 1-based line number in the original file
    pub line: usize,
    /// What went wrong
    pub message: String,
    /// The offending line, trimmed and shortened
    pub snippet: String,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    // Structural
    #[error("Catalog file '{path}' does not exist")]
    FileNotFound { path: String },

    #[error("Failed to read catalog file '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("manifest is empty")]
    EmptyManifest,

    #[error("{section} section is required")]
    MissingSection { section: Section },

    #[error("{section} section is empty")]
    EmptySection { section: Section },

    #[error("[{section}] section is declared more than once (lines {first_line} and {line})")]
    RepeatedSection { section: Section, first_line: usize, line: usize },

    #[error("Unknown section [{name}] at line {line} is ignored")]
    UnknownSection { name: String, line: usize },

    // Syntax
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    // Format
    #[error("Invalid version '{value}' for '{key}' in [{section}]")]
    InvalidVersion { section: Section, key: String, value: String },

    #[error("Invalid module coordinate '{value}' for library '{key}'")]
    InvalidModule { key: String, value: String },

    #[error("Invalid plugin id '{value}' for plugin '{key}'")]
    InvalidPluginId { key: String, value: String },

    #[error("Library '{key}' must declare either 'module' or both 'group' and 'name'")]
    MissingCoordinates { key: String },

    #[error("Library '{key}' declares both 'module' and 'group'/'name'")]
    AmbiguousCoordinates { key: String },

    #[error("Plugin '{key}' must declare an 'id'")]
    MissingPluginId { key: String },

    #[error(
        "'{key}' in [{section}] declares both version '{version}' and version.ref '{reference}'"
    )]
    ConflictingVersion { section: Section, key: String, version: String, reference: String },

    #[error("Value of '{key}' in [{section}] must be {expected}")]
    UnexpectedValue { section: Section, key: String, expected: &'static str },

    #[error("Attribute '{attribute}' of '{key}' in [{section}] must be {expected}")]
    InvalidAttribute {
        section: Section,
        key: String,
        attribute: String,
        expected: &'static str,
    },

    #[error("Unknown attribute '{attribute}' on '{key}' in [{section}] is ignored")]
    UnknownAttribute { section: Section, key: String, attribute: String },

    // Duplicates
    #[error("Duplicate key '{key}' in [{section}] (first declared at line {first_line}, repeated at line {line})")]
    DuplicateKey { section: Section, key: String, first_line: usize, line: usize },

    #[error("Keys '{first}' and '{second}' in [{section}] both map to accessor '{accessor}'")]
    AccessorCollision { section: Section, first: String, second: String, accessor: String },

    // References
    #[error("'{key}' in [{section}] references undefined version '{reference}'{}", did_you_mean(.suggestion))]
    MissingVersionReference {
        section: Section,
        key: String,
        reference: String,
        suggestion: Option<String>,
    },

    #[error("Version '{key}' is declared but never referenced")]
    UnreferencedVersion { key: String },

    #[error("Bundle '{bundle}' references undefined library '{member}'{}", did_you_mean(.suggestion))]
    InvalidBundleReference { bundle: String, member: String, suggestion: Option<String> },

    // Advisories
    #[error(
        "Incompatible versions: {subject_key} {subject_version} requires {dependency_key} >= {minimum}, found {dependency_version}{}",
        note_suffix(.note)
    )]
    IncompatibleVersions {
        subject_key: String,
        subject_version: String,
        dependency_key: String,
        dependency_version: String,
        minimum: String,
        note: Option<String>,
        severity: Severity,
    },

    #[error("Library '{key}' uses {coordinate}:{version}, which has a known vulnerability ({advisory})")]
    VulnerableVersion { key: String, coordinate: String, version: String, advisory: String },

    #[error("No critical dependency declared in [libraries] (expected one of: {expected})")]
    MissingCriticalDependency { expected: String },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default()
}

fn note_suffix(note: &Option<String>) -> String {
    note.as_ref().map(|n| format!(" ({n})")).unwrap_or_default()
}

impl CatalogIssue {
    /// Whether this finding is fatal or advisory.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnknownSection { .. }
            | Self::UnknownAttribute { .. }
            | Self::AccessorCollision { .. }
            | Self::UnreferencedVersion { .. }
            | Self::VulnerableVersion { .. }
            | Self::MissingCriticalDependency { .. } => Severity::Warning,
            Self::IncompatibleVersions { severity, .. } => *severity,
            _ => Severity::Error,
        }
    }
}
