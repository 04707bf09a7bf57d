//! Typed view of a parsed catalog.
//!
//! Lifting from [`RawEntry`] values never fails. Anything that does not have
//! the expected shape is recorded on the entry (a conflicting version, an
//! ambiguous coordinate, an attribute of the wrong kind) so the format pass
//! can report it with the key it belongs to. Entries keep their source order
//! and repeated keys are kept as separate entries.

use super::issue::Section;
use super::parser::{RawEntry, RawValue};

/// The attributes recognised in a rich version declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Strictly,
    Require,
    Prefer,
    Reject,
}

impl ConstraintKind {
    fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "strictly" => Some(Self::Strictly),
            "require" => Some(Self::Require),
            "prefer" => Some(Self::Prefer),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// One constraint of a rich version, e.g. `strictly = "[1.0,2.0)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub kind: ConstraintKind,
    pub value: String,
}

/// The preferred concrete version of a rich declaration: `strictly`, then
/// `require`, then `prefer`. `reject` never selects a version.
fn preferred(constraints: &[VersionConstraint]) -> Option<&str> {
    [ConstraintKind::Strictly, ConstraintKind::Require, ConstraintKind::Prefer]
        .into_iter()
        .find_map(|kind| constraints.iter().find(|c| c.kind == kind))
        .map(|c| c.value.as_str())
}

/// Value of a `[versions]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredVersion {
    Literal(String),
    Rich(Vec<VersionConstraint>),
    /// Neither a string nor a table (an array)
    Malformed,
}

/// An entry in `[versions]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub key: String,
    pub line: usize,
    pub value: DeclaredVersion,
    pub attributes: AttributeProblems,
}

impl VersionEntry {
    /// The concrete version this entry stands for, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        match &self.value {
            DeclaredVersion::Literal(v) => Some(v),
            DeclaredVersion::Rich(constraints) => preferred(constraints),
            DeclaredVersion::Malformed => None,
        }
    }
}

/// How a library names its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coordinate {
    /// `module = "group:artifact"`
    Module(String),
    /// `group = "..."`, `name = "..."`
    GroupName { group: String, name: String },
    /// `module` together with `group` and/or `name`
    Ambiguous { module: String },
    /// Neither form is complete
    Incomplete,
}

impl Coordinate {
    /// `group:artifact` text used for advisory matching.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Module(module) | Self::Ambiguous { module } => Some(module.clone()),
            Self::GroupName { group, name } => Some(format!("{group}:{name}")),
            Self::Incomplete => None,
        }
    }
}

/// Version specifier on a library or plugin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionSpec {
    #[default]
    Unspecified,
    Literal(String),
    Reference(String),
    Rich(Vec<VersionConstraint>),
    /// A literal (or rich) version and a `version.ref` at once
    Conflicting { literal: String, reference: String },
}

impl VersionSpec {
    /// The `version.ref` target, including one that conflicts with a literal.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Reference(reference) | Self::Conflicting { reference, .. } => Some(reference),
            _ => None,
        }
    }
}

/// Attributes that were ignored or had the wrong kind of value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeProblems {
    pub unknown: Vec<String>,
    /// Attribute name and a description of the value it should have
    pub invalid: Vec<(String, &'static str)>,
}

/// An entry in `[libraries]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub key: String,
    pub line: usize,
    pub coordinate: Coordinate,
    pub version: VersionSpec,
    pub attributes: AttributeProblems,
    /// The value was an array
    pub malformed: bool,
}

/// An entry in `[plugins]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    pub key: String,
    pub line: usize,
    pub id: Option<String>,
    pub version: VersionSpec,
    pub attributes: AttributeProblems,
    /// The value was an array
    pub malformed: bool,
}

/// An entry in `[bundles]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub key: String,
    pub line: usize,
    pub members: Vec<String>,
    /// The value was not an array
    pub malformed: bool,
}

/// Every entry of a catalog, grouped by section, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub versions: Vec<VersionEntry>,
    pub libraries: Vec<LibraryEntry>,
    pub plugins: Vec<PluginEntry>,
    pub bundles: Vec<Bundle>,
}

impl Catalog {
    /// Lifts parsed sections into typed entries.
    #[must_use]
    pub fn lift(parsed: Vec<(Section, Vec<RawEntry>)>) -> Self {
        let mut catalog = Self::default();
        for (section, entries) in parsed {
            for entry in entries {
                match section {
                    Section::Versions => catalog.versions.push(lift_version(entry)),
                    Section::Libraries => catalog.libraries.push(lift_library(entry)),
                    Section::Plugins => catalog.plugins.push(lift_plugin(entry)),
                    Section::Bundles => catalog.bundles.push(lift_bundle(entry)),
                }
            }
        }
        catalog
    }

    /// The first `[versions]` entry named `key`.
    #[must_use]
    pub fn version(&self, key: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.key == key)
    }

    /// The concrete version a library or plugin resolves to, following
    /// `version.ref` into `[versions]`.
    #[must_use]
    pub fn resolve<'a>(&'a self, spec: &'a VersionSpec) -> Option<&'a str> {
        match spec {
            VersionSpec::Literal(v) | VersionSpec::Conflicting { literal: v, .. } => Some(v),
            VersionSpec::Reference(reference) => self.version(reference)?.primary(),
            VersionSpec::Rich(constraints) => preferred(constraints),
            VersionSpec::Unspecified => None,
        }
    }
}

/// Flattens nested inline tables into dotted attribute names.
fn flatten(prefix: Option<&str>, pairs: Vec<(String, RawValue)>, out: &mut Vec<(String, RawValue)>) {
    for (key, value) in pairs {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key,
        };
        match value {
            RawValue::Table(inner) => flatten(Some(&name), inner, out),
            leaf => out.push((name, leaf)),
        }
    }
}

fn attributes(pairs: Vec<(String, RawValue)>) -> Vec<(String, RawValue)> {
    let mut out = Vec::new();
    flatten(None, pairs, &mut out);
    out
}

const STRING: &str = "a string";
const STRING_OR_ARRAY: &str = "a string or an array of strings";

/// Collects a rich version attribute, flagging values of the wrong kind.
fn push_constraint(
    kind: ConstraintKind,
    name: String,
    value: RawValue,
    constraints: &mut Vec<VersionConstraint>,
    problems: &mut AttributeProblems,
) {
    match (kind, value) {
        (_, RawValue::Str(value)) => constraints.push(VersionConstraint { kind, value }),
        (ConstraintKind::Reject, RawValue::Array(values)) => {
            constraints.extend(values.into_iter().map(|value| VersionConstraint { kind, value }));
        }
        (ConstraintKind::Reject, _) => problems.invalid.push((name, STRING_OR_ARRAY)),
        _ => problems.invalid.push((name, STRING)),
    }
}

fn lift_version(entry: RawEntry) -> VersionEntry {
    let mut problems = AttributeProblems::default();
    let value = match entry.value {
        RawValue::Str(v) => DeclaredVersion::Literal(v),
        RawValue::Array(_) => DeclaredVersion::Malformed,
        RawValue::Table(pairs) => {
            let mut constraints = Vec::new();
            for (name, value) in attributes(pairs) {
                match ConstraintKind::from_attribute(&name) {
                    Some(kind) => push_constraint(kind, name, value, &mut constraints, &mut problems),
                    None => problems.unknown.push(name),
                }
            }
            DeclaredVersion::Rich(constraints)
        }
    };
    VersionEntry { key: entry.key, line: entry.line, value, attributes: problems }
}

/// Accumulates the `version*` attributes of a library or plugin table.
#[derive(Default)]
struct VersionParts {
    literal: Option<String>,
    reference: Option<String>,
    rich: Vec<VersionConstraint>,
}

impl VersionParts {
    /// Consumes `name` if it is a version attribute.
    fn accept(&mut self, name: &str, value: RawValue, problems: &mut AttributeProblems) -> Option<RawValue> {
        let kind = match name {
            "version" => {
                match value {
                    RawValue::Str(v) => self.literal = Some(v),
                    _ => problems.invalid.push((name.to_string(), STRING)),
                }
                return None;
            }
            "version.ref" => {
                match value {
                    RawValue::Str(v) => self.reference = Some(v),
                    _ => problems.invalid.push((name.to_string(), STRING)),
                }
                return None;
            }
            other => other.strip_prefix("version.").and_then(ConstraintKind::from_attribute),
        };
        match kind {
            Some(kind) => {
                push_constraint(kind, name.to_string(), value, &mut self.rich, problems);
                None
            }
            None => Some(value),
        }
    }

    fn into_spec(self) -> VersionSpec {
        let literal = self.literal.or_else(|| preferred(&self.rich).map(str::to_string));
        match (literal, self.reference) {
            (Some(literal), Some(reference)) => VersionSpec::Conflicting { literal, reference },
            (None, Some(reference)) => VersionSpec::Reference(reference),
            (Some(literal), None) if self.rich.is_empty() => VersionSpec::Literal(literal),
            (_, None) if !self.rich.is_empty() => VersionSpec::Rich(self.rich),
            _ => VersionSpec::Unspecified,
        }
    }
}

fn lift_library(entry: RawEntry) -> LibraryEntry {
    let RawEntry { key, value, line } = entry;
    let mut problems = AttributeProblems::default();

    let (coordinate, version, malformed) = match value {
        RawValue::Str(notation) => {
            let parts: Vec<&str> = notation.split(':').collect();
            match parts.as_slice() {
                [group, name, version] => (
                    Coordinate::Module(format!("{group}:{name}")),
                    VersionSpec::Literal((*version).to_string()),
                    false,
                ),
                _ => (Coordinate::Module(notation), VersionSpec::Unspecified, false),
            }
        }
        RawValue::Array(_) => (Coordinate::Incomplete, VersionSpec::Unspecified, true),
        RawValue::Table(pairs) => {
            let mut module = None;
            let mut group = None;
            let mut name = None;
            let mut version = VersionParts::default();

            for (attribute, value) in attributes(pairs) {
                let Some(value) = version.accept(&attribute, value, &mut problems) else {
                    continue;
                };
                let slot = match attribute.as_str() {
                    "module" => &mut module,
                    "group" => &mut group,
                    "name" => &mut name,
                    _ => {
                        problems.unknown.push(attribute);
                        continue;
                    }
                };
                match value {
                    RawValue::Str(v) => *slot = Some(v),
                    _ => problems.invalid.push((attribute, STRING)),
                }
            }

            let coordinate = match (module, group, name) {
                (Some(module), None, None) => Coordinate::Module(module),
                (Some(module), _, _) => Coordinate::Ambiguous { module },
                (None, Some(group), Some(name)) => Coordinate::GroupName { group, name },
                _ => Coordinate::Incomplete,
            };
            (coordinate, version.into_spec(), false)
        }
    };

    LibraryEntry { key, line, coordinate, version, attributes: problems, malformed }
}

fn lift_plugin(entry: RawEntry) -> PluginEntry {
    let RawEntry { key, value, line } = entry;
    let mut problems = AttributeProblems::default();

    let (id, version, malformed) = match value {
        RawValue::Str(notation) => match notation.split_once(':') {
            Some((id, version)) => {
                (Some(id.to_string()), VersionSpec::Literal(version.to_string()), false)
            }
            None => (Some(notation), VersionSpec::Unspecified, false),
        },
        RawValue::Array(_) => (None, VersionSpec::Unspecified, true),
        RawValue::Table(pairs) => {
            let mut id = None;
            let mut version = VersionParts::default();
            for (attribute, value) in attributes(pairs) {
                let Some(value) = version.accept(&attribute, value, &mut problems) else {
                    continue;
                };
                if attribute != "id" {
                    problems.unknown.push(attribute);
                    continue;
                }
                match value {
                    RawValue::Str(v) => id = Some(v),
                    _ => problems.invalid.push((attribute, STRING)),
                }
            }
            (id, version.into_spec(), false)
        }
    };

    PluginEntry { key, line, id, version, attributes: problems, malformed }
}

fn lift_bundle(entry: RawEntry) -> Bundle {
    let RawEntry { key, value, line } = entry;
    match value {
        RawValue::Array(members) => Bundle { key, line, members, malformed: false },
        _ => Bundle { key, line, members: Vec::new(), malformed: true },
    }
}
