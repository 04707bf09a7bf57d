//! Splits raw catalog text into its top-level sections.
//!
//! A section runs from its `[name]` header to the next header or the end of
//! the file. Headers are recognised line by line: a line whose only content is
//! a bare name in single brackets (plus an optional trailing comment). Such a
//! line can never occur inside a string array or inline table of the supported
//! subset, so no bracket tracking is needed here and unbalanced brackets are
//! left for the entry parser to report.

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::issue::{CatalogIssue, Section, SyntaxError};
use crate::constants::MAX_SNIPPET_CHARS;

/// The body of one section and where it starts in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBody {
    /// Line number of the `[name]` header
    pub header_line: usize,
    /// Line number of the first body line (header line + 1)
    pub first_line: usize,
    /// Raw text between the header and the next header
    pub text: String,
}

impl SectionBody {
    /// Whether the body holds nothing but blank lines and comments.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.lines().all(is_blank_or_comment)
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    bodies: HashMap<Section, SectionBody>,
    /// Headers that are not one of the four catalog sections, with their line
    pub unknown: Vec<(String, usize)>,
}

impl Sections {
    /// The body of `section`, if its header was present.
    #[must_use]
    pub fn get(&self, section: Section) -> Option<&SectionBody> {
        self.bodies.get(&section)
    }

    /// Present sections in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &SectionBody)> {
        Section::ALL
            .into_iter()
            .filter_map(|section| self.bodies.get(&section).map(|body| (section, body)))
    }
}

enum Target {
    Preamble,
    Known(Section),
    Ignored,
}

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^\s*\[\s*([A-Za-z0-9_.\-]+)\s*\]\s*(?:#.*)?$").unwrap()
    })
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Strips a leading byte-order mark and normalizes CRLF and lone CR to LF.
#[must_use]
pub fn normalize(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Shortens a line for inclusion in an error message.
pub(crate) fn snippet(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() > MAX_SNIPPET_CHARS {
        let mut short: String = trimmed.chars().take(MAX_SNIPPET_CHARS).collect();
        short.push('…');
        short
    } else {
        trimmed.to_string()
    }
}

/// Splits normalized catalog text into sections.
///
/// # Errors
///
/// Returns every structural problem found: an empty manifest, content before
/// the first header, a repeated section header, or a missing `versions` or
/// `libraries` section.
pub fn extract(text: &str) -> Result<Sections, Vec<CatalogIssue>> {
    if text.lines().all(is_blank_or_comment) {
        return Err(vec![CatalogIssue::EmptyManifest]);
    }

    let mut sections = Sections::default();
    let mut issues = Vec::new();
    let mut target = Target::Preamble;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if let Some(captures) = header_regex().captures(line) {
            let name = &captures[1];
            target = match Section::from_header(name) {
                Some(section) => {
                    if let Some(existing) = sections.bodies.get(&section) {
                        issues.push(CatalogIssue::RepeatedSection {
                            section,
                            first_line: existing.header_line,
                            line: line_no,
                        });
                        Target::Ignored
                    } else {
                        sections.bodies.insert(
                            section,
                            SectionBody {
                                header_line: line_no,
                                first_line: line_no + 1,
                                text: String::new(),
                            },
                        );
                        Target::Known(section)
                    }
                }
                None => {
                    tracing::debug!("ignoring unknown section [{name}] at line {line_no}");
                    sections.unknown.push((name.to_string(), line_no));
                    Target::Ignored
                }
            };
            continue;
        }

        match target {
            Target::Preamble => {
                if !is_blank_or_comment(line) && issues.is_empty() {
                    issues.push(CatalogIssue::Syntax(SyntaxError {
                        line: line_no,
                        message: "entry appears before any section header".to_string(),
                        snippet: snippet(line),
                    }));
                }
            }
            Target::Known(section) => {
                if let Some(body) = sections.bodies.get_mut(&section) {
                    body.text.push_str(line);
                    body.text.push('\n');
                }
            }
            Target::Ignored => {}
        }
    }

    for section in Section::ALL.into_iter().filter(|s| s.is_required()) {
        if !sections.bodies.contains_key(&section) {
            issues.push(CatalogIssue::MissingSection { section });
        }
    }

    if issues.is_empty() { Ok(sections) } else { Err(issues) }
}
