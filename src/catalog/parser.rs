//! Structural parser for the body of a single catalog section.
//!
//! Understands the subset of TOML that version catalogs use: `key = value`
//! lines where the value is a string, an array of strings, or an inline
//! table (which may span several lines and may nest). Keys may be bare,
//! quoted, or dotted (`version.ref`). Nothing here knows what a library or a
//! plugin is; that happens in [`super::model`].

use super::issue::SyntaxError;
use super::sections::{SectionBody, snippet};
use crate::constants::MAX_NESTING_DEPTH;

/// A parsed value, before any catalog semantics are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// `"text"` or `'text'`
    Str(String),
    /// `[ "a", "b" ]`
    Array(Vec<String>),
    /// `{ key = value, ... }`, in source order
    Table(Vec<(String, RawValue)>),
}

/// One `key = value` pair and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub value: RawValue,
    pub line: usize,
}

/// Parses a section body into its entries, in source order.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] encountered: unbalanced or unterminated
/// brackets, unterminated strings, unsupported escapes or values, and
/// malformed `=` separators.
pub fn parse_section(body: &SectionBody) -> Result<Vec<RawEntry>, SyntaxError> {
    parse_entries(&body.text, body.first_line)
}

/// Parses `text` whose first line is line `first_line` of the file.
///
/// # Errors
///
/// See [`parse_section`].
pub fn parse_entries(text: &str, first_line: usize) -> Result<Vec<RawEntry>, SyntaxError> {
    Parser::new(text, first_line).entries()
}

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    first_line: usize,
    lines: Vec<&'a str>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, first_line: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: first_line,
            first_line,
            lines: text.lines().collect(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error_at(&self, line: usize, message: impl Into<String>) -> SyntaxError {
        let text = line
            .checked_sub(self.first_line)
            .and_then(|index| self.lines.get(index))
            .or_else(|| self.lines.last())
            .copied()
            .unwrap_or_default();
        SyntaxError { line, message: message.into(), snippet: snippet(text) }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        self.error_at(self.line, message)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    fn skip_comment(&mut self) {
        if self.peek() == Some('#') {
            while matches!(self.peek(), Some(c) if c != '\n') {
                self.bump();
            }
        }
    }

    /// Whitespace, newlines and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_ws();
            self.skip_comment();
            if self.peek() == Some('\n') {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn entries(mut self) -> Result<Vec<RawEntry>, SyntaxError> {
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            let Some(c) = self.peek() else { break };
            if matches!(c, ']' | '}') {
                return Err(self.error(format!("unbalanced '{c}' without a matching opening bracket")));
            }

            let line = self.line;
            let key = self.key()?;
            self.separator(&key)?;
            let value = self.value(0)?;
            self.end_of_line()?;
            entries.push(RawEntry { key, value, line });
        }
        Ok(entries)
    }

    fn key(&mut self) -> Result<String, SyntaxError> {
        let mut parts = vec![self.key_part()?];
        loop {
            self.skip_ws();
            if self.peek() != Some('.') {
                break;
            }
            self.bump();
            self.skip_ws();
            parts.push(self.key_part()?);
        }
        Ok(parts.join("."))
    }

    fn key_part(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Some('"' | '\'') => self.string(),
            Some(c) if is_bare_key_char(c) => {
                let mut part = String::new();
                while let Some(c) = self.peek().filter(|c| is_bare_key_char(*c)) {
                    part.push(c);
                    self.bump();
                }
                Ok(part)
            }
            None | Some('\n') => Err(self.error("expected a key")),
            Some(c) => Err(self.error(format!("unexpected '{c}' where a key was expected"))),
        }
    }

    fn separator(&mut self, key: &str) -> Result<(), SyntaxError> {
        self.skip_ws();
        match self.peek() {
            Some('=') => {
                self.bump();
                self.skip_ws();
                if self.peek() == Some('=') {
                    return Err(self.error(format!("malformed separator '==' after key '{key}'")));
                }
                Ok(())
            }
            None | Some('\n' | '#') => Err(self.error(format!("expected '=' after key '{key}'"))),
            Some(c) => Err(self.error(format!("expected '=' after key '{key}', found '{c}'"))),
        }
    }

    fn value(&mut self, depth: usize) -> Result<RawValue, SyntaxError> {
        match self.peek() {
            Some('"' | '\'') => Ok(RawValue::Str(self.string()?)),
            Some('[') => self.array(),
            Some('{') => self.table(depth + 1),
            None | Some('\n' | '#') => Err(self.error("missing value after '='")),
            Some(c @ (']' | '}')) => {
                Err(self.error(format!("unbalanced '{c}' without a matching opening bracket")))
            }
            Some(_) => Err(self.error(
                "unsupported value; only strings, arrays of strings and inline tables are allowed",
            )),
        }
    }

    fn end_of_line(&mut self) -> Result<(), SyntaxError> {
        self.skip_ws();
        self.skip_comment();
        match self.peek() {
            None | Some('\n') => Ok(()),
            Some(c @ (']' | '}')) => {
                Err(self.error(format!("unbalanced '{c}' without a matching opening bracket")))
            }
            Some(c) => Err(self.error(format!("unexpected '{c}' after value"))),
        }
    }

    fn string(&mut self) -> Result<String, SyntaxError> {
        let start_line = self.line;
        let Some(quote) = self.bump() else {
            return Err(self.error("expected a string"));
        };
        let mut out = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error_at(start_line, "unterminated string")),
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(out);
                }
                Some('\\') if quote == '"' => {
                    self.bump();
                    match self.peek() {
                        Some('"') => out.push('"'),
                        Some('\\') => out.push('\\'),
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        None | Some('\n') => {
                            return Err(self.error_at(start_line, "unterminated string"));
                        }
                        Some(other) => {
                            return Err(
                                self.error(format!("unsupported escape sequence '\\{other}'"))
                            );
                        }
                    }
                    self.bump();
                }
                Some(c) => {
                    out.push(c);
                    self.bump();
                }
            }
        }
    }

    fn array(&mut self) -> Result<RawValue, SyntaxError> {
        let open_line = self.line;
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.error_at(open_line, "unterminated array: missing ']'")),
                Some(']') => {
                    self.bump();
                    return Ok(RawValue::Array(items));
                }
                Some('"' | '\'') => {
                    items.push(self.string()?);
                    self.skip_trivia();
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some(']') => {}
                        None => {
                            return Err(self.error_at(open_line, "unterminated array: missing ']'"));
                        }
                        Some(c) => {
                            return Err(self.error(format!(
                                "unterminated array opened at line {open_line}: expected ',' or ']', found '{c}'"
                            )));
                        }
                    }
                }
                Some(',') => return Err(self.error("unexpected ',' in array")),
                Some('}') => {
                    return Err(self.error("unbalanced '}' without a matching opening bracket"));
                }
                Some(c) => {
                    return Err(self.error(format!(
                        "unsupported array element starting with '{c}'; only strings are allowed"
                    )));
                }
            }
        }
    }

    fn table(&mut self, depth: usize) -> Result<RawValue, SyntaxError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.error("inline tables nested too deeply"));
        }
        let open_line = self.line;
        self.bump();
        let mut pairs: Vec<(String, RawValue)> = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    return Err(self.error_at(open_line, "unterminated inline table: missing '}'"));
                }
                Some('}') => {
                    self.bump();
                    return Ok(RawValue::Table(pairs));
                }
                Some(',') => return Err(self.error("unexpected ',' in inline table")),
                Some(']') => {
                    return Err(self.error("unbalanced ']' without a matching opening bracket"));
                }
                Some(_) => {
                    let key = self.key()?;
                    self.separator(&key)?;
                    let value = self.value(depth)?;
                    if pairs.iter().any(|(existing, _)| *existing == key) {
                        return Err(
                            self.error(format!("duplicate attribute '{key}' in inline table"))
                        );
                    }
                    pairs.push((key, value));

                    self.skip_trivia();
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some('}') => {}
                        None => {
                            return Err(
                                self.error_at(open_line, "unterminated inline table: missing '}'")
                            );
                        }
                        Some(c) => {
                            return Err(self.error(format!(
                                "unterminated inline table opened at line {open_line}: expected ',' or '}}', found '{c}'"
                            )));
                        }
                    }
                }
            }
        }
    }
}
