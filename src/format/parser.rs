//! Line parser for `.partner` files.
//!
//! # Format
//!
//! ```text
//! # Partner Import File
//! # Version: 1.0
//! # Generated: 2024-05-01
//! # Source: ERP Dashboard
//!
//! name__:Supermarché Atlas;
//! auth.name__:Mohamed;
//! cf.partner_rib__:MA0123456789012345678;
//! ```
//!
//! Each line is blank, a `#` comment, or a `key__:value;` data line. The `__`
//! before the colon and the `;` terminator are both optional. Problems are
//! collected per line; a bad line never stops the parse.

use crate::core::aliases::AliasTable;
use crate::format::resolver::resolve_field;
use crate::format::types::{Metadata, ParseResult};

/// Comment character
pub const COMMENT: char = '#';
/// Optional suffix between key and colon
pub const KEY_SUFFIX: &str = "__";
/// Key/value separator
pub const SEPARATOR: char = ':';
/// Optional value terminator
pub const TERMINATOR: char = ';';

/// Characters of an invalid line quoted in its error message.
const ERROR_EXCERPT_CHARS: usize = 60;

/// Structural class of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// Comment body, `#` and surrounding whitespace removed
    Comment(&'a str),
    /// A data line; `value` is trimmed and may be empty
    Data { key: &'a str, value: &'a str },
    Invalid,
}

/// Classifies one line of input.
///
/// The key runs up to the first `:`, must be non-empty and may not contain
/// whitespace. A trailing `__` is dropped from the key unless nothing would
/// remain. Everything after the first `:` is the value; trailing whitespace and
/// one trailing `;` are removed, then the value is trimmed. Values may contain
/// `:` and inner `;`.
pub fn tokenize_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(body) = line.strip_prefix(COMMENT) {
        return Line::Comment(body.trim());
    }

    let Some((key_part, rest)) = line.split_once(SEPARATOR) else {
        return Line::Invalid;
    };
    if key_part.is_empty() || key_part.chars().any(char::is_whitespace) {
        return Line::Invalid;
    }

    let key = match key_part.strip_suffix(KEY_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => key_part,
    };

    let rest = rest.trim_end();
    let value = rest.strip_suffix(TERMINATOR).unwrap_or(rest).trim();

    Line::Data { key, value }
}

/// Recognized metadata directive in a comment body, e.g. `Version: 1.0`.
fn parse_directive(body: &str) -> Option<(Directive, &str)> {
    let (name, value) = body.split_once(':')?;
    let directive = match name.trim().to_ascii_lowercase().as_str() {
        "version" => Directive::Version,
        "generated" => Directive::Generated,
        "source" => Directive::Source,
        _ => return None,
    };
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((directive, value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Version,
    Generated,
    Source,
}

impl Metadata {
    fn record(&mut self, directive: Directive, value: &str) {
        let slot = match directive {
            Directive::Version => &mut self.version,
            Directive::Generated => &mut self.generated_at,
            Directive::Source => &mut self.source,
        };
        *slot = Some(value.to_string());
    }
}

/// Parser bound to an alias table.
#[derive(Debug, Clone, Copy)]
pub struct PartnerParser<'t> {
    table: &'t AliasTable,
}

impl Default for PartnerParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl PartnerParser<'static> {
    /// A parser using the built-in alias table.
    pub fn new() -> Self {
        Self {
            table: AliasTable::builtin(),
        }
    }
}

impl<'t> PartnerParser<'t> {
    /// A parser using a caller-supplied alias table.
    pub fn with_table(table: &'t AliasTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t AliasTable {
        self.table
    }

    /// Parses the decoded text of a `.partner` file.
    pub fn parse(&self, content: &str) -> ParseResult {
        let mut result = ParseResult::default();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            match tokenize_line(raw_line) {
                Line::Blank => {}
                Line::Comment(body) => {
                    if let Some((directive, value)) = parse_directive(body) {
                        result.metadata.record(directive, value);
                    }
                }
                Line::Invalid => {
                    let excerpt: String = raw_line.trim().chars().take(ERROR_EXCERPT_CHARS).collect();
                    result
                        .errors
                        .push(format!("Line {}: invalid format — '{}'", line_no, excerpt));
                }
                Line::Data { key, value } if value.is_empty() => {
                    result
                        .warnings
                        .push(format!("Line {}: '{}' ignored (empty value)", line_no, key));
                }
                Line::Data { key, value } => {
                    result.fields.push(resolve_field(self.table, key, value, line_no));
                }
            }
        }

        result.ok = result.errors.is_empty();

        tracing::debug!(
            fields = result.fields.len(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "parsed partner file"
        );

        result
    }
}
