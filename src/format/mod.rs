pub mod applicator;
pub mod parser;
pub mod resolver;
pub mod serializer;
pub mod types;

#[cfg(test)]
mod edge_cases;

pub use applicator::{apply_parsed_fields, coerce, parse_flag, parse_number};
pub use parser::{Line, PartnerParser, tokenize_line};
pub use resolver::{display_label, resolve_field};
pub use serializer::{PartnerSerializer, serialize_to_partner_file};
pub use types::{
    AppliedResult, AppliedValue, Metadata, ParseResult, ParsedField, PartnerFileError, Section,
};

/// Parses `.partner` text with the built-in alias table.
///
/// Never fails: per-line problems are reported in the result.
///
/// # Example
///
/// ```
/// use partner_file::parse_partner_file;
///
/// let result = parse_partner_file("name__:Atlas SARL;\nbroken line\n");
/// assert!(!result.ok);
/// assert_eq!(result.fields.len(), 1);
/// assert_eq!(result.fields[0].canonical_key, "name");
/// assert_eq!(result.errors.len(), 1);
/// ```
pub fn parse_partner_file(content: &str) -> ParseResult {
    PartnerParser::new().parse(content)
}
