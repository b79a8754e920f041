//! Reading and writing `.partner` files.
//!
//! A `.partner` file is a line-oriented text format carrying one ERP partner:
//! profile fields, login account fields (`auth.` keys) and free-form custom
//! fields (`cf.` keys). The pipeline is
//!
//! ```text
//! text ─parse─▶ ParseResult.fields ─apply(selected)─▶ AppliedResult ─serialize─▶ text
//! ```
//!
//! Field names are matched through an [`AliasTable`] of accepted spellings, so
//! `ville`, `City` and `city` all land on the canonical `city` field.
//!
//! # Example
//!
//! ```
//! use partner_file::{apply_parsed_fields, parse_partner_file, AppliedValue};
//!
//! let parsed = parse_partner_file("nom__:Atlas;\nplafond__:5000;\ncf.rib__:MA001;");
//! let applied = apply_parsed_fields(&parsed.fields, &parsed.raw_keys());
//!
//! assert_eq!(applied.partner["name"], AppliedValue::from("Atlas"));
//! assert_eq!(applied.partner["credit_limit"], AppliedValue::Number(5000.0));
//! assert_eq!(applied.custom_fields["rib"], "MA001");
//! ```

mod core;
mod delivery;
mod format;
pub mod prelude;

pub use crate::core::aliases::{AliasTable, normalize};
pub use crate::core::config::{DEFAULT_SOURCE, PARTNER_EXTENSION, PARTNER_MIME, PartnerConfig, Settings};
pub use crate::delivery::{decode_partner_bytes, ensure_extension, read_partner_file, write_partner_file};
pub use crate::format::{
    AppliedResult, AppliedValue, Line, Metadata, ParseResult, ParsedField, PartnerFileError,
    PartnerParser, PartnerSerializer, Section, apply_parsed_fields, coerce, display_label,
    parse_flag, parse_number, parse_partner_file, resolve_field, serialize_to_partner_file,
    tokenize_line,
};

/// Field tables behind coercion and serialization.
pub mod fields {
    pub use crate::format::applicator::{BOOLEAN_FIELDS, NUMERIC_FIELDS};
    pub use crate::format::resolver::{AUTH_PREFIXES, CUSTOM_PREFIXES};
    pub use crate::format::serializer::{FILE_TITLE, FORMAT_VERSION, PARTNER_SECTIONS};
}
