//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use partner_file::prelude::*;
//!
//! let parsed = parse_partner_file("ville__:Rabat;");
//! let applied = apply_parsed_fields(&parsed.fields, &parsed.raw_keys());
//! assert_eq!(applied.partner["city"], AppliedValue::from("Rabat"));
//! ```

pub use crate::{
    // Tables and config
    AliasTable,
    // Data model
    AppliedResult,
    AppliedValue,
    ParseResult,
    ParsedField,
    PartnerConfig,
    PartnerFileError,
    // Pipeline
    PartnerParser,
    PartnerSerializer,
    Section,
    apply_parsed_fields,
    parse_partner_file,
    serialize_to_partner_file,
};
