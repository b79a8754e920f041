//! Section routing and canonical naming of raw keys.

use crate::core::aliases::AliasTable;
use crate::format::types::{ParsedField, Section};

/// Key prefixes routing a field into the account section. Kept on the lookup
/// key: account aliases include their prefix.
pub const AUTH_PREFIXES: [&str; 2] = ["auth.", "auth_"];

/// Key prefixes routing a field into the custom section. Stripped before lookup.
pub const CUSTOM_PREFIXES: [&str; 3] = ["cf.", "custom.", "custom_field."];

/// Label prefix replacing `auth.` in display labels.
const ACCOUNT_LABEL: &str = "Account — ";

/// Classifies a raw key into its section and lookup key.
fn split_section(raw_key: &str) -> (Section, &str) {
    if starts_with_ignore_case(raw_key, &AUTH_PREFIXES).is_some() {
        return (Section::Auth, raw_key);
    }
    if let Some(prefix) = starts_with_ignore_case(raw_key, &CUSTOM_PREFIXES) {
        return (Section::Custom, &raw_key[prefix.len()..]);
    }
    (Section::Partner, raw_key)
}

fn starts_with_ignore_case<'p>(key: &str, prefixes: &[&'p str]) -> Option<&'p str> {
    prefixes.iter().copied().find(|prefix| {
        key.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Strips one custom-section prefix, if present.
pub fn strip_custom_prefix(key: &str) -> &str {
    match starts_with_ignore_case(key, &CUSTOM_PREFIXES) {
        Some(prefix) => &key[prefix.len()..],
        None => key,
    }
}

/// Derives a display label: `auth.` becomes `Account — `, underscores become
/// spaces, and each word is capitalized.
///
/// ```
/// use partner_file::display_label;
///
/// assert_eq!(display_label("credit_limit"), "Credit Limit");
/// assert_eq!(display_label("auth.is_active"), "Account — Is Active");
/// ```
pub fn display_label(canonical_key: &str) -> String {
    let (head, rest) = match canonical_key.strip_prefix("auth.") {
        Some(rest) => (ACCOUNT_LABEL, rest),
        None => ("", canonical_key),
    };

    let words: Vec<String> = rest
        .replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect();

    format!("{}{}", head, words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves one `(key, value)` pair into a [`ParsedField`].
///
/// Unknown keys pass through verbatim as their own canonical key. A bare key
/// that does not resolve to a known field is routed to the custom section.
pub fn resolve_field(table: &AliasTable, raw_key: &str, value: &str, line: usize) -> ParsedField {
    let (mut section, lookup_key) = split_section(raw_key);

    let canonical_key = table
        .resolve(lookup_key)
        .map(str::to_string)
        .unwrap_or_else(|| lookup_key.to_string());
    let recognized = table.is_known(&canonical_key);

    if section == Section::Partner && !recognized {
        section = Section::Custom;
    }

    tracing::trace!(
        line,
        raw_key,
        canonical_key = %canonical_key,
        section = %section,
        recognized,
        "resolved field"
    );

    ParsedField {
        raw_key: raw_key.to_string(),
        display_label: display_label(&canonical_key),
        canonical_key,
        value: value.to_string(),
        section,
        recognized,
        line,
    }
}
