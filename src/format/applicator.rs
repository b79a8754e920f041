//! Materializes selected parsed fields into typed buckets.

use std::collections::HashSet;

use crate::format::resolver::strip_custom_prefix;
use crate::format::types::{AppliedResult, AppliedValue, ParsedField, Section};

/// Canonical keys coerced to numbers. Unparseable values become `0`.
pub const NUMERIC_FIELDS: &[&str] = &[
    "credit_limit",
    "price_list_id",
    "payment_term_id",
    "discount_rate",
    "max_discount_rate",
    "discount_amount",
    "max_discount_amount",
    "min_order_amount",
    "risk_score",
    "salesperson_id",
    "parent_partner_id",
    "geo_lat",
    "geo_lng",
];

/// Canonical keys coerced to booleans.
pub const BOOLEAN_FIELDS: &[&str] = &["tax_exempt", "allow_show_on_pos", "auth.is_active"];

/// Lowercased spellings read as `true`. Anything else is `false`.
const TRUTHY: &[&str] = &["true", "1", "oui", "yes"];

/// Reads the longest leading decimal number of `raw`, ignoring leading
/// whitespace. Returns `0` when there is none.
///
/// ```
/// use partner_file::parse_number;
///
/// assert_eq!(parse_number("50000"), 50000.0);
/// assert_eq!(parse_number(" 12.5 MAD"), 12.5);
/// assert_eq!(parse_number("1e3"), 1000.0);
/// assert_eq!(parse_number("abc"), 0.0);
/// ```
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => 0.0,
    }
}

/// Reads a boolean flag: true iff the lowercased value is a truthy spelling.
pub fn parse_flag(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    TRUTHY.contains(&lowered.as_str())
}

/// Coerces a raw value according to its canonical key.
pub fn coerce(canonical_key: &str, raw: &str) -> AppliedValue {
    if NUMERIC_FIELDS.contains(&canonical_key) {
        AppliedValue::Number(parse_number(raw))
    } else if BOOLEAN_FIELDS.contains(&canonical_key) {
        AppliedValue::Bool(parse_flag(raw))
    } else {
        AppliedValue::Text(raw.to_string())
    }
}

/// Applies the fields whose raw key is in `selected`.
///
/// Unselected fields and selections naming no field are ignored. When several
/// fields land on the same bucket key, the later one wins.
pub fn apply_parsed_fields<S>(fields: &[ParsedField], selected: &HashSet<S>) -> AppliedResult
where
    S: std::borrow::Borrow<str> + std::hash::Hash + Eq,
{
    let mut result = AppliedResult::default();

    for field in fields.iter().filter(|f| selected.contains(f.raw_key.as_str())) {
        let value = coerce(&field.canonical_key, &field.value);

        match field.section {
            Section::Auth => {
                let key = field
                    .canonical_key
                    .strip_prefix("auth.")
                    .unwrap_or(&field.canonical_key);
                result.auth.insert(key.to_string(), value);
            }
            Section::Custom => {
                let key = strip_custom_prefix(&field.canonical_key);
                result.custom_fields.insert(key.to_string(), value.to_string());
            }
            Section::Partner => {
                result.partner.insert(field.canonical_key.clone(), value);
            }
        }
    }

    tracing::debug!(
        partner = result.partner.len(),
        auth = result.auth.len(),
        custom = result.custom_fields.len(),
        "applied parsed fields"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parser::PartnerParser;

    fn apply_all(content: &str) -> AppliedResult {
        let parsed = PartnerParser::new().parse(content);
        apply_parsed_fields(&parsed.fields, &parsed.raw_keys())
    }

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("-3.25"), -3.25);
        assert_eq!(parse_number("+7"), 7.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number("12,5"), 12.0);
        assert_eq!(parse_number("1e"), 1.0);
        assert_eq!(parse_number("2E-2"), 0.02);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_number_failures_are_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
    }

    #[test]
    fn test_parse_flag() {
        for truthy in ["true", "TRUE", "1", "oui", "OUI", "Yes"] {
            assert!(parse_flag(truthy), "{} should be true", truthy);
        }
        for falsy in ["false", "0", "non", "nope", "y", ""] {
            assert!(!parse_flag(falsy), "{} should be false", falsy);
        }
    }

    #[test]
    fn test_numeric_coercion_default() {
        let applied = apply_all("credit_limit__:abc;");
        assert_eq!(applied.partner["credit_limit"], AppliedValue::Number(0.0));
    }

    #[test]
    fn test_boolean_coercion() {
        let applied = apply_all("tax_exempt__:OUI;");
        assert_eq!(applied.partner["tax_exempt"], AppliedValue::Bool(true));

        let applied = apply_all("tax_exempt__:nope;");
        assert_eq!(applied.partner["tax_exempt"], AppliedValue::Bool(false));
    }

    #[test]
    fn test_text_passthrough() {
        let applied = apply_all("phone__: +212 600 000 001 ;");
        assert_eq!(applied.partner["phone"], AppliedValue::from("+212 600 000 001"));
    }

    #[test]
    fn test_routing() {
        let applied = apply_all("auth.name__:Jean;\ncf.custom_x__:5;\nloyalty__:gold;");
        assert_eq!(applied.auth["name"], AppliedValue::from("Jean"));
        assert_eq!(applied.custom_fields["custom_x"], "5");
        assert_eq!(applied.custom_fields["loyalty"], "gold");
        assert!(applied.partner.is_empty());
    }

    #[test]
    fn test_auth_flag_coerced() {
        let applied = apply_all("auth.actif__:yes;");
        assert_eq!(applied.auth["is_active"], AppliedValue::Bool(true));
    }

    #[test]
    fn test_custom_coerced_values_are_stringified() {
        let applied = apply_all("cf.plafond__:1500.50;\ncf.exonere__:oui;");
        assert_eq!(applied.custom_fields["credit_limit"], "1500.5");
        assert_eq!(applied.custom_fields["tax_exempt"], "true");
    }

    #[test]
    fn test_only_selected_fields_are_applied() {
        let parsed = PartnerParser::new().parse("name__:Atlas;\ncity__:Rabat;\nzip__:10000;");
        let selected: HashSet<&str> = ["city", "not_in_file"].into_iter().collect();
        let applied = apply_parsed_fields(&parsed.fields, &selected);

        assert_eq!(applied.partner.len(), 1);
        assert_eq!(applied.partner["city"], AppliedValue::from("Rabat"));
    }

    #[test]
    fn test_empty_selection() {
        let parsed = PartnerParser::new().parse("name__:Atlas;");
        let selected: HashSet<String> = HashSet::new();
        assert!(apply_parsed_fields(&parsed.fields, &selected).is_empty());
    }

    #[test]
    fn test_selection_uses_raw_key() {
        let parsed = PartnerParser::new().parse("ville__:Rabat;");
        let by_canonical: HashSet<&str> = ["city"].into_iter().collect();
        assert!(apply_parsed_fields(&parsed.fields, &by_canonical).is_empty());

        let by_raw: HashSet<&str> = ["ville"].into_iter().collect();
        let applied = apply_parsed_fields(&parsed.fields, &by_raw);
        assert_eq!(applied.partner["city"], AppliedValue::from("Rabat"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let applied = apply_all("city__:Rabat;\nville__:Fes;");
        assert_eq!(applied.partner["city"], AppliedValue::from("Fes"));
    }
}
