//! Edge case tests for the .partner pipeline
//!
//! Covers:
//! - Fault tolerance over mixed valid/invalid lines
//! - Delimiter variants and awkward values
//! - Round trips through serialize → parse → apply, including the lossy cases

use super::*;
use chrono::NaiveDate;
use std::collections::HashSet;

fn serializer() -> PartnerSerializer {
    PartnerSerializer::new().generated_on(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
}

/// Helper: serialize, parse back and apply every field
fn roundtrip(applied: &AppliedResult) -> (ParseResult, AppliedResult) {
    let text = serializer().serialize(applied);
    let parsed = parse_partner_file(&text);
    let reapplied = apply_parsed_fields(&parsed.fields, &parsed.raw_keys());
    (parsed, reapplied)
}

// ============================================================================
// Fault tolerance
// ============================================================================

#[test]
fn test_invalid_lines_do_not_stop_parsing() {
    let content = "\
name__:Atlas;
no colon here
city__:Rabat;
:missing key;
zip__:10000;
also bad
";
    let result = parse_partner_file(content);

    assert_eq!(result.fields.len(), 3);
    assert_eq!(result.errors.len(), 3);
    assert!(result.errors[0].starts_with("Line 2:"));
    assert!(result.errors[1].starts_with("Line 4:"));
    assert!(result.errors[2].starts_with("Line 6:"));

    let keys: Vec<&str> = result.fields.iter().map(|f| f.canonical_key.as_str()).collect();
    assert_eq!(keys, vec!["name", "city", "zip"]);
}

#[test]
fn test_warnings_do_not_affect_ok() {
    let result = parse_partner_file("name__:Atlas;\ncity__:;\nzip__: ;\n");
    assert!(result.ok);
    assert_eq!(result.fields.len(), 1);
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_empty_input() {
    let result = parse_partner_file("");
    assert!(result.ok);
    assert!(result.fields.is_empty());
    assert!(result.metadata.is_empty());
}

#[test]
fn test_only_comments() {
    let result = parse_partner_file("# one\n#two\n   # three\n");
    assert!(result.ok);
    assert!(result.fields.is_empty());
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_unicode_values() {
    let result = parse_partner_file("name__:Supermarché Atlas — Derb Sultan;\ncity__:الدار البيضاء;");
    assert_eq!(result.fields[0].value, "Supermarché Atlas — Derb Sultan");
    assert_eq!(result.fields[1].value, "الدار البيضاء");
}

#[test]
fn test_value_with_hash_is_data() {
    let result = parse_partner_file("street__:Lot #12, Zone industrielle;");
    assert_eq!(result.fields[0].value, "Lot #12, Zone industrielle");
}

#[test]
fn test_key_with_dots_and_underscores() {
    let result = parse_partner_file("cf.erp.legacy_id__:A-77;");
    assert_eq!(result.fields[0].section, Section::Custom);
    assert_eq!(result.fields[0].canonical_key, "erp.legacy_id");
}

#[test]
fn test_mixed_separators_in_one_file() {
    let result = parse_partner_file("name:Atlas\ncity__:Rabat\nzip:10000;");
    assert!(result.ok);
    let values: Vec<&str> = result.fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(values, vec!["Atlas", "Rabat", "10000"]);
}

#[test]
fn test_same_raw_key_twice_selects_both() {
    let parsed = parse_partner_file("city__:Rabat;\ncity__:Fes;");
    let selected: HashSet<&str> = ["city"].into_iter().collect();
    let applied = apply_parsed_fields(&parsed.fields, &selected);
    assert_eq!(applied.partner["city"], AppliedValue::from("Fes"));
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_roundtrip_slotted_fields() {
    let mut applied = AppliedResult::default();
    applied.partner.insert("name".into(), "Atlas SARL".into());
    applied.partner.insert("phone".into(), "+212600000001".into());
    applied.partner.insert("city".into(), "Casablanca".into());
    applied.partner.insert("credit_limit".into(), 50000.0.into());
    applied.partner.insert("geo_lat".into(), 33.5731.into());
    applied.partner.insert("tax_exempt".into(), true.into());
    applied.auth.insert("name".into(), "Mohamed".into());
    applied.auth.insert("email".into(), "admin@atlas.ma".into());
    applied.auth.insert("is_active".into(), true.into());
    applied.custom_fields.insert("partner_rib".into(), "MA0123456789012345678".into());

    let (parsed, reapplied) = roundtrip(&applied);

    assert!(parsed.ok);
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.metadata.version.as_deref(), Some("1.0"));
    assert_eq!(parsed.metadata.generated_at.as_deref(), Some("2024-05-01"));
    assert_eq!(parsed.metadata.source.as_deref(), Some("ERP Dashboard"));
    assert_eq!(reapplied, applied);
}

#[test]
fn test_roundtrip_drops_zero_and_false() {
    // Explicit zero/false and unset look the same after a round trip
    let mut applied = AppliedResult::default();
    applied.partner.insert("name".into(), "Atlas".into());
    applied.partner.insert("credit_limit".into(), 0.0.into());
    applied.partner.insert("allow_show_on_pos".into(), false.into());
    applied.auth.insert("is_active".into(), false.into());

    let (_, reapplied) = roundtrip(&applied);

    assert_eq!(reapplied.partner.len(), 1);
    assert!(!reapplied.partner.contains_key("credit_limit"));
    assert!(!reapplied.partner.contains_key("allow_show_on_pos"));
    assert!(reapplied.auth.is_empty());
}

#[test]
fn test_roundtrip_drops_fields_without_slot() {
    let mut applied = AppliedResult::default();
    applied.partner.insert("name".into(), "Atlas".into());
    applied.partner.insert("language".into(), "fr".into());

    let (_, reapplied) = roundtrip(&applied);
    assert!(!reapplied.partner.contains_key("language"));
}

#[test]
fn test_roundtrip_unknown_auth_key() {
    let mut applied = AppliedResult::default();
    applied.auth.insert("badge_number".into(), "B-7".into());

    let (parsed, reapplied) = roundtrip(&applied);
    assert_eq!(parsed.fields[0].raw_key, "auth.badge_number");
    assert!(!parsed.fields[0].recognized);
    assert_eq!(reapplied.auth["badge_number"], AppliedValue::from("B-7"));
}

#[test]
fn test_roundtrip_custom_key_shadowing_known_field() {
    // A custom key spelled like a known field keeps its custom section
    let mut applied = AppliedResult::default();
    applied.custom_fields.insert("city".into(), "Old Medina".into());

    let (parsed, reapplied) = roundtrip(&applied);
    assert_eq!(parsed.fields[0].section, Section::Custom);
    assert!(parsed.fields[0].recognized);
    assert_eq!(reapplied.custom_fields["city"], "Old Medina");
    assert!(reapplied.partner.is_empty());
}

#[test]
fn test_roundtrip_value_with_trailing_semicolon() {
    let mut applied = AppliedResult::default();
    applied.partner.insert("name".into(), "Atlas;".into());

    let (_, reapplied) = roundtrip(&applied);
    assert_eq!(reapplied.partner["name"], AppliedValue::from("Atlas;"));
}

#[test]
fn test_roundtrip_custom_numbers_stay_strings() {
    let mut applied = AppliedResult::default();
    applied.custom_fields.insert("custom_x".into(), "0".into());
    applied.custom_fields.insert("custom_y".into(), "007".into());

    let (_, reapplied) = roundtrip(&applied);
    assert_eq!(reapplied.custom_fields["custom_x"], "0");
    assert_eq!(reapplied.custom_fields["custom_y"], "007");
}

#[test]
fn test_roundtrip_infinite_numbers() {
    let parsed = parse_partner_file("credit_limit__:Infinity;\ngeo_lng__:-Infinity;\ncf.plafond__:Infinity;");
    let applied = apply_parsed_fields(&parsed.fields, &parsed.raw_keys());
    assert_eq!(applied.partner["credit_limit"], AppliedValue::Number(f64::INFINITY));
    assert_eq!(applied.custom_fields["credit_limit"], "Infinity");

    let text = serializer().serialize(&applied);
    assert!(text.contains("credit_limit__:Infinity;"));
    assert!(text.contains("geo_lng__:-Infinity;"));
    assert!(text.contains("cf.credit_limit__:Infinity;"));

    let (_, reapplied) = roundtrip(&applied);
    assert_eq!(reapplied, applied);
}

// ============================================================================
// Prefix case
// ============================================================================

#[test]
fn test_upper_case_prefixes_route_like_lower_case() {
    let parsed = parse_partner_file("AUTH.Email__:admin@atlas.ma;\nCF.rib__:MA001;\nCustom.Grade__:A;");
    let applied = apply_parsed_fields(&parsed.fields, &parsed.raw_keys());

    assert_eq!(parsed.fields[0].section, Section::Auth);
    assert_eq!(parsed.fields[1].section, Section::Custom);
    assert_eq!(parsed.fields[2].section, Section::Custom);
    assert_eq!(applied.auth["email"], AppliedValue::from("admin@atlas.ma"));
    assert_eq!(applied.custom_fields["rib"], "MA001");
    assert_eq!(applied.custom_fields["Grade"], "A");
    assert!(applied.partner.is_empty());
}
