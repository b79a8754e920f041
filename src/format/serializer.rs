//! Writes typed buckets back out as `.partner` text.

use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

use crate::core::config::{DEFAULT_SOURCE, Settings};
use crate::format::parser::{COMMENT, KEY_SUFFIX, SEPARATOR, TERMINATOR};
use crate::format::types::{AppliedResult, AppliedValue};

/// Format version written to the header.
pub const FORMAT_VERSION: &str = "1.0";

/// First header line.
pub const FILE_TITLE: &str = "Partner Import File";

/// Partner fields written by the serializer, grouped by section in output order.
///
/// Only these canonical keys are written from the partner bucket; other keys
/// the alias table knows are parsed but never written back.
pub const PARTNER_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Identity",
        &["name", "code", "partner_type", "legal_form", "category", "status"],
    ),
    ("Contact", &["email", "phone", "mobile", "fax", "website"]),
    (
        "Address",
        &["street", "street2", "city", "zip", "state", "country", "geo_lat", "geo_lng"],
    ),
    (
        "Commercial",
        &[
            "credit_limit",
            "price_list_id",
            "payment_term_id",
            "discount_rate",
            "discount_amount",
            "min_order_amount",
            "risk_score",
            "salesperson_id",
            "allow_show_on_pos",
        ],
    ),
    ("Fiscal", &["ice", "rc", "if_number", "patente", "cnss", "tax_exempt"]),
    (
        "Delivery",
        &["delivery_address", "delivery_zone", "delivery_instructions"],
    ),
];

const AUTH_SECTION: &str = "Account";
const CUSTOM_SECTION: &str = "Custom fields";
const AUTH_PREFIX: &str = "auth.";
const CUSTOM_PREFIX: &str = "cf.";

/// Serializer for `.partner` text.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use partner_file::{AppliedResult, AppliedValue, PartnerSerializer};
///
/// let mut applied = AppliedResult::default();
/// applied.partner.insert("name".into(), AppliedValue::from("Atlas"));
///
/// let text = PartnerSerializer::new()
///     .generated_on(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
///     .serialize(&applied);
///
/// assert!(text.contains("# Generated: 2024-05-01"));
/// assert!(text.contains("name__:Atlas;"));
/// ```
#[derive(Debug, Clone)]
pub struct PartnerSerializer {
    generated_on: Option<NaiveDate>,
    source: String,
}

impl Default for PartnerSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartnerSerializer {
    /// A serializer stamping today's local date and the default source.
    pub fn new() -> Self {
        Self {
            generated_on: None,
            source: DEFAULT_SOURCE.to_string(),
        }
    }

    /// A serializer using the configured source.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().source(settings.source.clone())
    }

    /// Fixes the `# Generated:` date.
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// Sets the `# Source:` text.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = single_line(&source.into());
        self
    }

    pub fn serialize(&self, applied: &AppliedResult) -> String {
        self.serialize_buckets(&applied.partner, &applied.auth, &applied.custom_fields)
    }

    /// Serializes the three buckets.
    ///
    /// Blank values (null, empty, zero, `false`) are left out, and a section
    /// with nothing to write is left out entirely.
    pub fn serialize_buckets(
        &self,
        partner: &BTreeMap<String, AppliedValue>,
        auth: &BTreeMap<String, AppliedValue>,
        custom: &BTreeMap<String, String>,
    ) -> String {
        let date = self.generated_on.unwrap_or_else(|| Local::now().date_naive());

        let mut lines = vec![
            format!("{} {}", COMMENT, FILE_TITLE),
            format!("{} Version: {}", COMMENT, FORMAT_VERSION),
            format!("{} Generated: {}", COMMENT, date.format("%Y-%m-%d")),
            format!("{} Source: {}", COMMENT, self.source),
            String::new(),
        ];

        for (title, keys) in PARTNER_SECTIONS {
            let entries = keys
                .iter()
                .filter_map(|key| partner.get(*key).map(|value| (key.to_string(), value)));
            push_section(&mut lines, title, entries);
        }

        let auth_entries = auth
            .iter()
            .map(|(key, value)| (format!("{}{}", AUTH_PREFIX, key), value));
        push_section(&mut lines, AUTH_SECTION, auth_entries);

        let custom_values: Vec<(String, AppliedValue)> = custom
            .iter()
            .map(|(key, value)| (format!("{}{}", CUSTOM_PREFIX, key), AppliedValue::from(value.as_str())))
            .collect();
        push_section(
            &mut lines,
            CUSTOM_SECTION,
            custom_values.iter().map(|(key, value)| (key.clone(), value)),
        );

        lines.join("\n")
    }
}

fn push_section<'a, I>(lines: &mut Vec<String>, title: &str, entries: I)
where
    I: Iterator<Item = (String, &'a AppliedValue)>,
{
    let body: Vec<String> = entries
        .filter(|(_, value)| !value.is_blank())
        .filter(|(key, _)| {
            let writable = is_writable_key(key);
            if !writable {
                tracing::warn!(key = %key, "skipping key that cannot be written to a .partner line");
            }
            writable
        })
        .map(|(key, value)| {
            format!(
                "{}{}{}{}{}",
                key,
                KEY_SUFFIX,
                SEPARATOR,
                single_line(&value.to_string()),
                TERMINATOR
            )
        })
        .collect();

    if body.is_empty() {
        return;
    }

    lines.push(format!("{} --- {} ---", COMMENT, title));
    lines.extend(body);
    lines.push(String::new());
}

/// A key survives a round trip only without whitespace or `:`.
fn is_writable_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(|c| c.is_whitespace() || c == SEPARATOR)
}

/// Collapses line breaks to single spaces so a value stays on one line.
fn single_line(value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Serializes buckets with today's date and the default source.
pub fn serialize_to_partner_file(
    partner: &BTreeMap<String, AppliedValue>,
    auth: &BTreeMap<String, AppliedValue>,
    custom: &BTreeMap<String, String>,
) -> String {
    PartnerSerializer::new().serialize_buckets(partner, auth, custom)
}
