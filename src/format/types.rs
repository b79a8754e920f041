use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Namespace a field belongs to, determined by its key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Bare keys: the partner profile
    Partner,
    /// `auth.` / `auth_` keys: the login account
    Auth,
    /// `cf.` / `custom.` / `custom_field.` keys, and unrecognized bare keys
    Custom,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Partner => "partner",
            Section::Auth => "auth",
            Section::Custom => "custom",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded data line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedField {
    /// Key as written in the file, without the `__` suffix
    pub raw_key: String,
    /// Canonical name, or the unprefixed raw key when no alias matched
    pub canonical_key: String,
    /// Human-readable label derived from the canonical key
    pub display_label: String,
    /// Trimmed raw value
    pub value: String,
    pub section: Section,
    /// Whether the canonical key belongs to the known field set
    pub recognized: bool,
    /// 1-based line number in the source text
    pub line: usize,
}

/// Values of the recognized `# key: value` header comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub version: Option<String>,
    pub generated_at: Option<String>,
    pub source: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.generated_at.is_none() && self.source.is_none()
    }
}

/// Outcome of parsing a whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// True iff `errors` is empty
    pub ok: bool,
    pub fields: Vec<ParsedField>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metadata: Metadata,
}

impl ParseResult {
    /// Fields whose canonical key is in the known set.
    pub fn recognized(&self) -> impl Iterator<Item = &ParsedField> {
        self.fields.iter().filter(|f| f.recognized)
    }

    /// Fields kept under their own name.
    pub fn unrecognized(&self) -> impl Iterator<Item = &ParsedField> {
        self.fields.iter().filter(|f| !f.recognized)
    }

    /// Every raw key, for selecting all fields at once.
    pub fn raw_keys(&self) -> HashSet<String> {
        self.fields.iter().map(|f| f.raw_key.clone()).collect()
    }
}

/// A materialized field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppliedValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AppliedValue {
    /// Whether the serializer leaves this value out: null, empty text, zero, `false`.
    pub fn is_blank(&self) -> bool {
        match self {
            AppliedValue::Null => true,
            AppliedValue::Bool(b) => !b,
            AppliedValue::Number(n) => *n == 0.0 || n.is_nan(),
            AppliedValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for AppliedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedValue::Null => Ok(()),
            AppliedValue::Bool(b) => write!(f, "{}", b),
            AppliedValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            AppliedValue::Number(n) => write!(f, "{}", n),
            AppliedValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AppliedValue {
    fn from(s: &str) -> Self {
        AppliedValue::Text(s.to_string())
    }
}

impl From<String> for AppliedValue {
    fn from(s: String) -> Self {
        AppliedValue::Text(s)
    }
}

impl From<f64> for AppliedValue {
    fn from(n: f64) -> Self {
        AppliedValue::Number(n)
    }
}

impl From<bool> for AppliedValue {
    fn from(b: bool) -> Self {
        AppliedValue::Bool(b)
    }
}

/// Selected fields sorted into typed buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedResult {
    #[serde(default)]
    pub partner: BTreeMap<String, AppliedValue>,
    #[serde(default)]
    pub auth: BTreeMap<String, AppliedValue>,
    #[serde(default, alias = "custom_fields")]
    pub custom_fields: BTreeMap<String, String>,
}

impl AppliedResult {
    pub fn is_empty(&self) -> bool {
        self.partner.is_empty() && self.auth.is_empty() && self.custom_fields.is_empty()
    }
}

/// Errors raised at the I/O and configuration edges.
///
/// Malformed file content never produces one of these; it is reported through
/// [`ParseResult::errors`] and [`ParseResult::warnings`].
#[derive(Debug, thiserror::Error)]
pub enum PartnerFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
