use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for parsing a .partner file
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Print the full parse result as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short = 'p', long, requires = "json")]
    pub pretty: bool,
}

/// Arguments for applying parsed fields into typed buckets
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Raw keys to apply, comma-separated (default: every field)
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Skip fields whose key matched no known field
    #[arg(long)]
    pub recognized_only: bool,

    /// Apply even when the file has format errors
    #[arg(long)]
    pub allow_errors: bool,

    /// Pretty-print JSON output
    #[arg(short = 'p', long)]
    pub pretty: bool,
}

/// Arguments for serializing buckets to a .partner file
#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// JSON input with partner/auth/customFields objects (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file; the configured extension is added if missing (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Text for the "# Source:" header (overrides configuration)
    #[arg(long)]
    pub source: Option<String>,

    /// Date for the "# Generated:" header, YYYY-MM-DD (default: today)
    #[arg(long, value_name = "DATE")]
    pub date: Option<chrono::NaiveDate>,
}

/// Arguments for listing the alias table
#[derive(Args, Debug)]
pub struct AliasesArgs {
    /// Show only this canonical field, or the field this spelling resolves to
    pub field: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for showing configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a .partner file and report fields, errors and warnings
    Parse(ParseArgs),
    /// Parse a .partner file and print the typed buckets as JSON
    Apply(ApplyArgs),
    /// Write JSON buckets out as a .partner file
    Serialize(SerializeArgs),
    /// List accepted field spellings
    Aliases(AliasesArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}
