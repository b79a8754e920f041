use partner_file::{PartnerConfig, decode_partner_bytes, write_partner_file};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::cli::global::GlobalArgs;

/// Loads the effective configuration, honouring `--config`.
///
/// An explicit `--config` path must exist; the default locations are optional.
pub fn load_config(global: &GlobalArgs) -> Result<PartnerConfig, Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) => {
            let expanded = expand_path(path);
            if !expanded.exists() {
                return Err(format!("Config file '{}' not found", expanded.display()).into());
            }
            let content = fs::read_to_string(&expanded)?;
            let mut config = PartnerConfig::load_user();
            config.merge_toml(&content)?;
            Ok(config)
        }
        None => Ok(PartnerConfig::load_with_overrides(None)),
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Reads UTF-8 input from a file or stdin, enforcing `--max-size`.
pub fn read_input(
    file: Option<&PathBuf>,
    global: &GlobalArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = if let Some(file_path) = file {
        if global.max_size > 0 {
            let file_size = fs::metadata(file_path)?.len() as usize;
            check_size(file_size, global)?;
        }
        fs::read(file_path)?
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        if global.max_size > 0 {
            check_size(buffer.len(), global)?;
        }
        buffer
    };

    Ok(decode_partner_bytes(bytes)?)
}

fn check_size(size: usize, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    if size <= global.max_size {
        return Ok(());
    }
    if global.force {
        tracing::warn!(
            size,
            limit = global.max_size,
            "processing input larger than --max-size"
        );
        return Ok(());
    }
    Err(format!(
        "Input size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
        size, global.max_size
    )
    .into())
}

/// Writes to `output` (with the configured extension) or to stdout.
pub fn write_output(
    content: &str,
    output: Option<&PathBuf>,
    extension: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            write_partner_file(path, content, extension)?;
        }
        None => print!("{}", content),
    }
    Ok(())
}
