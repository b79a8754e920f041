//! File acquisition and delivery for `.partner` documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::format::types::PartnerFileError;

/// Appends `.{extension}` to `path` unless it already ends with it.
///
/// The comparison ignores ASCII case.
///
/// ```
/// use std::path::Path;
/// use partner_file::ensure_extension;
///
/// assert_eq!(ensure_extension(Path::new("atlas"), "partner"), Path::new("atlas.partner"));
/// assert_eq!(ensure_extension(Path::new("atlas.PARTNER"), "partner"), Path::new("atlas.PARTNER"));
/// assert_eq!(ensure_extension(Path::new("atlas.txt"), "partner"), Path::new("atlas.txt.partner"));
/// ```
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

    if has_extension || extension.is_empty() {
        return path.to_path_buf();
    }

    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Reads a file as UTF-8 text.
///
/// A leading byte-order mark is dropped.
pub fn read_partner_file(path: &Path) -> Result<String, PartnerFileError> {
    let bytes = fs::read(path)?;
    decode_partner_bytes(bytes)
}

/// Decodes uploaded bytes as UTF-8 text, dropping a leading byte-order mark.
pub fn decode_partner_bytes(bytes: Vec<u8>) -> Result<String, PartnerFileError> {
    let text = String::from_utf8(bytes).map_err(|e| {
        PartnerFileError::InvalidInput(format!("file is not valid UTF-8: {}", e))
    })?;
    if let Some(stripped) = text.strip_prefix('\u{FEFF}') {
        return Ok(stripped.to_string());
    }
    Ok(text)
}

/// Writes `content` to `path`, adding `.{extension}` when missing.
///
/// Returns the path actually written.
pub fn write_partner_file(
    path: &Path,
    content: &str,
    extension: &str,
) -> Result<PathBuf, PartnerFileError> {
    let target = ensure_extension(path, extension);
    fs::write(&target, content.as_bytes())?;
    tracing::debug!(path = %target.display(), bytes = content.len(), "wrote partner file");
    Ok(target)
}
