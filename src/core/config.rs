use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::aliases::AliasTable;
use crate::format::types::PartnerFileError;

/// Default value of the `# Source:` header written by the serializer.
pub const DEFAULT_SOURCE: &str = "ERP Dashboard";

/// File suffix of `.partner` documents.
pub const PARTNER_EXTENSION: &str = "partner";

/// MIME type of `.partner` documents.
pub const PARTNER_MIME: &str = "application/x-partner";

/// Output settings for partner files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Free text written to the `# Source:` header line
    #[serde(default = "default_source")]
    pub source: String,
    /// Suffix enforced on written files (without the leading dot)
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: default_source(),
            extension: default_extension(),
        }
    }
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_extension() -> String {
    PARTNER_EXTENSION.to_string()
}

/// Settings as they appear in an override file: every key optional so a later
/// layer only replaces what it sets.
#[derive(Debug, Default, Deserialize)]
struct SettingsOverride {
    source: Option<String>,
    extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    settings: SettingsOverride,
}

/// Effective configuration: extra field spellings plus output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartnerConfig {
    /// Extra spellings per canonical key, merged into the built-in alias table
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Output settings
    pub settings: Settings,
}

impl PartnerConfig {
    /// Parses a configuration layer from TOML content and applies it over the defaults.
    pub fn from_toml(content: &str) -> Result<Self, PartnerFileError> {
        let mut config = Self::load_default();
        config.merge_toml(content)?;
        Ok(config)
    }

    /// The built-in configuration: no extra aliases, default settings.
    pub fn load_default() -> Self {
        Self::default()
    }

    /// Loads a configuration file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, PartnerFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Layers in priority order:
    /// 1. Built-in defaults
    /// 2. `~/.config/partner-file/config.toml` (user overrides)
    /// 3. `local` if given, else `./partner-file.toml` (project-local overrides)
    ///
    /// A layer that fails to load is logged and skipped.
    pub fn load_with_overrides(local: Option<&Path>) -> Self {
        let mut config = Self::load_user();

        let local_config_path = local.unwrap_or_else(|| Path::new("partner-file.toml"));
        if local_config_path.exists() {
            config.merge_file(local_config_path);
        }

        config
    }

    /// Loads the built-in defaults and the user configuration file, if any.
    pub fn load_user() -> Self {
        let mut config = Self::load_default();

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("partner-file").join("config.toml");
            if user_config_path.exists() {
                config.merge_file(&user_config_path);
            }
        }

        config
    }

    fn merge_file(&mut self, path: &Path) {
        let result = std::fs::read_to_string(path)
            .map_err(PartnerFileError::from)
            .and_then(|content| self.merge_toml(&content));

        match result {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded configuration layer"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load configuration layer"
            ),
        }
    }

    /// Applies a TOML layer: alias lists are extended, settings it sets are replaced.
    pub fn merge_toml(&mut self, content: &str) -> Result<(), PartnerFileError> {
        let layer: ConfigFile = toml::from_str(content)?;

        for (canonical, aliases) in layer.aliases {
            let list = self.aliases.entry(canonical).or_default();
            for alias in aliases {
                if !list.contains(&alias) {
                    list.push(alias);
                }
            }
        }

        if let Some(source) = layer.settings.source {
            self.settings.source = source;
        }
        if let Some(extension) = layer.settings.extension {
            self.settings.extension = extension.trim_start_matches('.').to_string();
        }

        Ok(())
    }

    /// Builds the alias table this configuration describes.
    pub fn alias_table(&self) -> AliasTable {
        AliasTable::builtin().with_extra(&self.aliases)
    }
}
