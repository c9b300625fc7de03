//! Reading and writing configuration files.
//!
//! YAML is the native format; JSON is accepted for `.json` paths. Decoding
//! keeps `null` values so validation can reject them, and keeps key order.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::value::{display_value, Configuration};

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML, block style.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl ConfigFormat {
    /// Picks the format from the path's extension.
    ///
    /// `.yml`, `.yaml` and no extension map to YAML, `.json` to JSON.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(Self::Yaml),
            Some(ext) => match ext.to_ascii_lowercase().as_str() {
                "yml" | "yaml" => Ok(Self::Yaml),
                "json" => Ok(Self::Json),
                other => Err(ConfigError::UnsupportedFormat(format!(
                    "'.{}' ({}), expected .{} or .{}",
                    other,
                    path.display(),
                    Self::Yaml.extension(),
                    Self::Json.extension()
                ))),
            },
        }
    }

    /// Returns the canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yml",
            Self::Json => "json",
        }
    }

    /// Decodes a configuration from text.
    pub fn decode(&self, text: &str) -> ConfigResult<Configuration> {
        if text.trim().is_empty() {
            return Ok(Configuration::new());
        }
        let document: Value = match self {
            Self::Yaml => serde_yaml::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        into_configuration(document)
    }

    /// Encodes a configuration to text.
    pub fn encode(&self, config: &Configuration) -> ConfigResult<String> {
        match self {
            Self::Yaml => {
                serde_yaml::to_string(config).map_err(|e| ConfigError::Serialization(e.to_string()))
            }
            Self::Json => serde_json::to_string_pretty(config)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| ConfigError::Serialization(e.to_string())),
        }
    }
}

fn into_configuration(document: Value) -> ConfigResult<Configuration> {
    match document {
        Value::Null => Ok(Configuration::new()),
        Value::Mapping(mapping) => {
            let mut config = Configuration::with_capacity(mapping.len());
            for (key, value) in mapping {
                match key {
                    Value::String(name) => {
                        config.insert(name, value);
                    }
                    other => {
                        return Err(ConfigError::Deserialization(format!(
                            "parameter names must be strings, found {}",
                            display_value(&other)
                        )))
                    }
                }
            }
            Ok(config)
        }
        _ => Err(ConfigError::Deserialization(
            "configuration must be a mapping of parameter names to values".to_string(),
        )),
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Reads a candidate configuration from a file.
pub fn read_config(path: impl AsRef<Path>) -> ConfigResult<Configuration> {
    let path = expand_home(path);
    let format = ConfigFormat::from_path(&path)?;
    debug!(path = %path.display(), ?format, "reading configuration");
    let text = fs::read_to_string(&path)?;
    format.decode(&text)
}

/// Writes a configuration to a file, creating parent directories.
///
/// Returns the path actually written, after `~` expansion.
pub fn write_config(path: impl AsRef<Path>, config: &Configuration) -> ConfigResult<PathBuf> {
    let path = expand_home(path);
    let format = ConfigFormat::from_path(&path)?;
    let text = format.encode(config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&path, text)?;
    debug!(path = %path.display(), parameters = config.len(), "configuration written");
    Ok(path)
}
