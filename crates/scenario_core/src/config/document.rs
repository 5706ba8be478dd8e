//! Configuration document loading.
//!
//! Templates and client files are TOML by default; JSON is accepted for
//! documents produced by other tools. The root of a document must be a
//! non-empty mapping.

use super::error::ConfigError;
use super::value::{ConfigValue, Mapping};
use std::path::Path;

/// Parses a TOML document into a configuration mapping.
///
/// # Errors
///
/// Returns `ConfigError::Parse` on syntax errors or an empty document.
pub fn parse_toml_str(content: &str) -> Result<Mapping, ConfigError> {
    let value: ConfigValue = toml::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))?;
    into_root_mapping(value)
}

/// Parses a JSON document into a configuration mapping.
///
/// # Errors
///
/// Returns `ConfigError::Parse` on syntax errors, a non-object root, or an
/// empty document.
pub fn parse_json_str(content: &str) -> Result<Mapping, ConfigError> {
    let value: ConfigValue =
        serde_json::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))?;
    into_root_mapping(value)
}

/// Loads a configuration document, choosing the format by extension.
///
/// `.toml` and `.json` are recognised.
///
/// # Errors
///
/// - `ConfigError::Io` if the file cannot be read
/// - `ConfigError::UnsupportedFormat` for other extensions
/// - `ConfigError::Parse` for malformed or empty documents
pub fn load_document(path: &Path) -> Result<Mapping, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if extension != "toml" && extension != "json" {
        return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Loading configuration document");

    match extension.as_str() {
        "toml" => parse_toml_str(&content),
        _ => parse_json_str(&content),
    }
}

fn into_root_mapping(value: ConfigValue) -> Result<Mapping, ConfigError> {
    match value {
        ConfigValue::Mapping(root) if !root.is_empty() => Ok(root),
        ConfigValue::Mapping(_) => Err(ConfigError::parse("document is empty")),
        _ => Err(ConfigError::parse("document root must be a mapping")),
    }
}
