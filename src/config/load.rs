use std::path::Path;

use super::{ConfigError, ProjectConfig};

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; unrecognised extensions are read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Parse a configuration document without validating it.
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the document is malformed.
pub fn parse_config(
    content: &str,
    format: ConfigFormat,
    origin: &Path,
) -> Result<ProjectConfig, ConfigError> {
    let parsed = match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: origin.to_path_buf(),
        message,
    })
}

/// Read, parse and validate a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is malformed, or fails
/// [`ProjectConfig::validate`].
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content, ConfigFormat::from_path(path), path)?;
    config.validate()?;
    tracing::debug!(
        path = %path.display(),
        entities = config.entities.len(),
        repositories = ?config.repositories,
        "loaded project config"
    );
    Ok(config)
}
