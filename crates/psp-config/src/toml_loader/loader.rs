//! Core TOML config loading: read from a path or the platform default,
//! writing a documented default file on first run.

use std::fmt;
use std::path::{Path, PathBuf};

use psp_common::ConfigError;
use tracing::debug;

use super::template::default_config_toml;
use crate::schema::PspConfig;

/// Where a loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    File(PathBuf),
    /// Nothing existed at the default location; a documented default file
    /// was written there and the defaults are in use.
    Created(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::File(p) | ConfigSource::Created(p) => p,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(p) => write!(f, "loaded from {}", p.display()),
            ConfigSource::Created(p) => write!(f, "default written to {}", p.display()),
        }
    }
}

/// A config together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PspConfig,
    pub source: ConfigSource,
}

/// Parse a config from TOML text, using serde defaults for missing fields.
pub fn load_from_str(content: &str) -> Result<PspConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from a specific TOML file path.
///
/// Validation is left to the caller.
pub fn load_from_path(path: &Path) -> Result<PspConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = load_from_str(&content)?;
    debug!(path = %path.display(), "Config parsed");
    Ok(config)
}

/// `<config dir>/psp/config.toml`; on Linux `~/.config/psp/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("psp").join("config.toml"))
}

/// Write the documented default config to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    std::fs::write(path, default_config_toml()).map_err(io_error(path))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError {
    let path = path.to_path_buf();
    move |source| ConfigError::Io { path, source }
}

/// Load config from `path`, creating it with documented defaults when it
/// does not exist yet.
pub fn load_or_create(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        create_default_config(path)?;
        return Ok(LoadedConfig {
            config: PspConfig::default(),
            source: ConfigSource::Created(path.to_path_buf()),
        });
    }

    Ok(LoadedConfig {
        config: load_from_path(path)?,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

/// Load config from the platform-specific default path.
pub fn load_default() -> Result<LoadedConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}
