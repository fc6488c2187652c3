//! PSP configuration system.
//!
//! TOML-based configuration read once at startup. Every section uses
//! serde defaults so partial configs work, and the settings catalog falls
//! back to the built-in one when the file does not define its own.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use psp_config::{load_config, config_to_json};
//!
//! let loaded = load_config(None).expect("failed to load config");
//! println!("{}: {}", loaded.source, config_to_json(&loaded.config));
//! ```

pub mod catalog;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use catalog::{default_catalog, LANGUAGE_SETTING, THEME_SETTING};
pub use schema::{PspConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{ConfigSource, LoadedConfig};

use std::path::Path;

use psp_common::ConfigError;

/// Load config from `path`, or from the platform default location when
/// `path` is `None`, then validate it.
///
/// The default location gets a documented config file on first run. An
/// explicit path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let loaded = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::FileNotFound(p.to_path_buf()));
            }
            LoadedConfig {
                config: toml_loader::load_from_path(p)?,
                source: ConfigSource::File(p.to_path_buf()),
            }
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&loaded.config)?;
    Ok(loaded)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PspConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
