//! Settings catalog configuration.

use psp_common::SettingSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::default_catalog;

/// The settings the front-end exposes. A `[[settings.catalog]]` table in
/// the config file replaces the built-in catalog as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub catalog: Vec<SettingSchema>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }
}
