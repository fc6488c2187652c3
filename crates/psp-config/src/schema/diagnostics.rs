//! Preferences-service diagnostics configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Run the check at startup without `--diagnose`.
    pub enabled: bool,
    pub preferences_url: String,
    /// Request timeout in seconds (valid range: 1-120).
    pub timeout_secs: u64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            preferences_url: "http://localhost:8081/preferences".into(),
            timeout_secs: 10,
        }
    }
}
