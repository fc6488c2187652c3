//! Configuration schema types for the PSP front-end.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod diagnostics;
mod logging;
mod settings;
mod windows;

pub use diagnostics::*;
pub use logging::*;
pub use settings::*;
pub use windows::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PspConfig {
    pub windows: WindowsConfig,
    pub logging: LoggingConfig,
    pub diagnostics: DiagnosticsConfig,
    pub settings: SettingsConfig,
}

// =============================================================================
// Tests
// =============================================================================
