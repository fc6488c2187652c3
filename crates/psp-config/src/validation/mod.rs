//! Full configuration validation.
//!
//! Validates window sizes, logging and diagnostics values, and the
//! settings catalog. Each area has its own submodule; this orchestrator
//! calls them all and collects errors into a single `ConfigError`.

mod catalog;
mod helpers;
mod misc;
mod windows;


pub use catalog::is_valid_locale;

use crate::schema::PspConfig;
use psp_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PspConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    windows::validate_windows(&mut errors, config);
    misc::validate_logging(&mut errors, config);
    misc::validate_diagnostics(&mut errors, config);
    catalog::validate_catalog(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
