//! Logging and diagnostics validation.

use super::helpers::validate_range;
use crate::schema::PspConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub(super) fn validate_logging(errors: &mut Vec<String>, config: &PspConfig) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "logging.level = '{}' must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }
}

pub(super) fn validate_diagnostics(errors: &mut Vec<String>, config: &PspConfig) {
    let diag = &config.diagnostics;
    validate_range(errors, "diagnostics.timeout_secs", diag.timeout_secs, 1, 120);
    if !(diag.preferences_url.starts_with("http://") || diag.preferences_url.starts_with("https://"))
    {
        errors.push(format!(
            "diagnostics.preferences_url = '{}' must be an http(s) URL",
            diag.preferences_url
        ));
    }
}
