//! Settings catalog consistency checks.

use std::collections::HashSet;
use std::sync::OnceLock;

use psp_common::SettingKind;
use regex::Regex;

use crate::catalog::LANGUAGE_SETTING;
use crate::schema::PspConfig;

fn locale_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("locale pattern is a valid regex")
    })
}

/// Whether `tag` looks like a BCP 47 language tag of the form `ll` or `ll-CC`.
pub fn is_valid_locale(tag: &str) -> bool {
    locale_pattern().is_match(tag)
}

pub(super) fn validate_catalog(errors: &mut Vec<String>, config: &PspConfig) {
    let catalog = &config.settings.catalog;
    if catalog.is_empty() {
        errors.push("settings.catalog must define at least one setting".into());
        return;
    }

    let mut seen = HashSet::new();
    for schema in catalog {
        let name = format!("settings.catalog[{}]", schema.id);

        if schema.id.trim().is_empty() {
            errors.push("settings.catalog contains an entry with an empty id".into());
            continue;
        }
        if !seen.insert(schema.id.as_str()) {
            errors.push(format!("{name} is defined more than once"));
        }
        if schema.label.trim().is_empty() {
            errors.push(format!("{name}.label must not be empty"));
        }

        match &schema.kind {
            SettingKind::Number { min, max, step } => {
                if min >= max {
                    errors.push(format!("{name}: min {min} must be below max {max}"));
                    continue;
                }
                if let Some(step) = step {
                    if *step <= 0.0 {
                        errors.push(format!("{name}: step {step} must be positive"));
                        continue;
                    }
                }
            }
            SettingKind::Choice { options } => {
                if options.is_empty() {
                    errors.push(format!("{name}: choice needs at least one option"));
                    continue;
                }
                if schema.id == LANGUAGE_SETTING {
                    for option in options.iter().filter(|o| !is_valid_locale(o)) {
                        errors.push(format!("{name}: '{option}' is not a locale tag"));
                    }
                }
            }
            SettingKind::Boolean | SettingKind::Text => {}
        }

        if let Err(reason) = schema.check(&schema.default) {
            errors.push(format!("{name}.default: {reason}"));
        }
    }
}
