//! Built-in settings catalog.

use psp_common::{SettingKind, SettingSchema, SettingValue};

/// Setting whose changes are also announced as `locale-change`.
pub const LANGUAGE_SETTING: &str = "language";

/// Setting whose changes are also announced as `theme-change`.
pub const THEME_SETTING: &str = "theme";

/// Locales the built-in language setting offers.
pub const BUILT_IN_LOCALES: &[&str] = &["en-US", "es-ES", "de-DE", "fr-FR", "ko-KR"];

/// Contrast themes the built-in theme setting offers.
pub const BUILT_IN_THEMES: &[&str] = &["default", "black-white", "white-black", "yellow-black"];

fn choice(options: &[&str]) -> SettingKind {
    SettingKind::Choice {
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

/// The settings shown in the PSP and QSS when the config defines none.
pub fn default_catalog() -> Vec<SettingSchema> {
    vec![
        SettingSchema {
            id: LANGUAGE_SETTING.into(),
            label: "Language".into(),
            kind: choice(BUILT_IN_LOCALES),
            default: SettingValue::Text("en-US".into()),
            requires_restart: true,
        },
        SettingSchema {
            id: THEME_SETTING.into(),
            label: "Contrast Theme".into(),
            kind: choice(BUILT_IN_THEMES),
            default: SettingValue::Text("default".into()),
            requires_restart: false,
        },
        SettingSchema {
            id: "text-zoom".into(),
            label: "Text Size".into(),
            kind: SettingKind::Number {
                min: 0.5,
                max: 3.0,
                step: Some(0.25),
            },
            default: SettingValue::Number(1.0),
            requires_restart: false,
        },
        SettingSchema {
            id: "read-aloud".into(),
            label: "Read Aloud".into(),
            kind: SettingKind::Boolean,
            default: SettingValue::Bool(false),
            requires_restart: false,
        },
        SettingSchema {
            id: "screen-reader".into(),
            label: "Screen Reader".into(),
            kind: SettingKind::Boolean,
            default: SettingValue::Bool(false),
            requires_restart: true,
        },
        SettingSchema {
            id: "volume".into(),
            label: "Volume".into(),
            kind: SettingKind::Number {
                min: 0.0,
                max: 100.0,
                step: Some(5.0),
            },
            default: SettingValue::Number(50.0),
            requires_restart: false,
        },
        SettingSchema {
            id: "mouse-speed".into(),
            label: "Mouse Speed".into(),
            kind: SettingKind::Number {
                min: 1.0,
                max: 10.0,
                step: Some(1.0),
            },
            default: SettingValue::Number(5.0),
            requires_restart: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_their_own_schema() {
        for schema in default_catalog() {
            assert!(
                schema.check(&schema.default).is_ok(),
                "{} default rejected",
                schema.id
            );
        }
    }

    #[test]
    fn language_and_theme_present() {
        let catalog = default_catalog();
        assert!(catalog.iter().any(|s| s.id == LANGUAGE_SETTING));
        assert!(catalog.iter().any(|s| s.id == THEME_SETTING));
    }

    #[test]
    fn language_offers_korean() {
        let catalog = default_catalog();
        let language = catalog.iter().find(|s| s.id == LANGUAGE_SETTING).unwrap();
        assert!(language.check(&SettingValue::Text("ko-KR".into())).is_ok());
        assert!(language.requires_restart);
    }
}
