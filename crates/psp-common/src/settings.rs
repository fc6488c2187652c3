//! Settings model shared by the main process and every window.
//!
//! A [`SettingsSnapshot`] pairs each setting's schema with its current
//! value. The main process owns the authoritative copy; windows keep their
//! own copies and patch them with [`SettingPatch`]es received over a channel.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A setting value as carried on the wire and stored in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "boolean",
            SettingValue::Number(_) => "number",
            SettingValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Number(n) => write!(f, "{n}"),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        SettingValue::Number(n)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

/// Value type and constraints of a setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    Boolean,
    Number {
        min: f64,
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Choice {
        options: Vec<String>,
    },
    Text,
}

/// Schema metadata for one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingSchema {
    pub id: String,
    /// Display label shown in the PSP and QSS.
    pub label: String,
    pub kind: SettingKind,
    pub default: SettingValue,
    /// Applying a change only takes full effect after a restart.
    #[serde(default)]
    pub requires_restart: bool,
}

impl SettingSchema {
    /// Check that `value` has the right type and lies within the allowed range.
    pub fn check(&self, value: &SettingValue) -> Result<(), String> {
        match (&self.kind, value) {
            (SettingKind::Boolean, SettingValue::Bool(_)) => Ok(()),
            (SettingKind::Number { min, max, step }, SettingValue::Number(n)) => {
                if !n.is_finite() || n < min || n > max {
                    return Err(format!("{n} is out of range [{min}, {max}]"));
                }
                if let Some(step) = step.filter(|s| *s > 0.0) {
                    let steps = (n - min) / step;
                    if (steps - steps.round()).abs() > 1e-6 {
                        return Err(format!("{n} is not a multiple of step {step} from {min}"));
                    }
                }
                Ok(())
            }
            (SettingKind::Choice { options }, SettingValue::Text(s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(())
                } else {
                    Err(format!("'{s}' is not one of [{}]", options.join(", ")))
                }
            }
            (SettingKind::Text, SettingValue::Text(_)) => Ok(()),
            (kind, value) => Err(format!(
                "expected {}, got {}",
                kind_name(kind),
                value.type_name()
            )),
        }
    }
}

fn kind_name(kind: &SettingKind) -> &'static str {
    match kind {
        SettingKind::Boolean => "boolean",
        SettingKind::Number { .. } => "number",
        SettingKind::Choice { .. } => "choice (text)",
        SettingKind::Text => "text",
    }
}

/// A setting's schema together with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub schema: SettingSchema,
    pub value: SettingValue,
}

/// A partial update to one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingPatch {
    pub id: String,
    pub value: SettingValue,
}

impl SettingPatch {
    pub fn new(id: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Map from setting id to schema and current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSnapshot {
    entries: BTreeMap<String, SettingEntry>,
}

impl SettingsSnapshot {
    /// Build a snapshot holding every setting at its default value.
    pub fn from_catalog(catalog: &[SettingSchema]) -> Self {
        let entries = catalog
            .iter()
            .map(|schema| {
                (
                    schema.id.clone(),
                    SettingEntry {
                        schema: schema.clone(),
                        value: schema.default.clone(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&SettingValue> {
        self.entries.get(id).map(|e| &e.value)
    }

    pub fn entry(&self, id: &str) -> Option<&SettingEntry> {
        self.entries.get(id)
    }

    /// Overwrite the value of a known setting. Returns the previous value,
    /// or `None` if the id is not part of this snapshot.
    pub fn apply(&mut self, patch: &SettingPatch) -> Option<SettingValue> {
        let entry = self.entries.get_mut(&patch.id)?;
        Some(std::mem::replace(&mut entry.value, patch.value.clone()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SettingEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
