//! Main-process settings store: the only writer of the settings snapshot.

use std::collections::BTreeMap;

use psp_common::{SettingPatch, SettingSchema, SettingValue, SettingsSnapshot, StoreError};

/// Number of changes kept for undo.
const UNDO_LIMIT: usize = 100;

pub struct SettingsStore {
    snapshot: SettingsSnapshot,
    /// Previous values of applied changes, most recent last.
    undo: Vec<SettingPatch>,
    /// Values of restart-flagged settings as of the last restart.
    baseline: BTreeMap<String, SettingValue>,
    pending_restart: Vec<String>,
}

impl SettingsStore {
    pub fn new(catalog: &[SettingSchema]) -> Self {
        let snapshot = SettingsSnapshot::from_catalog(catalog);
        let baseline = restart_values(&snapshot);
        Self {
            snapshot,
            undo: Vec::new(),
            baseline,
            pending_restart: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &SettingsSnapshot {
        &self.snapshot
    }

    /// Validate and apply a change.
    ///
    /// Returns the previous value, or `None` when the value was already
    /// current and nothing changed.
    pub fn apply(&mut self, patch: &SettingPatch) -> Result<Option<SettingValue>, StoreError> {
        let entry = self
            .snapshot
            .entry(&patch.id)
            .ok_or_else(|| StoreError::UnknownSetting(patch.id.clone()))?;

        entry
            .schema
            .check(&patch.value)
            .map_err(|reason| StoreError::InvalidValue {
                id: patch.id.clone(),
                reason,
            })?;

        if entry.value == patch.value {
            return Ok(None);
        }

        let previous = self.snapshot.apply(patch);
        if let Some(ref prev) = previous {
            if self.undo.len() == UNDO_LIMIT {
                self.undo.remove(0);
            }
            self.undo.push(SettingPatch::new(patch.id.clone(), prev.clone()));
        }
        Ok(previous)
    }

    /// Revert the most recent change. Returns the patch that was applied to
    /// restore the old value.
    pub fn undo(&mut self) -> Option<SettingPatch> {
        let patch = self.undo.pop()?;
        self.snapshot.apply(&patch);
        Some(patch)
    }

    /// Put every setting back to its default and forget undo history.
    pub fn reset(&mut self) {
        let defaults: Vec<SettingPatch> = self
            .snapshot
            .entries()
            .map(|e| SettingPatch::new(e.schema.id.clone(), e.schema.default.clone()))
            .collect();
        for patch in &defaults {
            self.snapshot.apply(patch);
        }
        self.undo.clear();
    }

    /// Settings whose current value differs from the value they had at the
    /// last restart.
    pub fn pending_restart(&self) -> &[String] {
        &self.pending_restart
    }

    /// Recompute the pending-restart list. Returns the new list only when it
    /// changed.
    pub fn refresh_pending(&mut self) -> Option<Vec<String>> {
        let pending: Vec<String> = restart_values(&self.snapshot)
            .into_iter()
            .filter(|(id, value)| self.baseline.get(id) != Some(value))
            .map(|(id, _)| id)
            .collect();

        if pending == self.pending_restart {
            return None;
        }
        self.pending_restart = pending.clone();
        Some(pending)
    }

    /// Treat the current values as applied by a restart.
    pub fn commit_restart(&mut self) {
        self.baseline = restart_values(&self.snapshot);
    }
}

fn restart_values(snapshot: &SettingsSnapshot) -> BTreeMap<String, SettingValue> {
    snapshot
        .entries()
        .filter(|e| e.schema.requires_restart)
        .map(|e| (e.schema.id.clone(), e.value.clone()))
        .collect()
}
