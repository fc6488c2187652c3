//! Settings handlers: validated changes, undo, key-out and the restart flow.
//!
//! Main never trusts a window's request. Every change is checked against the
//! catalog first; rejected requests are logged and produce no echo.

use psp_channel::{ChannelEvent, LocaleChange, RestartRequired, ThemeChange};
use psp_common::{AppEvent, SettingPatch, WindowId};
use psp_config::{LANGUAGE_SETTING, THEME_SETTING};

use super::core::PspApp;

// =============================================================================
// HANDLERS
// =============================================================================

impl PspApp {
    /// Handle `setting-update` from a window.
    pub(super) fn handle_setting_update(&mut self, source: WindowId, patch: SettingPatch) {
        match self.store.apply(&patch) {
            Ok(Some(previous)) => {
                tracing::info!(
                    window_id = %source,
                    id = %patch.id,
                    from = %previous,
                    to = %patch.value,
                    "Setting changed"
                );
                self.announce_change(&patch);
            }
            Ok(None) => {
                tracing::debug!(window_id = %source, id = %patch.id, "Setting unchanged");
            }
            Err(e) => {
                tracing::warn!(window_id = %source, error = %e, "Setting change rejected");
            }
        }
    }

    /// Handle `undo`: restore the value before the most recent change.
    pub(super) fn handle_undo(&mut self, source: WindowId) {
        match self.store.undo() {
            Some(patch) => {
                tracing::info!(window_id = %source, id = %patch.id, to = %patch.value, "Undo");
                self.announce_change(&patch);
            }
            None => tracing::debug!(window_id = %source, "Nothing to undo"),
        }
    }

    /// Handle `key-out`: end the session and go back to defaults.
    pub(super) fn handle_key_out(&mut self, source: WindowId) {
        tracing::info!(window_id = %source, "Key out");

        for id in self.registry.ids_where(|e| e.kind.is_transient()) {
            self.close_window(id);
        }

        self.store.reset();
        self.event_bus.publish(AppEvent::SettingsReset);
        self.registry
            .broadcast(&ChannelEvent::Snapshot(self.store.snapshot().clone()));
        self.refresh_restart_state();
    }

    /// Handle `restart-now`: the pending values count as applied.
    pub(super) fn handle_restart_now(&mut self, source: WindowId) {
        tracing::info!(
            window_id = %source,
            pending = ?self.store.pending_restart(),
            "Restart requested"
        );
        self.store.commit_restart();
        self.refresh_restart_state();
    }

    /// Handle `restart-later`: keep the pending list as is.
    pub(super) fn handle_restart_later(&mut self, source: WindowId) {
        tracing::info!(
            window_id = %source,
            pending = ?self.store.pending_restart(),
            "Restart deferred"
        );
    }

    // =========================================================================
    // BROADCASTS
    // =========================================================================

    /// Tell every interested window about an applied change, including the
    /// window that asked for it.
    fn announce_change(&mut self, patch: &SettingPatch) {
        let reached = self
            .registry
            .broadcast(&ChannelEvent::SettingUpdate(patch.clone()));
        tracing::debug!(id = %patch.id, windows = reached, "Setting update broadcast");

        if let Some(text) = patch.value.as_str() {
            if patch.id == LANGUAGE_SETTING {
                self.registry.broadcast(&ChannelEvent::LocaleChange(LocaleChange {
                    locale: text.to_string(),
                }));
            } else if patch.id == THEME_SETTING {
                self.registry.broadcast(&ChannelEvent::ThemeChange(ThemeChange {
                    theme: text.to_string(),
                }));
            }
        }

        self.event_bus.publish(AppEvent::SettingChanged {
            id: patch.id.clone(),
            value: patch.value.clone(),
        });
        self.refresh_restart_state();
    }

    /// Broadcast `restart-required` when the set of pending settings changed.
    fn refresh_restart_state(&mut self) {
        if let Some(settings) = self.store.refresh_pending() {
            tracing::info!(pending = ?settings, "Restart state changed");
            self.registry
                .broadcast(&ChannelEvent::RestartRequired(RestartRequired {
                    settings: settings.clone(),
                }));
            self.event_bus.publish(AppEvent::RestartPending(settings));
        }
    }
}
