//! A window's local copy of application state.

use psp_channel::ChannelEvent;
use psp_common::SettingsSnapshot;
use psp_config::{LANGUAGE_SETTING, THEME_SETTING};
use serde::Serialize;

/// What a window renders from. Only ever changed by events from main.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowModel {
    pub settings: SettingsSnapshot,
    pub locale: Option<String>,
    pub theme: Option<String>,
    /// Settings waiting for a restart to take full effect.
    pub restart_pending: Vec<String>,
}

impl WindowModel {
    /// Apply a main-to-window event. Returns `false` for events that do not
    /// touch the model.
    pub fn apply(&mut self, event: &ChannelEvent) -> bool {
        match event {
            ChannelEvent::Snapshot(snapshot) => {
                self.settings = snapshot.clone();
                self.locale = text_setting(snapshot, LANGUAGE_SETTING);
                self.theme = text_setting(snapshot, THEME_SETTING);
                true
            }
            ChannelEvent::SettingUpdate(patch) => {
                if self.settings.apply(patch).is_none() {
                    tracing::warn!(id = %patch.id, "Update for a setting this window does not know");
                    return false;
                }
                true
            }
            ChannelEvent::LocaleChange(change) => {
                self.locale = Some(change.locale.clone());
                true
            }
            ChannelEvent::ThemeChange(change) => {
                self.theme = Some(change.theme.clone());
                true
            }
            ChannelEvent::RestartRequired(required) => {
                self.restart_pending = required.settings.clone();
                true
            }
            ChannelEvent::WindowReady(_)
            | ChannelEvent::Close
            | ChannelEvent::KeyOut
            | ChannelEvent::Undo
            | ChannelEvent::RestartNow
            | ChannelEvent::RestartLater => false,
        }
    }
}

fn text_setting(snapshot: &SettingsSnapshot, id: &str) -> Option<String> {
    snapshot.get(id).and_then(|v| v.as_str()).map(str::to_string)
}
