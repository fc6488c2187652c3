//! Validation and dispatch of events arriving from windows.

use psp_channel::{ChannelEvent, EventKind};
use psp_common::WindowId;

use super::core::PspApp;

// =============================================================================
// DIRECTION CHECK
// =============================================================================

/// Event kinds a window may send to main.
///
/// Anything else arriving at main is rejected and logged.
const WINDOW_TO_MAIN: &[EventKind] = &[
    EventKind::WindowReady,
    EventKind::SettingUpdate,
    EventKind::Close,
    EventKind::KeyOut,
    EventKind::Undo,
    EventKind::RestartNow,
    EventKind::RestartLater,
];

pub fn is_window_to_main(kind: EventKind) -> bool {
    WINDOW_TO_MAIN.contains(&kind)
}

// =============================================================================
// DISPATCH
// =============================================================================

impl PspApp {
    /// Handle every event windows have sent so far, in arrival order.
    /// Returns the number handled.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Some((source, event)) = self.inbox.try_next() {
            self.handle_window_event(source, event);
            count += 1;
        }
        count
    }

    pub(super) fn handle_window_event(&mut self, source: WindowId, event: ChannelEvent) {
        let kind = event.kind();

        if !self.registry.contains(source) {
            tracing::debug!(window_id = %source, kind = %kind, "Event from closed window ignored");
            return;
        }

        if !is_window_to_main(kind) {
            tracing::warn!(window_id = %source, kind = %kind, "Event rejected: wrong direction");
            return;
        }

        tracing::debug!(window_id = %source, kind = %kind, "Window event dispatched");

        match event {
            ChannelEvent::WindowReady(ready) => self.handle_window_ready(source, &ready.subscriptions),
            ChannelEvent::SettingUpdate(patch) => self.handle_setting_update(source, patch),
            ChannelEvent::Close => self.handle_window_closed(source),
            ChannelEvent::KeyOut => self.handle_key_out(source),
            ChannelEvent::Undo => self.handle_undo(source),
            ChannelEvent::RestartNow => self.handle_restart_now(source),
            ChannelEvent::RestartLater => self.handle_restart_later(source),
            ChannelEvent::Snapshot(_)
            | ChannelEvent::LocaleChange(_)
            | ChannelEvent::ThemeChange(_)
            | ChannelEvent::RestartRequired(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_actions_allowed() {
        for kind in [
            EventKind::WindowReady,
            EventKind::SettingUpdate,
            EventKind::KeyOut,
            EventKind::Undo,
            EventKind::RestartNow,
            EventKind::RestartLater,
            EventKind::Close,
        ] {
            assert!(is_window_to_main(kind), "{kind} should be allowed");
        }
    }

    #[test]
    fn main_only_events_rejected() {
        for kind in [
            EventKind::Snapshot,
            EventKind::LocaleChange,
            EventKind::ThemeChange,
            EventKind::RestartRequired,
        ] {
            assert!(!is_window_to_main(kind), "{kind} should be rejected");
        }
    }
}
