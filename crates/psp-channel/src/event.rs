//! Event kinds carried over a channel.

use std::fmt;

use psp_common::{ChannelError, SettingPatch, SettingsSnapshot};
use serde::{Deserialize, Serialize};

/// Discriminant of [`ChannelEvent`], used as the handler-table key and in
/// subscription lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    WindowReady,
    Snapshot,
    SettingUpdate,
    LocaleChange,
    ThemeChange,
    RestartRequired,
    Close,
    KeyOut,
    Undo,
    RestartNow,
    RestartLater,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::WindowReady,
        EventKind::Snapshot,
        EventKind::SettingUpdate,
        EventKind::LocaleChange,
        EventKind::ThemeChange,
        EventKind::RestartRequired,
        EventKind::Close,
        EventKind::KeyOut,
        EventKind::Undo,
        EventKind::RestartNow,
        EventKind::RestartLater,
    ];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::WindowReady => "window-ready",
            EventKind::Snapshot => "snapshot",
            EventKind::SettingUpdate => "setting-update",
            EventKind::LocaleChange => "locale-change",
            EventKind::ThemeChange => "theme-change",
            EventKind::RestartRequired => "restart-required",
            EventKind::Close => "close",
            EventKind::KeyOut => "key-out",
            EventKind::Undo => "undo",
            EventKind::RestartNow => "restart-now",
            EventKind::RestartLater => "restart-later",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChannelError::UnknownEvent(s.to_string()))
    }
}

/// Sent by a window once it is set up; asks main for the initial snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowReady {
    #[serde(default)]
    pub subscriptions: Vec<EventKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleChange {
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeChange {
    pub theme: String,
}

/// Settings whose new values wait for a restart. Empty when nothing is pending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestartRequired {
    #[serde(default)]
    pub settings: Vec<String>,
}

/// Every message that can travel over a [`crate::Channel`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    WindowReady(WindowReady),
    Snapshot(SettingsSnapshot),
    SettingUpdate(SettingPatch),
    LocaleChange(LocaleChange),
    ThemeChange(ThemeChange),
    RestartRequired(RestartRequired),
    Close,
    KeyOut,
    Undo,
    RestartNow,
    RestartLater,
}

impl ChannelEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ChannelEvent::WindowReady(_) => EventKind::WindowReady,
            ChannelEvent::Snapshot(_) => EventKind::Snapshot,
            ChannelEvent::SettingUpdate(_) => EventKind::SettingUpdate,
            ChannelEvent::LocaleChange(_) => EventKind::LocaleChange,
            ChannelEvent::ThemeChange(_) => EventKind::ThemeChange,
            ChannelEvent::RestartRequired(_) => EventKind::RestartRequired,
            ChannelEvent::Close => EventKind::Close,
            ChannelEvent::KeyOut => EventKind::KeyOut,
            ChannelEvent::Undo => EventKind::Undo,
            ChannelEvent::RestartNow => EventKind::RestartNow,
            ChannelEvent::RestartLater => EventKind::RestartLater,
        }
    }

    pub fn setting_update(
        id: impl Into<String>,
        value: impl Into<psp_common::SettingValue>,
    ) -> Self {
        ChannelEvent::SettingUpdate(SettingPatch::new(id, value))
    }

    /// Payload as JSON. Action events carry `null`.
    pub fn payload(&self) -> Result<serde_json::Value, ChannelError> {
        let value = match self {
            ChannelEvent::WindowReady(p) => serde_json::to_value(p),
            ChannelEvent::Snapshot(p) => serde_json::to_value(p),
            ChannelEvent::SettingUpdate(p) => serde_json::to_value(p),
            ChannelEvent::LocaleChange(p) => serde_json::to_value(p),
            ChannelEvent::ThemeChange(p) => serde_json::to_value(p),
            ChannelEvent::RestartRequired(p) => serde_json::to_value(p),
            ChannelEvent::Close
            | ChannelEvent::KeyOut
            | ChannelEvent::Undo
            | ChannelEvent::RestartNow
            | ChannelEvent::RestartLater => Ok(serde_json::Value::Null),
        };
        value.map_err(|e| ChannelError::Encode(format!("{}: {e}", self.kind())))
    }

    /// Rebuild an event from its kind and JSON payload.
    ///
    /// Action events ignore their payload.
    pub fn from_parts(kind: EventKind, payload: serde_json::Value) -> Result<Self, ChannelError> {
        fn parse<T: serde::de::DeserializeOwned>(
            kind: EventKind,
            payload: serde_json::Value,
        ) -> Result<T, ChannelError> {
            serde_json::from_value(payload)
                .map_err(|e| ChannelError::Decode(format!("bad {kind} payload: {e}")))
        }

        Ok(match kind {
            EventKind::WindowReady => {
                // Older windows send no payload at all.
                if payload.is_null() {
                    ChannelEvent::WindowReady(WindowReady::default())
                } else {
                    ChannelEvent::WindowReady(parse(kind, payload)?)
                }
            }
            EventKind::Snapshot => ChannelEvent::Snapshot(parse(kind, payload)?),
            EventKind::SettingUpdate => ChannelEvent::SettingUpdate(parse(kind, payload)?),
            EventKind::LocaleChange => ChannelEvent::LocaleChange(parse(kind, payload)?),
            EventKind::ThemeChange => ChannelEvent::ThemeChange(parse(kind, payload)?),
            EventKind::RestartRequired => ChannelEvent::RestartRequired(parse(kind, payload)?),
            EventKind::Close => ChannelEvent::Close,
            EventKind::KeyOut => ChannelEvent::KeyOut,
            EventKind::Undo => ChannelEvent::Undo,
            EventKind::RestartNow => ChannelEvent::RestartNow,
            EventKind::RestartLater => ChannelEvent::RestartLater,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_parses_from_its_name() {
        for kind in EventKind::ALL {
            let parsed: EventKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn kind_names_are_case_sensitive() {
        assert!("SETTING-UPDATE".parse::<EventKind>().is_err());
        assert!("setting_update".parse::<EventKind>().is_err());
        assert!("".parse::<EventKind>().is_err());
    }

    #[test]
    fn kind_serde_matches_wire_name() {
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn setting_update_payload_shape() {
        let event = ChannelEvent::setting_update("language", "ko-KR");
        assert_eq!(event.kind(), EventKind::SettingUpdate);
        let payload = event.payload().unwrap();
        assert_eq!(payload, serde_json::json!({"id": "language", "value": "ko-KR"}));
    }

    #[test]
    fn action_events_have_null_payload() {
        for event in [
            ChannelEvent::Close,
            ChannelEvent::KeyOut,
            ChannelEvent::Undo,
            ChannelEvent::RestartNow,
            ChannelEvent::RestartLater,
        ] {
            assert!(event.payload().unwrap().is_null(), "{:?}", event.kind());
        }
    }

    #[test]
    fn window_ready_without_payload() {
        let event = ChannelEvent::from_parts(EventKind::WindowReady, serde_json::Value::Null)
            .unwrap();
        assert_eq!(event, ChannelEvent::WindowReady(WindowReady::default()));
    }

    #[test]
    fn window_ready_carries_subscriptions() {
        let event = ChannelEvent::from_parts(
            EventKind::WindowReady,
            serde_json::json!({"subscriptions": ["setting-update", "locale-change"]}),
        )
        .unwrap();
        match event {
            ChannelEvent::WindowReady(ready) => assert_eq!(
                ready.subscriptions,
                vec![EventKind::SettingUpdate, EventKind::LocaleChange]
            ),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        let err = ChannelEvent::from_parts(
            EventKind::SettingUpdate,
            serde_json::json!({"identifier": "language"}),
        )
        .unwrap_err();
        assert!(matches!(err, ChannelError::Decode(_)));
        assert!(err.to_string().contains("setting-update"));
    }

    #[test]
    fn action_payload_is_ignored() {
        let event =
            ChannelEvent::from_parts(EventKind::Undo, serde_json::json!({"extra": 1})).unwrap();
        assert_eq!(event, ChannelEvent::Undo);
    }
}
