use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::settings::SettingValue;
use crate::types::{WindowId, WindowKind};

/// Main-process notifications about application state. Windows never see
/// these directly; they are for observers inside the main process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppEvent {
    WindowOpened { id: WindowId, kind: WindowKind },
    WindowClosed(WindowId),
    SettingChanged { id: String, value: SettingValue },
    SettingsReset,
    RestartPending(Vec<String>),
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: AppEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::SettingsReset);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::SettingsReset));
    }

    #[tokio::test]
    async fn window_events_arrive_in_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::WindowOpened {
            id: WindowId(1),
            kind: WindowKind::Qss,
        });
        bus.publish(AppEvent::WindowClosed(WindowId(1)));

        let e1 = rx.recv().await.unwrap();
        assert!(matches!(e1, AppEvent::WindowOpened { id, .. } if id == WindowId(1)));
        let e2 = rx.recv().await.unwrap();
        assert!(matches!(e2, AppEvent::WindowClosed(id) if id == WindowId(1)));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(AppEvent::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), AppEvent::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), AppEvent::Shutdown));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(AppEvent::Shutdown), 0);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: AppEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, AppEvent::Unknown));
    }
}
