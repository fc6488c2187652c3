//! PspApp struct definition and constructor.

use psp_channel::MainChannel;
use psp_common::{AppEvent, EventBus, Rect, SessionId, SettingsSnapshot};
use psp_config::PspConfig;
use tokio::sync::broadcast;

use crate::registry::WindowRegistry;
use crate::store::SettingsStore;

const EVENT_BUS_CAPACITY: usize = 256;

/// Main-process state.
pub struct PspApp {
    pub(super) config: PspConfig,
    pub(super) store: SettingsStore,
    pub(super) registry: WindowRegistry,
    pub(super) inbox: MainChannel,
    pub(super) event_bus: EventBus,
    pub(super) session: SessionId,

    // Work area windows are positioned in
    pub(super) screen: Rect,

    pub(super) next_window_id: u32,
    pub(super) shut_down: bool,
}

impl PspApp {
    pub fn new(config: PspConfig, screen: Rect) -> Self {
        let store = SettingsStore::new(&config.settings.catalog);
        let session = SessionId::new();
        tracing::info!(
            session = %session,
            settings = store.snapshot().len(),
            "Settings store ready"
        );
        Self {
            config,
            store,
            registry: WindowRegistry::new(),
            inbox: MainChannel::new(),
            event_bus: EventBus::new(EVENT_BUS_CAPACITY),
            session,
            screen,
            next_window_id: 1,
            shut_down: false,
        }
    }

    pub fn config(&self) -> &PspConfig {
        &self.config
    }

    /// The authoritative settings snapshot.
    pub fn settings(&self) -> &SettingsSnapshot {
        self.store.snapshot()
    }

    pub fn pending_restart(&self) -> &[String] {
        self.store.pending_restart()
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Observe application events inside the main process.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_bus.subscribe()
    }

    pub fn window_count(&self) -> usize {
        self.registry.len()
    }
}
