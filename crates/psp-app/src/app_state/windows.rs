//! Window lifecycle on the main side: open, announce, close.

use psp_channel::{ChannelEvent, EventKind, RestartRequired};
use psp_common::{AppEvent, PspError, Rect, Result, WindowId, WindowKind};

use super::core::PspApp;
use crate::positioning::{self, Anchors};
use crate::window::{default_subscriptions, WindowWrapper};

/// Parameters for opening a window.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub kind: WindowKind,
    /// Element the window is placed against (tooltips, QSS widgets).
    pub target: Option<Rect>,
    /// Overrides the kind's default subscriptions.
    pub subscriptions: Option<Vec<EventKind>>,
}

impl OpenRequest {
    pub fn new(kind: WindowKind) -> Self {
        Self {
            kind,
            target: None,
            subscriptions: None,
        }
    }

    pub fn anchored_to(mut self, target: Rect) -> Self {
        self.target = Some(target);
        self
    }
}

// =============================================================================
// WINDOW LIFECYCLE
// =============================================================================

impl PspApp {
    /// Open a window of `kind` with default placement and subscriptions.
    pub fn open_window(&mut self, kind: WindowKind) -> Result<WindowWrapper> {
        self.open(OpenRequest::new(kind))
    }

    /// Create, position and register a window, and hand back its wrapper.
    /// The wrapper has already announced itself; pump both sides to bring
    /// it live.
    pub fn open(&mut self, request: OpenRequest) -> Result<WindowWrapper> {
        let kind = request.kind;

        if self.shut_down {
            return Err(PspError::Window(format!(
                "cannot open {kind} window after shutdown"
            )));
        }

        if kind.is_singleton() {
            if let Some(existing) = self.registry.find_kind(kind) {
                return Err(PspError::Window(format!(
                    "{kind} window is already open as {existing}"
                )));
            }
        }

        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;

        let anchors = Anchors {
            qss: self
                .registry
                .find_kind(WindowKind::Qss)
                .and_then(|qss| self.registry.get(qss))
                .map(|entry| entry.bounds),
            target: request.target,
        };
        let bounds = positioning::place(kind, &self.config.windows, self.screen, anchors);

        let (link, channel) = self.inbox.connect(id);
        self.registry.register(id, kind, bounds, link)?;

        let mut window = WindowWrapper::new(id, kind, bounds, channel);
        window.open(
            request
                .subscriptions
                .unwrap_or_else(|| default_subscriptions(kind)),
        );

        tracing::info!(
            window_id = %id,
            kind = %kind,
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "Window opened"
        );
        self.event_bus.publish(AppEvent::WindowOpened { id, kind });
        Ok(window)
    }

    /// Close a window from the main side. Returns `false` if it was not open.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        match self.registry.unregister(id) {
            Some(entry) => {
                entry.send(&ChannelEvent::Close);
                tracing::info!(window_id = %id, kind = %entry.kind, "Window closed by main");
                self.event_bus.publish(AppEvent::WindowClosed(id));
                true
            }
            None => false,
        }
    }

    /// Handle `window-ready`: record subscriptions and send the snapshot.
    pub(super) fn handle_window_ready(&mut self, source: WindowId, subscriptions: &[EventKind]) {
        self.registry.mark_ready(source, subscriptions);
        self.registry
            .send_to(source, &ChannelEvent::Snapshot(self.store.snapshot().clone()));

        let pending = self.store.pending_restart();
        if !pending.is_empty() && subscriptions.contains(&EventKind::RestartRequired) {
            self.registry.send_to(
                source,
                &ChannelEvent::RestartRequired(RestartRequired {
                    settings: pending.to_vec(),
                }),
            );
        }
        tracing::debug!(window_id = %source, subscriptions = ?subscriptions, "Window ready");
    }

    /// Handle `close` from a window.
    pub(super) fn handle_window_closed(&mut self, source: WindowId) {
        if let Some(entry) = self.registry.unregister(source) {
            tracing::info!(window_id = %source, kind = %entry.kind, "Window closed");
            self.event_bus.publish(AppEvent::WindowClosed(source));
        }
    }
}
