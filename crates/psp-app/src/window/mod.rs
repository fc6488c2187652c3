//! Window wrappers: the renderer side of one UI surface.
//!
//! A wrapper owns its window's channel end, lifecycle state and local
//! model. User interactions are forwarded to main and never applied
//! locally; the model only changes when main's echo arrives.

mod model;
mod state;

pub use model::WindowModel;
pub use state::WindowState;

use std::collections::VecDeque;

use psp_channel::{Channel, ChannelEvent, EventKind, HandlerError, HandlerId, WindowReady};
use psp_common::{Rect, SettingPatch, WindowId, WindowKind};

/// Event kinds a window of `kind` subscribes to when none are given.
///
/// `snapshot` and `close` are always delivered and need no subscription.
pub fn default_subscriptions(kind: WindowKind) -> Vec<EventKind> {
    match kind {
        WindowKind::Psp | WindowKind::Qss => vec![
            EventKind::SettingUpdate,
            EventKind::LocaleChange,
            EventKind::ThemeChange,
            EventKind::RestartRequired,
        ],
        WindowKind::QssWidget => vec![
            EventKind::SettingUpdate,
            EventKind::LocaleChange,
            EventKind::ThemeChange,
        ],
        WindowKind::Tooltip | WindowKind::Survey | WindowKind::About | WindowKind::Error => {
            vec![EventKind::LocaleChange, EventKind::ThemeChange]
        }
    }
}

pub struct WindowWrapper {
    id: WindowId,
    kind: WindowKind,
    bounds: Rect,
    state: WindowState,
    channel: Channel,
    model: WindowModel,
    /// Events that arrived before the first snapshot, replayed on going live.
    pending: VecDeque<ChannelEvent>,
    subscriptions: Vec<EventKind>,
}

impl WindowWrapper {
    pub fn new(id: WindowId, kind: WindowKind, bounds: Rect, channel: Channel) -> Self {
        Self {
            id,
            kind,
            bounds,
            state: WindowState::Created,
            channel,
            model: WindowModel::default(),
            pending: VecDeque::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn model(&self) -> &WindowModel {
        &self.model
    }

    pub fn subscriptions(&self) -> &[EventKind] {
        &self.subscriptions
    }

    pub fn is_live(&self) -> bool {
        self.state == WindowState::Live
    }

    pub fn is_closed(&self) -> bool {
        self.state == WindowState::Closed
    }

    /// Announce the window to main and request the initial snapshot.
    pub fn open(&mut self, subscriptions: Vec<EventKind>) {
        if !self.transition(WindowState::Initializing) {
            return;
        }
        self.subscriptions = subscriptions.clone();
        self.channel
            .send(&ChannelEvent::WindowReady(WindowReady { subscriptions }));

        // Anything that arrived before the window was announced goes through
        // the normal initializing path.
        let early: Vec<ChannelEvent> = self.pending.drain(..).collect();
        for event in early {
            self.receive(event);
        }
    }

    // =========================================================================
    // VIEW HANDLERS
    // =========================================================================

    /// Register a view handler. It runs after the model has been updated.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&ChannelEvent) -> Result<(), HandlerError> + Send + 'static,
    {
        self.channel.on(kind, handler)
    }

    // =========================================================================
    // USER INTERACTIONS
    // =========================================================================

    pub fn request_change(&mut self, patch: SettingPatch) -> bool {
        self.forward(ChannelEvent::SettingUpdate(patch))
    }

    pub fn key_out(&mut self) -> bool {
        self.forward(ChannelEvent::KeyOut)
    }

    pub fn undo(&mut self) -> bool {
        self.forward(ChannelEvent::Undo)
    }

    pub fn restart_now(&mut self) -> bool {
        self.forward(ChannelEvent::RestartNow)
    }

    pub fn restart_later(&mut self) -> bool {
        self.forward(ChannelEvent::RestartLater)
    }

    /// Close the window and tell main. Nothing fires afterwards.
    pub fn close(&mut self) {
        if self.shut() {
            self.channel.send(&ChannelEvent::Close);
        }
    }

    fn forward(&mut self, event: ChannelEvent) -> bool {
        if !self.is_live() {
            tracing::debug!(
                window_id = %self.id,
                state = %self.state,
                kind = %event.kind(),
                "Interaction ignored, window not live"
            );
            return false;
        }
        self.channel.send(&event)
    }

    // =========================================================================
    // INCOMING EVENTS
    // =========================================================================

    /// Handle everything main has sent so far. Returns the number of events
    /// taken off the channel.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.channel.try_next() {
            self.receive(event);
            count += 1;
        }
        count
    }

    fn receive(&mut self, event: ChannelEvent) {
        match self.state {
            WindowState::Closed => {
                tracing::trace!(window_id = %self.id, kind = %event.kind(), "Window closed, event ignored");
            }
            WindowState::Created => {
                tracing::debug!(window_id = %self.id, kind = %event.kind(), "Queued until open");
                self.pending.push_back(event);
            }
            WindowState::Initializing => match event {
                ChannelEvent::Snapshot(_) => self.go_live(event),
                ChannelEvent::Close => self.handle(event),
                other => {
                    tracing::debug!(window_id = %self.id, kind = %other.kind(), "Queued until live");
                    self.pending.push_back(other);
                }
            },
            WindowState::Live => self.handle(event),
        }
    }

    fn go_live(&mut self, snapshot: ChannelEvent) {
        if !self.transition(WindowState::Live) {
            return;
        }
        tracing::info!(window_id = %self.id, kind = %self.kind, "Window live");

        self.handle(snapshot);
        while let Some(event) = self.pending.pop_front() {
            if self.is_closed() {
                break;
            }
            self.handle(event);
        }
    }

    fn handle(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Close => {
                self.channel.dispatch(&event);
                self.shut();
            }
            ChannelEvent::WindowReady(_)
            | ChannelEvent::KeyOut
            | ChannelEvent::Undo
            | ChannelEvent::RestartNow
            | ChannelEvent::RestartLater => {
                tracing::warn!(
                    window_id = %self.id,
                    kind = %event.kind(),
                    "Window-to-main event received by a window"
                );
            }
            _ => {
                if self.model.apply(&event) {
                    self.channel.dispatch(&event);
                }
            }
        }
    }

    /// Move to `Closed` and drop all handlers. Returns `false` if already
    /// closed.
    fn shut(&mut self) -> bool {
        if !self.transition(WindowState::Closed) {
            return false;
        }
        self.channel.clear_handlers();
        self.pending.clear();
        true
    }

    fn transition(&mut self, next: WindowState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::debug!(
                window_id = %self.id,
                from = %self.state,
                to = %next,
                "Ignored window state change"
            );
            return false;
        }
        tracing::debug!(window_id = %self.id, from = %self.state, to = %next, "Window state");
        self.state = next;
        true
    }
}

impl std::fmt::Debug for WindowWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowWrapper")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("channel", &self.channel.label())
            .field("pending", &self.pending.len())
            .finish()
    }
}
