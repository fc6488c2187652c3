//! Per-kind handler tables.

use std::collections::HashMap;

use crate::event::{ChannelEvent, EventKind};

/// Error returned by a handler. Logged by the dispatcher and otherwise ignored.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<String> for HandlerError {
    fn from(s: String) -> Self {
        HandlerError(s)
    }
}

impl From<&str> for HandlerError {
    fn from(s: &str) -> Self {
        HandlerError(s.to_string())
    }
}

/// Identifies a registered handler so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

pub type Handler = Box<dyn FnMut(&ChannelEvent) -> Result<(), HandlerError> + Send>;

/// Handlers keyed by event kind, invoked in registration order.
#[derive(Default)]
pub struct HandlerTable {
    next_id: u64,
    handlers: HashMap<EventKind, Vec<(HandlerId, Handler)>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&ChannelEvent) -> Result<(), HandlerError> + Send + 'static,
    {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove one handler. Returns `false` if it was not registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        for list in self.handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(hid, _)| *hid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Run every handler for the event's kind. A failing handler is logged
    /// and does not stop the ones after it. Returns the number of handlers run.
    pub fn dispatch(&mut self, label: &str, event: &ChannelEvent) -> usize {
        let kind = event.kind();
        let Some(list) = self.handlers.get_mut(&kind) else {
            tracing::trace!(channel = label, kind = %kind, "No handler registered");
            return 0;
        };

        for (id, handler) in list.iter_mut() {
            if let Err(e) = handler(event) {
                tracing::warn!(
                    channel = label,
                    kind = %kind,
                    handler = id.0,
                    error = %e,
                    "Event handler failed"
                );
            }
        }
        list.len()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        f.debug_struct("HandlerTable").field("handlers", &counts).finish()
    }
}
