//! One end of an ordered, bidirectional message pipe.
//!
//! A [`Channel`] pair stands in for the process boundary between the main
//! process and one window: everything crossing it is JSON text, sends never
//! block, and messages from one sender arrive in the order they were sent.

use psp_common::{ChannelError, WindowId};
use tokio::sync::mpsc;

use crate::event::{ChannelEvent, EventKind};
use crate::handlers::{HandlerError, HandlerId, HandlerTable};
use crate::hub::Envelope;
use crate::message;

/// Where a channel's outgoing messages go.
pub(crate) enum Sink {
    /// Straight to the peer channel.
    Peer(mpsc::UnboundedSender<String>),
    /// Into the main process inbox, stamped with the sending window.
    Main {
        source: WindowId,
        tx: mpsc::UnboundedSender<Envelope>,
    },
}

impl Sink {
    fn send(&self, body: String) -> bool {
        match self {
            Sink::Peer(tx) => tx.send(body).is_ok(),
            Sink::Main { source, tx } => tx
                .send(Envelope {
                    source: *source,
                    body,
                })
                .is_ok(),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Sink::Peer(tx) => tx.is_closed(),
            Sink::Main { tx, .. } => tx.is_closed(),
        }
    }
}

pub struct Channel {
    label: String,
    tx: Sink,
    rx: mpsc::UnboundedReceiver<String>,
    handlers: HandlerTable,
}

impl Channel {
    /// Create two connected ends. What one sends, the other receives.
    pub fn pair(label_a: impl Into<String>, label_b: impl Into<String>) -> (Channel, Channel) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        (
            Channel::new(label_a.into(), Sink::Peer(a_tx), a_rx),
            Channel::new(label_b.into(), Sink::Peer(b_tx), b_rx),
        )
    }

    pub(crate) fn new(label: String, tx: Sink, rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            label,
            tx,
            rx,
            handlers: HandlerTable::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Send an event to the peer, reporting transport failures.
    pub fn try_send(&self, event: &ChannelEvent) -> Result<(), ChannelError> {
        let raw = message::encode(event)?;
        if self.tx.send(raw) {
            Ok(())
        } else {
            Err(ChannelError::Closed(self.label.clone()))
        }
    }

    /// Fire-and-forget send. Events sent to a peer that has gone away are
    /// dropped. Returns whether the event was handed to the transport.
    pub fn send(&self, event: &ChannelEvent) -> bool {
        match self.try_send(event) {
            Ok(()) => {
                tracing::trace!(channel = %self.label, kind = %event.kind(), "Event sent");
                true
            }
            Err(ChannelError::Closed(_)) => {
                tracing::debug!(
                    channel = %self.label,
                    kind = %event.kind(),
                    "Peer closed, event dropped"
                );
                false
            }
            Err(e) => {
                tracing::warn!(channel = %self.label, error = %e, "Failed to send event");
                false
            }
        }
    }

    /// Whether the other end has been dropped.
    pub fn is_peer_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&ChannelEvent) -> Result<(), HandlerError> + Send + 'static,
    {
        self.handlers.on(kind, handler)
    }

    pub fn off(&mut self, id: HandlerId) -> bool {
        self.handlers.off(id)
    }

    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Take the next well-formed event without waiting.
    ///
    /// Malformed or unknown messages are logged and skipped.
    pub fn try_next(&mut self) -> Option<ChannelEvent> {
        while let Ok(raw) = self.rx.try_recv() {
            if let Some(event) = self.decode_or_log(&raw) {
                return Some(event);
            }
        }
        None
    }

    /// Run this end's handlers for one event.
    pub fn dispatch(&mut self, event: &ChannelEvent) -> usize {
        self.handlers.dispatch(&self.label, event)
    }

    /// Drain every waiting event through the handlers. Returns how many
    /// events were dispatched.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.try_next() {
            self.dispatch(&event);
            count += 1;
        }
        count
    }

    fn decode_or_log(&self, raw: &str) -> Option<ChannelEvent> {
        match message::decode(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(
                    channel = %self.label,
                    body_len = raw.len(),
                    error = %e,
                    "Message rejected"
                );
                None
            }
        }
    }

    /// Push a raw string onto the peer's queue, bypassing the encoder.
    #[cfg(test)]
    pub(crate) fn send_raw(&self, raw: &str) {
        self.tx.send(raw.to_string());
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("label", &self.label)
            .field("handlers", &self.handlers)
            .finish()
    }
}
