//! Main-process side of the window channels.
//!
//! Every window sends into one shared inbox so the main process sees
//! messages from all windows in the order they were sent. Messages to a
//! window go out through that window's [`WindowLink`].

use psp_common::{ChannelError, WindowId};
use tokio::sync::mpsc;

use crate::channel::{Channel, Sink};
use crate::event::ChannelEvent;
use crate::message;

/// A raw message from a window, stamped with its sender.
#[derive(Debug)]
pub struct Envelope {
    pub source: WindowId,
    pub body: String,
}

/// Main's sending half towards one window.
#[derive(Debug)]
pub struct WindowLink {
    target: WindowId,
    tx: mpsc::UnboundedSender<String>,
}

impl WindowLink {
    pub fn target(&self) -> WindowId {
        self.target
    }

    pub fn try_send(&self, event: &ChannelEvent) -> Result<(), ChannelError> {
        let raw = message::encode(event)?;
        self.tx
            .send(raw)
            .map_err(|_| ChannelError::Closed(self.target.to_string()))
    }

    /// Fire-and-forget send. Events for a window that has gone away are
    /// dropped. Returns whether the event was handed to the transport.
    pub fn send(&self, event: &ChannelEvent) -> bool {
        match self.try_send(event) {
            Ok(()) => true,
            Err(ChannelError::Closed(_)) => {
                tracing::debug!(
                    window_id = %self.target,
                    kind = %event.kind(),
                    "Window gone, event dropped"
                );
                false
            }
            Err(e) => {
                tracing::warn!(window_id = %self.target, error = %e, "Failed to send event");
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The main process inbox.
pub struct MainChannel {
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl Default for MainChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl MainChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Create the channel pair for a new window: main keeps the link, the
    /// window gets the [`Channel`].
    pub fn connect(&self, id: WindowId) -> (WindowLink, Channel) {
        let (tx, rx) = mpsc::unbounded_channel();
        let link = WindowLink { target: id, tx };
        let sink = Sink::Main {
            source: id,
            tx: self.tx.clone(),
        };
        (link, Channel::new(id.to_string(), sink, rx))
    }

    /// Take the next well-formed event from any window without waiting.
    /// Malformed or unknown messages are logged and skipped.
    pub fn try_next(&mut self) -> Option<(WindowId, ChannelEvent)> {
        while let Ok(envelope) = self.rx.try_recv() {
            if let Some(event) = decode_or_log(&envelope) {
                return Some((envelope.source, event));
            }
        }
        None
    }
}

fn decode_or_log(envelope: &Envelope) -> Option<ChannelEvent> {
    match message::decode(&envelope.body) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(
                window_id = %envelope.source,
                body_len = envelope.body.len(),
                error = %e,
                "Window message rejected"
            );
            None
        }
    }
}
