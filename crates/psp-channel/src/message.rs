//! Wire format for channel messages.
//!
//! Every message is a JSON object `{"name": "<event-kind>", "payload": ...}`.
//! Action events (`close`, `undo`, ...) carry a `null` payload, and the
//! payload may be omitted entirely when decoding.

use psp_common::ChannelError;
use serde::{Deserialize, Serialize};

use crate::event::{ChannelEvent, EventKind};

/// An undecoded channel message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl EventMessage {
    /// Parse a raw JSON string into a message without validating the name.
    pub fn from_json(raw: &str) -> Result<Self, ChannelError> {
        serde_json::from_str(raw).map_err(|e| ChannelError::Decode(e.to_string()))
    }
}

/// Encode an event into its wire form.
pub fn encode(event: &ChannelEvent) -> Result<String, ChannelError> {
    let message = EventMessage {
        name: event.kind().as_str().to_string(),
        payload: event.payload()?,
    };
    serde_json::to_string(&message).map_err(|e| ChannelError::Encode(e.to_string()))
}

/// Decode a wire message.
///
/// Names outside the closed event set are rejected with
/// [`ChannelError::UnknownEvent`] before the payload is looked at.
pub fn decode(raw: &str) -> Result<ChannelEvent, ChannelError> {
    let message = EventMessage::from_json(raw)?;
    let kind: EventKind = message.name.parse()?;
    ChannelEvent::from_parts(kind, message.payload)
}
