//! Named-event channels between the main process and its windows.
//!
//! Provides:
//! - A closed set of event kinds ([`ChannelEvent`], [`EventKind`])
//! - The JSON wire format (`{"name": ..., "payload": ...}`)
//! - Per-kind handler tables invoked in registration order
//! - [`Channel`], a window's end of its pipe to the main process
//! - [`MainChannel`], the main process inbox, and [`WindowLink`], its
//!   sending half towards one window

pub mod channel;
pub mod event;
pub mod handlers;
pub mod hub;
pub mod message;

pub use channel::Channel;
pub use event::{ChannelEvent, EventKind, LocaleChange, RestartRequired, ThemeChange, WindowReady};
pub use handlers::{HandlerError, HandlerId, HandlerTable};
pub use hub::{Envelope, MainChannel, WindowLink};
pub use message::{decode, encode, EventMessage};
