//! Main-process coordinator.
//!
//! Owns the settings store, the window registry and the inbox every window
//! sends into. Drains window events, applies them to the store and forwards
//! the results to interested windows.

mod core;
mod dispatch;
mod settings_handlers;
mod shutdown;
mod windows;

pub use self::core::PspApp;
pub use windows::OpenRequest;

#[cfg(test)]
mod tests;
