//! Graceful shutdown: close every window, then announce it.

use psp_common::AppEvent;

use super::core::PspApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl PspApp {
    /// Close all windows and stop accepting new ones. Safe to call twice.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        tracing::info!(windows = self.registry.len(), "Initiating graceful shutdown");

        for id in self.registry.ids() {
            self.close_window(id);
        }

        // Late messages from windows that were still talking.
        let dropped = self.pump();
        if dropped > 0 {
            tracing::debug!(dropped, "Discarded window events during shutdown");
        }

        self.shut_down = true;
        self.event_bus.publish(AppEvent::Shutdown);
        tracing::info!("Graceful shutdown complete");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

// =============================================================================
// TESTS
// =============================================================================
