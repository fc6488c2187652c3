use std::collections::{BTreeMap, HashSet};

use psp_channel::{ChannelEvent, EventKind, WindowLink};
use psp_common::{PspError, Rect, Result, WindowId, WindowKind};
use tracing::debug;

/// Main's record of one open window.
#[derive(Debug)]
pub struct WindowEntry {
    pub kind: WindowKind,
    pub bounds: Rect,
    link: WindowLink,
    subscriptions: HashSet<EventKind>,
    /// Set once the window has announced itself and received its snapshot.
    ready: bool,
}

impl WindowEntry {
    /// Send to this window regardless of its subscriptions.
    pub fn send(&self, event: &ChannelEvent) -> bool {
        self.link.send(event)
    }

    /// Whether a broadcast of `kind` should reach this window.
    /// Snapshots and close requests need no subscription.
    pub fn wants(&self, kind: EventKind) -> bool {
        self.ready
            && (matches!(kind, EventKind::Snapshot | EventKind::Close)
                || self.subscriptions.contains(&kind))
    }
}

/// Maps window ids to their links and subscriptions.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, WindowEntry>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window. Ids must be unique among open windows.
    pub fn register(
        &mut self,
        id: WindowId,
        kind: WindowKind,
        bounds: Rect,
        link: WindowLink,
    ) -> Result<()> {
        if self.windows.contains_key(&id) {
            return Err(PspError::DuplicateWindow(id));
        }
        self.windows.insert(
            id,
            WindowEntry {
                kind,
                bounds,
                link,
                subscriptions: HashSet::new(),
                ready: false,
            },
        );
        debug!(window_id = %id, kind = %kind, "Window registered");
        Ok(())
    }

    /// Record a window's subscriptions and mark it ready for broadcasts.
    pub fn mark_ready(&mut self, id: WindowId, subscriptions: &[EventKind]) -> bool {
        match self.windows.get_mut(&id) {
            Some(entry) => {
                entry.subscriptions = subscriptions.iter().copied().collect();
                entry.ready = true;
                true
            }
            None => false,
        }
    }

    pub fn unregister(&mut self, id: WindowId) -> Option<WindowEntry> {
        let entry = self.windows.remove(&id)?;
        debug!(window_id = %id, kind = %entry.kind, "Window unregistered");
        Some(entry)
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowEntry> {
        self.windows.get(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// First open window of `kind`, if any.
    pub fn find_kind(&self, kind: WindowKind) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|(_, e)| e.kind == kind)
            .map(|(id, _)| *id)
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn ids_where(&self, pred: impl Fn(&WindowEntry) -> bool) -> Vec<WindowId> {
        self.windows
            .iter()
            .filter(|(_, e)| pred(e))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Send to one window regardless of its subscriptions.
    pub fn send_to(&self, id: WindowId, event: &ChannelEvent) -> bool {
        match self.windows.get(&id) {
            Some(entry) => entry.send(event),
            None => {
                debug!(window_id = %id, kind = %event.kind(), "No such window, event dropped");
                false
            }
        }
    }

    /// Send to every ready window that wants this kind of event, in window id
    /// order. Returns the number of windows reached.
    pub fn broadcast(&self, event: &ChannelEvent) -> usize {
        let kind = event.kind();
        self.windows
            .values()
            .filter(|e| e.wants(kind))
            .filter(|e| e.send(event))
            .count()
    }
}
