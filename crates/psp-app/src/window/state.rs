use std::fmt;

/// Lifecycle of a window wrapper.
///
/// `Created -> Initializing -> Live -> Closed`. `Closed` is terminal and
/// reachable from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    Created,
    Initializing,
    Live,
    Closed,
}

impl WindowState {
    pub fn can_transition_to(self, next: WindowState) -> bool {
        matches!(
            (self, next),
            (WindowState::Created, WindowState::Initializing)
                | (WindowState::Initializing, WindowState::Live)
                | (
                    WindowState::Created | WindowState::Initializing | WindowState::Live,
                    WindowState::Closed
                )
        )
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowState::Created => "created",
            WindowState::Initializing => "initializing",
            WindowState::Live => "live",
            WindowState::Closed => "closed",
        };
        f.write_str(name)
    }
}
