use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// The UI surfaces the front-end can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    /// Personalization settings panel.
    Psp,
    /// Quick-set strip.
    Qss,
    /// Popup opened from a QSS button.
    QssWidget,
    Tooltip,
    Survey,
    About,
    Error,
}

impl WindowKind {
    pub const ALL: [WindowKind; 7] = [
        WindowKind::Psp,
        WindowKind::Qss,
        WindowKind::QssWidget,
        WindowKind::Tooltip,
        WindowKind::Survey,
        WindowKind::About,
        WindowKind::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::Psp => "psp",
            WindowKind::Qss => "qss",
            WindowKind::QssWidget => "qss-widget",
            WindowKind::Tooltip => "tooltip",
            WindowKind::Survey => "survey",
            WindowKind::About => "about",
            WindowKind::Error => "error",
        }
    }

    /// Only one window of a singleton kind may be open at a time.
    pub fn is_singleton(&self) -> bool {
        matches!(self, WindowKind::Psp | WindowKind::Qss | WindowKind::About)
    }

    /// Short-lived popups that are dismissed on key-out.
    pub fn is_transient(&self) -> bool {
        matches!(self, WindowKind::QssWidget | WindowKind::Tooltip)
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WindowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown window kind: {s}"))
    }
}
