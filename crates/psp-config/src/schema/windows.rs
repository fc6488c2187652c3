//! Window size configuration types.

use psp_common::WindowKind;
use serde::{Deserialize, Deserializer, Serialize};

/// Width and height of a window in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Valid range: 50-4000.
    pub width: u32,
    /// Valid range: 50-4000.
    pub height: u32,
}

impl WindowSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Per-kind window sizes plus the screen margin used when positioning.
///
/// Sizes fall back per kind: `[windows.qss]` with only `width` keeps the
/// QSS default height.
#[derive(Debug, Clone, Serialize)]
pub struct WindowsConfig {
    pub psp: WindowSize,
    /// The QSS width is a maximum; it shrinks to fit narrow screens.
    pub qss: WindowSize,
    pub qss_widget: WindowSize,
    pub tooltip: WindowSize,
    pub survey: WindowSize,
    pub about: WindowSize,
    pub error: WindowSize,
    /// Gap kept between anchored windows and the screen edge (valid range: 0-200).
    pub margin: u32,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            psp: WindowSize::new(450, 600),
            qss: WindowSize::new(1030, 95),
            qss_widget: WindowSize::new(300, 360),
            tooltip: WindowSize::new(200, 60),
            survey: WindowSize::new(800, 600),
            about: WindowSize::new(400, 250),
            error: WindowSize::new(400, 250),
            margin: 10,
        }
    }
}

// =============================================================================
// PARTIAL TABLES
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SizeOverride {
    width: Option<u32>,
    height: Option<u32>,
}

impl SizeOverride {
    fn over(self, base: WindowSize) -> WindowSize {
        WindowSize {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WindowsOverride {
    psp: SizeOverride,
    qss: SizeOverride,
    qss_widget: SizeOverride,
    tooltip: SizeOverride,
    survey: SizeOverride,
    about: SizeOverride,
    error: SizeOverride,
    margin: Option<u32>,
}

impl<'de> Deserialize<'de> for WindowsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let found = WindowsOverride::deserialize(deserializer)?;
        let base = WindowsConfig::default();
        Ok(Self {
            psp: found.psp.over(base.psp),
            qss: found.qss.over(base.qss),
            qss_widget: found.qss_widget.over(base.qss_widget),
            tooltip: found.tooltip.over(base.tooltip),
            survey: found.survey.over(base.survey),
            about: found.about.over(base.about),
            error: found.error.over(base.error),
            margin: found.margin.unwrap_or(base.margin),
        })
    }
}

impl WindowsConfig {
    pub fn size_for(&self, kind: WindowKind) -> WindowSize {
        match kind {
            WindowKind::Psp => self.psp,
            WindowKind::Qss => self.qss,
            WindowKind::QssWidget => self.qss_widget,
            WindowKind::Tooltip => self.tooltip,
            WindowKind::Survey => self.survey,
            WindowKind::About => self.about,
            WindowKind::Error => self.error,
        }
    }
}
