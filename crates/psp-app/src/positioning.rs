//! Window placement on the screen work area.

use psp_common::{Rect, WindowKind};
use psp_config::schema::{WindowSize, WindowsConfig};

// =============================================================================
// PLACEMENT
// =============================================================================

/// What a window is placed relative to.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anchors {
    /// Bounds of the open QSS, if any.
    pub qss: Option<Rect>,
    /// The element a popup points at (a QSS button, a hovered control).
    pub target: Option<Rect>,
}

/// Compute the bounds of a new window of `kind`.
///
/// Tooltips without a target fall back to sitting above the QSS.
pub fn place(kind: WindowKind, config: &WindowsConfig, screen: Rect, anchors: Anchors) -> Rect {
    let size = config.size_for(kind);
    let margin = f64::from(config.margin);

    match kind {
        WindowKind::Psp | WindowKind::Survey | WindowKind::About | WindowKind::Error => {
            centered(screen, size)
        }
        WindowKind::Qss => bottom_right(screen, size, margin),
        WindowKind::QssWidget => {
            let qss = anchors
                .qss
                .unwrap_or_else(|| bottom_right(screen, config.qss, margin));
            let target = anchors.target.unwrap_or(Rect::new(
                qss.right() - f64::from(size.width),
                qss.y,
                f64::from(size.width),
                qss.height,
            ));
            above(target, qss.y, size, screen, margin)
        }
        WindowKind::Tooltip => {
            let target = anchors
                .target
                .or(anchors.qss)
                .unwrap_or_else(|| bottom_right(screen, config.qss, margin));
            above(target, target.y, size, screen, margin)
        }
    }
}

/// Center a window on the screen.
pub fn centered(screen: Rect, size: WindowSize) -> Rect {
    let width = f64::from(size.width).min(screen.width);
    let height = f64::from(size.height).min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2.0,
        screen.y + (screen.height - height) / 2.0,
        width,
        height,
    )
}

/// Anchor a window to the bottom-right corner, no wider than the screen
/// minus margins.
pub fn bottom_right(screen: Rect, size: WindowSize, margin: f64) -> Rect {
    let width = f64::from(size.width).min((screen.width - 2.0 * margin).max(0.0));
    let height = f64::from(size.height);
    Rect::new(
        screen.right() - margin - width,
        screen.bottom() - margin - height,
        width,
        height,
    )
}

/// Place a window horizontally centered over `target` with its bottom edge a
/// margin above `top`, clamped to the screen.
fn above(target: Rect, top: f64, size: WindowSize, screen: Rect, margin: f64) -> Rect {
    let width = f64::from(size.width);
    let height = f64::from(size.height);

    let x = clamp(
        target.x + (target.width - width) / 2.0,
        screen.x + margin,
        screen.right() - margin - width,
    );
    let y = clamp(top - margin - height, screen.y + margin, screen.bottom() - height);
    Rect::new(x, y, width, height)
}

/// Clamp `value` to `[min, max]`, preferring `min` when the range is empty.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

// =============================================================================
// TESTS
// =============================================================================
