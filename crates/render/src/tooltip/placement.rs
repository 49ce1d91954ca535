//! Tooltip positioning inside the viewport.

use crate::interaction::ScreenPoint;

/// Vertical offset between the pointer and the tooltip.
pub const TOOLTIP_OFFSET: f64 = 20.0;
/// Minimum gap kept to the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Visible viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub width: f64,
    pub height: f64,
}

/// Rendered tooltip size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
}

impl Default for TooltipSize {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
        }
    }
}

/// Top-left corner of the tooltip in fixed viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    /// Opened to the left of the anchor.
    pub flipped_x: bool,
    /// Opened above the anchor.
    pub flipped_y: bool,
}

/// Places a tooltip at `anchor`, flipping away from overflowing edges and
/// clamping so it never leaves the viewport.
pub fn place_tooltip(anchor: ScreenPoint, size: TooltipSize, bounds: ViewportBounds) -> Placement {
    let mut left = anchor.x;
    let mut top = anchor.y - TOOLTIP_OFFSET;

    let flipped_x = left + size.width > bounds.width - VIEWPORT_MARGIN;
    if flipped_x {
        left = anchor.x - size.width;
    }
    let flipped_y = top + size.height > bounds.height - VIEWPORT_MARGIN;
    if flipped_y {
        top = anchor.y - size.height - TOOLTIP_OFFSET;
    }

    Placement {
        left: clamp_axis(left, size.width, bounds.width),
        top: clamp_axis(top, size.height, bounds.height),
        flipped_x,
        flipped_y,
    }
}

fn clamp_axis(value: f64, extent: f64, bound: f64) -> f64 {
    let max = (bound - extent - VIEWPORT_MARGIN).max(VIEWPORT_MARGIN);
    value.clamp(VIEWPORT_MARGIN, max)
}
