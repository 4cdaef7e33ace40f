//! Margin computation for the content area and app bar.

use atrium_common::types::PanelState;

/// Horizontal margins applied to the content area and the app bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
}

/// A side's margin equals the drawer width when that drawer is open and
/// zero otherwise. Pure in its inputs; callers pass freshly read widths.
pub fn compute_margins(
    left: PanelState,
    right: PanelState,
    left_width: f64,
    right_width: f64,
) -> Margins {
    Margins {
        left: if left.is_open() { left_width } else { 0.0 },
        right: if right.is_open() { right_width } else { 0.0 },
    }
}

/// Format a pixel length for an inline style value.
pub fn css_px(value: f64) -> String {
    format!("{value}px")
}
