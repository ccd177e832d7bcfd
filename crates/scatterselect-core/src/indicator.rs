//! The on-screen rectangle previewing a selection while dragging.

use crate::style::SelectionStyle;
use kurbo::{Point, Rect};

/// Render target for the selection indicator.
///
/// The selector only ever drives the indicator through this trait, so hosts
/// can back it with a retained scene node or with [`IndicatorState`] read by
/// an immediate-mode renderer.
pub trait Indicator {
    /// Apply the visual style. Called once, at selector construction.
    fn apply_style(&mut self, style: &SelectionStyle);

    /// Show or hide the indicator.
    fn set_visible(&mut self, visible: bool);

    /// Position and size the indicator in surface coordinates.
    fn set_frame(&mut self, frame: Rect);
}

/// Retained indicator state for renderers that redraw every frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorState {
    /// Whether the indicator should be drawn.
    pub visible: bool,
    /// Frame in surface coordinates.
    pub frame: Rect,
    /// Style applied at construction.
    pub style: SelectionStyle,
}

impl IndicatorState {
    /// Create a hidden, zero-size indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame to draw, if the indicator is visible.
    pub fn visible_frame(&self) -> Option<Rect> {
        self.visible.then_some(self.frame)
    }
}

impl Indicator for IndicatorState {
    fn apply_style(&mut self, style: &SelectionStyle) {
        self.style = style.clone();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

/// Zero-size frame at a point.
pub(crate) fn collapsed_at(origin: Point) -> Rect {
    Rect::from_origin_size(origin, kurbo::Size::ZERO)
}
