//! Renderer trait abstraction.

use kurbo::{Point, Rect, Size, Stroke};
use peniko::Color;
use scatterselect_core::indicator::IndicatorState;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Background grid style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plain background.
    None,
    /// Evenly spaced grid lines.
    #[default]
    Lines,
}

/// A data point as drawn on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    /// Position in surface coordinates.
    pub position: Point,
    /// Whether the point is inside the last reported selection.
    pub selected: bool,
}

/// Resolved paint for the selection indicator.
#[derive(Debug, Clone)]
pub struct IndicatorPaint {
    /// Frame to fill and outline.
    pub frame: Rect,
    /// Fill color, with the fill opacity folded into alpha.
    pub fill: Color,
    /// Outline, absent when the stroke width is zero.
    pub stroke: Option<(Stroke, Color)>,
}

impl IndicatorPaint {
    /// Resolve the paint for `indicator`, or `None` when nothing should be drawn.
    /// A hidden indicator, or one with a zero-width or zero-height frame, draws nothing.
    pub fn resolve(indicator: &IndicatorState) -> Option<Self> {
        let frame = indicator.visible_frame()?;
        if frame.width() <= 0.0 || frame.height() <= 0.0 {
            return None;
        }

        let style = &indicator.style;
        let stroke = (style.stroke_width > 0.0).then(|| (style.stroke(), style.stroke_color()));
        Some(Self {
            frame,
            fill: style.fill_color(),
            stroke,
        })
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Color of unselected points.
    pub point_color: Color,
    /// Color of selected points.
    pub highlight_color: Color,
    /// Points to draw.
    pub points: &'a [PlotPoint],
    /// Selection indicator, drawn over the points while visible.
    pub indicator: Option<&'a IndicatorState>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            viewport_size,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            grid_style: GridStyle::Lines,
            point_color: Color::from_rgba8(100, 116, 139, 255), // Slate
            highlight_color: Color::from_rgba8(249, 115, 22, 255), // Orange
            points: &[],
            indicator: None,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the points to draw.
    pub fn with_points(mut self, points: &'a [PlotPoint]) -> Self {
        self.points = points;
        self
    }

    /// Set the selection indicator.
    pub fn with_indicator(mut self, indicator: &'a IndicatorState) -> Self {
        self.indicator = Some(indicator);
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
