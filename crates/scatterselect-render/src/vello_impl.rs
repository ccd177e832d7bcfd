//! Vello-based renderer implementation.

use crate::renderer::{GridStyle, IndicatorPaint, PlotPoint, RenderContext, Renderer};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Stroke};
use peniko::{Color, Fill};
use scatterselect_core::indicator::IndicatorState;
use vello::Scene;

/// Spacing between grid lines in physical pixels.
const GRID_SIZE: f64 = 40.0;
/// Radius of an unselected point.
const POINT_RADIUS: f64 = 3.0;
/// Radius of a selected point.
const SELECTED_POINT_RADIUS: f64 = 4.5;
/// Flattening tolerance for point circles.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new renderer with an empty scene.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene, leaving an empty one in its place.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Get a reference to the scene being built.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn render_grid_lines(&mut self, viewport: Rect, transform: Affine) {
        let grid_color = Color::from_rgba8(200, 200, 200, 100);
        let stroke = Stroke::new(0.5);

        // Batch all lines into a single path
        let mut path = BezPath::new();

        let mut x = viewport.x0;
        while x <= viewport.x1 {
            path.move_to(Point::new(x, viewport.y0));
            path.line_to(Point::new(x, viewport.y1));
            x += GRID_SIZE;
        }

        let mut y = viewport.y0;
        while y <= viewport.y1 {
            path.move_to(Point::new(viewport.x0, y));
            path.line_to(Point::new(viewport.x1, y));
            y += GRID_SIZE;
        }

        self.scene.stroke(&stroke, transform, grid_color, None, &path);
    }

    /// Render the points, unselected first so highlights stay on top.
    fn render_points(&mut self, points: &[PlotPoint], transform: Affine, color: Color, highlight: Color) {
        let mut plain = BezPath::new();
        let mut selected = BezPath::new();
        for point in points {
            if point.selected {
                selected.extend(
                    Circle::new(point.position, SELECTED_POINT_RADIUS).path_elements(CIRCLE_TOLERANCE),
                );
            } else {
                plain.extend(Circle::new(point.position, POINT_RADIUS).path_elements(CIRCLE_TOLERANCE));
            }
        }

        if !plain.elements().is_empty() {
            self.scene.fill(Fill::NonZero, transform, color, None, &plain);
        }
        if !selected.elements().is_empty() {
            self.scene.fill(Fill::NonZero, transform, highlight, None, &selected);
        }
    }

    /// Render the selection indicator with the style it was built with.
    pub fn render_indicator(&mut self, indicator: &IndicatorState, transform: Affine) {
        let Some(paint) = IndicatorPaint::resolve(indicator) else {
            return;
        };

        self.scene
            .fill(Fill::NonZero, transform, paint.fill, None, &paint.frame);
        if let Some((stroke, color)) = &paint.stroke {
            self.scene.stroke(stroke, transform, *color, None, &paint.frame);
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();

        let transform = Affine::IDENTITY;

        match ctx.grid_style {
            GridStyle::None => {}
            GridStyle::Lines => {
                self.render_grid_lines(
                    Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height),
                    transform,
                );
            }
        }

        self.render_points(ctx.points, transform, ctx.point_color, ctx.highlight_color);

        if let Some(indicator) = ctx.indicator {
            self.render_indicator(indicator, transform);
        }

        log::trace!("Built scene with {} points", ctx.points.len());
    }
}
