//! Demo data set: a scatter plot whose points are picked by the selection box.

use kurbo::{Point, Rect};
use scatterselect_core::BoundingBox;
use scatterselect_render::PlotPoint;

/// Simple seeded random number generator (xorshift32).
/// Keeps the demo data identical across runs.
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Points in surface coordinates with their selection state.
#[derive(Debug, Clone, Default)]
pub struct ScatterPlot {
    points: Vec<PlotPoint>,
}

impl ScatterPlot {
    /// Build a plot from explicit positions, none selected.
    pub fn from_positions(positions: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: positions
                .into_iter()
                .map(|position| PlotPoint {
                    position,
                    selected: false,
                })
                .collect(),
        }
    }

    /// Scatter `count` points uniformly inside `bounds`.
    pub fn generate(count: usize, bounds: Rect, seed: u32) -> Self {
        let bounds = bounds.abs();
        let mut rng = SimpleRng::new(seed);
        Self::from_positions((0..count).map(|_| {
            Point::new(
                bounds.x0 + rng.next_f64() * bounds.width(),
                bounds.y0 + rng.next_f64() * bounds.height(),
            )
        }))
    }

    /// Mark the points inside `bbox` as selected, clearing the rest.
    /// Returns how many points were selected.
    pub fn select_in(&mut self, bbox: &BoundingBox) -> usize {
        let mut count = 0;
        for point in &mut self.points {
            point.selected = bbox.contains(point.position);
            count += usize::from(point.selected);
        }
        count
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        for point in &mut self.points {
            point.selected = false;
        }
    }

    /// Points for rendering.
    pub fn plot_points(&self) -> &[PlotPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the plot has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of selected points.
    pub fn selected_count(&self) -> usize {
        self.points.iter().filter(|p| p.selected).count()
    }
}
