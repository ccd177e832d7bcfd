//! Selection geometry: pointer positions and normalized bounding boxes.
//!
//! Pointer positions are raw offsets on the host surface (origin top-left,
//! y grows downward). A [`BoundingBox`] is anchored at its bottom-left corner:
//! `y` is the screen-y of the bottom edge and the top edge sits at
//! `y - height`.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Pointer offset relative to the host surface.
pub type PointerPosition = Point;

/// Width and height of the box seeded on drag start.
pub const SEED_SIZE: f64 = 1.0;

/// Axis-aligned selection rectangle reported to the selection callback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Bottom edge (the larger screen-y).
    pub y: f64,
    /// Horizontal extent, never negative.
    pub width: f64,
    /// Vertical extent, never negative.
    pub height: f64,
}

impl BoundingBox {
    /// Create a box from its bottom-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Minimal non-degenerate box anchored at a press point.
    pub fn seed(anchor: PointerPosition) -> Self {
        Self::new(anchor.x, anchor.y, SEED_SIZE, SEED_SIZE)
    }

    /// Screen-y of the top edge.
    pub fn top(&self) -> f64 {
        self.y - self.height
    }

    /// Screen-y of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y
    }

    /// Screen-x of the left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Screen-x of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Screen-space rectangle covered by this box.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }

    /// Build a box from a screen-space rectangle, in either corner order.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y1, rect.width(), rect.height())
    }

    /// Check whether a point lies inside the box, edges included.
    pub fn contains(&self, point: PointerPosition) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// A box with zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Normalize the rectangle spanned by the drag anchor and the current pointer.
///
/// The result is identical whichever corner the drag started from.
pub fn compute_box(anchor: PointerPosition, current: PointerPosition) -> BoundingBox {
    let x = current.x.min(anchor.x);
    let width = current.x.max(anchor.x) - x;
    let y = current.y.max(anchor.y);
    let height = y - current.y.min(anchor.y);
    BoundingBox::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_box_down_left() {
        let bbox = compute_box(Point::new(100.0, 50.0), Point::new(40.0, 150.0));
        assert_eq!(bbox, BoundingBox::new(40.0, 150.0, 60.0, 100.0));
    }

    #[test]
    fn test_compute_box_is_symmetric() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(50.0, 80.0);
        assert_eq!(compute_box(a, b), compute_box(b, a));
        assert_eq!(compute_box(a, b), BoundingBox::new(10.0, 80.0, 40.0, 70.0));
    }

    #[test]
    fn test_compute_box_all_directions_non_negative() {
        let anchor = Point::new(0.0, 0.0);
        for (dx, dy) in [(-3.0, -7.0), (3.0, -7.0), (-3.0, 7.0), (3.0, 7.0), (0.0, 0.0)] {
            let bbox = compute_box(anchor, Point::new(dx, dy));
            assert!(bbox.width >= 0.0);
            assert!(bbox.height >= 0.0);
        }
    }

    #[test]
    fn test_compute_box_same_point_is_degenerate() {
        let p = Point::new(20.0, 20.0);
        let bbox = compute_box(p, p);
        assert_eq!(bbox, BoundingBox::new(20.0, 20.0, 0.0, 0.0));
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn test_seed_box() {
        let bbox = BoundingBox::seed(Point::new(5.0, 6.0));
        assert_eq!(bbox, BoundingBox::new(5.0, 6.0, 1.0, 1.0));
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn test_to_rect_uses_bottom_edge() {
        let bbox = BoundingBox::new(40.0, 150.0, 60.0, 100.0);
        let rect = bbox.to_rect();
        assert_eq!(rect, Rect::new(40.0, 50.0, 100.0, 150.0));
        assert_eq!(bbox.top(), 50.0);
        assert_eq!(bbox.right(), 100.0);
    }

    #[test]
    fn test_from_rect_normalizes() {
        let bbox = BoundingBox::from_rect(Rect::new(100.0, 150.0, 40.0, 50.0));
        assert_eq!(bbox, BoundingBox::new(40.0, 150.0, 60.0, 100.0));
        assert_eq!(BoundingBox::from_rect(bbox.to_rect()), bbox);
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let bbox = BoundingBox::new(0.0, 10.0, 10.0, 10.0);
        assert!(bbox.contains(Point::new(0.0, 0.0)));
        assert!(bbox.contains(Point::new(10.0, 10.0)));
        assert!(bbox.contains(Point::new(5.0, 5.0)));
        assert!(!bbox.contains(Point::new(5.0, 10.5)));
        assert!(!bbox.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_serde_field_names() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
    }
}
