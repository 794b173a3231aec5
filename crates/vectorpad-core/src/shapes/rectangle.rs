//! Rectangle item.

use super::{ItemId, ItemTrait, rect_corners, rect_hit};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(default)]
    pub(crate) id: ItemId,
    /// Locked items stay selectable but cannot be moved or resized.
    #[serde(default)]
    pub locked: bool,
    /// Top-left corner position.
    pub origin: Point,
    /// Width and height, never negative.
    pub size: Size,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: 0,
            locked: false,
            origin,
            size: Size::new(width.abs(), height.abs()),
        }
    }

    /// Create a rectangle from two opposite corner points in any order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(Point::new(min_x, min_y), width, height)
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Whether the rectangle encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.size.width == 0.0 || self.size.height == 0.0
    }
}

impl ItemTrait for Rectangle {
    fn id(&self) -> ItemId {
        self.id
    }

    fn locked(&self) -> bool {
        self.locked
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        rect_hit(self.as_rect(), point, tolerance)
    }

    fn outline(&self) -> Vec<Point> {
        rect_corners(self.as_rect())
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn map_points(&mut self, f: &dyn Fn(Point) -> Point) {
        let rect = self.as_rect();
        let p1 = f(Point::new(rect.x0, rect.y0));
        let p2 = f(Point::new(rect.x1, rect.y1));
        let mapped = Self::from_corners(p1, p2);
        self.origin = mapped.origin;
        self.size = mapped.size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_from_corners() {
        let rect = Rectangle::from_corners(Point::new(100.0, 100.0), Point::new(50.0, 50.0));
        assert!((rect.origin.x - 50.0).abs() < f64::EPSILON);
        assert!((rect.origin.y - 50.0).abs() < f64::EPSILON);
        assert!((rect.size.width - 50.0).abs() < f64::EPSILON);
        assert!((rect.size.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_inclusive_edges() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(rect.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(100.0, 100.0), 0.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(105.0, 50.0), 10.0));
    }

    #[test]
    fn test_map_points_normalizes_flip() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0);
        // Mirror around x = 0.
        rect.map_points(&|p| Point::new(-p.x, p.y));
        assert_eq!(rect.as_rect(), Rect::new(-10.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Rectangle::from_corners(Point::ZERO, Point::new(0.0, 5.0)).is_degenerate());
        assert!(!Rectangle::new(Point::ZERO, 1.0, 1.0).is_degenerate());
    }
}
