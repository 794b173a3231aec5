//! Polyline item.

use super::{ItemId, ItemTrait};
use crate::geometry::{bounding_box, distance_point_to_polyline};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An open sequence of connected segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    #[serde(default)]
    pub(crate) id: ItemId,
    #[serde(default)]
    pub locked: bool,
    /// Vertices in drawing order.
    pub points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline from its vertices.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: 0,
            locked: false,
            points,
        }
    }

    /// A two-point line from `start` to `end`.
    pub fn line_from_points(start: Point, end: Point) -> Self {
        Self::from_points(vec![start, end])
    }
}

impl ItemTrait for Polyline {
    fn id(&self) -> ItemId {
        self.id
    }

    fn locked(&self) -> bool {
        self.locked
    }

    fn bounds(&self) -> Rect {
        bounding_box(&self.points).unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        distance_point_to_polyline(point, &self.points) <= tolerance
    }

    fn outline(&self) -> Vec<Point> {
        self.points.clone()
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    fn map_points(&mut self, f: &dyn Fn(Point) -> Point) {
        for p in &mut self.points {
            *p = f(*p);
        }
    }
}
