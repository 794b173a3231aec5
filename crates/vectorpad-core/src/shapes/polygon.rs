//! Polygon item.

use super::{ItemId, ItemTrait};
use crate::geometry::{bounding_box, contains_point, distance_point_to_segment};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A closed polygon. The closing edge from the last vertex back to the first
/// is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(default)]
    pub(crate) id: ItemId,
    #[serde(default)]
    pub locked: bool,
    pub points: Vec<Point>,
}

impl Polygon {
    /// Minimum number of vertices for a committed polygon.
    pub const MIN_VERTICES: usize = 3;

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: 0,
            locked: false,
            points,
        }
    }

    /// In-progress preview: the committed vertices followed by the live pointer.
    pub fn preview(points: &[Point], moving: Point) -> Self {
        let mut pts = points.to_vec();
        pts.push(moving);
        Self::from_points(pts)
    }

    fn edge_distance(&self, point: Point) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| distance_point_to_segment(point, self.points[i], self.points[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min)
    }
}

impl ItemTrait for Polygon {
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
        contains_point(&self.points, point) || self.edge_distance(point) <= tolerance
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
