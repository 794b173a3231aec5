//! Geometry kernel: distances, containment and bounding boxes.
//!
//! Everything here is pure and works on plain IEEE-754 doubles. No epsilon is
//! applied unless a caller passes one in.

use kurbo::{Point, Rect};

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}

fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Distance from a point to the segment `a -> b`.
///
/// A zero-length segment degrades to the distance between `point` and `a`.
pub fn distance_point_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let length2 = distance_squared(a, b);
    if length2 == 0.0 {
        return distance(point, a);
    }
    let t = ((point.x - a.x) * (b.x - a.x) + (point.y - a.y) * (b.y - a.y)) / length2;
    if t <= 0.0 {
        distance(a, point)
    } else if t >= 1.0 {
        distance(b, point)
    } else {
        let projection = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
        distance(point, projection)
    }
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// A single point polyline returns the distance to that point; an empty one
/// returns infinity.
pub fn distance_point_to_polyline(point: Point, points: &[Point]) -> f64 {
    if let [only] = points {
        return distance(point, *only);
    }
    points
        .windows(2)
        .map(|w| distance_point_to_segment(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd ray casting test.
///
/// Points exactly on an edge follow the half-open convention of the classic
/// pnpoly routine: for an axis-aligned polygon the low-x and low-y edges test
/// inside and the high-x and high-y edges test outside, so two polygons
/// sharing an edge never both claim a point on it.
pub fn contains_point(vertices: &[Point], p: Point) -> bool {
    let mut inside = false;
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);
        let intersect = (yi > p.y) != (yj > p.y) && p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi;
        if intersect {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box of a set of points, `None` when empty.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let init = Rect::new(first.x, first.y, first.x, first.y);
    Some(points[1..].iter().fold(init, |r, p| {
        Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y))
    }))
}

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round(value: f64, decimals: i32) -> f64 {
    let t = 10f64.powi(decimals);
    (value * t).round() / t
}

/// Shorthand for rounding to three decimals, used when reporting coordinates.
pub fn round3(value: f64) -> f64 {
    round(value, 3)
}

/// Midpoint of the segment `a -> b`.
pub fn segment_midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Build the coordinate updater used while resizing.
///
/// The returned function maps `start` to `end` and keeps `anchor` fixed,
/// scaling every other coordinate linearly around the anchor. When `start`
/// coincides with `anchor` there is no scale to derive and the updater is the
/// identity.
pub fn coordinate_updater(anchor: f64, start: f64, end: f64) -> impl Fn(f64) -> f64 {
    let span = start - anchor;
    move |target: f64| {
        if span == 0.0 {
            target
        } else {
            anchor + (end - anchor) * (target - anchor) / span
        }
    }
}
