//! Item definitions for the editor canvas.

mod image;
mod polygon;
mod polyline;
mod rectangle;

pub use image::Image;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Unique identifier for items. `0` means "not yet added to a document".
pub type ItemId = u64;

/// Common trait for all item variants.
pub trait ItemTrait {
    /// Get the identifier.
    fn id(&self) -> ItemId;

    /// Whether the item is locked against drag/resize/vertex edits.
    fn locked(&self) -> bool;

    /// Get the bounding box in document coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in document coordinates) hits this item.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// The points that define the outline (rect corners or explicit vertices).
    fn outline(&self) -> Vec<Point>;

    /// Move the item by a document-space delta.
    fn translate(&mut self, delta: Vec2);

    /// Replace every defining point with `f(point)`.
    fn map_points(&mut self, f: &dyn Fn(Point) -> Point);
}

/// Tagged union over all item variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Rect(Rectangle),
    Polyline(Polyline),
    Polygon(Polygon),
    Image(Image),
}

impl Item {
    fn as_trait(&self) -> &dyn ItemTrait {
        match self {
            Item::Rect(s) => s,
            Item::Polyline(s) => s,
            Item::Polygon(s) => s,
            Item::Image(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ItemTrait {
        match self {
            Item::Rect(s) => s,
            Item::Polyline(s) => s,
            Item::Polygon(s) => s,
            Item::Image(s) => s,
        }
    }

    pub fn id(&self) -> ItemId {
        self.as_trait().id()
    }

    pub(crate) fn set_id(&mut self, id: ItemId) {
        match self {
            Item::Rect(s) => s.id = id,
            Item::Polyline(s) => s.id = id,
            Item::Polygon(s) => s.id = id,
            Item::Image(s) => s.id = id,
        }
    }

    pub fn locked(&self) -> bool {
        self.as_trait().locked()
    }

    pub fn set_locked(&mut self, locked: bool) {
        match self {
            Item::Rect(s) => s.locked = locked,
            Item::Polyline(s) => s.locked = locked,
            Item::Polygon(s) => s.locked = locked,
            Item::Image(s) => s.locked = locked,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn outline(&self) -> Vec<Point> {
        self.as_trait().outline()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    pub fn map_points(&mut self, f: &dyn Fn(Point) -> Point) {
        self.as_trait_mut().map_points(f);
    }

    /// Short lowercase tag, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Rect(_) => "rect",
            Item::Polyline(_) => "polyline",
            Item::Polygon(_) => "polygon",
            Item::Image(_) => "image",
        }
    }

    /// Editable vertices, for polylines and polygons only.
    pub fn vertices(&self) -> Option<&[Point]> {
        match self {
            Item::Polyline(s) => Some(&s.points),
            Item::Polygon(s) => Some(&s.points),
            _ => None,
        }
    }

    /// Whether the vertex list wraps around (polygon) or not (polyline).
    pub fn is_closed(&self) -> bool {
        matches!(self, Item::Polygon(_))
    }

    fn vertices_mut(&mut self) -> Option<&mut Vec<Point>> {
        match self {
            Item::Polyline(s) => Some(&mut s.points),
            Item::Polygon(s) => Some(&mut s.points),
            _ => None,
        }
    }

    fn min_vertices(&self) -> usize {
        if self.is_closed() { 3 } else { 2 }
    }

    /// Move one vertex. Returns false (and leaves the item untouched) when the
    /// item has no vertices or the index is out of range.
    pub fn move_vertex(&mut self, index: usize, to: Point) -> bool {
        match self.vertices_mut().and_then(|pts| pts.get_mut(index)) {
            Some(p) => {
                *p = to;
                true
            }
            None => false,
        }
    }

    /// Insert a vertex before `index` (`index == len` appends).
    pub fn insert_vertex(&mut self, index: usize, at: Point) -> bool {
        match self.vertices_mut() {
            Some(pts) if index <= pts.len() => {
                pts.insert(index, at);
                true
            }
            _ => false,
        }
    }

    /// Remove a vertex, refusing to go below the variant's minimum count.
    pub fn remove_vertex(&mut self, index: usize) -> bool {
        let min = self.min_vertices();
        match self.vertices_mut() {
            Some(pts) if index < pts.len() && pts.len() > min => {
                pts.remove(index);
                true
            }
            _ => false,
        }
    }
}

/// Inclusive containment test with a tolerance margin, shared by the box-shaped
/// variants. `kurbo::Rect::contains` is half-open, which would make the right
/// and bottom border unclickable.
pub(crate) fn rect_hit(rect: Rect, point: Point, tolerance: f64) -> bool {
    point.x >= rect.x0 - tolerance
        && point.x <= rect.x1 + tolerance
        && point.y >= rect.y0 - tolerance
        && point.y <= rect.y1 + tolerance
}

pub(crate) fn rect_corners(rect: Rect) -> Vec<Point> {
    vec![
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}
