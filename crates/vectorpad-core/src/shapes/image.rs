//! Image item referencing an external raster resource.

use super::{ItemId, ItemTrait, rect_corners, rect_hit};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// An image placed on the canvas. Pixel data lives outside the document; the
/// item only keeps a reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub(crate) id: ItemId,
    #[serde(default)]
    pub locked: bool,
    /// Top-left corner position.
    pub origin: Point,
    /// Display size.
    pub size: Size,
    /// Resource reference (URL or asset key) resolved by the view layer.
    pub href: String,
}

impl Image {
    pub fn new(origin: Point, size: Size, href: impl Into<String>) -> Self {
        Self {
            id: 0,
            locked: false,
            origin,
            size: Size::new(size.width.abs(), size.height.abs()),
            href: href.into(),
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

impl ItemTrait for Image {
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
        let normalized = Rect::from_points(p1, p2);
        self.origin = normalized.origin();
        self.size = normalized.size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_keeps_href_through_moves() {
        let mut img = Image::new(Point::new(1.0, 2.0), Size::new(30.0, 20.0), "assets/cat.png");
        img.translate(Vec2::new(4.0, 4.0));
        assert_eq!(img.origin, Point::new(5.0, 6.0));
        assert_eq!(img.href, "assets/cat.png");
        assert!(img.hit_test(Point::new(35.0, 26.0), 0.0));
    }

    #[test]
    fn test_image_scale() {
        let mut img = Image::new(Point::ZERO, Size::new(10.0, 10.0), "a");
        img.map_points(&|p| Point::new(p.x * 2.0, p.y * 3.0));
        assert_eq!(img.size, Size::new(20.0, 30.0));
    }
}
