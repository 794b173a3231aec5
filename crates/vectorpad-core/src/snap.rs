//! Pointer adjustment: cement (snap onto anchors) and align (axis guides).

use crate::document::Document;
use crate::shapes::{Item, ItemId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An adjustment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustConfig {
    /// Snap exactly onto a nearby anchor.
    Cement,
    /// Match one axis of a nearby anchor, independently per axis.
    Align,
}

/// The full set used while drawing or editing vertices.
pub const DRAWING_CONFIGS: [AdjustConfig; 2] = [AdjustConfig::Cement, AdjustConfig::Align];

/// Type of anchor, for visual feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorKind {
    /// Explicit vertex (or rect corner).
    Vertex,
    /// Bounding-box corner that is not already a vertex.
    Corner,
    Center,
}

/// A point other pointers can snap to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub point: Point,
    pub kind: AnchorKind,
    pub item: ItemId,
}

/// Which strategies changed the point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applied {
    pub cement: bool,
    pub align: bool,
}

impl Applied {
    pub fn any(&self) -> bool {
        self.cement || self.align
    }
}

/// Anchors the aligned axes were taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignInfo {
    /// Anchor sharing the adjusted point's y (horizontal guide).
    pub horizontal_point: Option<Point>,
    /// Anchor sharing the adjusted point's x (vertical guide).
    pub vertical_point: Option<Point>,
}

/// Result of adjusting one pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustResult {
    pub point: Point,
    pub applied: Applied,
    pub info: AlignInfo,
}

impl AdjustResult {
    /// The unadjusted point.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            applied: Applied::default(),
            info: AlignInfo::default(),
        }
    }
}

/// Collect anchors from a shape's bounds.
fn anchors_from_bounds(bounds: Rect, item: ItemId, outline: &[Point]) -> Vec<Anchor> {
    let corners = [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x1, bounds.y1),
        Point::new(bounds.x0, bounds.y1),
    ];
    let mut anchors: Vec<Anchor> = corners
        .into_iter()
        .filter(|c| !outline.contains(c))
        .map(|point| Anchor {
            point,
            kind: AnchorKind::Corner,
            item,
        })
        .collect();
    anchors.push(Anchor {
        point: bounds.center(),
        kind: AnchorKind::Center,
        item,
    });
    anchors
}

/// Anchors contributed by a single item.
pub fn item_anchors(item: &Item) -> Vec<Anchor> {
    let id = item.id();
    let outline = item.outline();
    let mut anchors: Vec<Anchor> = outline
        .iter()
        .map(|&point| Anchor {
            point,
            kind: AnchorKind::Vertex,
            item: id,
        })
        .collect();
    anchors.extend(anchors_from_bounds(item.bounds(), id, &outline));
    anchors
}

/// Every anchor in the document, skipping the `exclude`d items.
pub fn collect_anchors(doc: &Document, exclude: &[ItemId]) -> Vec<Anchor> {
    doc.items_ordered()
        .filter(|item| !exclude.contains(&item.id()))
        .flat_map(item_anchors)
        .collect()
}

/// Adjust `point` against `anchors` using the given strategies. Distances are
/// compared against `sense_range / k`, so the snap radius is constant on screen.
pub fn adjust(
    point: Point,
    anchors: &[Anchor],
    configs: &[AdjustConfig],
    sense_range: f64,
    k: f64,
) -> AdjustResult {
    let threshold = sense_range / k;
    let mut result = AdjustResult::none(point);

    if configs.contains(&AdjustConfig::Cement) {
        if let Some(anchor) = nearest(point, anchors, threshold) {
            result.point = anchor.point;
            result.applied.cement = true;
            // Both axes are fixed; align has nothing left to do.
            return result;
        }
    }

    if configs.contains(&AdjustConfig::Align) {
        if let Some(anchor) = nearest_on_axis(anchors, threshold, |a| (a.point.y - point.y).abs()) {
            result.point.y = anchor.point.y;
            result.info.horizontal_point = Some(anchor.point);
            result.applied.align = true;
        }
        if let Some(anchor) = nearest_on_axis(anchors, threshold, |a| (a.point.x - point.x).abs()) {
            result.point.x = anchor.point.x;
            result.info.vertical_point = Some(anchor.point);
            result.applied.align = true;
        }
    }

    if result.applied.any() {
        log::trace!("adjusted {:?} -> {:?}", point, result.point);
    }
    result
}

fn nearest(point: Point, anchors: &[Anchor], threshold: f64) -> Option<&Anchor> {
    let mut best: Option<&Anchor> = None;
    let mut best_dist_sq = threshold * threshold;

    for anchor in anchors {
        let dist_sq = (anchor.point - point).hypot2();
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = Some(anchor);
        }
    }
    best
}

fn nearest_on_axis(
    anchors: &[Anchor],
    threshold: f64,
    axis_distance: impl Fn(&Anchor) -> f64,
) -> Option<&Anchor> {
    let mut best: Option<&Anchor> = None;
    let mut best_dist = threshold;

    for anchor in anchors {
        let d = axis_distance(anchor);
        if d < best_dist {
            best_dist = d;
            best = Some(anchor);
        }
    }
    best
}

/// Auxiliary visual for the view layer, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Overlay {
    Circle {
        center: Point,
        radius: f64,
    },
    GuideLine {
        from: Point,
        to: Point,
        stroke_width: f64,
        dash: f64,
    },
}

/// Overlays describing what the last adjustment did.
pub fn adjust_indicator(result: &AdjustResult, k: f64, sense_range: f64) -> Vec<Overlay> {
    let mut overlays = Vec::new();
    if result.applied.cement {
        overlays.push(Overlay::Circle {
            center: result.point,
            radius: sense_range / k,
        });
    }
    if result.applied.align {
        let guides = [result.info.horizontal_point, result.info.vertical_point];
        for to in guides.into_iter().flatten() {
            overlays.push(Overlay::GuideLine {
                from: result.point,
                to,
                stroke_width: 2.0 / k,
                dash: 4.0 / k,
            });
        }
    }
    overlays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Action;
    use crate::shapes::{Polyline, Rectangle};

    fn anchor(x: f64, y: f64) -> Anchor {
        Anchor {
            point: Point::new(x, y),
            kind: AnchorKind::Vertex,
            item: 1,
        }
    }

    #[test]
    fn test_empty_config_is_identity() {
        let p = Point::new(1.0, 1.0);
        let r = adjust(p, &[anchor(0.0, 0.0)], &[], 10.0, 1.0);
        assert_eq!(r, AdjustResult::none(p));
    }

    #[test]
    fn test_cement_snaps_to_nearest() {
        let anchors = [anchor(0.0, 0.0), anchor(4.0, 4.0)];
        let r = adjust(Point::new(3.0, 3.0), &anchors, &DRAWING_CONFIGS, 8.0, 1.0);
        assert_eq!(r.point, Point::new(4.0, 4.0));
        assert!(r.applied.cement);
        assert!(!r.applied.align);
    }

    #[test]
    fn test_cement_range_scales_with_zoom() {
        let anchors = [anchor(0.0, 0.0)];
        let configs = [AdjustConfig::Cement];
        // 6 document units is 12 screen px at k = 2, outside an 8 px range.
        let r = adjust(Point::new(6.0, 0.0), &anchors, &configs, 8.0, 2.0);
        assert!(!r.applied.cement);
        let r = adjust(Point::new(3.0, 0.0), &anchors, &configs, 8.0, 2.0);
        assert!(r.applied.cement);
    }

    #[test]
    fn test_align_horizontal() {
        let r = adjust(Point::new(100.0, 2.0), &[anchor(0.0, 0.0)], &DRAWING_CONFIGS, 10.0, 1.0);
        assert_eq!(r.point, Point::new(100.0, 0.0));
        assert!(r.applied.align);
        assert_eq!(r.info.horizontal_point, Some(Point::new(0.0, 0.0)));
        assert_eq!(r.info.vertical_point, None);
    }

    #[test]
    fn test_align_both_axes_independently() {
        let anchors = [anchor(0.0, 50.0), anchor(50.0, 0.0)];
        let r = adjust(Point::new(3.0, 3.0), &anchors, &[AdjustConfig::Align], 5.0, 1.0);
        assert_eq!(r.point, Point::new(0.0, 0.0));
        assert_eq!(r.info.horizontal_point, Some(Point::new(50.0, 0.0)));
        assert_eq!(r.info.vertical_point, Some(Point::new(0.0, 50.0)));
    }

    #[test]
    fn test_collect_anchors_excludes() {
        let doc = [
            Item::Rect(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0)),
            Item::Polyline(Polyline::line_from_points(
                Point::new(20.0, 0.0),
                Point::new(30.0, 10.0),
            )),
        ]
        .into_iter()
        .fold(Document::initial(), |d, item| Action::AddItem(item).apply(d));

        let all = collect_anchors(&doc, &[]);
        // Rect: 4 vertices + center. Line: 2 vertices + 2 other corners + center.
        assert_eq!(all.len(), 10);
        let only_line = collect_anchors(&doc, &[1]);
        assert_eq!(only_line.len(), 5);
        assert!(only_line.iter().all(|a| a.item == 2));
        assert!(
            only_line
                .iter()
                .any(|a| a.kind == AnchorKind::Center && a.point == Point::new(25.0, 5.0))
        );
    }

    #[test]
    fn test_indicator() {
        let r = adjust(Point::new(100.0, 2.0), &[anchor(0.0, 0.0)], &DRAWING_CONFIGS, 10.0, 2.0);
        let overlays = adjust_indicator(&r, 2.0, 10.0);
        assert_eq!(
            overlays,
            vec![Overlay::GuideLine {
                from: Point::new(100.0, 0.0),
                to: Point::new(0.0, 0.0),
                stroke_width: 1.0,
                dash: 2.0,
            }]
        );

        let r = adjust(Point::new(1.0, 1.0), &[anchor(0.0, 0.0)], &DRAWING_CONFIGS, 10.0, 1.0);
        assert_eq!(
            adjust_indicator(&r, 1.0, 10.0),
            vec![Overlay::Circle {
                center: Point::new(0.0, 0.0),
                radius: 10.0,
            }]
        );
    }
}
