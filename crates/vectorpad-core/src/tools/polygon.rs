//! Click-by-click polygon drawing.

use super::{Context, Interaction, Sinks};
use crate::document::Action;
use crate::geometry::distance;
use crate::input::{Command, Event, PointerKind};
use crate::mode::{Family, Mode};
use crate::selection::{SelectionChange, SelectionKind};
use crate::shapes::{Item, Polygon};
use crate::snap::Overlay;
use kurbo::Point;

/// Addon key for the circle drawn around the first vertex while a click would
/// close the polygon.
pub const POLYGON_CLOSE_INDICATOR: &str = "polygonCloseIndicator";

/// Each click appends a vertex; clicking near the first vertex (once there are
/// at least three) closes and commits the polygon.
#[derive(Debug, Default)]
pub struct PolygonInteraction {
    points: Vec<Point>,
}

impl PolygonInteraction {
    fn can_close(&self, cx: &Context<'_>, pos: Point) -> bool {
        match self.points.first() {
            Some(&first) if self.points.len() >= Polygon::MIN_VERTICES => {
                distance(first, pos) < cx.scaled(cx.config.sense_range)
            }
            _ => false,
        }
    }

    fn indicator(&self, cx: &Context<'_>) -> Option<Overlay> {
        self.points.first().map(|&center| Overlay::Circle {
            center,
            radius: cx.scaled(cx.config.sense_range),
        })
    }

    fn preview_at(&self, cx: &Context<'_>, pos: Point) -> Sinks {
        if self.points.is_empty() {
            return Sinks::none();
        }
        let closable = self.can_close(cx, pos);
        let moving = match (closable, self.points.first()) {
            (true, Some(&first)) => first,
            _ => pos,
        };
        let overlay = if closable { self.indicator(cx) } else { None };
        Sinks::none()
            .preview(vec![Item::Polygon(Polygon::preview(&self.points, moving))])
            .addon(POLYGON_CLOSE_INDICATOR, overlay)
    }
}

impl Interaction for PolygonInteraction {
    fn family(&self) -> Family {
        Family::Polygon
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        let m = match ev {
            Event::Command(Command::Polygon) if cx.mode.is_idle() => {
                self.points.clear();
                return Sinks::none().mode(Mode::Polygon);
            }
            Event::Mouse(m) if cx.mode == Mode::Polygon => m,
            _ => return Sinks::none(),
        };

        match m.kind {
            PointerKind::Click => {
                let pos = m.point();
                if self.can_close(cx, pos) {
                    let points = std::mem::take(&mut self.points);
                    log::debug!("close polygon with {} vertices", points.len());
                    return Sinks::none()
                        .mode(Mode::Idle)
                        .clear_preview()
                        .addon(POLYGON_CLOSE_INDICATOR, None)
                        .action(Action::AddItem(Item::Polygon(Polygon::from_points(points))))
                        .select(SelectionChange::SelectLast(SelectionKind::Bbox));
                }
                self.points.push(pos);
                self.preview_at(cx, pos)
            }
            PointerKind::Move => self.preview_at(cx, m.point()),
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.points.clear();
    }
}
