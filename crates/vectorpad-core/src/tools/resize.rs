//! Resize the selection by dragging one of its bounding-box handles.

use super::{Context, Interaction, Sinks};
use crate::document::{Action, GeometryPatch};
use crate::input::{Event, PointerKind, Target};
use crate::mode::{Family, Mode};
use crate::selection::ResizeHandle;
use crate::shapes::{Item, ItemId};
use kurbo::Point;

#[derive(Debug, Clone, PartialEq)]
struct Gesture {
    handle: ResizeHandle,
    anchor: Point,
    start: Point,
    ids: Vec<ItemId>,
}

impl Gesture {
    fn patch(&self, end: Point) -> GeometryPatch {
        let (scale_x, scale_y) = self.handle.axes();
        GeometryPatch::Resize {
            anchor: self.anchor,
            start: self.start,
            end,
            scale_x,
            scale_y,
        }
    }
}

/// Scales every selected item relative to the handle opposite the dragged one.
#[derive(Debug, Default)]
pub struct ResizeInteraction {
    gesture: Option<Gesture>,
}

impl Interaction for ResizeInteraction {
    fn family(&self) -> Family {
        Family::Resize
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        let Some(m) = ev.mouse() else {
            return Sinks::none();
        };

        match (cx.mode, m.kind, m.target) {
            (Mode::Idle, PointerKind::Down, Target::ResizeHandle(handle)) => {
                if cx.selection.any_locked() {
                    return Sinks::none();
                }
                let Some(bounds) = cx.selection.bounds() else {
                    return Sinks::none();
                };
                let (anchor, start) = handle.anchor_and_start(bounds);
                log::debug!("resize {handle} from {start:?} around {anchor:?}");
                self.gesture = Some(Gesture {
                    handle,
                    anchor,
                    start,
                    ids: cx.selection.ids(),
                });
                Sinks::none().mode(Mode::Resize(handle))
            }
            (Mode::Resize(_), PointerKind::Move, _) => {
                let Some(gesture) = &self.gesture else {
                    return Sinks::none();
                };
                let patch = gesture.patch(m.point());
                let items: Vec<Item> = gesture
                    .ids
                    .iter()
                    .filter_map(|id| cx.document.item(*id))
                    .map(|item| {
                        let mut item = item.clone();
                        patch.apply_to(&mut item);
                        item
                    })
                    .collect();
                Sinks::none().preview(items)
            }
            (Mode::Resize(_), PointerKind::Up, _) => {
                let Some(gesture) = self.gesture.take() else {
                    return Sinks::none();
                };
                let patch = gesture.patch(m.point());
                let mut sinks = Sinks::none().mode(Mode::Idle).clear_preview();
                for id in gesture.ids {
                    sinks = sinks.action(Action::UpdateItemGeometry(id, patch.clone()));
                }
                sinks
            }
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Corner, Edge, SelectionMeta};
    use crate::shapes::Rectangle;
    use crate::tools::testing::{Fixture, mouse, mouse_on};
    use kurbo::Rect;

    fn fixture() -> Fixture {
        Fixture::with_items(vec![
            Item::Rect(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0)),
            Item::Rect(Rectangle::new(Point::new(10.0, 10.0), 10.0, 10.0)),
        ])
        .selected(vec![1, 2], SelectionMeta::default())
    }

    #[test]
    fn test_corner_resize_scales_around_opposite_corner() {
        let mut fx = fixture();
        let mut resize = ResizeInteraction::default();
        let handle = ResizeHandle::Corner(Corner::BottomRight);

        fx.run(&mut resize, mouse_on(PointerKind::Down, 20.0, 20.0, Target::ResizeHandle(handle)));
        assert_eq!(fx.mode, Mode::Resize(handle));

        let sinks = fx.run(&mut resize, mouse(PointerKind::Move, 40.0, 40.0));
        assert!(sinks.actions.is_empty());

        let sinks = fx.run(&mut resize, mouse(PointerKind::Up, 40.0, 40.0));
        assert_eq!(sinks.actions.len(), 2);
        assert_eq!(fx.mode, Mode::Idle);
        assert_eq!(fx.document.item(1).map(Item::bounds), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(fx.document.item(2).map(Item::bounds), Some(Rect::new(20.0, 20.0, 40.0, 40.0)));
    }

    #[test]
    fn test_edge_resize_keeps_other_axis() {
        let mut fx = fixture();
        let mut resize = ResizeInteraction::default();
        let handle = ResizeHandle::Edge(Edge::Left);
        fx.run(&mut resize, mouse_on(PointerKind::Down, 0.0, 10.0, Target::ResizeHandle(handle)));
        fx.run(&mut resize, mouse(PointerKind::Up, -20.0, 99.0));
        assert_eq!(fx.document.item(1).map(Item::bounds), Some(Rect::new(-20.0, 0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_locked_selection_not_resized() {
        let mut fx = fixture();
        fx.document = Action::SetLocked(2, true).apply(fx.document);
        let mut resize = ResizeInteraction::default();
        let handle = ResizeHandle::Corner(Corner::TopLeft);
        let down = mouse_on(PointerKind::Down, 0.0, 0.0, Target::ResizeHandle(handle));
        let sinks = fx.run(&mut resize, down);
        assert!(sinks.is_empty());
        assert_eq!(fx.mode, Mode::Idle);
    }
}
