//! Rectangle drawing.

use super::{Context, Interaction, Sinks};
use crate::document::Action;
use crate::input::{Command, Event, PointerKind};
use crate::mode::{Family, Mode};
use crate::selection::{SelectionChange, SelectionKind};
use crate::shapes::{Item, Rectangle};
use kurbo::Point;

#[derive(Debug, Default)]
pub struct RectInteraction {
    start: Option<Point>,
}

impl Interaction for RectInteraction {
    fn family(&self) -> Family {
        Family::Rect
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        let m = match ev {
            Event::Command(Command::Rect) if cx.mode.is_idle() => {
                self.start = None;
                return Sinks::none().mode(Mode::RectDrawing);
            }
            Event::Mouse(m) if cx.mode == Mode::RectDrawing => m,
            _ => return Sinks::none(),
        };

        match (m.kind, self.start) {
            (PointerKind::Down, None) => {
                self.start = Some(m.point());
                Sinks::none()
            }
            (PointerKind::Move, Some(start)) => {
                let rect = Rectangle::from_corners(start, m.point());
                Sinks::none().preview(vec![Item::Rect(rect)])
            }
            (PointerKind::Up, Some(start)) => {
                self.start = None;
                let rect = Rectangle::from_corners(start, m.point());
                let sinks = Sinks::none().mode(Mode::Idle).clear_preview();
                if rect.is_degenerate() {
                    log::debug!("discarding zero-area rectangle at {start:?}");
                    return sinks;
                }
                log::debug!("commit rect {:?}", rect.as_rect());
                sinks
                    .action(Action::AddItem(Item::Rect(rect)))
                    .select(SelectionChange::SelectLast(SelectionKind::Bbox))
            }
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.start = None;
    }
}
