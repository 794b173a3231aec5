//! Two-point line drawing.

use super::{Context, Interaction, Sinks};
use crate::document::Action;
use crate::input::{Command, Event, PointerKind};
use crate::mode::{Family, Mode};
use crate::selection::{SelectionChange, SelectionKind};
use crate::shapes::{Item, Polyline};
use kurbo::Point;

/// `line.ready` waits for the first pointer-down, `line.drawing` follows the
/// pointer until it is released.
#[derive(Debug, Default)]
pub struct LineInteraction {
    start: Option<Point>,
}

impl Interaction for LineInteraction {
    fn family(&self) -> Family {
        Family::Line
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        let m = match ev {
            Event::Command(Command::Line) if cx.mode.is_idle() => {
                self.start = None;
                return Sinks::none().mode(Mode::LineReady);
            }
            Event::Mouse(m) => m,
            Event::Command(_) => return Sinks::none(),
        };

        match (cx.mode, m.kind, self.start) {
            (Mode::LineReady, PointerKind::Down, _) => {
                let start = m.point();
                self.start = Some(start);
                Sinks::none()
                    .mode(Mode::LineDrawing)
                    .preview(vec![Item::Polyline(Polyline::line_from_points(start, start))])
            }
            (Mode::LineDrawing, PointerKind::Move, Some(start)) => Sinks::none()
                .preview(vec![Item::Polyline(Polyline::line_from_points(start, m.point()))]),
            (Mode::LineDrawing, PointerKind::Up, Some(start)) => {
                self.start = None;
                let line = Polyline::line_from_points(start, m.point());
                log::debug!("commit line {:?}", line.points);
                Sinks::none()
                    .mode(Mode::Idle)
                    .clear_preview()
                    .action(Action::AddItem(Item::Polyline(line)))
                    .select(SelectionChange::SelectLast(SelectionKind::Vertices))
            }
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.start = None;
    }
}
