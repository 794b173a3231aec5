//! Click-to-select, drag to move, delete.

use super::{Context, Interaction, Sinks};
use crate::document::{Action, GeometryPatch};
use crate::input::{Command, Event, PointerKind};
use crate::mode::{Family, Mode};
use crate::selection::{SelectionChange, pick};
use crate::shapes::{Item, ItemId};
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Default, PartialEq)]
enum State {
    #[default]
    Idle,
    Dragging {
        start: Point,
        ids: Vec<ItemId>,
    },
}

/// Selects the frontmost item under a pointer-down and drags it (or the whole
/// selection, if the item was already selected) until pointer-up.
#[derive(Debug, Default)]
pub struct SelectInteraction {
    state: State,
}

impl SelectInteraction {
    fn begin(&mut self, cx: &Context<'_>, pos: Point) -> Sinks {
        let tolerance = cx.scaled(cx.config.hit_tolerance);
        let Some(hit) = pick(cx.document, pos, tolerance, cx.config.lock_policy) else {
            return if cx.selection.is_empty() {
                Sinks::none()
            } else {
                Sinks::none().select(SelectionChange::Clear)
            };
        };

        let (mut sinks, candidates) = if cx.selection.contains(hit) {
            (Sinks::none(), cx.selection.ids())
        } else {
            (Sinks::none().select(SelectionChange::SelectItem(hit)), vec![hit])
        };

        let ids: Vec<ItemId> = candidates
            .into_iter()
            .filter(|id| cx.document.item(*id).is_some_and(|item| !item.locked()))
            .collect();
        if !ids.is_empty() {
            log::debug!("drag start on {ids:?}");
            self.state = State::Dragging { start: pos, ids };
            sinks = sinks.mode(Mode::Drag);
        }
        sinks
    }

    fn moved_items(cx: &Context<'_>, ids: &[ItemId], delta: Vec2) -> Vec<Item> {
        ids.iter()
            .filter_map(|id| cx.document.item(*id))
            .map(|item| {
                let mut item = item.clone();
                item.translate(delta);
                item
            })
            .collect()
    }
}

impl Interaction for SelectInteraction {
    fn family(&self) -> Family {
        Family::Select
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        if ev.is_command(Command::Delete) {
            if !cx.mode.is_idle() {
                return Sinks::none();
            }
            let mut sinks = Sinks::none();
            for item in cx.selection.items().iter().filter(|item| !item.locked()) {
                sinks = sinks.action(Action::RemoveItem(item.id()));
            }
            return sinks;
        }

        let Some(m) = ev.mouse() else {
            return Sinks::none();
        };

        match (&self.state, cx.mode, m.kind) {
            (State::Idle, Mode::Idle, PointerKind::Down) if m.on_canvas() => {
                self.begin(cx, m.point())
            }
            (State::Idle, Mode::Idle, PointerKind::Dblclick) if m.on_canvas() => {
                let tolerance = cx.scaled(cx.config.hit_tolerance);
                match pick(cx.document, m.point(), tolerance, cx.config.lock_policy) {
                    Some(id) if cx.selection.contains(id) => {
                        Sinks::none().select(SelectionChange::ToggleKind)
                    }
                    _ => Sinks::none(),
                }
            }
            (State::Dragging { start, ids }, Mode::Drag, PointerKind::Move) => {
                let delta = m.point() - *start;
                Sinks::none().preview(Self::moved_items(cx, ids, delta))
            }
            (State::Dragging { start, ids }, Mode::Drag, PointerKind::Up) => {
                let delta = m.point() - *start;
                let mut sinks = Sinks::none().mode(Mode::Idle).clear_preview();
                if delta != Vec2::ZERO {
                    log::debug!("drag commit {ids:?} by {delta:?}");
                    for id in ids {
                        sinks = sinks.action(Action::UpdateItemGeometry(
                            *id,
                            GeometryPatch::Translate(delta),
                        ));
                    }
                }
                self.state = State::Idle;
                sinks
            }
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.state = State::Idle;
    }
}
