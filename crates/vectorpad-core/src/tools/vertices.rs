//! Vertex editing on a selected polyline or polygon.

use super::{Context, Interaction, Sinks};
use crate::document::{Action, GeometryPatch};
use crate::input::{Event, PointerKind, Target};
use crate::mode::{Family, Mode};
use crate::selection::SelectionChange;
use crate::shapes::{Item, ItemId};
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Edit {
    item: ItemId,
    index: usize,
    /// Whether the drag inserts a new vertex at `index` instead of moving one.
    insert: bool,
    /// Raw pointer position of the press. A release at the same spot is a
    /// click, not a drag, and commits nothing.
    pressed_at: Point,
}

impl Edit {
    fn patch(&self, at: Point) -> GeometryPatch {
        if self.insert {
            GeometryPatch::InsertVertex {
                index: self.index,
                at,
            }
        } else {
            GeometryPatch::MoveVertex {
                index: self.index,
                to: at,
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct VerticesInteraction {
    edit: Option<Edit>,
}

/// The selected, unlocked, vertex-bearing item `id`, with `index` in range.
fn editable<'a>(cx: &'a Context<'_>, id: ItemId, index: usize, insert: bool) -> Option<&'a Item> {
    let item = cx.selection.items().iter().find(|item| item.id() == id)?;
    let len = item.vertices()?.len();
    let in_range = if insert { index <= len } else { index < len };
    (!item.locked() && in_range).then_some(item)
}

impl Interaction for VerticesInteraction {
    fn family(&self) -> Family {
        Family::Vertices
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        let Some(m) = ev.mouse() else {
            return Sinks::none();
        };

        match (cx.mode, m.kind, m.target) {
            (Mode::Idle, PointerKind::Down, Target::Vertex { item, index })
            | (Mode::Idle, PointerKind::Down, Target::InsertVertex { item, index }) => {
                let insert = matches!(m.target, Target::InsertVertex { .. });
                if editable(cx, item, index, insert).is_none() {
                    return Sinks::none();
                }
                log::debug!("edit vertex {index} of item {item} (insert: {insert})");
                self.edit = Some(Edit {
                    item,
                    index,
                    insert,
                    pressed_at: m.raw,
                });
                Sinks::none()
                    .mode(Mode::EditVertices(index))
                    .select(SelectionChange::ActiveVertex(Some(index)))
            }
            (Mode::Idle, PointerKind::Dblclick, Target::Vertex { item, index }) => {
                if editable(cx, item, index, false).is_none() {
                    return Sinks::none();
                }
                Sinks::none()
                    .action(Action::UpdateItemGeometry(
                        item,
                        GeometryPatch::RemoveVertex { index },
                    ))
                    .select(SelectionChange::ActiveVertex(None))
            }
            (Mode::EditVertices(_), PointerKind::Move, _) => {
                let Some(edit) = self.edit else {
                    return Sinks::none();
                };
                let Some(item) = cx.document.item(edit.item) else {
                    return Sinks::none();
                };
                let mut item = item.clone();
                edit.patch(m.point()).apply_to(&mut item);
                Sinks::none().preview(vec![item])
            }
            (Mode::EditVertices(_), PointerKind::Up, _) => {
                let Some(edit) = self.edit.take() else {
                    return Sinks::none();
                };
                let sinks = Sinks::none().mode(Mode::Idle).clear_preview();
                if m.raw == edit.pressed_at {
                    return sinks;
                }
                sinks.action(Action::UpdateItemGeometry(edit.item, edit.patch(m.point())))
            }
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.edit = None;
    }
}
