//! Interaction families.
//!
//! Each family is a small state machine that sees every event together with an
//! immutable [`Context`] snapshot, and answers with [`Sinks`]: the document
//! actions, mode transition, selection changes and view outputs it wants. The
//! coordinator merges the answers of all families for one event.

mod line;
mod polygon;
mod rect;
mod resize;
mod select;
mod vertices;
mod zoom;

pub use line::LineInteraction;
pub use polygon::{POLYGON_CLOSE_INDICATOR, PolygonInteraction};
pub use rect::RectInteraction;
pub use resize::ResizeInteraction;
pub use select::SelectInteraction;
pub use vertices::VerticesInteraction;
pub use zoom::ZoomInteraction;

use crate::config::EditorConfig;
use crate::document::{Action, Document};
use crate::input::Event;
use crate::mode::{Family, Mode};
use crate::selection::{Selection, SelectionChange};
use crate::shapes::Item;
use crate::snap::{AdjustConfig, Overlay};
use crate::transform::Transform;

/// Read-only state as of the arrival of the current event.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub mode: Mode,
    pub document: &'a Document,
    pub selection: &'a Selection,
    pub transform: Transform,
    pub config: &'a EditorConfig,
}

impl Context<'_> {
    /// Convert a screen-pixel distance into document units.
    pub fn scaled(&self, px: f64) -> f64 {
        px / self.transform.k()
    }
}

/// Update to the in-progress drawing shown by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Show(Vec<Item>),
    Clear,
}

/// Everything one family emits for one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sinks {
    pub actions: Vec<Action>,
    pub next_mode: Option<Mode>,
    pub change_selection: Vec<SelectionChange>,
    pub preview: Option<Preview>,
    pub next_adjust_configs: Option<Vec<AdjustConfig>>,
    pub next_transform: Option<Transform>,
    /// Named overlays; `None` removes the overlay.
    pub addons: Vec<(&'static str, Option<Overlay>)>,
}

impl Sinks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Transition to `mode`, switching snap strategies to match.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.next_mode = Some(mode);
        self.next_adjust_configs = Some(mode.adjust_configs());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn select(mut self, change: SelectionChange) -> Self {
        self.change_selection.push(change);
        self
    }

    pub fn preview(mut self, items: Vec<Item>) -> Self {
        self.preview = Some(Preview::Show(items));
        self
    }

    pub fn clear_preview(mut self) -> Self {
        self.preview = Some(Preview::Clear);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.next_transform = Some(transform);
        self
    }

    pub fn addon(mut self, key: &'static str, overlay: Option<Overlay>) -> Self {
        self.addons.push((key, overlay));
        self
    }
}

/// One interaction family.
pub trait Interaction {
    fn family(&self) -> Family;

    /// React to one event.
    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks;

    /// Drop any in-progress state.
    fn cancel(&mut self);
}

/// Every family, in the order their outputs are applied.
pub fn all() -> Vec<Box<dyn Interaction>> {
    vec![
        Box::new(SelectInteraction::default()),
        Box::new(ResizeInteraction::default()),
        Box::new(ZoomInteraction::default()),
        Box::new(RectInteraction::default()),
        Box::new(LineInteraction::default()),
        Box::new(PolygonInteraction::default()),
        Box::new(VerticesInteraction::default()),
    ]
}
