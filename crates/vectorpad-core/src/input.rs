//! Input events: raw pointer events from the view, shortcut commands, and the
//! document-space events the interaction families consume.

use crate::selection::ResizeHandle;
use crate::shapes::ItemId;
use crate::snap::AdjustResult;
use crate::transform::Transform;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Logical command produced by a keyboard shortcut or a toolbar intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Cancel,
    Line,
    Polygon,
    Rect,
    Delete,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Cancel => "cancel",
            Command::Line => "line",
            Command::Polygon => "polygon",
            Command::Rect => "rect",
            Command::Delete => "delete",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a command name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cancel" => Ok(Command::Cancel),
            "line" => Ok(Command::Line),
            "polygon" => Ok(Command::Polygon),
            "rect" => Ok(Command::Rect),
            "delete" => Ok(Command::Delete),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Pointer event type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Click,
    Dblclick,
    Wheel { delta_y: f64 },
}

/// What the pointer landed on, as reported by the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    #[default]
    Canvas,
    ResizeHandle(ResizeHandle),
    Vertex { item: ItemId, index: usize },
    InsertVertex { item: ItemId, index: usize },
}

/// A pointer event in screen ("raw") coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    #[serde(default)]
    pub target: Target,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            target: Target::Canvas,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Click, x, y)
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }
}

/// Everything the editor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Shortcut(Command),
    Intent(Command),
}

impl From<PointerEvent> for InputEvent {
    fn from(ev: PointerEvent) -> Self {
        InputEvent::Pointer(ev)
    }
}

/// A pointer event paired with its document-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: PointerKind,
    /// Screen position, as received.
    pub raw: Point,
    /// Document position under the transform in effect at arrival.
    pub pos: Point,
    /// `pos` after snapping.
    pub adjusted: AdjustResult,
    pub target: Target,
}

impl MouseEvent {
    /// Pair `ev` with the document position under `transform`.
    pub fn pair(ev: &PointerEvent, transform: &Transform) -> Self {
        let pos = transform.invert(ev.position);
        Self {
            kind: ev.kind,
            raw: ev.position,
            pos,
            adjusted: AdjustResult::none(pos),
            target: ev.target,
        }
    }

    pub fn with_adjusted(mut self, adjusted: AdjustResult) -> Self {
        self.adjusted = adjusted;
        self
    }

    /// The snapped document position.
    pub fn point(&self) -> Point {
        self.adjusted.point
    }

    pub fn on_canvas(&self) -> bool {
        self.target == Target::Canvas
    }
}

/// An event as seen by the interaction families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Mouse(MouseEvent),
    /// Shortcuts and intents are interchangeable once they reach the families.
    Command(Command),
}

impl Event {
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            Event::Mouse(m) => Some(m),
            Event::Command(_) => None,
        }
    }

    pub fn is_command(&self, command: Command) -> bool {
        matches!(self, Event::Command(c) if *c == command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_uses_transform() {
        let t = Transform::new(2.0, 10.0, 20.0).unwrap();
        let m = MouseEvent::pair(&PointerEvent::down(30.0, 40.0), &t);
        assert_eq!(m.raw, Point::new(30.0, 40.0));
        assert_eq!(m.pos, Point::new(10.0, 10.0));
        assert_eq!(m.point(), m.pos);
        assert!(m.on_canvas());
    }

    #[test]
    fn test_command_parse() {
        assert_eq!("polygon".parse::<Command>(), Ok(Command::Polygon));
        assert_eq!(
            "circle".parse::<Command>(),
            Err(UnknownCommand("circle".into()))
        );
        assert_eq!(Command::Cancel.to_string(), "cancel");
    }

    #[test]
    fn test_pointer_event_json() {
        let json = r#"{"kind":{"wheel":{"delta_y":-3.0}},"position":{"x":1.0,"y":2.0}}"#;
        let ev: PointerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(ev.kind, PointerKind::Wheel { delta_y: -3.0 });
        assert_eq!(ev.target, Target::Canvas);
    }

    #[test]
    fn test_event_helpers() {
        let ev = Event::Command(Command::Cancel);
        assert!(ev.is_command(Command::Cancel));
        assert!(ev.mouse().is_none());
    }
}
