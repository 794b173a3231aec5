//! The interaction mode and which family owns it.

use crate::selection::ResizeHandle;
use crate::snap::{AdjustConfig, DRAWING_CONFIGS};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a mode tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeParseError {
    #[error("Unknown mode: {0}")]
    Unknown(String),
    #[error("Invalid resize handle in mode: {0}")]
    BadHandle(String),
    #[error("Invalid vertex index in mode: {0}")]
    BadIndex(String),
}

/// An interaction family. Each non-idle mode belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Select,
    Resize,
    Zoom,
    Rect,
    Line,
    Polygon,
    Vertices,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Select => "select",
            Family::Resize => "resize",
            Family::Zoom => "zoom",
            Family::Rect => "rect",
            Family::Line => "line",
            Family::Polygon => "polygon",
            Family::Vertices => "vertices",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single active interaction state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Idle,
    Drag,
    Resize(ResizeHandle),
    RectDrawing,
    LineReady,
    LineDrawing,
    Polygon,
    /// Dragging the vertex at this index of the selected item.
    EditVertices(usize),
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        *self == Mode::Idle
    }

    /// The family that owns this mode; `None` for idle.
    pub fn owner(&self) -> Option<Family> {
        match self {
            Mode::Idle => None,
            Mode::Drag => Some(Family::Select),
            Mode::Resize(_) => Some(Family::Resize),
            Mode::RectDrawing => Some(Family::Rect),
            Mode::LineReady | Mode::LineDrawing => Some(Family::Line),
            Mode::Polygon => Some(Family::Polygon),
            Mode::EditVertices(_) => Some(Family::Vertices),
        }
    }

    /// Snap strategies active in this mode.
    pub fn adjust_configs(&self) -> Vec<AdjustConfig> {
        match self {
            Mode::LineReady
            | Mode::LineDrawing
            | Mode::RectDrawing
            | Mode::Polygon
            | Mode::EditVertices(_) => DRAWING_CONFIGS.to_vec(),
            Mode::Idle | Mode::Drag | Mode::Resize(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => f.write_str("idle"),
            Mode::Drag => f.write_str("drag"),
            Mode::Resize(h) => write!(f, "resize.{h}"),
            Mode::RectDrawing => f.write_str("rect.drawing"),
            Mode::LineReady => f.write_str("line.ready"),
            Mode::LineDrawing => f.write_str("line.drawing"),
            Mode::Polygon => f.write_str("polygon"),
            Mode::EditVertices(i) => write!(f, "editVertices.{i}"),
        }
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => return Ok(Mode::Idle),
            "drag" => return Ok(Mode::Drag),
            "rect.drawing" => return Ok(Mode::RectDrawing),
            "line.ready" => return Ok(Mode::LineReady),
            "line.drawing" => return Ok(Mode::LineDrawing),
            "polygon" => return Ok(Mode::Polygon),
            _ => {}
        }
        if let Some(handle) = s.strip_prefix("resize.") {
            return handle
                .parse()
                .map(Mode::Resize)
                .map_err(|_| ModeParseError::BadHandle(s.to_string()));
        }
        if let Some(index) = s.strip_prefix("editVertices.") {
            return index
                .parse()
                .map(Mode::EditVertices)
                .map_err(|_| ModeParseError::BadIndex(s.to_string()));
        }
        Err(ModeParseError::Unknown(s.to_string()))
    }
}
