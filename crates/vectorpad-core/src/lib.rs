//! VectorPad Core Library
//!
//! Document model, geometry and the interaction pipeline of the VectorPad
//! vector editor. Nothing here renders: views feed [`InputEvent`]s to an
//! [`Editor`] and draw whatever state it exposes.

pub mod config;
pub mod coordinator;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod mode;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod tools;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use document::{Action, Document, GeometryPatch, InvariantError, fold};
pub use editor::{Editor, Tick};
pub use input::{Command, InputEvent, PointerEvent, PointerKind, Target, UnknownCommand};
pub use mode::{Family, Mode};
pub use selection::{
    Corner, Edge, Handle, HandleKind, HandleShape, LockPolicy, ResizeHandle, Selection,
    SelectionChange, SelectionKind, SelectionMeta, UnknownHandle,
};
pub use shapes::{Image, Item, ItemId, ItemTrait, Polygon, Polyline, Rectangle};
pub use snap::{AdjustConfig, AdjustResult, Overlay};
pub use transform::{Transform, TransformError};
