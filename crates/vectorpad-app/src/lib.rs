//! VectorPad headless shell.
//!
//! Maps key names to editor commands and replays scripted input against an
//! [`vectorpad_core::Editor`].

pub mod script;
pub mod shortcuts;

pub use script::{ReplayError, Script, Step, load_config, replay, report};
pub use shortcuts::{Shortcut, ShortcutRegistry};
