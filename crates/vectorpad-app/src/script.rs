//! Scripted input replay.
//!
//! A script is a JSON file with optional starting `items` and a list of
//! `steps`, each a key press, an intent, a pointer event or a raw document
//! action (locking, z-order changes):
//!
//! ```json
//! {
//!   "steps": [
//!     { "key": "l" },
//!     { "pointer": { "kind": "down", "x": 0, "y": 0 } },
//!     { "pointer": { "kind": "up", "x": 5, "y": 5 } }
//!   ]
//! }
//! ```
//!
//! Pointer steps without a `target` are aimed with [`Editor::target_at`], the
//! way a view re-emits presses on the handles it draws.

use crate::shortcuts::ShortcutRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use vectorpad_core::{
    Action, Command, ConfigError, Editor, EditorConfig, InputEvent, Item, PointerEvent, PointerKind,
    Target, Tick,
};

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Unknown shortcut at step {step}: {key}")]
    UnknownShortcut { step: usize, key: String },
}

/// One pointer step in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerStep {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Key(String),
    Intent(Command),
    Pointer(PointerStep),
    Action(Action),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub items: Vec<Item>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Read and validate an editor config file.
pub fn load_config(path: &Path) -> Result<EditorConfig, ReplayError> {
    let config: EditorConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
    config.validate()?;
    Ok(config)
}

impl Step {
    /// The input event for this step, or `None` for a direct document action.
    fn to_input(&self, index: usize, editor: &Editor) -> Result<Option<InputEvent>, ReplayError> {
        let input = match self {
            Step::Key(key) => ShortcutRegistry::lookup(key)
                .map(InputEvent::Shortcut)
                .ok_or_else(|| ReplayError::UnknownShortcut {
                    step: index,
                    key: key.clone(),
                })?,
            Step::Intent(command) => InputEvent::Intent(*command),
            Step::Pointer(p) => {
                let target = match p.target {
                    Some(target) => target,
                    None => editor.target_at(kurbo::Point::new(p.x, p.y)),
                };
                InputEvent::Pointer(PointerEvent::new(p.kind, p.x, p.y).with_target(target))
            }
            Step::Action(_) => return Ok(None),
        };
        Ok(Some(input))
    }
}

/// Load the script's items, then feed every step to `editor`.
pub fn replay(editor: &mut Editor, script: &Script) -> Result<Vec<Tick>, ReplayError> {
    let seed: Vec<Action> = script.items.iter().cloned().map(Action::AddItem).collect();
    editor.apply_actions(&seed);

    let mut ticks = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let tick = match (step.to_input(index, editor)?, step) {
            (Some(input), _) => editor.handle(input),
            (None, Step::Action(action)) => {
                editor.apply_actions(std::slice::from_ref(action));
                Tick {
                    actions: vec![action.clone()],
                    selection_changes: Vec::new(),
                    mode: editor.mode(),
                    mode_changed: false,
                    transform: editor.transform(),
                }
            }
            (None, _) => continue,
        };
        if tick.mode_changed {
            log::info!("step {index}: mode {}", tick.mode);
        }
        ticks.push(tick);
    }
    Ok(ticks)
}

/// A human-readable account of the replay and the final editor state.
pub fn report(editor: &Editor, ticks: &[Tick]) -> String {
    let mut out = String::new();
    for (index, tick) in ticks.iter().enumerate() {
        if tick.actions.is_empty() && !tick.mode_changed {
            continue;
        }
        out.push_str(&format!("#{index:<3} {:<16}", tick.mode.to_string()));
        for action in &tick.actions {
            out.push_str(&format!(" {}", action_label(action)));
        }
        out.push('\n');
    }

    let doc = editor.document();
    out.push_str(&format!(
        "mode: {}  items: {}  selected: {:?}  zoom: {:.3}\n",
        editor.mode(),
        doc.len(),
        doc.sids(),
        editor.transform().k()
    ));
    for item in doc.items_ordered() {
        let b = item.bounds();
        out.push_str(&format!(
            "  {:>3} {:<8} ({:.1}, {:.1}) - ({:.1}, {:.1}){}\n",
            item.id(),
            item.kind(),
            b.x0,
            b.y0,
            b.x1,
            b.y1,
            if item.locked() { " locked" } else { "" }
        ));
    }
    out
}

fn action_label(action: &Action) -> String {
    match action {
        Action::AddItem(item) => format!("add:{}", item.kind()),
        Action::UpdateSids(ids) => format!("select:{ids:?}"),
        Action::ClearSids => "clear".to_string(),
        Action::RemoveItem(id) => format!("remove:{id}"),
        Action::UpdateItemGeometry(id, _) => format!("update:{id}"),
        Action::SetLocked(id, locked) => format!("lock:{id}={locked}"),
        Action::BringToFront(id) => format!("front:{id}"),
        Action::SendToBack(id) => format!("back:{id}"),
    }
}
