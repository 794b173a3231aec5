//! The editor: owns the document and runs the per-event pipeline.

use crate::config::{ConfigError, EditorConfig};
use crate::coordinator;
use crate::document::{Action, Document, fold};
use crate::input::{Command, Event, InputEvent, MouseEvent, PointerEvent, PointerKind, Target};
use crate::mode::Mode;
use crate::selection::{
    Handle, HandleKind, Selection, SelectionChange, SelectionMeta, get_handles, hit_test_handles,
};
use crate::shapes::Item;
use crate::snap::{self, AdjustConfig, AdjustResult, Overlay};
use crate::tools::{self, Context, Interaction, Preview};
use crate::transform::Transform;
use kurbo::Point;
use std::collections::BTreeMap;

/// What one input event did.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Every action folded into the document, in order.
    pub actions: Vec<Action>,
    pub selection_changes: Vec<SelectionChange>,
    pub mode: Mode,
    pub mode_changed: bool,
    pub transform: Transform,
}

/// Interactive editing state for a single document.
pub struct Editor {
    config: EditorConfig,
    document: Document,
    meta: SelectionMeta,
    mode: Mode,
    transform: Transform,
    adjust_configs: Vec<AdjustConfig>,
    adjust_result: Option<AdjustResult>,
    preview: Vec<Item>,
    addons: BTreeMap<&'static str, Overlay>,
    families: Vec<Box<dyn Interaction>>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            document: Document::initial(),
            meta: SelectionMeta::default(),
            mode: Mode::Idle,
            transform: Transform::default(),
            adjust_configs: Vec::new(),
            adjust_result: None,
            preview: Vec::new(),
            addons: BTreeMap::new(),
            families: tools::all(),
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        Selection::derive(&self.document, self.meta)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The in-progress drawing, empty when nothing is being drawn.
    pub fn preview(&self) -> &[Item] {
        &self.preview
    }

    pub fn addons(&self) -> &BTreeMap<&'static str, Overlay> {
        &self.addons
    }

    pub fn adjust_configs(&self) -> &[AdjustConfig] {
        &self.adjust_configs
    }

    pub fn adjust_result(&self) -> Option<&AdjustResult> {
        self.adjust_result.as_ref()
    }

    /// Overlays for the last pointer adjustment.
    pub fn adjust_indicator(&self) -> Vec<Overlay> {
        self.adjust_result
            .as_ref()
            .map(|r| snap::adjust_indicator(r, self.transform.k(), self.config.sense_range))
            .unwrap_or_default()
    }

    /// Handles of the current selection, in document coordinates.
    pub fn handles(&self) -> Vec<Handle> {
        get_handles(&self.selection())
    }

    /// What a pointer at `raw` would land on: a selection handle or the canvas.
    pub fn target_at(&self, raw: Point) -> Target {
        let pos = self.transform.invert(raw);
        let tolerance = self.config.handle_tolerance / self.transform.k();
        match hit_test_handles(&self.handles(), pos, tolerance) {
            Some(HandleKind::Resize(h)) => Target::ResizeHandle(h),
            Some(HandleKind::Vertex { item, index }) => Target::Vertex { item, index },
            Some(HandleKind::InsertVertex { item, index }) => Target::InsertVertex { item, index },
            None => Target::Canvas,
        }
    }

    /// Fold externally produced actions (e.g. a loaded drawing) into the document.
    pub fn apply_actions(&mut self, actions: &[Action]) {
        self.document = fold(std::mem::take(&mut self.document), actions);
    }

    /// Run one input event through every family and apply the merged result.
    pub fn handle(&mut self, input: InputEvent) -> Tick {
        let ev = match input {
            InputEvent::Shortcut(Command::Cancel) | InputEvent::Intent(Command::Cancel) => {
                return self.cancel();
            }
            InputEvent::Shortcut(command) | InputEvent::Intent(command) => Event::Command(command),
            InputEvent::Pointer(pointer) => Event::Mouse(self.pair(&pointer)),
        };
        self.dispatch(ev)
    }

    /// Pair a raw event with its document position and snap it.
    fn pair(&mut self, pointer: &PointerEvent) -> MouseEvent {
        let m = MouseEvent::pair(pointer, &self.transform);
        if self.adjust_configs.is_empty() || matches!(m.kind, PointerKind::Wheel { .. }) {
            self.adjust_result = None;
            return m;
        }

        let exclude = match self.mode {
            Mode::Drag | Mode::Resize(_) | Mode::EditVertices(_) => self.document.sids().to_vec(),
            _ => Vec::new(),
        };
        let anchors = snap::collect_anchors(&self.document, &exclude);
        let result = snap::adjust(
            m.pos,
            &anchors,
            &self.adjust_configs,
            self.config.sense_range,
            self.transform.k(),
        );
        self.adjust_result = Some(result);
        m.with_adjusted(result)
    }

    fn dispatch(&mut self, ev: Event) -> Tick {
        let previous = self.mode;
        let selection = Selection::derive(&self.document, self.meta);
        let cx = Context {
            mode: self.mode,
            document: &self.document,
            selection: &selection,
            transform: self.transform,
            config: &self.config,
        };
        let outputs = self
            .families
            .iter_mut()
            .map(|family| (family.family(), family.handle(&cx, &ev)))
            .collect();
        let merged = coordinator::merge(previous, outputs);

        for family in self.families.iter_mut() {
            if merged.rejected.contains(&family.family()) {
                family.cancel();
            }
        }

        let mut applied = merged.actions;
        let mut document = fold(std::mem::take(&mut self.document), &applied);
        for change in &merged.selection_changes {
            let (actions, meta) = change.resolve(&document, self.meta);
            document = fold(document, &actions);
            self.meta = meta;
            applied.extend(actions);
        }
        self.document = document;
        if applied.iter().any(|a| matches!(a, Action::AddItem(_) | Action::RemoveItem(_))) {
            log::debug!("document now has {} items", self.document.len());
        }

        self.mode = merged.mode;
        if let Some(configs) = merged.adjust_configs {
            self.adjust_configs = configs;
        }
        if self.mode.is_idle() && previous != self.mode {
            self.adjust_result = None;
        }
        if let Some(transform) = merged.transform {
            self.transform = transform;
        }
        match merged.preview {
            Some(Preview::Show(items)) => self.preview = items,
            Some(Preview::Clear) => self.preview.clear(),
            None => {}
        }
        for (key, overlay) in merged.addons {
            match overlay {
                Some(overlay) => {
                    self.addons.insert(key, overlay);
                }
                None => {
                    self.addons.remove(key);
                }
            }
        }

        Tick {
            actions: applied,
            selection_changes: merged.selection_changes,
            mode: self.mode,
            mode_changed: previous != self.mode,
            transform: self.transform,
        }
    }

    /// Abandon whatever is in progress and return to idle without committing.
    fn cancel(&mut self) -> Tick {
        let previous = self.mode;
        for family in self.families.iter_mut() {
            family.cancel();
        }
        if previous != Mode::Idle {
            log::debug!("cancel {previous}");
        }
        self.mode = Mode::Idle;
        self.adjust_configs.clear();
        self.adjust_result = None;
        self.preview.clear();
        self.addons.clear();
        self.meta.active_vertex = None;
        Tick {
            actions: Vec::new(),
            selection_changes: Vec::new(),
            mode: Mode::Idle,
            mode_changed: previous != Mode::Idle,
            transform: self.transform,
        }
    }
}
