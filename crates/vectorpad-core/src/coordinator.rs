//! Merges the per-family outputs for one event into a single update.

use crate::document::Action;
use crate::mode::{Family, Mode};
use crate::selection::SelectionChange;
use crate::snap::{AdjustConfig, Overlay};
use crate::tools::{Preview, Sinks};
use crate::transform::Transform;

/// The combined outputs of every accepted family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Merged {
    pub actions: Vec<Action>,
    pub selection_changes: Vec<SelectionChange>,
    /// The mode after this event.
    pub mode: Mode,
    pub preview: Option<Preview>,
    pub adjust_configs: Option<Vec<AdjustConfig>>,
    pub transform: Option<Transform>,
    pub addons: Vec<(&'static str, Option<Overlay>)>,
    /// Families whose outputs were dropped; their private state must be reset.
    pub rejected: Vec<Family>,
}

/// Whether `family` may move the editor from `from` to `to`.
pub fn may_transition(family: Family, from: Mode, to: Mode) -> bool {
    let owns = |mode: Mode| mode.owner().is_none_or(|owner| owner == family);
    owns(from) && owns(to)
}

/// Merge family outputs in order. A family that proposes a transition it may
/// not make, or that comes after another family already changed the mode, is
/// rejected as a whole.
pub fn merge(current: Mode, outputs: Vec<(Family, Sinks)>) -> Merged {
    let mut merged = Merged {
        mode: current,
        ..Default::default()
    };
    let mut claimed_by: Option<Family> = None;

    for (family, sinks) in outputs {
        if let Some(next) = sinks.next_mode {
            if let Some(other) = claimed_by {
                log::warn!(
                    "{family} tried to enter {next} after {other} already moved to {}",
                    merged.mode
                );
                merged.rejected.push(family);
                continue;
            }
            if !may_transition(family, current, next) {
                log::warn!("rejected transition {current} -> {next} from {family}");
                merged.rejected.push(family);
                continue;
            }
            if next != current {
                log::debug!("{family}: {current} -> {next}");
            }
            claimed_by = Some(family);
            merged.mode = next;
        }

        merged.actions.extend(sinks.actions);
        merged.selection_changes.extend(sinks.change_selection);
        if sinks.preview.is_some() {
            merged.preview = sinks.preview;
        }
        if sinks.next_adjust_configs.is_some() {
            merged.adjust_configs = sinks.next_adjust_configs;
        }
        if sinks.next_transform.is_some() {
            merged.transform = sinks.next_transform;
        }
        merged.addons.extend(sinks.addons);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Corner, ResizeHandle};

    #[test]
    fn test_ownership_rules() {
        assert!(may_transition(Family::Line, Mode::Idle, Mode::LineReady));
        assert!(may_transition(Family::Line, Mode::LineReady, Mode::LineDrawing));
        assert!(may_transition(Family::Line, Mode::LineDrawing, Mode::Idle));
        assert!(!may_transition(Family::Rect, Mode::LineReady, Mode::RectDrawing));
        assert!(!may_transition(Family::Rect, Mode::Idle, Mode::Polygon));
        let resize = Mode::Resize(ResizeHandle::Corner(Corner::TopLeft));
        assert!(may_transition(Family::Resize, Mode::Idle, resize));
        assert!(!may_transition(Family::Select, resize, Mode::Idle));
    }

    #[test]
    fn test_first_claim_wins() {
        let outputs = vec![
            (Family::Rect, Sinks::none().mode(Mode::RectDrawing)),
            (Family::Line, Sinks::none().mode(Mode::LineReady)),
        ];
        let merged = merge(Mode::Idle, outputs);
        assert_eq!(merged.mode, Mode::RectDrawing);
        assert_eq!(merged.rejected, vec![Family::Line]);
        assert_eq!(merged.adjust_configs, Some(Mode::RectDrawing.adjust_configs()));
    }

    #[test]
    fn test_rejected_family_outputs_dropped() {
        let outputs = vec![(
            Family::Rect,
            Sinks::none()
                .mode(Mode::Idle)
                .action(Action::ClearSids),
        )];
        let merged = merge(Mode::Polygon, outputs);
        assert_eq!(merged.mode, Mode::Polygon);
        assert!(merged.actions.is_empty());
        assert_eq!(merged.rejected, vec![Family::Rect]);
    }

    #[test]
    fn test_outputs_concatenate_in_order() {
        let outputs = vec![
            (Family::Select, Sinks::none().select(SelectionChange::Clear)),
            (Family::Zoom, Sinks::none().transform(Transform::default())),
            (Family::Polygon, Sinks::none()),
        ];
        let merged = merge(Mode::Idle, outputs);
        assert_eq!(merged.mode, Mode::Idle);
        assert_eq!(merged.selection_changes, vec![SelectionChange::Clear]);
        assert_eq!(merged.transform, Some(Transform::default()));
        assert!(merged.rejected.is_empty());
    }
}
