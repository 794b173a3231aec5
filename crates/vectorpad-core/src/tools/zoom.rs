//! Wheel zoom and empty-canvas panning.

use super::{Context, Interaction, Sinks};
use crate::input::{Event, PointerKind};
use crate::mode::{Family, Mode};
use crate::selection::pick;
use kurbo::Point;

/// Never claims a mode: zoom applies in any mode, panning happens while idle.
#[derive(Debug, Default)]
pub struct ZoomInteraction {
    /// Last raw pointer position of an active pan gesture.
    pan_from: Option<Point>,
}

impl Interaction for ZoomInteraction {
    fn family(&self) -> Family {
        Family::Zoom
    }

    fn handle(&mut self, cx: &Context<'_>, ev: &Event) -> Sinks {
        let Some(m) = ev.mouse() else {
            return Sinks::none();
        };

        match m.kind {
            PointerKind::Wheel { delta_y } => {
                if delta_y == 0.0 {
                    return Sinks::none();
                }
                let step = cx.config.zoom_step;
                let factor = if delta_y < 0.0 { step } else { 1.0 / step };
                let next = cx
                    .transform
                    .zoom_at(m.raw, factor, cx.config.min_zoom, cx.config.max_zoom);
                if next == cx.transform {
                    Sinks::none()
                } else {
                    log::trace!("zoom to {}", next.k());
                    Sinks::none().transform(next)
                }
            }
            PointerKind::Down if cx.mode == Mode::Idle && m.on_canvas() => {
                let tolerance = cx.scaled(cx.config.hit_tolerance);
                if pick(cx.document, m.pos, tolerance, cx.config.lock_policy).is_none() {
                    self.pan_from = Some(m.raw);
                }
                Sinks::none()
            }
            PointerKind::Move => match self.pan_from {
                Some(from) if cx.mode.is_idle() => {
                    self.pan_from = Some(m.raw);
                    Sinks::none().transform(cx.transform.pan(m.raw - from))
                }
                Some(_) => {
                    self.pan_from = None;
                    Sinks::none()
                }
                None => Sinks::none(),
            },
            PointerKind::Up => {
                self.pan_from = None;
                Sinks::none()
            }
            _ => Sinks::none(),
        }
    }

    fn cancel(&mut self) {
        self.pan_from = None;
    }
}
