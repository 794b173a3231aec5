//! Editor configuration.

use crate::selection::LockPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Sense range must be positive: {0}")]
    SenseRange(f64),
    #[error("Tolerance `{name}` must be non-negative: {value}")]
    Tolerance { name: &'static str, value: f64 },
    #[error("Invalid zoom bounds: min {min}, max {max}")]
    ZoomBounds { min: f64, max: f64 },
    #[error("Zoom step must be greater than 1: {0}")]
    ZoomStep(f64),
}

/// Tunables for the interaction core. Distances are in screen pixels and are
/// divided by the current zoom before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Snap radius for cement/align and polygon closing.
    pub sense_range: f64,
    /// Click-to-select tolerance around item geometry.
    pub hit_tolerance: f64,
    /// Radius within which a handle counts as hit.
    pub handle_tolerance: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor per wheel notch.
    pub zoom_step: f64,
    pub lock_policy: LockPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sense_range: 8.0,
            hit_tolerance: 4.0,
            handle_tolerance: 8.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.1,
            lock_policy: LockPolicy::default(),
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sense_range.is_finite() && self.sense_range > 0.0) {
            return Err(ConfigError::SenseRange(self.sense_range));
        }
        for (name, value) in [
            ("hit_tolerance", self.hit_tolerance),
            ("handle_tolerance", self.handle_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Tolerance { name, value });
            }
        }
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::ZoomBounds { min, max });
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        Ok(())
    }
}
