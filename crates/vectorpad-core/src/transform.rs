//! Pan/zoom transform between document space and screen ("raw") space.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing a transform.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("Scale must be positive and finite: {0}")]
    InvalidScale(f64),
    #[error("Translation must be finite: ({0}, {1})")]
    InvalidTranslation(f64, f64),
}

/// Uniform scale followed by a translation: `raw = doc * k + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Scale factor, always > 0.
    k: f64,
    /// Screen-space translation.
    translate: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        translate: Vec2::ZERO,
    };

    pub fn new(k: f64, tx: f64, ty: f64) -> Result<Self, TransformError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(TransformError::InvalidScale(k));
        }
        if !tx.is_finite() || !ty.is_finite() {
            return Err(TransformError::InvalidTranslation(tx, ty));
        }
        Ok(Self {
            k,
            translate: Vec2::new(tx, ty),
        })
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Document → screen as an affine map.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.k)
    }

    /// Screen → document as an affine map.
    pub fn inverse_affine(&self) -> Affine {
        Affine::scale(1.0 / self.k) * Affine::translate(-self.translate)
    }

    /// Map a document point to screen space.
    pub fn forward(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.translate.x, p.y * self.k + self.translate.y)
    }

    /// Map a raw screen point back to document space.
    pub fn invert(&self, raw: Point) -> Point {
        Point::new(
            (raw.x - self.translate.x) / self.k,
            (raw.y - self.translate.y) / self.k,
        )
    }

    /// Pan by a screen-space delta.
    pub fn pan(&self, delta: Vec2) -> Self {
        Self {
            k: self.k,
            translate: self.translate + delta,
        }
    }

    /// Zoom by `factor`, keeping the document point under `raw` fixed on screen.
    /// The resulting scale is clamped to `[min, max]`.
    pub fn zoom_at(&self, raw: Point, factor: f64, min: f64, max: f64) -> Self {
        let new_k = (self.k * factor).clamp(min, max);
        if (new_k - self.k).abs() < f64::EPSILON || !new_k.is_finite() || new_k <= 0.0 {
            return *self;
        }

        let doc = self.invert(raw);
        let translate = Vec2::new(raw.x - doc.x * new_k, raw.y - doc.y * new_k);
        Self {
            k: new_k,
            translate,
        }
    }
}
