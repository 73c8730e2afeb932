//! Velocity scaling
//!
//! Scales the raw movement since the last sample this filter saw, then
//! applies it to the previous *shaped* point so speed changes compose onto
//! the shaped trajectory rather than the noisy raw one.

use crate::geometry::{vector, Point};
use crate::shaper::error::{ensure_finite, Result};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Velocity scale transform
#[derive(Debug, Clone)]
pub struct ScaleTransform {
    /// Velocity multiplier
    multiplier: f64,

    /// Last raw point passed to this filter
    last_raw: Point,
}

impl ScaleTransform {
    /// Create a scale transform with the given multiplier
    ///
    /// Fails when the multiplier is not finite.
    pub fn new(multiplier: f64) -> Result<Self> {
        Ok(Self {
            multiplier: ensure_finite("multiplier", multiplier)?,
            last_raw: Point::ZERO,
        })
    }

    /// Velocity multiplier
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Set the velocity multiplier
    pub fn set_multiplier(&mut self, multiplier: f64) -> Result<()> {
        self.multiplier = ensure_finite("multiplier", multiplier)?;
        Ok(())
    }
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            last_raw: Point::ZERO,
        }
    }
}

impl Transform for ScaleTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Scale
    }

    fn transform(&mut self, point: Point, ctx: &mut ShapeContext) -> Point {
        let step = vector(self.last_raw, point) * self.multiplier;
        self.last_raw = point;
        ctx.previous_point + step
    }

    fn reset(&mut self) {
        self.last_raw = Point::ZERO;
    }
}
