//! Non-linear acceleration
//!
//! Picks a velocity multiplier per sample from a [`GainCurve`] keyed by the
//! raw distance moved since the previous raw sample, then hands the point to
//! an inner [`ScaleTransform`] with that multiplier.
//!
//! Distances are measured on the points this filter receives, so the curve
//! must be defined in that coordinate space. With [`CurveUnits::SpaceDiagonal`]
//! the distance is divided by the current space's diagonal first, which makes
//! one curve usable across display sizes.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::curve::GainCurve;
use super::scale::ScaleTransform;
use crate::geometry::{distance, Point};
use crate::shaper::error::{ensure_finite, Result};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Units of the gain curve's thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveUnits {
    /// Plain distance in the incoming coordinate space
    #[default]
    Absolute,
    /// Distance as a fraction of the current space's diagonal
    SpaceDiagonal,
}

/// Acceleration transform
#[derive(Debug, Clone)]
pub struct AccelerationTransform {
    /// Gain lookup table
    curve: GainCurve,

    /// Multiplies the selected gain
    scale_factor: f64,

    /// Threshold units
    units: CurveUnits,

    /// Last raw point passed to this filter
    last_raw: Point,

    /// Performs the actual scaling
    scale: ScaleTransform,

    /// Set once the missing-space fallback has been logged
    warned_no_space: bool,
}

impl AccelerationTransform {
    /// Create an acceleration transform with the given curve
    pub fn new(curve: GainCurve) -> Self {
        Self {
            curve,
            scale_factor: 1.0,
            units: CurveUnits::Absolute,
            last_raw: Point::ZERO,
            scale: ScaleTransform::default(),
            warned_no_space: false,
        }
    }

    /// Set the factor applied on top of the curve's gain
    ///
    /// Fails when the factor is not finite.
    pub fn with_scale_factor(mut self, factor: f64) -> Result<Self> {
        self.set_scale_factor(factor)?;
        Ok(self)
    }

    /// Set the threshold units
    pub fn with_units(mut self, units: CurveUnits) -> Self {
        self.units = units;
        self
    }

    /// Gain curve
    pub fn curve(&self) -> &GainCurve {
        &self.curve
    }

    /// Replace the gain curve
    pub fn set_curve(&mut self, curve: GainCurve) {
        self.curve = curve;
    }

    /// Factor applied on top of the curve's gain
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Set the factor applied on top of the curve's gain
    pub fn set_scale_factor(&mut self, factor: f64) -> Result<()> {
        self.scale_factor = ensure_finite("scale factor", factor)?;
        Ok(())
    }

    /// Threshold units
    pub fn units(&self) -> CurveUnits {
        self.units
    }

    /// Multiplier chosen for the most recent sample
    pub fn current_multiplier(&self) -> f64 {
        self.scale.multiplier()
    }

    /// Multiplier for a movement of `distance` (already in curve units)
    pub fn multiplier_for(&self, distance: f64) -> f64 {
        self.curve.gain(distance) * self.scale_factor
    }

    fn curve_distance(&mut self, raw_distance: f64, ctx: &ShapeContext) -> f64 {
        match self.units {
            CurveUnits::Absolute => raw_distance,
            CurveUnits::SpaceDiagonal => match ctx.current_space.map(|s| s.diagonal()) {
                Some(diagonal) if diagonal > 0.0 => raw_distance / diagonal,
                _ => {
                    if !self.warned_no_space {
                        warn!("No coordinate space set, acceleration using absolute distance");
                        self.warned_no_space = true;
                    }
                    raw_distance
                }
            },
        }
    }
}

impl Default for AccelerationTransform {
    fn default() -> Self {
        Self::new(GainCurve::default())
    }
}

impl Transform for AccelerationTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Acceleration
    }

    fn transform(&mut self, point: Point, ctx: &mut ShapeContext) -> Point {
        let raw_distance = distance(point, self.last_raw);
        let d = self.curve_distance(raw_distance, ctx);

        let multiplier = self.multiplier_for(d);
        if self.scale.set_multiplier(multiplier).is_err() {
            warn!("Acceleration multiplier overflowed, keeping {}", self.scale.multiplier());
        }
        self.last_raw = point;

        trace!("Acceleration: distance={:.3}, multiplier={:.3}", d, multiplier);

        self.scale.transform(point, ctx)
    }

    fn reset(&mut self) {
        self.last_raw = Point::ZERO;
        self.scale.reset();
    }

    fn requires_space(&self) -> bool {
        true
    }
}
