//! Boundary clamping

use crate::geometry::{Point, Rect};
use crate::shaper::error::{Result, ShaperError};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Clamps points into an axis-aligned box
#[derive(Debug, Clone)]
pub struct BoxConstrainTransform {
    bounds: Rect,
}

impl BoxConstrainTransform {
    /// Create a constrain transform; the box must be finite with
    /// non-negative size
    pub fn new(bounds: Rect) -> Result<Self> {
        validate_box(&bounds)?;
        Ok(Self { bounds })
    }

    /// Clamp box
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replace the clamp box
    pub fn set_bounds(&mut self, bounds: Rect) -> Result<()> {
        validate_box(&bounds)?;
        self.bounds = bounds;
        Ok(())
    }
}

fn validate_box(bounds: &Rect) -> Result<()> {
    if bounds.is_finite() && bounds.width >= 0.0 && bounds.height >= 0.0 {
        Ok(())
    } else {
        Err(ShaperError::invalid_rect("box", bounds))
    }
}

impl Transform for BoxConstrainTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Constrain
    }

    fn transform(&mut self, point: Point, _ctx: &mut ShapeContext) -> Point {
        if self.bounds.contains(point) {
            point
        } else {
            self.bounds.clamp(point)
        }
    }
}
