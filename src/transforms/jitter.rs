//! Jitter Suppression
//!
//! Decides, per sample, whether recent motion is deliberate or noise and
//! picks a smoothing strategy to match.
//!
//! # Decision
//!
//! ```text
//! step ≥ jitter_threshold ──────────────→ Passthrough (reset everything)
//! step <  jitter_threshold
//!   ├─ every turn in window < curvature → PathSmoothing  (slow, steady drag)
//!   └─ otherwise                        → PointSmoothing (tremor)
//! ```
//!
//! Large motions are never damped. Small motions that keep a steady heading
//! go to the path smoother, which preserves direction; small motions that
//! wander go to the point smoother, which averages position. Whichever
//! smoother is not used for a sample is reset so it never blends across
//! unrelated motion.
//!
//! A turn within [`STRAIGHT_TOLERANCE`] of zero never disqualifies a window,
//! so a straight run at any angle counts as deliberate even with a zero
//! curvature threshold. Stationary samples carry no heading and do not enter
//! the window.
//!
//! Turns are the unsigned angle between consecutive headings, wrapped into
//! `[0, π]`. Comparing absolute `atan2` headings instead would read a zigzag
//! mirrored about the x-axis as a straight line; this filter treats it as a
//! turn on every step.
//!
//! The jitter threshold is in the units of the points this filter receives.
//! Place it after any space transform so the threshold is in display units.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::history::History;
use super::smooth::{SmoothTransform, DEFAULT_SMOOTH_DEPTH};
use super::vector_smooth::VectorSmoothTransform;
use crate::geometry::{angle_between, distance, normalize, vector, Point};
use crate::shaper::error::{ensure_non_negative, Result};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Default step length at or above which motion is treated as deliberate
pub const DEFAULT_JITTER_THRESHOLD: f64 = 20.0;

/// Default number of recent headings examined
pub const DEFAULT_SAMPLE_DEPTH: usize = 50;

/// Turns at or below this many radians count as no turn at all
///
/// Normalizing steps along a non-axis-aligned line leaves turns of ~1e-15.
pub const STRAIGHT_TOLERANCE: f64 = 1e-9;

/// Strategy applied to the most recent sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JitterStrategy {
    /// Fast movement, passed through unmodified
    #[default]
    Passthrough,
    /// Slow steady movement, direction-averaged
    PathSmoothing,
    /// Noise, position-averaged
    PointSmoothing,
}

/// Jitter transform
#[derive(Debug, Clone)]
pub struct JitterTransform {
    /// Step length at or above which smoothing stops
    jitter_threshold: f64,

    /// Largest turn (radians) tolerated between consecutive headings
    curvature_threshold: f64,

    /// Recent unit headings, oldest first
    directions: History<Point>,

    /// Last raw point seen
    last_raw: Point,

    /// Positional averaging for tremor
    point_smoother: SmoothTransform,

    /// Heading averaging for slow drags
    path_smoother: VectorSmoothTransform,

    /// Strategy used for the latest sample
    strategy: JitterStrategy,
}

impl JitterTransform {
    /// Create a jitter filter with the given curvature threshold (radians)
    ///
    /// The threshold has no useful default: zero classifies almost all
    /// motion as jitter, while π classifies almost all of it as deliberate.
    pub fn new(curvature_threshold: f64) -> Result<Self> {
        let curvature_threshold = ensure_non_negative("curvature threshold", curvature_threshold)?;

        Ok(Self {
            jitter_threshold: DEFAULT_JITTER_THRESHOLD,
            curvature_threshold,
            directions: History::new(DEFAULT_SAMPLE_DEPTH),
            last_raw: Point::ZERO,
            point_smoother: SmoothTransform::new(DEFAULT_SMOOTH_DEPTH),
            path_smoother: VectorSmoothTransform::new(DEFAULT_SAMPLE_DEPTH),
            strategy: JitterStrategy::Passthrough,
        })
    }

    /// Set the jitter threshold
    pub fn with_jitter_threshold(mut self, threshold: f64) -> Result<Self> {
        self.set_jitter_threshold(threshold)?;
        Ok(self)
    }

    /// Set the heading window depth
    pub fn with_sample_depth(mut self, depth: usize) -> Self {
        self.set_sample_depth(depth);
        self
    }

    /// Set the point smoother's depth
    pub fn with_point_depth(mut self, depth: usize) -> Self {
        self.point_smoother.set_depth(depth);
        self
    }

    /// Set the path smoother's depth
    pub fn with_path_depth(mut self, depth: usize) -> Self {
        self.path_smoother.set_depth(depth);
        self
    }

    /// Step length at or above which smoothing stops
    pub fn jitter_threshold(&self) -> f64 {
        self.jitter_threshold
    }

    /// Set the jitter threshold
    pub fn set_jitter_threshold(&mut self, threshold: f64) -> Result<()> {
        self.jitter_threshold = ensure_non_negative("jitter threshold", threshold)?;
        debug!("Jitter threshold set to {}", self.jitter_threshold);
        Ok(())
    }

    /// Largest tolerated turn between consecutive headings (radians)
    pub fn curvature_threshold(&self) -> f64 {
        self.curvature_threshold
    }

    /// Set the curvature threshold (radians)
    pub fn set_curvature_threshold(&mut self, threshold: f64) -> Result<()> {
        self.curvature_threshold = ensure_non_negative("curvature threshold", threshold)?;
        debug!("Curvature threshold set to {}", self.curvature_threshold);
        Ok(())
    }

    /// Heading window depth
    pub fn sample_depth(&self) -> usize {
        self.directions.capacity()
    }

    /// Resize the heading window (minimum 2), dropping excess history
    pub fn set_sample_depth(&mut self, depth: usize) {
        self.directions.set_capacity(depth);
        debug!("Jitter sample depth set to {}", self.directions.capacity());
    }

    /// Point smoother depth
    pub fn point_depth(&self) -> usize {
        self.point_smoother.depth()
    }

    /// Path smoother depth
    pub fn path_depth(&self) -> usize {
        self.path_smoother.depth()
    }

    /// Strategy applied to the most recent sample
    pub fn strategy(&self) -> JitterStrategy {
        self.strategy
    }

    /// True when every turn in the heading window is tolerated
    fn is_intentional(&self) -> bool {
        self.directions
            .iter()
            .zip(self.directions.iter().skip(1))
            .all(|(a, b)| {
                let turn = angle_between(*a, *b);
                turn <= STRAIGHT_TOLERANCE || turn < self.curvature_threshold
            })
    }

    fn set_strategy(&mut self, strategy: JitterStrategy) {
        if strategy != self.strategy {
            trace!("Jitter strategy: {:?} -> {:?}", self.strategy, strategy);
            self.strategy = strategy;
        }
    }
}

impl Transform for JitterTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Jitter
    }

    fn transform(&mut self, point: Point, ctx: &mut ShapeContext) -> Point {
        if distance(point, self.last_raw) >= self.jitter_threshold {
            self.last_raw = point;
            self.point_smoother.clear();
            self.path_smoother.clear();
            self.directions.clear();
            self.set_strategy(JitterStrategy::Passthrough);
            return point;
        }

        if let Some(direction) = normalize(vector(self.last_raw, point)) {
            self.directions.push(direction);
        }
        let intentional = self.is_intentional();
        self.last_raw = point;

        if intentional {
            self.point_smoother.clear();
            self.set_strategy(JitterStrategy::PathSmoothing);
            self.path_smoother.smooth(point, ctx.previous_point)
        } else {
            self.path_smoother.clear();
            self.set_strategy(JitterStrategy::PointSmoothing);
            self.point_smoother.smooth(point)
        }
    }

    fn reset(&mut self) {
        self.last_raw = Point::ZERO;
        self.directions.clear();
        self.point_smoother.clear();
        self.path_smoother.clear();
        self.strategy = JitterStrategy::Passthrough;
    }
}
