//! Transform Capability
//!
//! The single-method interface every filter implements, plus the per-sample
//! context the pipeline lends to each filter while it runs.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Filter category, used for SMART ordering and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Point or path smoothing
    Smooth,
    /// Jitter suppression
    Jitter,
    /// Velocity scaling
    Scale,
    /// Non-linear acceleration
    Acceleration,
    /// Coordinate space remapping
    Space,
    /// Boundary clamping
    Constrain,
    /// Caller-supplied filter
    Other,
}

impl TransformKind {
    /// Position in the recommended (SMART) order, `None` for custom filters
    pub fn smart_rank(&self) -> Option<u8> {
        match self {
            Self::Space => Some(0),
            Self::Jitter => Some(1),
            Self::Smooth => Some(2),
            Self::Acceleration => Some(3),
            Self::Scale => Some(4),
            Self::Constrain => Some(5),
            Self::Other => None,
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smooth => write!(f, "Smooth"),
            Self::Jitter => write!(f, "Jitter"),
            Self::Scale => write!(f, "Scale"),
            Self::Acceleration => write!(f, "Acceleration"),
            Self::Space => write!(f, "Space"),
            Self::Constrain => write!(f, "Constrain"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Pipeline state visible to filters during one `shape()` call
///
/// `previous_point` is the fully shaped result of the prior sample.
/// `current_point` starts as the raw sample and is overwritten by each
/// filter's output in turn. `current_space` is the coordinate space of the
/// point handed to the running filter; space transforms publish their target
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapeContext {
    /// Shaped output of the previous sample
    pub previous_point: Point,

    /// Sample as transformed so far
    pub current_point: Point,

    /// Active coordinate space, if known
    pub current_space: Option<Rect>,
}

/// A stateful filter: consume one point, produce one point
///
/// Filters are owned by exactly one pipeline; their history is specific to
/// that cursor session.
#[cfg_attr(test, mockall::automock)]
pub trait Transform {
    /// Filter category
    fn kind(&self) -> TransformKind;

    /// Transform one point
    fn transform(&mut self, point: Point, ctx: &mut ShapeContext) -> Point;

    /// Drop all sample history
    fn reset(&mut self) {}

    /// Whether this filter reads `ShapeContext::current_space`
    fn requires_space(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_rank_order() {
        let mut kinds = vec![
            TransformKind::Constrain,
            TransformKind::Scale,
            TransformKind::Space,
            TransformKind::Acceleration,
            TransformKind::Smooth,
            TransformKind::Jitter,
        ];
        kinds.sort_by_key(|k| k.smart_rank());

        assert_eq!(
            kinds,
            vec![
                TransformKind::Space,
                TransformKind::Jitter,
                TransformKind::Smooth,
                TransformKind::Acceleration,
                TransformKind::Scale,
                TransformKind::Constrain,
            ]
        );
        assert_eq!(TransformKind::Other.smart_rank(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransformKind::Acceleration.to_string(), "Acceleration");
        assert_eq!(TransformKind::Other.to_string(), "Other");
    }
}
