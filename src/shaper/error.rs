//! Shaper Error Types
//!
//! Configuration-time errors for the shaping pipeline. Per-sample shaping
//! never fails; everything here is raised while building or tuning filters.

use thiserror::Error;

/// Result type for shaper operations
pub type Result<T> = std::result::Result<T, ShaperError>;

/// Shaper error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShaperError {
    /// Gain curve has no entry at distance 0.0
    #[error("Gain curve has no baseline entry at distance 0.0")]
    MissingBaseline,

    /// Gain curve entry with a negative or non-finite threshold, or non-finite gain
    #[error("Invalid gain curve entry: threshold={0}, gain={1}")]
    InvalidCurveEntry(f64, f64),

    /// The same threshold appears twice in a gain curve
    #[error("Duplicate gain curve threshold: {0}")]
    DuplicateThreshold(f64),

    /// Rectangle that cannot define a coordinate space
    #[error("Invalid {role} rectangle: ({x}, {y}, {width}x{height})")]
    InvalidRect {
        /// Which rectangle was rejected ("source", "target", "box")
        role: &'static str,
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
    },

    /// Negative or non-finite tunable
    #[error("Invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A filter needs the current coordinate space but nothing provides it
    #[error("{0} transform requires a coordinate space: run a space transform before it or set the current space")]
    MissingCoordinateSpace(String),
}

impl ShaperError {
    pub(crate) fn invalid_rect(role: &'static str, rect: &crate::geometry::Rect) -> Self {
        ShaperError::InvalidRect {
            role,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Reject negative or non-finite tunables
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShaperError::InvalidParameter { name, value })
    }
}

/// Reject non-finite tunables; sign is left to the caller
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ShaperError::InvalidParameter { name, value })
    }
}
