//! Built-in Transforms
//!
//! | Transform | Kind | State |
//! |-----------|------|-------|
//! | [`SpaceTransform`] | Space | none (publishes target space) |
//! | [`JitterTransform`] | Jitter | heading window + two smoothers |
//! | [`SmoothTransform`] | Smooth | point window |
//! | [`VectorSmoothTransform`] | Smooth | heading window |
//! | [`AccelerationTransform`] | Acceleration | last raw point + inner scale |
//! | [`ScaleTransform`] | Scale | last raw point |
//! | [`BoxConstrainTransform`] | Constrain | none |
//!
//! Recommended chain: space → jitter → acceleration → constrain.

pub mod acceleration;
pub mod constrain;
pub mod curve;
pub mod history;
pub mod jitter;
pub mod scale;
pub mod smooth;
pub mod space;
pub mod vector_smooth;

pub use acceleration::{AccelerationTransform, CurveUnits};
pub use constrain::BoxConstrainTransform;
pub use curve::GainCurve;
pub use history::{History, MIN_DEPTH};
pub use jitter::{
    JitterStrategy, JitterTransform, DEFAULT_JITTER_THRESHOLD, DEFAULT_SAMPLE_DEPTH,
    STRAIGHT_TOLERANCE,
};
pub use scale::ScaleTransform;
pub use smooth::{SmoothTransform, DEFAULT_SMOOTH_DEPTH};
pub use space::{SpaceMode, SpaceTransform};
pub use vector_smooth::{VectorSmoothTransform, DEFAULT_PATH_DEPTH};
