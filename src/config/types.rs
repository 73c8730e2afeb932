//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::geometry::Rect;
use crate::shaper::{self, CursorShaper, OrderMode, Transform, DEFAULT_PRIORITY};
use crate::transforms::{
    AccelerationTransform, BoxConstrainTransform, CurveUnits, GainCurve, JitterTransform,
    ScaleTransform, SmoothTransform, SpaceMode, SpaceTransform, VectorSmoothTransform,
    DEFAULT_JITTER_THRESHOLD, DEFAULT_PATH_DEPTH, DEFAULT_SAMPLE_DEPTH, DEFAULT_SMOOTH_DEPTH,
};

/// Shaping pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShaperConfig {
    /// Transform ordering mode ("normal", "smart", "custom")
    #[serde(default)]
    pub order: OrderMode,

    /// Coordinate space of the raw samples, for pipelines without a space transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_space: Option<Rect>,

    /// Transforms in insertion order
    #[serde(default)]
    pub transforms: Vec<TransformEntry>,
}

impl ShaperConfig {
    /// Build and validate a shaper from this configuration
    pub fn build(&self) -> shaper::Result<CursorShaper> {
        let mut shaper = CursorShaper::new();
        shaper.set_mode(self.order);

        if let Some(space) = self.current_space {
            shaper.set_current_space(space);
        }

        for entry in &self.transforms {
            shaper.add_boxed(entry.transform.build()?, entry.priority);
        }

        shaper.validate()?;
        Ok(shaper)
    }
}

/// One transform in the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformEntry {
    /// Priority for CUSTOM ordering (higher runs first)
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Transform settings, tagged by `kind`
    #[serde(flatten)]
    pub transform: TransformConfig,
}

impl From<TransformConfig> for TransformEntry {
    fn from(transform: TransformConfig) -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            transform,
        }
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// Settings for a single built-in transform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformConfig {
    /// Coordinate space remapping
    Space(SpaceConfig),
    /// Jitter suppression
    Jitter(JitterConfig),
    /// Point smoothing
    Smooth(SmoothConfig),
    /// Path (direction) smoothing
    PathSmooth(PathSmoothConfig),
    /// Velocity scaling
    Scale(ScaleConfig),
    /// Non-linear acceleration
    Acceleration(AccelerationConfig),
    /// Boundary clamping
    Constrain(ConstrainConfig),
}

impl TransformConfig {
    /// Instantiate the configured transform
    pub fn build(&self) -> shaper::Result<Box<dyn Transform>> {
        let transform: Box<dyn Transform> = match self {
            Self::Space(c) => Box::new(
                SpaceTransform::new(c.source, c.target)?
                    .with_mode(c.mode)
                    .with_mirror(c.mirror_x, c.mirror_y),
            ),
            Self::Jitter(c) => Box::new(
                JitterTransform::new(c.curvature_threshold)?
                    .with_jitter_threshold(c.jitter_threshold)?
                    .with_sample_depth(c.sample_depth)
                    .with_point_depth(c.point_depth)
                    .with_path_depth(c.path_depth.unwrap_or(c.sample_depth)),
            ),
            Self::Smooth(c) => Box::new(SmoothTransform::new(c.depth)),
            Self::PathSmooth(c) => Box::new(VectorSmoothTransform::new(c.depth)),
            Self::Scale(c) => Box::new(ScaleTransform::new(c.multiplier)?),
            Self::Acceleration(c) => Box::new(
                AccelerationTransform::new(c.curve.clone())
                    .with_scale_factor(c.scale_factor)?
                    .with_units(c.units),
            ),
            Self::Constrain(c) => Box::new(BoxConstrainTransform::new(c.bounds)?),
        };
        Ok(transform)
    }
}

/// Space transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceConfig {
    /// Space the incoming points live in
    pub source: Rect,

    /// Space to map into
    pub target: Rect,

    /// Flip horizontally
    #[serde(default)]
    pub mirror_x: bool,

    /// Flip vertically
    #[serde(default)]
    pub mirror_y: bool,

    /// Aspect ratio policy ("stretch", "fill", "fit")
    #[serde(default)]
    pub mode: SpaceMode,
}

/// Jitter transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JitterConfig {
    /// Step length at or above which smoothing stops
    #[serde(default = "default_jitter_threshold")]
    pub jitter_threshold: f64,

    /// Largest tolerated turn between consecutive headings, in radians (required)
    pub curvature_threshold: f64,

    /// Number of recent headings examined
    #[serde(default = "default_sample_depth")]
    pub sample_depth: usize,

    /// Point smoother depth
    #[serde(default = "default_smooth_depth")]
    pub point_depth: usize,

    /// Path smoother depth (defaults to `sample_depth`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_depth: Option<usize>,
}

fn default_jitter_threshold() -> f64 {
    DEFAULT_JITTER_THRESHOLD
}
fn default_sample_depth() -> usize {
    DEFAULT_SAMPLE_DEPTH
}
fn default_smooth_depth() -> usize {
    DEFAULT_SMOOTH_DEPTH
}
fn default_path_depth() -> usize {
    DEFAULT_PATH_DEPTH
}
fn default_multiplier() -> f64 {
    1.0
}

/// Point smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothConfig {
    /// Number of points averaged
    #[serde(default = "default_smooth_depth")]
    pub depth: usize,
}

/// Path smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSmoothConfig {
    /// Number of headings averaged
    #[serde(default = "default_path_depth")]
    pub depth: usize,
}

/// Scale transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Velocity multiplier
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

/// Acceleration transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccelerationConfig {
    /// `[threshold, gain]` pairs; must include a 0.0 threshold
    #[serde(default)]
    pub curve: GainCurve,

    /// Factor applied on top of the curve's gain
    #[serde(default = "default_multiplier")]
    pub scale_factor: f64,

    /// Threshold units ("absolute", "space_diagonal")
    #[serde(default)]
    pub units: CurveUnits,
}

/// Box constrain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstrainConfig {
    /// Clamp box
    pub bounds: Rect,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format ("pretty", "compact", "json")
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Also write logs to this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_file: None,
        }
    }
}
