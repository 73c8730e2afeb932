//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments
//!
//! # Example
//!
//! ```toml
//! [shaper]
//! order = "smart"
//!
//! [[shaper.transforms]]
//! kind = "space"
//! source = { x = -320.0, y = -240.0, width = 640.0, height = 480.0 }
//! target = { x = 0.0, y = 0.0, width = 1920.0, height = 1080.0 }
//! mode = "fit"
//!
//! [[shaper.transforms]]
//! kind = "acceleration"
//! curve = [[0.0, 0.5], [20.0, 1.5], [50.0, 2.0]]
//!
//! [logging]
//! level = "debug"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::Rect;
use crate::shaper::{CursorShaper, OrderMode};
use crate::transforms::{GainCurve, SpaceMode};

pub mod types;

pub use types::{
    AccelerationConfig, ConstrainConfig, JitterConfig, LoggingConfig, PathSmoothConfig, ScaleConfig,
    ShaperConfig, SmoothConfig, SpaceConfig, TransformConfig, TransformEntry,
};

/// Curvature threshold used by the default jitter filter, in radians
pub const DEFAULT_CURVATURE_THRESHOLD: f64 = 0.2;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shaping pipeline configuration
    #[serde(default)]
    pub shaper: ShaperConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    ///
    /// A centered 640x480 sensor mapped onto a 1920x1080 display with jitter
    /// suppression, the default gain curve and a clamp to the display.
    pub fn default_config() -> Self {
        let sensor = Rect::new(-320.0, -240.0, 640.0, 480.0);
        let display = Rect::new(0.0, 0.0, 1920.0, 1080.0);

        let transforms = vec![
            TransformConfig::Space(SpaceConfig {
                source: sensor,
                target: display,
                mirror_x: false,
                mirror_y: false,
                mode: SpaceMode::Fit,
            }),
            TransformConfig::Jitter(JitterConfig {
                jitter_threshold: crate::transforms::DEFAULT_JITTER_THRESHOLD,
                curvature_threshold: DEFAULT_CURVATURE_THRESHOLD,
                sample_depth: crate::transforms::DEFAULT_SAMPLE_DEPTH,
                point_depth: crate::transforms::DEFAULT_SMOOTH_DEPTH,
                path_depth: None,
            }),
            TransformConfig::Acceleration(AccelerationConfig {
                curve: GainCurve::default(),
                scale_factor: 1.0,
                units: Default::default(),
            }),
            TransformConfig::Constrain(ConstrainConfig { bounds: display }),
        ];

        Config {
            shaper: ShaperConfig {
                order: OrderMode::Smart,
                current_space: None,
                transforms: transforms.into_iter().map(TransformEntry::from).collect(),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        if self.shaper.transforms.is_empty() {
            anyhow::bail!("Shaper configuration has no transforms");
        }

        self.shaper
            .build()
            .context("Invalid shaper configuration")?;

        Ok(())
    }

    /// Build the configured shaper
    pub fn build_shaper(&self) -> Result<CursorShaper> {
        self.shaper
            .build()
            .context("Failed to build shaper from configuration")
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, order: Option<OrderMode>, log_level: Option<String>) -> Self {
        if let Some(order) = order {
            self.shaper.order = order;
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
        self
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shaper::TransformKind;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.shaper.order, OrderMode::Smart);
        assert_eq!(config.shaper.transforms.len(), 4);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_builds_in_smart_order() {
        let shaper = Config::default_config().build_shaper().unwrap();
        assert_eq!(
            shaper.execution_order(),
            vec![
                TransformKind::Space,
                TransformKind::Jitter,
                TransformKind::Acceleration,
                TransformKind::Constrain,
            ]
        );
    }

    #[test]
    fn test_default_config_toml_reloads() {
        let text = Config::default_config().to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.shaper.transforms.len(), 4);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[shaper]
order = "custom"

[[shaper.transforms]]
kind = "space"
source = {{ x = 0, y = 0, width = 100, height = 100 }}
target = {{ x = 0, y = 0, width = 1920, height = 1080 }}

[[shaper.transforms]]
kind = "constrain"
priority = 0
bounds = {{ x = 0, y = 0, width = 1920, height = 1080 }}

[[shaper.transforms]]
kind = "scale"
priority = 5
multiplier = 1.0
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.shaper.order, OrderMode::Custom);
        assert_eq!(config.shaper.transforms[0].priority, 1);
        assert_eq!(config.shaper.transforms[2].priority, 5);

        let mut shaper = config.build_shaper().unwrap();
        assert_eq!(
            shaper.execution_order(),
            vec![
                TransformKind::Scale,
                TransformKind::Space,
                TransformKind::Constrain
            ]
        );

        assert_eq!(
            shaper.shape(Point::new(50.0, 50.0)),
            Point::new(960.0, 540.0)
        );
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/shaper.toml").is_err());
    }

    #[test]
    fn test_jitter_requires_curvature_threshold() {
        let text = r#"
[[shaper.transforms]]
kind = "jitter"
jitter_threshold = 10.0
"#;
        assert!(toml::from_str::<Config>(text).is_err());

        let text = r#"
[[shaper.transforms]]
kind = "jitter"
curvature_threshold = 0.3
"#;
        let config: Config = toml::from_str(text).unwrap();
        match &config.shaper.transforms[0].transform {
            TransformConfig::Jitter(jitter) => {
                assert_eq!(jitter.curvature_threshold, 0.3);
                assert_eq!(jitter.jitter_threshold, 20.0);
                assert_eq!(jitter.path_depth, None);
            }
            other => panic!("unexpected transform: {:?}", other),
        }
    }

    #[test]
    fn test_curve_without_baseline_rejected() {
        let text = r#"
[[shaper.transforms]]
kind = "acceleration"
curve = [[10.0, 1.0], [20.0, 2.0]]
"#;
        assert!(toml::from_str::<Config>(text).is_err());
    }

    #[test]
    fn test_acceleration_without_space_fails_validation() {
        let text = r#"
[[shaper.transforms]]
kind = "acceleration"
"#;
        let config: Config = toml::from_str(text).unwrap();
        assert!(config.validate().is_err());

        let text = r#"
[shaper]
current_space = { x = 0.0, y = 0.0, width = 800.0, height = 600.0 }

[[shaper.transforms]]
kind = "acceleration"
"#;
        let config: Config = toml::from_str(text).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_factors_fail_validation() {
        let text = r#"
[shaper]
current_space = { x = 0.0, y = 0.0, width = 800.0, height = 600.0 }

[[shaper.transforms]]
kind = "acceleration"
scale_factor = nan

[[shaper.transforms]]
kind = "constrain"
bounds = { x = 0.0, y = 0.0, width = 800.0, height = 600.0 }
"#;
        let config: Config = toml::from_str(text).unwrap();
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("scale factor"));

        let text = r#"
[[shaper.transforms]]
kind = "scale"
multiplier = inf
"#;
        let config: Config = toml::from_str(text).unwrap();
        assert!(config.validate().is_err());
        assert!(config.build_shaper().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default_config();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_space() {
        let mut config = Config::default_config();
        if let TransformConfig::Space(space) = &mut config.shaper.transforms[0].transform {
            space.source.width = 0.0;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_pipeline() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_overrides() {
        let config = Config::default_config()
            .with_overrides(Some(OrderMode::Normal), Some("trace".to_string()));
        assert_eq!(config.shaper.order, OrderMode::Normal);
        assert_eq!(config.logging.level, "trace");

        let config = Config::default_config().with_overrides(None, None);
        assert_eq!(config.shaper.order, OrderMode::Smart);
    }
}
