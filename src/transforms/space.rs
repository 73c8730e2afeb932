//! Coordinate Space Remapping
//!
//! Affine map from a source rectangle (e.g. sensor space, X = -320..320,
//! Y = -240..240) to a target rectangle (e.g. a 1920x1080 display).
//!
//! # Aspect Modes
//!
//! | Mode | Scale | Effect when aspect ratios differ |
//! |------|-------|----------------------------------|
//! | Stretch | per-axis | Distorts; corners map to corners |
//! | Fill | max of axes | Centered, overflow clipped; output may leave the target |
//! | Fit | min of axes | Centered with bands; output stays inside the target |
//!
//! Mirroring negates the raw coordinate before the source origin is
//! subtracted, so it reflects about the source's zero axis. That matches
//! sensor spaces centered on the origin.
//!
//! Every call publishes the target as the pipeline's current space.
//!
//! Upscaling magnifies jitter; place a jitter filter after this one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Point, Rect};
use crate::shaper::error::{Result, ShaperError};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Aspect ratio policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpaceMode {
    /// Independent per-axis scale
    #[default]
    Stretch,
    /// Uniform scale covering the whole target
    Fill,
    /// Uniform scale inscribed in the target
    Fit,
}

impl std::fmt::Display for SpaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stretch => write!(f, "stretch"),
            Self::Fill => write!(f, "fill"),
            Self::Fit => write!(f, "fit"),
        }
    }
}

impl std::str::FromStr for SpaceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stretch" => Ok(Self::Stretch),
            "fill" | "crop" => Ok(Self::Fill),
            "fit" | "letterbox" => Ok(Self::Fit),
            _ => Err(format!("Unknown space mode: {}", s)),
        }
    }
}

/// Per-axis scale and destination origin for a source/target pair
#[derive(Debug, Clone, Copy, PartialEq)]
struct Mapping {
    scale_x: f64,
    scale_y: f64,
    origin_x: f64,
    origin_y: f64,
}

/// Space transform
#[derive(Debug, Clone)]
pub struct SpaceTransform {
    source: Rect,
    target: Rect,
    mirror_x: bool,
    mirror_y: bool,
    mode: SpaceMode,
    mapping: Mapping,
}

impl SpaceTransform {
    /// Create a STRETCH mapping without mirroring
    pub fn new(source: Rect, target: Rect) -> Result<Self> {
        validate_space("source", &source)?;
        validate_space("target", &target)?;

        let mode = SpaceMode::default();
        Ok(Self {
            source,
            target,
            mirror_x: false,
            mirror_y: false,
            mode,
            mapping: compute_mapping(&source, &target, mode),
        })
    }

    /// Set the aspect mode
    pub fn with_mode(mut self, mode: SpaceMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Set horizontal and vertical mirroring
    pub fn with_mirror(mut self, mirror_x: bool, mirror_y: bool) -> Self {
        self.mirror_x = mirror_x;
        self.mirror_y = mirror_y;
        self
    }

    /// Map a point from source space to target space
    pub fn map(&self, point: Point) -> Point {
        let x = if self.mirror_x { -point.x } else { point.x };
        let y = if self.mirror_y { -point.y } else { point.y };

        let m = &self.mapping;
        Point::new(
            (x - self.source.x) * m.scale_x + m.origin_x,
            (y - self.source.y) * m.scale_y + m.origin_y,
        )
    }

    /// Map integer pixels, truncating the result toward zero
    pub fn map_pixel(&self, x: i32, y: i32) -> (i32, i32) {
        self.map(Point::from_pixel(x, y)).to_pixel()
    }

    /// Source space
    pub fn source(&self) -> Rect {
        self.source
    }

    /// Target space
    pub fn target(&self) -> Rect {
        self.target
    }

    /// Aspect mode
    pub fn mode(&self) -> SpaceMode {
        self.mode
    }

    /// Mirroring flags (horizontal, vertical)
    pub fn mirror(&self) -> (bool, bool) {
        (self.mirror_x, self.mirror_y)
    }

    /// Replace the source space
    pub fn set_source(&mut self, source: Rect) -> Result<()> {
        validate_space("source", &source)?;
        self.source = source;
        self.recompute();
        Ok(())
    }

    /// Replace the target space
    pub fn set_target(&mut self, target: Rect) -> Result<()> {
        validate_space("target", &target)?;
        self.target = target;
        self.recompute();
        Ok(())
    }

    /// Set the aspect mode
    pub fn set_mode(&mut self, mode: SpaceMode) {
        self.mode = mode;
        self.recompute();
    }

    /// Set mirroring
    pub fn set_mirror(&mut self, mirror_x: bool, mirror_y: bool) {
        self.mirror_x = mirror_x;
        self.mirror_y = mirror_y;
    }

    fn recompute(&mut self) {
        self.mapping = compute_mapping(&self.source, &self.target, self.mode);
        debug!(
            "Space mapping ({}): scale=({:.4}, {:.4}), origin=({:.2}, {:.2})",
            self.mode,
            self.mapping.scale_x,
            self.mapping.scale_y,
            self.mapping.origin_x,
            self.mapping.origin_y
        );
    }
}

fn validate_space(role: &'static str, rect: &Rect) -> Result<()> {
    if rect.is_finite() && rect.has_area() {
        Ok(())
    } else {
        Err(ShaperError::invalid_rect(role, rect))
    }
}

fn compute_mapping(source: &Rect, target: &Rect, mode: SpaceMode) -> Mapping {
    let h_scale = target.width / source.width;
    let v_scale = target.height / source.height;

    match mode {
        SpaceMode::Stretch => Mapping {
            scale_x: h_scale,
            scale_y: v_scale,
            origin_x: target.x,
            origin_y: target.y,
        },
        SpaceMode::Fill => {
            let scale = h_scale.max(v_scale);
            if h_scale > v_scale {
                // Height overflows; shift up by half the overflow
                let overflow = (target.height - source.height * scale).abs();
                Mapping {
                    scale_x: scale,
                    scale_y: scale,
                    origin_x: target.x,
                    origin_y: target.y - overflow / 2.0,
                }
            } else {
                let overflow = (target.width - source.width * scale).abs();
                Mapping {
                    scale_x: scale,
                    scale_y: scale,
                    origin_x: target.x - overflow / 2.0,
                    origin_y: target.y,
                }
            }
        }
        SpaceMode::Fit => {
            let scale = h_scale.min(v_scale);
            if h_scale > v_scale {
                // Height limits; pillarbox horizontally
                let band = (target.width - source.width * scale).abs();
                Mapping {
                    scale_x: scale,
                    scale_y: scale,
                    origin_x: target.x + band / 2.0,
                    origin_y: target.y,
                }
            } else {
                let band = (target.height - source.height * scale).abs();
                Mapping {
                    scale_x: scale,
                    scale_y: scale,
                    origin_x: target.x,
                    origin_y: target.y + band / 2.0,
                }
            }
        }
    }
}

impl Transform for SpaceTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Space
    }

    fn transform(&mut self, point: Point, ctx: &mut ShapeContext) -> Point {
        ctx.current_space = Some(self.target);
        self.map(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_to_display(mode: SpaceMode) -> SpaceTransform {
        SpaceTransform::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
        )
        .unwrap()
        .with_mode(mode)
    }

    #[test]
    fn test_stretch_center() {
        let space = unit_to_display(SpaceMode::Stretch);
        assert_eq!(space.map(Point::new(50.0, 50.0)), Point::new(960.0, 540.0));
        assert_eq!(space.map(Point::new(100.0, 100.0)), Point::new(1920.0, 1080.0));
    }

    #[test]
    fn test_fit_pillarboxes() {
        let space = unit_to_display(SpaceMode::Fit);

        // Scale 10.8, bands of 420 on each side
        assert_eq!(space.map(Point::new(0.0, 0.0)), Point::new(420.0, 0.0));
        assert_eq!(space.map(Point::new(50.0, 50.0)), Point::new(960.0, 540.0));
        assert_eq!(space.map(Point::new(100.0, 100.0)), Point::new(1500.0, 1080.0));
    }

    #[test]
    fn test_fit_letterboxes() {
        let space = SpaceTransform::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
        )
        .unwrap()
        .with_mode(SpaceMode::Fit);

        // Scale 5, bands of 250 top and bottom
        assert_eq!(space.map(Point::new(0.0, 0.0)), Point::new(0.0, 250.0));
        assert_eq!(space.map(Point::new(200.0, 100.0)), Point::new(1000.0, 750.0));
    }

    #[test]
    fn test_fill_overflows() {
        let space = unit_to_display(SpaceMode::Fill);

        // Scale 19.2, vertical overflow of 840 split evenly
        assert_eq!(space.map(Point::new(50.0, 50.0)), Point::new(960.0, 540.0));
        assert_eq!(space.map(Point::new(0.0, 0.0)), Point::new(0.0, -420.0));
        assert_eq!(space.map(Point::new(100.0, 100.0)), Point::new(1920.0, 1500.0));
    }

    #[test]
    fn test_fill_horizontal_overflow() {
        let space = SpaceTransform::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
        )
        .unwrap()
        .with_mode(SpaceMode::Fill);

        // Scale 10, horizontal overflow of 1000
        assert_eq!(space.map(Point::new(0.0, 0.0)), Point::new(-500.0, 0.0));
        assert_eq!(space.map(Point::new(100.0, 50.0)), Point::new(500.0, 500.0));
    }

    #[test]
    fn test_mirror_centered_sensor_space() {
        let space = SpaceTransform::new(
            Rect::new(-320.0, -240.0, 640.0, 480.0),
            Rect::new(0.0, 0.0, 640.0, 480.0),
        )
        .unwrap()
        .with_mirror(true, false);

        assert_eq!(space.map(Point::new(100.0, 0.0)), Point::new(220.0, 240.0));
        assert_eq!(space.map(Point::new(-320.0, -240.0)), Point::new(640.0, 0.0));
        assert_eq!(space.mirror(), (true, false));
    }

    #[test]
    fn test_publishes_target_space() {
        let mut space = unit_to_display(SpaceMode::Stretch);
        let mut ctx = ShapeContext::default();

        space.transform(Point::new(10.0, 10.0), &mut ctx);
        assert_eq!(ctx.current_space, Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)));
    }

    #[test]
    fn test_map_pixel_truncates() {
        let space = SpaceTransform::new(
            Rect::new(0.0, 0.0, 3.0, 3.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
        )
        .unwrap();

        // 1 * 2/3 = 0.666 → 0, 2 * 2/3 = 1.333 → 1
        assert_eq!(space.map_pixel(1, 2), (0, 1));
    }

    #[test]
    fn test_rejects_degenerate_spaces() {
        let ok = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(SpaceTransform::new(Rect::new(0.0, 0.0, 0.0, 10.0), ok).is_err());
        assert!(SpaceTransform::new(ok, Rect::new(0.0, 0.0, 10.0, f64::NAN)).is_err());

        let mut space = SpaceTransform::new(ok, ok).unwrap();
        assert!(space.set_target(Rect::new(0.0, 0.0, 10.0, 0.0)).is_err());
        assert_eq!(space.target(), ok);
    }

    #[test]
    fn test_setters_recompute_mapping() {
        let mut space = unit_to_display(SpaceMode::Stretch);
        space.set_mode(SpaceMode::Fit);
        assert_eq!(space.map(Point::new(0.0, 0.0)), Point::new(420.0, 0.0));

        space
            .set_target(Rect::new(0.0, 0.0, 1000.0, 1000.0))
            .unwrap();
        assert_eq!(space.map(Point::new(100.0, 100.0)), Point::new(1000.0, 1000.0));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("fit".parse::<SpaceMode>().unwrap(), SpaceMode::Fit);
        assert_eq!("Letterbox".parse::<SpaceMode>().unwrap(), SpaceMode::Fit);
        assert_eq!("fill".parse::<SpaceMode>().unwrap(), SpaceMode::Fill);
        assert!("squash".parse::<SpaceMode>().is_err());
    }
}
