//! # lamco-cursor-shaper
//!
//! Stateful filter pipeline that turns a stream of raw 2D pointer samples
//! (hand or finger tracking, touchpads, pen digitizers) into a stable cursor
//! position.
//!
//! # Architecture
//!
//! ```text
//! lamco-cursor-shaper
//!   ├─> geometry    (points, rectangles, vector helpers)
//!   ├─> shaper      (CursorShaper pipeline, Transform trait, ordering)
//!   ├─> transforms  (space, jitter, smoothing, scale, acceleration, constrain)
//!   └─> config      (TOML configuration → CursorShaper)
//! ```
//!
//! # Data Flow
//!
//! **Sample Path:** Sensor → Space → Jitter → Acceleration → Constrain → Cursor
//!
//! # Example
//!
//! ```
//! use lamco_cursor_shaper::geometry::{Point, Rect};
//! use lamco_cursor_shaper::shaper::CursorShaper;
//! use lamco_cursor_shaper::transforms::{BoxConstrainTransform, SpaceTransform};
//!
//! let display = Rect::new(0.0, 0.0, 1920.0, 1080.0);
//! let mut shaper = CursorShaper::new();
//! shaper.add_transform(SpaceTransform::new(Rect::new(0.0, 0.0, 100.0, 100.0), display).unwrap());
//! shaper.add_transform(BoxConstrainTransform::new(display).unwrap());
//!
//! assert_eq!(shaper.shape(Point::new(50.0, 50.0)), Point::new(960.0, 540.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Shaper configuration
pub mod config;

/// Points, rectangles and vector math
pub mod geometry;

/// The shaping pipeline and the transform contract
pub mod shaper;

/// Built-in transforms
pub mod transforms;

pub use config::Config;
pub use geometry::{Point, Rect};
pub use shaper::{CursorShaper, OrderMode, ShaperError, Transform, TransformKind};
