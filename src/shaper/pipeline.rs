//! Cursor Shaper
//!
//! Owns an ordered chain of transforms and runs every raw sample through it.
//!
//! # Ordering
//!
//! | Mode | Order |
//! |------|-------|
//! | Normal | Insertion order (default) |
//! | Smart | Space, Jitter, Smooth, Acceleration, Scale, Constrain, then custom filters |
//! | Custom | Highest priority first, ties by insertion order |

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::{Result, ShaperError};
use super::transform::{ShapeContext, Transform, TransformKind};
use crate::geometry::{Point, Rect};

/// Default priority for CUSTOM ordering
pub const DEFAULT_PRIORITY: i32 = 1;

/// How the shaper orders its transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// Insertion order
    #[default]
    Normal,
    /// Recommended order for built-in filter kinds
    Smart,
    /// Per-filter priority
    Custom,
}

impl std::fmt::Display for OrderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Smart => write!(f, "smart"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "manual" | "insertion" => Ok(Self::Normal),
            "smart" | "recommended" => Ok(Self::Smart),
            "custom" | "priority" => Ok(Self::Custom),
            _ => Err(format!("Unknown order mode: {}", s)),
        }
    }
}

/// Handle to a transform registered with a shaper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId(usize);

struct Entry {
    transform: Box<dyn Transform>,
    kind: TransformKind,
    priority: i32,
}

/// The shaping pipeline for one cursor session
pub struct CursorShaper {
    /// Registered transforms, in insertion order
    entries: Vec<Entry>,

    /// Execution order (indices into `entries`)
    order: Vec<usize>,

    /// Ordering mode
    mode: OrderMode,

    /// State shared with transforms during a call
    ctx: ShapeContext,

    /// Total samples shaped
    samples_processed: u64,
}

impl CursorShaper {
    /// Create an empty shaper in NORMAL mode
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            order: Vec::new(),
            mode: OrderMode::Normal,
            ctx: ShapeContext::default(),
            samples_processed: 0,
        }
    }

    /// Shape one raw sample
    pub fn shape(&mut self, raw: Point) -> Point {
        self.ctx.previous_point = self.ctx.current_point;
        self.ctx.current_point = raw;

        for &idx in &self.order {
            let input = self.ctx.current_point;
            let output = self.entries[idx].transform.transform(input, &mut self.ctx);
            self.ctx.current_point = output;
        }

        self.samples_processed += 1;

        trace!(
            "Shaped ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            raw.x,
            raw.y,
            self.ctx.current_point.x,
            self.ctx.current_point.y
        );

        self.ctx.current_point
    }

    /// Shape one raw sample given in integer pixels
    ///
    /// Runs the floating-point path and truncates the result toward zero.
    pub fn shape_pixel(&mut self, x: i32, y: i32) -> (i32, i32) {
        self.shape(Point::from_pixel(x, y)).to_pixel()
    }

    /// Append a transform with the default priority
    pub fn add_transform<T: Transform + 'static>(&mut self, transform: T) -> TransformId {
        self.add_boxed(Box::new(transform), DEFAULT_PRIORITY)
    }

    /// Append a transform with an explicit CUSTOM-mode priority
    pub fn add_transform_with_priority<T: Transform + 'static>(
        &mut self,
        transform: T,
        priority: i32,
    ) -> TransformId {
        self.add_boxed(Box::new(transform), priority)
    }

    /// Append an already boxed transform
    pub fn add_boxed(&mut self, transform: Box<dyn Transform>, priority: i32) -> TransformId {
        let kind = transform.kind();
        self.entries.push(Entry {
            transform,
            kind,
            priority,
        });
        self.rebuild_order();

        debug!(
            "Added {} transform (priority {}), {} total",
            kind,
            priority,
            self.entries.len()
        );

        TransformId(self.entries.len() - 1)
    }

    /// Change a transform's CUSTOM-mode priority
    pub fn set_priority(&mut self, id: TransformId, priority: i32) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.priority = priority;
            self.rebuild_order();
        }
    }

    /// A transform's CUSTOM-mode priority
    pub fn priority(&self, id: TransformId) -> Option<i32> {
        self.entries.get(id.0).map(|e| e.priority)
    }

    /// Set the ordering mode
    pub fn set_mode(&mut self, mode: OrderMode) {
        if mode != self.mode {
            debug!("Shaper order mode changed: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.rebuild_order();
        }
    }

    /// Current ordering mode
    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    /// Kinds of the registered transforms, in execution order
    pub fn execution_order(&self) -> Vec<TransformKind> {
        self.order.iter().map(|&i| self.entries[i].kind).collect()
    }

    /// Shaped output of the previous sample
    pub fn previous_point(&self) -> Point {
        self.ctx.previous_point
    }

    /// Shaped output of the latest sample
    pub fn current_point(&self) -> Point {
        self.ctx.current_point
    }

    /// Active coordinate space
    pub fn current_space(&self) -> Option<Rect> {
        self.ctx.current_space
    }

    /// Declare the coordinate space of the raw samples
    ///
    /// Needed when the pipeline has no space transform but contains a filter
    /// that reads the current space. A space transform overwrites this on
    /// every sample.
    pub fn set_current_space(&mut self, space: Rect) {
        self.ctx.current_space = Some(space);
    }

    /// Number of registered transforms
    pub fn transform_count(&self) -> usize {
        self.entries.len()
    }

    /// Total samples shaped since creation or the last reset
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Clear pipeline state and every transform's history
    ///
    /// A manually set coordinate space is kept.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.transform.reset();
        }
        self.ctx.previous_point = Point::ZERO;
        self.ctx.current_point = Point::ZERO;
        self.samples_processed = 0;
        debug!("Shaper reset");
    }

    /// Check that every filter's requirements are met
    ///
    /// A filter that reads the coordinate space needs a manually set current
    /// space or a space transform that runs before it in execution order.
    pub fn validate(&self) -> Result<()> {
        let mut space_known = self.ctx.current_space.is_some();

        for &i in &self.order {
            let entry = &self.entries[i];
            if entry.kind == TransformKind::Space {
                space_known = true;
            } else if !space_known && entry.transform.requires_space() {
                return Err(ShaperError::MissingCoordinateSpace(entry.kind.to_string()));
            }
        }

        Ok(())
    }

    fn rebuild_order(&mut self) {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();

        // sort_by_key is stable, so ties keep insertion order
        match self.mode {
            OrderMode::Normal => {}
            OrderMode::Smart => {
                order.sort_by_key(|&i| self.entries[i].kind.smart_rank().unwrap_or(u8::MAX));
            }
            OrderMode::Custom => {
                order.sort_by_key(|&i| std::cmp::Reverse(self.entries[i].priority));
            }
        }

        self.order = order;
    }
}

impl Default for CursorShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CursorShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorShaper")
            .field("mode", &self.mode)
            .field("order", &self.execution_order())
            .field("ctx", &self.ctx)
            .field("samples_processed", &self.samples_processed)
            .finish()
    }
}
