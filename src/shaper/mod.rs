//! Shaping Pipeline
//!
//! The pipeline core: the [`Transform`] capability, the per-sample
//! [`ShapeContext`] lent to filters, and the [`CursorShaper`] that owns and
//! orders a chain of filters.
//!
//! # Data Flow
//!
//! ```text
//! raw sample
//!     ↓
//! ┌────────────────────────────┐
//! │ CursorShaper               │
//! │  previous := current       │
//! │  current  := raw           │
//! └────────────────────────────┘
//!     ↓
//! transform[0] → transform[1] → … → transform[n]   (ordered by OrderMode)
//!     ↓                                ↑
//!     └──── ShapeContext (previous_point, current_space) ┘
//!     ↓
//! shaped point
//! ```
//!
//! Each call is synchronous and O(window depth). A shaper is not shared
//! between sample producers; callers serialize access.

pub mod error;
pub mod pipeline;
pub mod transform;

pub use error::{Result, ShaperError};
pub use pipeline::{CursorShaper, OrderMode, TransformId, DEFAULT_PRIORITY};
pub use transform::{ShapeContext, Transform, TransformKind};
