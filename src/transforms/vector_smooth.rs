//! Path smoothing
//!
//! Averages the *directions* of the last few steps and applies the result,
//! scaled to the latest step's length, to the previous shaped point. Heading
//! is smoothed; speed tracks the input immediately.

use tracing::debug;

use super::history::History;
use crate::geometry::{average_point, magnitude, normalize, vector, Point};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Default number of directions averaged
pub const DEFAULT_PATH_DEPTH: usize = 3;

/// Vector (path) smoothing transform
#[derive(Debug, Clone)]
pub struct VectorSmoothTransform {
    /// Unit step directions, oldest first
    directions: History<Point>,

    /// Last raw point seen
    last_point: Point,

    /// False until the first point after construction or reset
    active: bool,
}

impl VectorSmoothTransform {
    /// Create a path smoother averaging up to `depth` directions (minimum 2)
    pub fn new(depth: usize) -> Self {
        Self {
            directions: History::new(depth),
            last_point: Point::ZERO,
            active: false,
        }
    }

    /// Number of directions averaged
    pub fn depth(&self) -> usize {
        self.directions.capacity()
    }

    /// Resize the window, dropping excess history immediately
    pub fn set_depth(&mut self, depth: usize) {
        self.directions.set_capacity(depth);
        debug!("Path smoothing depth set to {}", self.directions.capacity());
    }

    /// Whether smoothing has started since the last reset
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of directions currently held
    pub fn direction_count(&self) -> usize {
        self.directions.len()
    }

    /// Smooth one point against the previous shaped point
    pub fn smooth(&mut self, point: Point, previous_shaped: Point) -> Point {
        if !self.active {
            self.last_point = point;
            self.active = true;
            return point;
        }

        let step = vector(self.last_point, point);
        // A stationary sample has no heading to record
        if let Some(direction) = normalize(step) {
            self.directions.push(direction);
        }
        self.last_point = point;

        if self.directions.len() < 2 {
            return point;
        }

        match average_point(&self.directions).and_then(normalize) {
            Some(heading) => previous_shaped + heading * magnitude(step),
            // Recent headings cancel out; take the step as-is
            None => previous_shaped + step,
        }
    }

    /// Clear the direction window and deactivate
    pub fn clear(&mut self) {
        self.directions.clear();
        self.active = false;
    }
}

impl Default for VectorSmoothTransform {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_DEPTH)
    }
}

impl Transform for VectorSmoothTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Smooth
    }

    fn transform(&mut self, point: Point, ctx: &mut ShapeContext) -> Point {
        self.smooth(point, ctx.previous_point)
    }

    fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_point_passes_through() {
        let mut path = VectorSmoothTransform::default();
        assert!(!path.is_active());
        assert_eq!(
            path.smooth(Point::new(10.0, 10.0), Point::new(99.0, 99.0)),
            Point::new(10.0, 10.0)
        );
        assert!(path.is_active());
    }

    #[test]
    fn test_single_direction_passes_through() {
        let mut path = VectorSmoothTransform::default();
        path.smooth(Point::new(0.0, 0.0), Point::ZERO);
        assert_eq!(
            path.smooth(Point::new(3.0, 0.0), Point::new(50.0, 50.0)),
            Point::new(3.0, 0.0)
        );
        assert_eq!(path.direction_count(), 1);
    }

    #[test]
    fn test_averages_heading_keeps_step_length() {
        let mut path = VectorSmoothTransform::new(3);
        path.smooth(Point::new(0.0, 0.0), Point::ZERO);
        path.smooth(Point::new(0.0, 4.0), Point::ZERO); // heading (0, 1)

        // Step (4, 0): heading (1, 0), average of (0,1),(1,0) is 45°, length 4
        let out = path.smooth(Point::new(4.0, 4.0), Point::new(10.0, 10.0));
        let expected = 4.0 / 2f64.sqrt();
        assert!((out.x - (10.0 + expected)).abs() < 1e-9);
        assert!((out.y - (10.0 + expected)).abs() < 1e-9);
    }

    #[test]
    fn test_straight_line_follows_previous_shaped() {
        let mut path = VectorSmoothTransform::new(3);
        path.smooth(Point::new(0.0, 0.0), Point::ZERO);
        path.smooth(Point::new(2.0, 0.0), Point::ZERO);

        let out = path.smooth(Point::new(4.0, 0.0), Point::new(100.0, 50.0));
        assert_eq!(out, Point::new(102.0, 50.0));
    }

    #[test]
    fn test_stationary_sample_holds_position() {
        let mut path = VectorSmoothTransform::new(3);
        path.smooth(Point::new(0.0, 0.0), Point::ZERO);
        path.smooth(Point::new(1.0, 0.0), Point::ZERO);
        path.smooth(Point::new(2.0, 0.0), Point::ZERO);

        let out = path.smooth(Point::new(2.0, 0.0), Point::new(7.0, 7.0));
        assert_eq!(out, Point::new(7.0, 7.0));
        assert_eq!(path.direction_count(), 2);
    }

    #[test]
    fn test_cancelling_headings_take_raw_step() {
        let mut path = VectorSmoothTransform::new(2);
        path.smooth(Point::new(0.0, 0.0), Point::ZERO);
        path.smooth(Point::new(1.0, 0.0), Point::ZERO);

        // Reversal: headings (1,0) and (-1,0) average to zero
        let out = path.smooth(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        assert_eq!(out, Point::new(4.0, 5.0));
    }

    #[test]
    fn test_reset_deactivates() {
        let mut path = VectorSmoothTransform::default();
        path.smooth(Point::new(0.0, 0.0), Point::ZERO);
        path.smooth(Point::new(1.0, 0.0), Point::ZERO);
        path.reset();

        assert!(!path.is_active());
        assert_eq!(path.direction_count(), 0);
        assert_eq!(
            path.smooth(Point::new(40.0, 40.0), Point::ZERO),
            Point::new(40.0, 40.0)
        );
    }
}
