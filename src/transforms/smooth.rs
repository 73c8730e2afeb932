//! Point smoothing
//!
//! Moving average over the most recent raw points, current one included.
//! Kills tremor at the cost of lag.

use tracing::debug;

use super::history::History;
use crate::geometry::{average_point, Point};
use crate::shaper::{ShapeContext, Transform, TransformKind};

/// Default number of points averaged
pub const DEFAULT_SMOOTH_DEPTH: usize = 50;

/// Point-smoothing transform
#[derive(Debug, Clone)]
pub struct SmoothTransform {
    points: History<Point>,
}

impl SmoothTransform {
    /// Create a smoother averaging up to `depth` points (minimum 2)
    pub fn new(depth: usize) -> Self {
        Self {
            points: History::new(depth),
        }
    }

    /// Number of points averaged
    pub fn depth(&self) -> usize {
        self.points.capacity()
    }

    /// Resize the window, dropping excess history immediately
    pub fn set_depth(&mut self, depth: usize) {
        self.points.set_capacity(depth);
        debug!("Point smoothing depth set to {}", self.points.capacity());
    }

    /// Number of points currently held
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no history is held
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point and return the mean of the window
    pub fn smooth(&mut self, point: Point) -> Point {
        self.points.push(point);
        average_point(&self.points).unwrap_or(point)
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for SmoothTransform {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTH_DEPTH)
    }
}

impl Transform for SmoothTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Smooth
    }

    fn transform(&mut self, point: Point, _ctx: &mut ShapeContext) -> Point {
        self.smooth(point)
    }

    fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averages_window() {
        let mut smooth = SmoothTransform::new(3);

        assert_eq!(smooth.smooth(Point::new(3.0, 0.0)), Point::new(3.0, 0.0));
        assert_eq!(smooth.smooth(Point::new(6.0, 0.0)), Point::new(4.5, 0.0));
        assert_eq!(smooth.smooth(Point::new(9.0, 3.0)), Point::new(6.0, 1.0));

        // Oldest (3, 0) evicted
        assert_eq!(smooth.smooth(Point::new(12.0, 0.0)), Point::new(9.0, 1.0));
    }

    #[test]
    fn test_constant_input_converges() {
        let mut smooth = SmoothTransform::new(4);
        smooth.smooth(Point::new(100.0, 100.0));
        for _ in 0..4 {
            smooth.smooth(Point::new(5.0, 7.0));
        }
        assert_eq!(smooth.smooth(Point::new(5.0, 7.0)), Point::new(5.0, 7.0));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut smooth = SmoothTransform::new(10);
        smooth.smooth(Point::new(100.0, 100.0));
        smooth.reset();
        assert!(smooth.is_empty());
        assert_eq!(smooth.smooth(Point::new(1.0, 1.0)), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_depth_resize() {
        let mut smooth = SmoothTransform::default();
        assert_eq!(smooth.depth(), DEFAULT_SMOOTH_DEPTH);

        for i in 0..10 {
            smooth.smooth(Point::new(i as f64, 0.0));
        }
        smooth.set_depth(2);
        assert_eq!(smooth.len(), 2);

        // Window now holds 8, 9; adding 10 evicts 8
        assert_eq!(smooth.smooth(Point::new(10.0, 0.0)), Point::new(9.5, 0.0));

        smooth.set_depth(0);
        assert_eq!(smooth.depth(), 2);
    }
}
