//! Geometry Primitives
//!
//! Points, rectangles and the small set of vector helpers shared by every
//! transform. All functions are pure.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point (or vector) in some coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// The origin, (0, 0)
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncate both coordinates toward zero
    ///
    /// This is the single rounding rule used by every pixel entry point.
    /// Values outside the `i32` range saturate.
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.trunc() as i32, self.y.trunc() as i32)
    }

    /// Build a point from integer pixel coordinates
    pub fn from_pixel(x: i32, y: i32) -> Self {
        Self::new(x as f64, y as f64)
    }

    /// True when both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle defining a coordinate space or clamp boundary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment: points on any edge are inside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Clamp each axis independently to the nearest edge
    pub fn clamp(&self, point: Point) -> Point {
        let x = if point.x < self.x {
            self.x
        } else if point.x > self.right() {
            self.right()
        } else {
            point.x
        };

        let y = if point.y < self.y {
            self.y
        } else if point.y > self.bottom() {
            self.bottom()
        } else {
            point.y
        };

        Point::new(x, y)
    }

    /// Length of the diagonal
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// True when both dimensions are non-zero
    pub fn has_area(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Vector from `from` to `to`
pub fn vector(from: Point, to: Point) -> Point {
    to - from
}

/// Length of a vector
pub fn magnitude(v: Point) -> f64 {
    v.x.hypot(v.y)
}

/// Heading of a vector in radians, in `(-π, π]`
pub fn angle(v: Point) -> f64 {
    v.y.atan2(v.x)
}

/// Unsigned turn between two headings in radians, in `[0, π]`
///
/// Wraps across the ±π seam, so two nearly-leftward headings on either side
/// of the negative x-axis are close rather than ~2π apart.
pub fn angle_between(a: Point, b: Point) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.x * b.x + a.y * b.y;
    cross.atan2(dot).abs()
}

/// Unit vector in the direction of `v`
///
/// Returns `None` for a zero-length (or non-finite) vector; a stationary
/// sample has no direction.
pub fn normalize(v: Point) -> Option<Point> {
    let m = magnitude(v);
    if m > 0.0 && m.is_finite() {
        Some(Point::new(v.x / m, v.y / m))
    } else {
        None
    }
}

/// Arithmetic mean of a sequence of points, `None` when empty
pub fn average_point<'a, I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut sum = Point::ZERO;
    let mut count = 0usize;
    for p in points {
        sum = sum + *p;
        count += 1;
    }

    if count == 0 {
        None
    } else {
        let n = count as f64;
        Some(Point::new(sum.x / n, sum.y / n))
    }
}
