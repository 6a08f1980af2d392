//! Geometric primitives: Point, Size.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates, relative to the observed surface.
///
/// Also used for offsets (`Point - Point`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Check whether either axis moved further than `threshold` from `other`.
    ///
    /// Strictly greater: a displacement equal to the threshold does not count.
    #[must_use]
    pub fn exceeds(&self, other: &Self, threshold: f32) -> bool {
        let delta = (*self - *other).abs();
        delta.x > threshold || delta.y > threshold
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (or negative), i.e. nothing to measure against.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_point_sub_gives_offset() {
        let offset = Point::new(15.0, 7.0) - Point::new(20.0, 2.0);
        assert_eq!(offset, Point::new(-5.0, 5.0));
    }

    #[test]
    fn test_point_add() {
        assert_eq!(
            Point::new(1.0, 2.0) + Point::new(3.0, 4.0),
            Point::new(4.0, 6.0)
        );
    }

    #[test]
    fn test_point_abs() {
        assert_eq!(Point::new(-3.0, 4.0).abs(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_point_exceeds_is_strict() {
        let origin = Point::new(100.0, 100.0);
        assert!(!Point::new(105.0, 100.0).exceeds(&origin, 5.0));
        assert!(Point::new(105.5, 100.0).exceeds(&origin, 5.0));
        assert!(Point::new(100.0, 94.0).exceeds(&origin, 5.0));
    }

    #[test]
    fn test_size_default() {
        assert_eq!(Size::default(), Size::ZERO);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(100.0, 0.0).is_empty());
        assert!(Size::new(0.0, 100.0).is_empty());
        assert!(!Size::new(640.0, 360.0).is_empty());
    }
}
