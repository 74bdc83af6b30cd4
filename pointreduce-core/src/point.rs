//! Point types and geometric primitives.
#![allow(clippy::cast_precision_loss)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D sample location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Computes the squared Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A cluster representative: a coordinate plus the number of points it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightedPoint {
    /// Representative X coordinate.
    pub x: f64,
    /// Representative Y coordinate.
    pub y: f64,
    /// Number of input points represented.
    pub weight: u64,
}

impl WeightedPoint {
    /// Creates a new weighted point.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, weight: u64) -> Self {
        Self { x, y, weight }
    }

    /// Builds the representative of a group of points: centroid and member count.
    ///
    /// Returns `None` for an empty group.
    #[must_use]
    pub fn from_members(members: &[Point]) -> Option<Self> {
        let c = centroid(members)?;
        Some(Self::new(c.x, c.y, members.len() as u64))
    }

    /// Returns the representative coordinate.
    #[inline]
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<WeightedPoint> for (f64, f64, u64) {
    fn from(wp: WeightedPoint) -> Self {
        (wp.x, wp.y, wp.weight)
    }
}

/// Coordinate-wise arithmetic mean of a group of points.
///
/// Returns `None` when `points` is empty.
#[must_use]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }

    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let n = points.len() as f64;
    Some(Point::new(sum_x / n, sum_y / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_relative_eq!(p1.distance(&p2), 5.0);
        assert_relative_eq!(p1.distance_squared(&p2), 25.0);
        assert_relative_eq!(p2.distance(&p1), 5.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_centroid() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        let c = centroid(&points).unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_weighted_point_from_members() {
        let members = [Point::new(1.0, 1.0), Point::new(3.0, 5.0)];
        let wp = WeightedPoint::from_members(&members).unwrap();
        assert_eq!(wp.weight, 2);
        assert_relative_eq!(wp.x, 2.0);
        assert_relative_eq!(wp.y, 3.0);
        assert_eq!(wp.point(), Point::new(2.0, 3.0));
        assert!(WeightedPoint::from_members(&[]).is_none());
    }
}
