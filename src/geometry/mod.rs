//! Integer canvas geometry.
//!
//! Every position the editor stores is a whole canvas pixel. Real-valued
//! results (midpoints, centroids) are rounded back onto the pixel grid so the
//! derived state of a shape can always be recomputed exactly from its vertices.

pub mod hit_testing;

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A position (or offset) on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Point halfway between `self` and `other`, rounded towards negative infinity.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(
            (self.x + other.x).div_euclid(2),
            (self.y + other.y).div_euclid(2),
        )
    }

    /// Clamp into `[0, bounds.width) x [0, bounds.height)`.
    pub fn clamped(self, bounds: Bounds) -> Point {
        Point::new(
            self.x.clamp(0, bounds.max_x()),
            self.y.clamp(0, bounds.max_y()),
        )
    }

    /// Convert from an egui position, truncating the fractional part.
    pub fn from_pos2(pos: egui::Pos2) -> Point {
        Point::new(pos.x as i32, pos.y as i32)
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

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Centroid of `points`, rounded to the nearest pixel. `None` for an empty slice.
pub fn average(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });

    Some(Point::new(
        (sx as f64 / n).round() as i32,
        (sy as f64 / n).round() as i32,
    ))
}

/// The drawable area of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Largest valid x coordinate (0 for a degenerate, zero-width canvas).
    pub fn max_x(&self) -> i32 {
        (self.width as i32 - 1).max(0)
    }

    /// Largest valid y coordinate.
    pub fn max_y(&self) -> i32 {
        (self.height as i32 - 1).max(0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(600, 400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
        assert_eq!(Point::new(7, 7).distance(Point::new(7, 7)), 0.0);
    }

    #[test]
    fn test_midpoint_floors() {
        assert_eq!(Point::new(0, 0).midpoint(Point::new(10, 4)), Point::new(5, 2));
        assert_eq!(Point::new(0, 0).midpoint(Point::new(5, 5)), Point::new(2, 2));
        assert_eq!(Point::new(-1, 0).midpoint(Point::new(0, 0)), Point::new(-1, 0));
    }

    #[test]
    fn test_average() {
        let points = [Point::new(0, 0), Point::new(10, 0), Point::new(5, 10)];
        assert_eq!(average(&points), Some(Point::new(5, 3)));
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = Bounds::new(600, 400);
        assert_eq!(Point::new(-5, 900).clamped(bounds), Point::new(0, 399));
        assert_eq!(Point::new(600, 12).clamped(bounds), Point::new(599, 12));
        assert!(bounds.contains(599, 399));
        assert!(!bounds.contains(600, 0));
        assert!(!bounds.contains(0, -1));
    }
}
