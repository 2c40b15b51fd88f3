//! Coverage-based line drawing.
//!
//! The walk advances exactly one step along the major axis per iteration and
//! writes three pixels across the minor axis: the pixel nearest the ideal
//! line plus its two neighbours. For each of them the signed perpendicular
//! distance to the line is derived from the decision variable and normalised
//! by the line length (`D`, `Du`, `Dl`). Coverage is measured along the minor
//! axis, so the three coverages of a step always add up to one.

use super::ChannelPlane;
use crate::geometry::{Bounds, Point};

/// Perpendicular distances for one step of the walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distances {
    /// Center pixel.
    pub d: f64,
    /// Neighbour one step towards the end point's side of the minor axis.
    pub du: f64,
    /// Neighbour on the opposite side.
    pub dl: f64,
}

/// `clamp(1 - |distance|, 0, 1)`.
pub fn coverage(distance: f64) -> f64 {
    (1.0 - distance.abs()).clamp(0.0, 1.0)
}

/// Walk the line from `start` to `end`, calling `plot(x, y, coverage)` three
/// times per step.
///
/// A purely vertical line gets one pixel per row at full coverage.
pub fn walk_antialiased(start: Point, end: Point, bounds: Bounds, mut plot: impl FnMut(i32, i32, f64)) {
    let start = start.clamped(bounds);
    let end = end.clamped(bounds);

    if start.x == end.x {
        for y in start.y.min(end.y)..=start.y.max(end.y) {
            plot(start.x, y, 1.0);
        }
        return;
    }

    let (mut x1, mut y1, mut x2, mut y2) = (start.x, start.y, end.x, end.y);
    let steep = (y2 - y1).abs() > (x2 - x1).abs();
    if steep {
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut x2, &mut y2);
    }
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let dx = i64::from(x2 - x1);
    let dy = i64::from((y2 - y1).abs());
    let y_step = if y1 < y2 { 1 } else { -1 };

    let length2 = 2.0 * ((dx * dx + dy * dy) as f64).sqrt();
    // Perpendicular distance -> distance along the minor axis.
    let to_minor = length2 / (2.0 * dx as f64);

    // `v = 2 * dx * e`, where `e` is how far the ideal line lies past the
    // current pixel (in the direction of `y_step`). Kept in (-dx, dx].
    let mut v: i64 = 0;
    let mut y = y1;

    let mut emit = |major: i32, minor: i32, distance: f64| {
        let c = coverage(distance * to_minor);
        if steep {
            plot(minor, major, c);
        } else {
            plot(major, minor, c);
        }
    };

    for x in x1..=x2 {
        let distances = step_distances(v, dx, length2);
        emit(x, y, distances.d);
        emit(x, y + y_step, distances.du);
        emit(x, y - y_step, distances.dl);

        v += 2 * dy;
        if v > dx {
            y += y_step;
            v -= 2 * dx;
        }
    }
}

fn step_distances(v: i64, dx: i64, length2: f64) -> Distances {
    let v = v as f64;
    let two_dx = 2.0 * dx as f64;
    Distances {
        d: v / length2,
        du: (two_dx - v) / length2,
        dl: (two_dx + v) / length2,
    }
}

pub fn antialiased_line(plane: &mut ChannelPlane<'_>, start: Point, end: Point, value: u8) {
    let bounds = plane.bounds();
    walk_antialiased(start, end, bounds, |x, y, c| {
        if c >= 1.0 {
            plane.put(x, y, value);
        } else if c > 0.0 {
            plane.blend(x, y, value, c);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(start: Point, end: Point) -> Vec<[(i32, i32, f64); 3]> {
        let mut flat = Vec::new();
        walk_antialiased(start, end, Bounds::default(), |x, y, c| flat.push((x, y, c)));
        flat.chunks(3).map(|c| [c[0], c[1], c[2]]).collect()
    }

    #[test]
    fn test_coverage_clamps() {
        assert_eq!(coverage(0.0), 1.0);
        assert_eq!(coverage(-0.25), 0.75);
        assert_eq!(coverage(1.5), 0.0);
    }

    #[test]
    fn test_cross_section_sums_to_one() {
        let cases = [
            (Point::new(10, 10), Point::new(90, 37)),
            (Point::new(90, 37), Point::new(10, 10)),
            (Point::new(5, 80), Point::new(60, 2)),
            (Point::new(30, 30), Point::new(41, 130)),
            (Point::new(0, 0), Point::new(50, 50)),
        ];
        for (a, b) in cases {
            for step in steps(a, b) {
                let sum: f64 = step.iter().map(|(_, _, c)| c).sum();
                assert!((sum - 1.0).abs() < 1e-9, "{a:?}->{b:?}: {step:?}");
            }
        }
    }

    #[test]
    fn test_horizontal_line_is_solid() {
        for [center, upper, lower] in steps(Point::new(3, 4), Point::new(12, 4)) {
            assert_eq!(center.1, 4);
            assert_eq!(center.2, 1.0);
            assert_eq!(upper.2, 0.0);
            assert_eq!(lower.2, 0.0);
        }
    }

    #[test]
    fn test_vertical_line_is_full_coverage() {
        let mut plotted = Vec::new();
        walk_antialiased(Point::new(7, 9), Point::new(7, 2), Bounds::default(), |x, y, c| {
            plotted.push((x, y, c));
        });
        assert_eq!(plotted.len(), 8);
        assert!(plotted.iter().all(|&(x, _, c)| x == 7 && c == 1.0));
    }

    #[test]
    fn test_one_step_per_major_column() {
        let columns: Vec<i32> = steps(Point::new(0, 0), Point::new(20, 7))
            .iter()
            .map(|step| step[0].0)
            .collect();
        assert_eq!(columns, (0..=20).collect::<Vec<_>>());
    }
}
