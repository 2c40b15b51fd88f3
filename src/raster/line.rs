use super::ChannelPlane;
use crate::geometry::{Bounds, Point};

/// Walk a line from both endpoints towards the middle (double-ended midpoint
/// algorithm), calling `plot` for every pixel.
///
/// Endpoints are clamped onto `bounds` first. For `thickness > 1` every step is
/// widened into a band across the minor axis, offsets
/// `-(thickness - 1) / 2 ..= thickness / 2`. The pixel set does not depend on
/// the order of the endpoints.
pub fn walk_symmetric(
    start: Point,
    end: Point,
    thickness: i32,
    bounds: Bounds,
    mut plot: impl FnMut(i32, i32),
) {
    let start = start.clamped(bounds);
    let end = end.clamped(bounds);
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

    let dx = x2 - x1;
    let dy = (y2 - y1).abs();
    let y_step = if y1 < y2 { 1 } else { -1 };
    let band = -(thickness.max(1) - 1) / 2..=thickness.max(1) / 2;

    let mut d = dx / 2;
    let mut y = y1;
    let mut y_end = y2;
    let mid_x = x1 + dx / 2;

    for (x, x_end) in (x1..=mid_x).zip((x1..=x2).rev()) {
        for offset in band.clone() {
            if steep {
                plot(y + offset, x);
                plot(y_end + offset, x_end);
            } else {
                plot(x, y + offset);
                plot(x_end, y_end + offset);
            }
        }

        if d - dy < 0 {
            y += y_step;
            y_end -= y_step;
            d += dx - dy;
        } else {
            d -= dy;
        }
    }
}

pub fn symmetric_line(plane: &mut ChannelPlane<'_>, start: Point, end: Point, value: u8, thickness: i32) {
    let bounds = plane.bounds();
    walk_symmetric(start, end, thickness, bounds, |x, y| plane.put(x, y, value));
}

/// Closed outline through `vertices`: one edge per consecutive pair plus the
/// closing edge. Corners get no join treatment.
pub fn polygon(plane: &mut ChannelPlane<'_>, vertices: &[Point], value: u8, antialiasing: bool) {
    if vertices.len() < 2 {
        return;
    }

    let closing = vertices.last().copied().zip(vertices.first().copied());
    let edges = vertices
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .chain(closing);

    for (start, end) in edges {
        if antialiasing {
            super::antialias::antialiased_line(plane, start, end, value);
        } else {
            symmetric_line(plane, start, end, value, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn pixels(start: Point, end: Point, thickness: i32) -> BTreeSet<(i32, i32)> {
        let mut set = BTreeSet::new();
        walk_symmetric(start, end, thickness, Bounds::default(), |x, y| {
            set.insert((x, y));
        });
        set
    }

    #[test]
    fn test_horizontal_line_covers_every_column() {
        let set = pixels(Point::new(10, 10), Point::new(50, 10), 1);
        let expected: BTreeSet<_> = (10..=50).map(|x| (x, 10)).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_diagonal_line() {
        let set = pixels(Point::new(0, 0), Point::new(4, 4), 1);
        let expected: BTreeSet<_> = (0..=4).map(|i| (i, i)).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_steep_line_walks_every_row() {
        let set = pixels(Point::new(5, 0), Point::new(8, 20), 1);
        for y in 0..=20 {
            let count = set.iter().filter(|(_, py)| *py == y).count();
            // The two half-walks meet on the middle row and may disagree there by one pixel.
            assert!((1..=2).contains(&count), "row {y} has {count} pixels");
        }
        assert!(set.iter().all(|(x, _)| (5..=8).contains(x)));
        assert!(set.contains(&(5, 0)));
        assert!(set.contains(&(8, 20)));
    }

    #[test]
    fn test_endpoint_order_does_not_matter() {
        let cases = [
            (Point::new(3, 7), Point::new(41, 19)),
            (Point::new(90, 12), Point::new(14, 77)),
            (Point::new(0, 0), Point::new(1, 9)),
            (Point::new(20, 20), Point::new(20, 20)),
            (Point::new(5, 60), Point::new(300, 61)),
        ];
        for (a, b) in cases {
            assert_eq!(pixels(a, b, 1), pixels(b, a, 1));
            assert_eq!(pixels(a, b, 4), pixels(b, a, 4));
        }
    }

    #[test]
    fn test_thickness_band() {
        let set = pixels(Point::new(10, 10), Point::new(20, 10), 4);
        // offsets -1..=2 around row 10
        let rows: BTreeSet<_> = set.iter().map(|(_, y)| *y).collect();
        assert_eq!(rows, [9, 10, 11, 12].into_iter().collect());
        assert_eq!(set.len(), 11 * 4);
    }

    #[test]
    fn test_offcanvas_endpoints_are_clamped() {
        let set = pixels(Point::new(-20, 5), Point::new(5, 5), 1);
        assert_eq!(set.iter().next(), Some(&(0, 5)));
        assert_eq!(set.len(), 6);
    }
}
