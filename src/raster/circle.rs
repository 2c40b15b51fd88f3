use super::ChannelPlane;
use crate::geometry::Point;

/// Midpoint circle: plots the eight octant reflections of every step.
///
/// Radius 0 plots the center alone; a negative radius plots nothing.
pub fn walk_circle(radius: i32, center: Point, mut plot: impl FnMut(i32, i32)) {
    if radius < 0 {
        return;
    }

    let mut d_e = 3;
    let mut d_se = 5 - 2 * radius;
    let mut d = 1 - radius;
    let mut x = 0;
    let mut y = radius;

    plot_octants(center, x, y, &mut plot);
    while y > x {
        if d < 0 {
            d += d_e;
            d_e += 2;
            d_se += 2;
        } else {
            d += d_se;
            d_e += 2;
            d_se += 4;
            y -= 1;
        }
        x += 1;
        plot_octants(center, x, y, &mut plot);
    }
}

fn plot_octants(center: Point, x: i32, y: i32, plot: &mut impl FnMut(i32, i32)) {
    let (cx, cy) = (center.x, center.y);
    plot(cx + x, cy - y);
    plot(cx + y, cy - x);
    plot(cx - y, cy - x);
    plot(cx - x, cy - y);
    plot(cx - x, cy + y);
    plot(cx - y, cy + x);
    plot(cx + y, cy + x);
    plot(cx + x, cy + y);
}

pub fn midpoint_circle(plane: &mut ChannelPlane<'_>, radius: i32, center: Point, value: u8) {
    walk_circle(radius, center, |x, y| plane.put(x, y, value));
}
