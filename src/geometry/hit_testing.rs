use super::Point;
use crate::shape::Shape;

/// Distance within which a click grabs a handle or closes a polygon.
pub const HIT_RADIUS: f64 = 10.0;

/// A draggable control point on a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Center,
    /// Index into the shape's vertices.
    Vertex(usize),
    /// Index into the shape's edges; the handle sits on the edge midpoint.
    Midpoint(usize),
}

/// Find the handle of `shape` under `pos`.
///
/// Center wins over vertices, vertices win over edge midpoints; within a
/// group the lowest index wins.
pub fn hit_test(shape: &Shape, pos: Point, radius: f64) -> Option<Handle> {
    if pos.distance(shape.center()) <= radius {
        return Some(Handle::Center);
    }

    if let Some(index) = shape
        .vertices()
        .iter()
        .position(|vertex| vertex.distance(pos) <= radius)
    {
        return Some(Handle::Vertex(index));
    }

    shape
        .midpoints()
        .iter()
        .position(|(midpoint, _)| midpoint.distance(pos) <= radius)
        .map(Handle::Midpoint)
}

/// True when `pos` is close enough to `target` to count as a click on it.
pub fn is_near(pos: Point, target: Point, radius: f64) -> bool {
    pos.distance(target) <= radius
}
