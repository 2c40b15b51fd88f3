use log::debug;

use crate::geometry::hit_testing::{hit_test, Handle};
use crate::geometry::{Bounds, Point};
use crate::shape::Shape;

/// An in-progress handle drag on a staged copy of a committed shape.
///
/// The log entry is untouched until the drag ends, so an interrupted drag
/// leaves nothing half-edited behind.
#[derive(Debug, Clone)]
pub struct DragSession {
    index: usize,
    handle: Handle,
    last: Point,
    staged: Shape,
}

impl DragSession {
    /// Start a drag if `pos` hits one of `shape`'s handles.
    pub fn begin(index: usize, shape: &Shape, pos: Point, hit_radius: f64) -> Option<Self> {
        let handle = hit_test(shape, pos, hit_radius)?;
        debug!("grabbed {handle:?} of shape {index}");
        Some(Self {
            index,
            handle,
            last: pos,
            staged: shape.clone(),
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn staged(&self) -> &Shape {
        &self.staged
    }

    /// Apply the handle's reshape rule for a move to `pos`.
    pub fn drag_to(&mut self, pos: Point, bounds: Bounds) {
        let delta = pos - self.last;
        match self.handle {
            Handle::Center => self.staged.translate(delta, bounds),
            Handle::Vertex(index) => self.staged.move_vertex(index, pos, bounds),
            Handle::Midpoint(edge) => self.staged.move_edge(edge, delta, bounds),
        }
        self.last = pos;
    }

    /// Hand back the log index and the edited shape.
    pub fn finish(self) -> (usize, Shape) {
        (self.index, self.staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Color;

    const RADIUS: f64 = 10.0;

    fn square() -> Shape {
        Shape::polygon(
            vec![
                Point::new(100, 100),
                Point::new(200, 100),
                Point::new(200, 200),
                Point::new(100, 200),
            ],
            Color::BLACK,
        )
        .unwrap()
    }

    #[test]
    fn test_miss_starts_nothing() {
        assert!(DragSession::begin(0, &square(), Point::new(10, 10), RADIUS).is_none());
    }

    #[test]
    fn test_center_drag_round_trip() {
        let bounds = Bounds::default();
        let shape = square();
        let mut drag = DragSession::begin(0, &shape, Point::new(150, 150), RADIUS).unwrap();
        assert_eq!(drag.handle(), Handle::Center);

        drag.drag_to(Point::new(187, 121), bounds);
        assert_eq!(drag.staged().vertices()[0], Point::new(137, 71));
        drag.drag_to(Point::new(150, 150), bounds);

        for (a, b) in drag.staged().vertices().iter().zip(shape.vertices()) {
            assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1);
        }
    }

    #[test]
    fn test_vertex_drag_moves_one_vertex() {
        let bounds = Bounds::default();
        let mut drag = DragSession::begin(3, &square(), Point::new(198, 198), RADIUS).unwrap();
        assert_eq!(drag.handle(), Handle::Vertex(2));

        drag.drag_to(Point::new(260, 230), bounds);
        let (index, shape) = drag.finish();
        assert_eq!(index, 3);
        assert_eq!(shape.vertices()[2], Point::new(260, 230));
        assert_eq!(shape.vertices()[1], Point::new(200, 100));
        assert_eq!(shape.midpoints()[1].0, Point::new(230, 165));
    }

    #[test]
    fn test_midpoint_drag_moves_edge() {
        let bounds = Bounds::default();
        let mut drag = DragSession::begin(0, &square(), Point::new(150, 102), RADIUS).unwrap();
        assert_eq!(drag.handle(), Handle::Midpoint(0));

        drag.drag_to(Point::new(150, 82), bounds);
        let shape = drag.staged();
        assert_eq!(shape.vertices()[0], Point::new(100, 80));
        assert_eq!(shape.vertices()[1], Point::new(200, 80));
        assert_eq!(shape.center(), Point::new(150, 140));
        assert_eq!(shape.midpoints().len(), 4);
    }

    #[test]
    fn test_staged_copy_is_independent() {
        let bounds = Bounds::default();
        let shape = square();
        let mut drag = DragSession::begin(0, &shape, Point::new(150, 150), RADIUS).unwrap();
        drag.drag_to(Point::new(160, 150), bounds);
        assert_eq!(shape.vertices()[0], Point::new(100, 100));
        assert_eq!(drag.staged().id(), shape.id());
    }
}
