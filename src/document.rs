use log::debug;

use crate::shape::{Shape, ShapeId};

/// Append-ordered shape log. Insertion order is paint order.
///
/// Undo never removes a shape, it tombstones it; the ids of tombstoned shapes
/// are kept in undo order so redo restores the most recently undone one first.
#[derive(Debug, Default, Clone)]
pub struct ShapeLog {
    shapes: Vec<Shape>,
    undone: Vec<ShapeId>,
}

impl ShapeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub(crate) fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    /// Shapes that are not tombstoned, in paint order.
    pub fn live(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|shape| !shape.is_tombstoned())
    }

    pub fn first_live(&self) -> Option<&Shape> {
        self.live().next()
    }

    pub fn can_undo(&self) -> bool {
        self.live().next().is_some()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Tombstone the newest live shape. Returns its index.
    pub fn tombstone_last(&mut self) -> Option<usize> {
        let index = self.shapes.iter().rposition(|shape| !shape.is_tombstoned())?;
        let shape = &mut self.shapes[index];
        shape.set_tombstoned(true);
        self.undone.push(shape.id());
        debug!("tombstoned shape {index} ({})", shape.kind());
        Some(index)
    }

    /// Bring back the most recently tombstoned shape. Returns its index.
    pub fn restore_last_undone(&mut self) -> Option<usize> {
        while let Some(id) = self.undone.pop() {
            let Some(index) = self.index_of(id) else {
                continue;
            };
            let shape = &mut self.shapes[index];
            if shape.is_tombstoned() {
                shape.set_tombstoned(false);
                debug!("restored shape {index} ({})", shape.kind());
                return Some(index);
            }
        }
        None
    }

    /// Swap in a new version of the shape at `index`, keeping its id and
    /// tombstone state. Returns false for an unknown index.
    pub fn replace(&mut self, index: usize, mut shape: Shape) -> bool {
        let Some(slot) = self.shapes.get_mut(index) else {
            return false;
        };
        shape.set_tombstoned(slot.is_tombstoned());
        shape.set_rendered(false);
        let id = slot.id();
        *slot = shape;
        slot.reassign_id(id);
        true
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.undone.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shape::Color;

    fn line(y: i32) -> Shape {
        Shape::line(Point::new(0, y), Point::new(10, y), Color::BLACK)
    }

    #[test]
    fn test_undo_tombstones_newest_live_shape() {
        let mut log = ShapeLog::new();
        log.push(line(0));
        log.push(line(1));
        log.push(line(2));

        assert_eq!(log.tombstone_last(), Some(2));
        assert_eq!(log.tombstone_last(), Some(1));
        assert_eq!(log.live().count(), 1);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_redo_is_last_undone_first() {
        let mut log = ShapeLog::new();
        log.push(line(0));
        log.push(line(1));
        log.push(line(2));

        log.tombstone_last();
        log.tombstone_last();
        log.tombstone_last();

        assert_eq!(log.restore_last_undone(), Some(0));
        assert_eq!(log.restore_last_undone(), Some(1));
        assert_eq!(log.restore_last_undone(), Some(2));
        assert_eq!(log.restore_last_undone(), None);
    }

    #[test]
    fn test_empty_log_is_noop() {
        let mut log = ShapeLog::new();
        assert!(!log.can_undo());
        assert_eq!(log.tombstone_last(), None);
        assert_eq!(log.restore_last_undone(), None);
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut log = ShapeLog::new();
        log.push(line(0));
        let id = log.shapes()[0].id();

        assert!(log.replace(0, line(5)));
        assert_eq!(log.shapes()[0].id(), id);
        assert_eq!(log.shapes()[0].vertices()[0], Point::new(0, 5));
        assert!(!log.replace(3, line(5)));
    }
}
