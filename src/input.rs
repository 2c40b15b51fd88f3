use parking_lot::Mutex;
use std::sync::Arc;

use crate::geometry::Point;
use crate::tools::Tool;

/// Input the editor reacts to. Positions are already in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    SelectTool(Tool),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Undo,
    Redo,
}

/// Latest-wins slot for pointer moves.
///
/// Any input source may push positions as fast as it likes; the editor picks
/// up only the newest one when it next drains the queue, so a burst of moves
/// costs a single preview.
#[derive(Debug, Clone, Default)]
pub struct MoveQueue {
    pending: Arc<Mutex<Option<Point>>>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move, replacing any move not yet drained.
    pub fn push(&self, pos: Point) {
        *self.pending.lock() = Some(pos);
    }

    pub fn take(&self) -> Option<Point> {
        self.pending.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_move_wins() {
        let queue = MoveQueue::new();
        let producer = queue.clone();
        producer.push(Point::new(1, 1));
        producer.push(Point::new(2, 2));
        producer.push(Point::new(3, 3));

        assert_eq!(queue.take(), Some(Point::new(3, 3)));
        assert_eq!(queue.take(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_from_another_thread() {
        let queue = MoveQueue::new();
        let producer = queue.clone();
        std::thread::spawn(move || {
            for x in 0..100 {
                producer.push(Point::new(x, 0));
            }
        })
        .join()
        .unwrap();

        assert_eq!(queue.take(), Some(Point::new(99, 0)));
    }
}
