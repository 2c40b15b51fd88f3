use log::{debug, info};
use std::path::Path;

use crate::config::MarkerPalette;
use crate::document::ShapeLog;
use crate::error::ExportError;
use crate::geometry::Bounds;
use crate::raster::{self, Outline, PixelBuffer};
use crate::shape::{Shape, ShapeId};

/// Something drawn over the baseline by [`Canvas::preview`] without committing it.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    /// A shape under construction.
    Outline(Outline<'a>),
    /// A staged copy of a shape being edited.
    Shape(&'a Shape),
    /// Handle markers of a shape.
    Handles(&'a Shape, &'a MarkerPalette),
}

/// Owns the shape log and the two buffers the log is composited into.
///
/// `baseline` holds every committed, live shape. `frame` is what gets shown:
/// the baseline itself, or a clone of it with a transient overlay on top.
#[derive(Debug)]
pub struct Canvas {
    log: ShapeLog,
    baseline: PixelBuffer,
    frame: PixelBuffer,
    antialiasing: bool,
    held_out: Option<ShapeId>,
}

impl Canvas {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            log: ShapeLog::new(),
            baseline: PixelBuffer::new(bounds),
            frame: PixelBuffer::new(bounds),
            antialiasing: false,
            held_out: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.baseline.bounds()
    }

    pub fn log(&self) -> &ShapeLog {
        &self.log
    }

    pub fn shapes(&self) -> &[Shape] {
        self.log.shapes()
    }

    pub fn baseline(&self) -> &PixelBuffer {
        &self.baseline
    }

    /// The buffer currently shown.
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn antialiasing(&self) -> bool {
        self.antialiasing
    }

    pub fn set_antialiasing(&mut self, antialiasing: bool) {
        if self.antialiasing != antialiasing {
            self.antialiasing = antialiasing;
            self.redraw_all();
        }
    }

    /// Clear to blank and replay the whole log in insertion order.
    ///
    /// Tombstoned shapes and a shape held out for editing are skipped.
    pub fn redraw_all(&mut self) {
        self.baseline.clear();
        let held_out = self.held_out;
        let antialiasing = self.antialiasing;

        for shape in self.log.shapes_mut() {
            shape.set_rendered(false);
        }

        let mut painted = 0;
        for shape in self.log.shapes_mut() {
            if shape.is_tombstoned() || Some(shape.id()) == held_out {
                continue;
            }
            raster::draw_shape(&mut self.baseline, shape, antialiasing);
            shape.set_rendered(true);
            painted += 1;
        }

        debug!("redrew {painted} of {} shapes", self.log.len());
        self.show_baseline();
    }

    /// Clone the baseline, draw `overlays` onto the clone and show it.
    ///
    /// Neither the baseline nor the log changes.
    pub fn preview(&mut self, overlays: &[Overlay<'_>]) -> &PixelBuffer {
        let mut frame = self.baseline.clone();
        for overlay in overlays {
            match *overlay {
                Overlay::Outline(outline) => raster::draw_outline(&mut frame, outline, self.antialiasing),
                Overlay::Shape(shape) => raster::draw_shape(&mut frame, shape, self.antialiasing),
                Overlay::Handles(shape, palette) => raster::draw_handles(&mut frame, shape, palette),
            }
        }
        self.frame = frame;
        &self.frame
    }

    /// Show the baseline with no overlay.
    pub fn show_baseline(&mut self) {
        self.frame.clone_from(&self.baseline);
    }

    /// Append `shape` and paint only it onto the baseline. Returns its index.
    pub fn commit(&mut self, mut shape: Shape) -> usize {
        raster::draw_shape(&mut self.baseline, &shape, self.antialiasing);
        shape.set_rendered(true);
        info!("committed {} with {} vertices", shape.kind(), shape.vertices().len());
        let index = self.log.push(shape);
        self.show_baseline();
        index
    }

    /// Tombstone the newest live shape and replay. False when nothing is live.
    pub fn undo(&mut self) -> bool {
        match self.log.tombstone_last() {
            Some(index) => {
                info!("undo: shape {index}");
                self.redraw_all();
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone shape and replay. False when nothing was undone.
    pub fn redo(&mut self) -> bool {
        match self.log.restore_last_undone() {
            Some(index) => {
                info!("redo: shape {index}");
                self.redraw_all();
                true
            }
            None => false,
        }
    }

    /// Leave the shape out of the baseline while a staged copy of it is edited.
    pub fn hold_out(&mut self, id: ShapeId) {
        self.held_out = Some(id);
        self.redraw_all();
    }

    /// Put a held-out shape back without changing it.
    pub fn release(&mut self) {
        if self.held_out.take().is_some() {
            self.redraw_all();
        }
    }

    /// Atomically swap the log entry at `index` for `shape` and replay.
    pub fn replace(&mut self, index: usize, shape: Shape) -> bool {
        self.held_out = None;
        let replaced = self.log.replace(index, shape);
        self.redraw_all();
        replaced
    }

    /// Drop every shape and blank the canvas.
    pub fn reset(&mut self) {
        info!("reset: dropping {} shapes", self.log.len());
        self.log.clear();
        self.held_out = None;
        self.redraw_all();
    }

    /// Replace the whole log with `shapes` and replay.
    pub fn load(&mut self, shapes: Vec<Shape>) {
        self.log.clear();
        self.held_out = None;
        for shape in shapes {
            self.log.push(shape);
        }
        self.redraw_all();
    }

    /// The shown buffer as an RGBA image.
    pub fn snapshot(&self) -> Result<image::RgbaImage, ExportError> {
        let bounds = self.bounds();
        self.frame.to_image().ok_or(ExportError::SizeMismatch {
            width: bounds.width,
            height: bounds.height,
        })
    }

    pub fn export_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        self.snapshot()?
            .save_with_format(path, image::ImageFormat::Png)?;
        info!("exported canvas to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shape::Color;

    #[test]
    fn test_commit_marks_rendered() {
        let mut canvas = Canvas::new(Bounds::new(64, 64));
        canvas.commit(Shape::line(Point::new(1, 1), Point::new(9, 1), Color::BLACK));
        assert!(canvas.shapes()[0].is_rendered());
        assert_eq!(canvas.frame().pixel(5, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_preview_leaves_baseline_alone() {
        let mut canvas = Canvas::new(Bounds::new(64, 64));
        let line = Shape::line(Point::new(1, 1), Point::new(9, 1), Color::BLACK);
        canvas.preview(&[Overlay::Shape(&line)]);

        assert_eq!(canvas.frame().pixel(5, 1), Some([0, 0, 0, 255]));
        assert_eq!(canvas.baseline().pixel(5, 1), Some([255; 4]));
        assert!(canvas.log().is_empty());
    }

    #[test]
    fn test_held_out_shape_is_skipped() {
        let mut canvas = Canvas::new(Bounds::new(64, 64));
        canvas.commit(Shape::line(Point::new(1, 1), Point::new(9, 1), Color::BLACK));
        let id = canvas.shapes()[0].id();

        canvas.hold_out(id);
        assert_eq!(canvas.baseline().pixel(5, 1), Some([255; 4]));
        assert!(!canvas.shapes()[0].is_rendered());

        canvas.release();
        assert_eq!(canvas.baseline().pixel(5, 1), Some([0, 0, 0, 255]));
    }
}
