//! Scan conversion onto a four-channel pixel buffer.
//!
//! Every algorithm paints one channel at a time. A shape is drawn by running
//! the same algorithm once per channel as four concurrent tasks joined before
//! returning. Each task borrows only its own channel plane, so the tasks never
//! alias and need no locking.

pub mod antialias;
pub mod circle;
pub mod line;

use futures::executor::block_on;
use futures::future::join_all;
use log::trace;

use crate::config::MarkerPalette;
use crate::geometry::{Bounds, Point};
use crate::shape::{Color, Shape, ShapeKind};

/// Channel value of a blank canvas (opaque white).
pub const BLANK: u8 = u8::MAX;

/// Largest concentric ring of a handle marker.
pub const MARKER_RADIUS: i32 = 6;

/// A `width x height` RGBA canvas stored as four channel planes.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bounds: Bounds,
    planes: [Vec<u8>; 4],
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.bounds.width)
            .field("height", &self.bounds.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// A blank (all channels at max) canvas.
    pub fn new(bounds: Bounds) -> Self {
        let len = bounds.width as usize * bounds.height as usize;
        Self {
            bounds,
            planes: std::array::from_fn(|_| vec![BLANK; len]),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Reset every channel of every pixel to blank.
    pub fn clear(&mut self) {
        for plane in &mut self.planes {
            plane.fill(BLANK);
        }
    }

    /// RGBA value at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let index = y as usize * self.bounds.width as usize + x as usize;
        Some(std::array::from_fn(|channel| self.planes[channel][index]))
    }

    /// The four channel planes, each borrowed independently.
    pub fn channels_mut(&mut self) -> [ChannelPlane<'_>; 4] {
        let bounds = self.bounds;
        let [r, g, b, a] = &mut self.planes;
        [r, g, b, a].map(|data| ChannelPlane {
            bounds,
            data: data.as_mut_slice(),
        })
    }

    /// Interleaved RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let [r, g, b, a] = &self.planes;
        r.iter()
            .zip(g)
            .zip(b)
            .zip(a)
            .flat_map(|(((r, g), b), a)| [*r, *g, *b, *a])
            .collect()
    }

    pub fn to_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.bounds.width, self.bounds.height, self.to_rgba())
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.bounds.width as usize, self.bounds.height as usize],
            &self.to_rgba(),
        )
    }
}

/// Exclusive access to one channel of a [`PixelBuffer`].
pub struct ChannelPlane<'a> {
    bounds: Bounds,
    data: &'a mut [u8],
}

impl ChannelPlane<'_> {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Write `value` at `(x, y)`; silently dropped outside the canvas.
    pub fn put(&mut self, x: i32, y: i32, value: u8) {
        if self.bounds.contains(x, y) {
            let index = y as usize * self.bounds.width as usize + x as usize;
            self.data[index] = value;
        }
    }

    /// Read the value at `(x, y)`, clamping the coordinate onto the canvas.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        let x = x.clamp(0, self.bounds.max_x()) as usize;
        let y = y.clamp(0, self.bounds.max_y()) as usize;
        self.data
            .get(y * self.bounds.width as usize + x)
            .copied()
            .unwrap_or(BLANK)
    }

    /// `coverage * value + (1 - coverage) * existing`, coverage clamped to `[0, 1]`.
    pub fn blend(&mut self, x: i32, y: i32, value: u8, coverage: f64) {
        let coverage = coverage.clamp(0.0, 1.0);
        let existing = f64::from(self.get(x, y));
        let blended = coverage * f64::from(value) + (1.0 - coverage) * existing;
        self.put(x, y, blended.round() as u8);
    }
}

/// Run `paint` for every channel of `buffer` with that channel's value of `color`.
///
/// Each call is a future holding its own plane. The futures are joined on the
/// calling thread and run one after another, so there is no parallelism; the
/// join is the barrier that completes the buffer before anyone reads it.
pub fn paint_channels<F>(buffer: &mut PixelBuffer, color: Color, paint: F)
where
    F: Fn(&mut ChannelPlane<'_>, u8),
{
    let paint = &paint;
    let tasks = buffer
        .channels_mut()
        .into_iter()
        .zip(color.channels())
        .map(move |(mut plane, value)| async move { paint(&mut plane, value) });
    block_on(join_all(tasks));
}

/// Outline geometry shared by committed shapes and in-progress drafts.
#[derive(Debug, Clone, Copy)]
pub struct Outline<'a> {
    pub kind: ShapeKind,
    pub vertices: &'a [Point],
    pub color: Color,
    pub thickness: u32,
}

impl<'a> From<&'a Shape> for Outline<'a> {
    fn from(shape: &'a Shape) -> Self {
        Self {
            kind: shape.kind(),
            vertices: shape.vertices(),
            color: shape.color(),
            thickness: shape.thickness(),
        }
    }
}

/// Rasterize one outline. Too few vertices for its kind draws nothing.
pub fn draw_outline(buffer: &mut PixelBuffer, outline: Outline<'_>, antialiasing: bool) {
    let vertices = outline.vertices;
    if vertices.len() < 2 {
        return;
    }
    trace!("rasterizing {} with {} vertices", outline.kind, vertices.len());

    match outline.kind {
        ShapeKind::Line => {
            let (start, end) = (vertices[0], vertices[1]);
            paint_channels(buffer, outline.color, |plane, value| {
                if antialiasing {
                    antialias::antialiased_line(plane, start, end, value);
                } else {
                    line::symmetric_line(plane, start, end, value, 1);
                }
            });
        }
        ShapeKind::ThickLine => {
            let (start, end) = (vertices[0], vertices[1]);
            let thickness = outline.thickness.max(1) as i32;
            paint_channels(buffer, outline.color, |plane, value| {
                line::symmetric_line(plane, start, end, value, thickness);
            });
        }
        ShapeKind::Circle => {
            let (center, rim) = (vertices[0], vertices[1]);
            let radius = center.distance(rim) as i32;
            paint_channels(buffer, outline.color, |plane, value| {
                circle::midpoint_circle(plane, radius, center, value);
            });
        }
        ShapeKind::Polygon => {
            paint_channels(buffer, outline.color, |plane, value| {
                line::polygon(plane, vertices, value, antialiasing);
            });
        }
    }
}

pub fn draw_shape(buffer: &mut PixelBuffer, shape: &Shape, antialiasing: bool) {
    draw_outline(buffer, Outline::from(shape), antialiasing);
}

/// Filled disk of concentric rings, used to highlight a handle.
pub fn draw_marker(buffer: &mut PixelBuffer, point: Point, color: Color) {
    paint_channels(buffer, color, |plane, value| {
        for radius in 0..=MARKER_RADIUS {
            circle::midpoint_circle(plane, radius, point, value);
        }
    });
}

/// Markers for every handle of `shape`: center, then vertices, then edge midpoints.
pub fn draw_handles(buffer: &mut PixelBuffer, shape: &Shape, palette: &MarkerPalette) {
    draw_marker(buffer, shape.center(), palette.center);
    for vertex in shape.vertices() {
        draw_marker(buffer, *vertex, palette.vertex);
    }
    for (midpoint, _) in shape.midpoints() {
        draw_marker(buffer, midpoint, palette.midpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_blank() {
        let buffer = PixelBuffer::new(Bounds::new(4, 3));
        assert_eq!(buffer.pixel(3, 2), Some([255; 4]));
        assert_eq!(buffer.pixel(4, 0), None);
        assert_eq!(buffer.to_rgba().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_channels_are_painted_independently() {
        let mut buffer = PixelBuffer::new(Bounds::new(8, 8));
        paint_channels(&mut buffer, Color::rgba(10, 20, 30, 40), |plane, value| {
            plane.put(2, 3, value);
        });
        assert_eq!(buffer.pixel(2, 3), Some([10, 20, 30, 40]));
        assert_eq!(buffer.pixel(3, 3), Some([255; 4]));
    }

    #[test]
    fn test_blend_weights_by_coverage() {
        let mut buffer = PixelBuffer::new(Bounds::new(2, 2));
        let [mut red, ..] = buffer.channels_mut();
        red.blend(0, 0, 0, 0.25);
        red.blend(1, 0, 0, 0.0);
        red.blend(0, 1, 0, 1.0);
        assert_eq!(buffer.pixel(0, 0).unwrap()[0], 191);
        assert_eq!(buffer.pixel(1, 0).unwrap()[0], 255);
        assert_eq!(buffer.pixel(0, 1).unwrap()[0], 0);
    }

    #[test]
    fn test_out_of_canvas_writes_are_dropped() {
        let mut buffer = PixelBuffer::new(Bounds::new(16, 16));
        draw_marker(&mut buffer, Point::new(0, 0), Color::BLACK);
        assert_eq!(buffer.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(buffer.pixel(6, 0), Some([0, 0, 0, 255]));
        assert_eq!(buffer.pixel(10, 10), Some([255; 4]));
    }
}
