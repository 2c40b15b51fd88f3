use log::debug;

use crate::geometry::hit_testing::is_near;
use crate::geometry::Point;
use crate::raster::Outline;
use crate::shape::{Color, Shape, ShapeKind};

/// What happened to a click while a shape is being drawn.
#[derive(Debug)]
pub enum DraftStep {
    /// The vertex was added; keep drawing.
    Continue,
    /// The click was swallowed (closing click on a polygon that is too small).
    Ignored,
    /// The shape is complete and ready to commit.
    Complete(Shape),
}

/// A shape under construction. Never part of the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    kind: ShapeKind,
    vertices: Vec<Point>,
    color: Color,
    thickness: u32,
}

impl Draft {
    /// Start a draft at `pos`. For a circle `pos` is the center.
    pub fn begin(kind: ShapeKind, pos: Point, color: Color, thickness: u32) -> Self {
        Self {
            kind,
            vertices: vec![pos],
            color,
            thickness,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertices placed so far plus a trailing vertex at the pointer.
    pub fn with_pointer(&self, pointer: Option<Point>) -> Vec<Point> {
        let mut vertices = self.vertices.clone();
        vertices.extend(pointer);
        vertices
    }

    pub fn outline<'a>(&self, vertices: &'a [Point]) -> Outline<'a> {
        Outline {
            kind: self.kind,
            vertices,
            color: self.color,
            thickness: self.thickness,
        }
    }

    /// Whether a click at `pos` would close this polygon.
    pub fn closes_at(&self, pos: Point, hit_radius: f64) -> bool {
        self.kind == ShapeKind::Polygon
            && self.vertices.len() >= 3
            && is_near(pos, self.vertices[0], hit_radius)
    }

    /// Feed the next click into the draft.
    pub fn accept(&mut self, pos: Point, hit_radius: f64) -> DraftStep {
        match self.kind {
            ShapeKind::Line => {
                DraftStep::Complete(Shape::line(self.vertices[0], pos, self.color))
            }
            ShapeKind::ThickLine => DraftStep::Complete(Shape::thick_line(
                self.vertices[0],
                pos,
                self.color,
                self.thickness,
            )),
            ShapeKind::Circle => {
                DraftStep::Complete(Shape::circle(self.vertices[0], pos, self.color))
            }
            ShapeKind::Polygon => {
                if !is_near(pos, self.vertices[0], hit_radius) {
                    self.vertices.push(pos);
                    return DraftStep::Continue;
                }
                match Shape::polygon(self.vertices.clone(), self.color) {
                    Some(polygon) => DraftStep::Complete(polygon),
                    None => {
                        debug!("closing click with {} vertices ignored", self.vertices.len());
                        DraftStep::Ignored
                    }
                }
            }
        }
    }
}
