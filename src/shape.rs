use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::RecordError;
use crate::geometry::{self, Bounds, Point};

/// Smallest and largest stroke width a thick line may carry.
pub const MIN_THICKNESS: u32 = 1;
pub const MAX_THICKNESS: u32 = 25;

/// Stable identity of a shape inside the log.
///
/// Indices shift meaning when the log is reset or reloaded, ids never do, so
/// the selection and the redo stack refer to shapes by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

/// The drawable shape families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    ThickLine,
    Circle,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Line,
        ShapeKind::ThickLine,
        ShapeKind::Circle,
        ShapeKind::Polygon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::ThickLine => "ThickLine",
            ShapeKind::Circle => "Circle",
            ShapeKind::Polygon => "Polygon",
        }
    }

    /// Line, thick line and circle all complete on their second vertex.
    pub fn fixed_vertex_count(self) -> Option<usize> {
        match self {
            ShapeKind::Line | ShapeKind::ThickLine | ShapeKind::Circle => Some(2),
            ShapeKind::Polygon => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RecordError::UnknownKind(s.to_owned()))
    }
}

/// Four independent 8-bit channels, in RGBA order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const DARK_ORANGE: Color = Color([255, 140, 0, 255]);
    pub const DARK_RED: Color = Color([139, 0, 0, 255]);
    pub const CADET_BLUE: Color = Color([95, 158, 160, 255]);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn channels(self) -> [u8; 4] {
        self.0
    }
}

impl From<egui::Color32> for Color {
    fn from(color: egui::Color32) -> Self {
        Self(color.to_srgba_unmultiplied())
    }
}

impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.0;
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// One polygon edge, as the pair of vertex indices it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Edges of a closed polygon with `count` vertices, closing edge last.
fn closed_edges(count: usize) -> Vec<Edge> {
    if count < 3 {
        return Vec::new();
    }
    (0..count).map(|i| Edge::new(i, (i + 1) % count)).collect()
}

/// One committed drawable entity.
///
/// `center` and `edges` are derived from `vertices` and are rebuilt by every
/// mutating method, so a shape never carries stale structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    center: Point,
    vertices: Vec<Point>,
    edges: Vec<Edge>,
    color: Color,
    thickness: u32,
    rendered: bool,
    tombstoned: bool,
}

impl Shape {
    /// Build a shape, checking the vertex cardinality its kind requires.
    ///
    /// Circles take `[center, rim]`. Polygons take at least three vertices and
    /// come out closed.
    pub fn from_parts(
        kind: ShapeKind,
        vertices: Vec<Point>,
        color: Color,
        thickness: u32,
    ) -> Result<Self, RecordError> {
        match kind.fixed_vertex_count() {
            Some(expected) if vertices.len() != expected => {
                return Err(RecordError::VertexCount {
                    kind,
                    expected: format!("exactly {expected}"),
                    found: vertices.len(),
                });
            }
            None if vertices.len() < 3 => {
                return Err(RecordError::VertexCount {
                    kind,
                    expected: "at least 3".to_owned(),
                    found: vertices.len(),
                });
            }
            _ => {}
        }

        if !(MIN_THICKNESS..=MAX_THICKNESS).contains(&thickness) {
            return Err(RecordError::Thickness(thickness));
        }

        let mut shape = Self {
            id: ShapeId::new(),
            kind,
            center: Point::ZERO,
            vertices,
            edges: Vec::new(),
            color,
            thickness,
            rendered: false,
            tombstoned: false,
        };
        shape.rebuild();
        Ok(shape)
    }

    pub fn line(a: Point, b: Point, color: Color) -> Self {
        Self::assemble(ShapeKind::Line, vec![a, b], color, MIN_THICKNESS)
    }

    pub fn thick_line(a: Point, b: Point, color: Color, thickness: u32) -> Self {
        let thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        Self::assemble(ShapeKind::ThickLine, vec![a, b], color, thickness)
    }

    pub fn circle(center: Point, rim: Point, color: Color) -> Self {
        Self::assemble(ShapeKind::Circle, vec![center, rim], color, MIN_THICKNESS)
    }

    /// A closed polygon, or `None` with fewer than three vertices.
    pub fn polygon(vertices: Vec<Point>, color: Color) -> Option<Self> {
        Self::from_parts(ShapeKind::Polygon, vertices, color, MIN_THICKNESS).ok()
    }

    // Callers guarantee the cardinality, so this cannot fail.
    fn assemble(kind: ShapeKind, vertices: Vec<Point>, color: Color, thickness: u32) -> Self {
        let mut shape = Self {
            id: ShapeId::new(),
            kind,
            center: Point::ZERO,
            vertices,
            edges: Vec::new(),
            color,
            thickness,
            rendered: false,
            tombstoned: false,
        };
        shape.rebuild();
        shape
    }

    /// Recompute center and edges from the vertices.
    fn rebuild(&mut self) {
        match self.kind {
            ShapeKind::Line | ShapeKind::ThickLine => {
                self.center = self.vertices[0].midpoint(self.vertices[1]);
                self.edges.clear();
            }
            ShapeKind::Circle => {
                self.center = self.vertices[0];
                self.edges.clear();
            }
            ShapeKind::Polygon => {
                self.center = geometry::average(&self.vertices).unwrap_or_default();
                self.edges = closed_edges(self.vertices.len());
            }
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge midpoints paired with the edge they bisect. Empty unless polygon.
    pub fn midpoints(&self) -> Vec<(Point, Edge)> {
        self.edges
            .iter()
            .map(|edge| {
                let midpoint = self.vertices[edge.start].midpoint(self.vertices[edge.end]);
                (midpoint, *edge)
            })
            .collect()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Circle radius in whole pixels (truncated). Zero for other kinds.
    pub fn radius(&self) -> i32 {
        match self.kind {
            ShapeKind::Circle => self.vertices[0].distance(self.vertices[1]) as i32,
            _ => 0,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn is_tombstoned(&self) -> bool {
        self.tombstoned
    }

    pub(crate) fn set_rendered(&mut self, rendered: bool) {
        self.rendered = rendered;
    }

    pub(crate) fn set_tombstoned(&mut self, tombstoned: bool) {
        self.tombstoned = tombstoned;
    }

    pub(crate) fn reassign_id(&mut self, id: ShapeId) {
        self.id = id;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Move every vertex by `delta` (center handle).
    pub fn translate(&mut self, delta: Point, bounds: Bounds) {
        for vertex in &mut self.vertices {
            *vertex = (*vertex + delta).clamped(bounds);
        }
        self.rebuild();
    }

    /// Replace one vertex (vertex handle). Out-of-range indices are ignored.
    pub fn move_vertex(&mut self, index: usize, position: Point, bounds: Bounds) {
        if let Some(vertex) = self.vertices.get_mut(index) {
            *vertex = position.clamped(bounds);
            self.rebuild();
        }
    }

    /// Move both endpoints of edge `edge_index` by `delta` (midpoint handle).
    pub fn move_edge(&mut self, edge_index: usize, delta: Point, bounds: Bounds) {
        let Some(edge) = self.edges.get(edge_index).copied() else {
            return;
        };
        for index in [edge.start, edge.end] {
            self.vertices[index] = (self.vertices[index] + delta).clamped(bounds);
        }
        self.rebuild();
    }
}
