//! Saving and loading the shape log.
//!
//! A drawing is a JSON array of shape records in draw order. Tombstoned shapes
//! are not saved. On load each record is validated on its own; a bad record is
//! skipped with a warning and the rest of the drawing still loads.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::document::ShapeLog;
use crate::error::{LoadReport, LoadWarning, PersistenceError, PersistenceResult, RecordError};
use crate::geometry::{Bounds, Point};
use crate::shape::{Color, Shape, ShapeKind, MIN_THICKNESS};

/// The persisted form of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: Color,
    #[serde(default = "default_thickness")]
    pub thickness: u32,
    pub vertices: Vec<Point>,
    pub center: Point,
    #[serde(default)]
    pub midpoints: Vec<(Point, [usize; 2])>,
}

fn default_thickness() -> u32 {
    MIN_THICKNESS
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        Self {
            kind: shape.kind().name().to_owned(),
            color: shape.color(),
            thickness: shape.thickness(),
            vertices: shape.vertices().to_vec(),
            center: shape.center(),
            midpoints: shape
                .midpoints()
                .into_iter()
                .map(|(point, edge)| (point, [edge.start, edge.end]))
                .collect(),
        }
    }
}

impl ShapeRecord {
    /// Rebuild the shape. Derived state is recomputed from the vertices; the
    /// stored midpoint entries must name edges of the closed polygon.
    ///
    /// Every stored point must lie on a `bounds` canvas, which also keeps a
    /// circle's radius within the canvas diagonal.
    pub fn to_shape(&self, bounds: Bounds) -> Result<Shape, RecordError> {
        let kind: ShapeKind = self.kind.parse()?;

        let stray = self
            .vertices
            .iter()
            .chain([&self.center])
            .find(|point| !bounds.contains(point.x, point.y));
        if let Some(point) = stray {
            return Err(RecordError::OutOfCanvas {
                x: point.x,
                y: point.y,
                width: bounds.width,
                height: bounds.height,
            });
        }

        let vertices = match kind {
            // Circles are `[center, rim]`; records that only kept the rim are accepted too.
            ShapeKind::Circle => match self.vertices.last() {
                Some(rim) if self.vertices.len() <= 2 => vec![self.center, *rim],
                _ => self.vertices.clone(),
            },
            _ => self.vertices.clone(),
        };

        let shape = Shape::from_parts(kind, vertices, self.color, self.thickness)?;

        for [start, end] in self.midpoints.iter().map(|(_, pair)| *pair) {
            let valid = shape
                .edges()
                .iter()
                .any(|edge| edge.start == start && edge.end == end);
            if !valid {
                return Err(RecordError::InvalidMidpoint([start, end]));
            }
        }

        Ok(shape)
    }
}

/// Records for every live shape, in draw order.
pub fn save(log: &ShapeLog) -> Vec<ShapeRecord> {
    log.live().map(ShapeRecord::from).collect()
}

/// Turn records into shapes for a `bounds` canvas, skipping the ones that do
/// not validate.
pub fn load(records: &[ShapeRecord], bounds: Bounds) -> (Vec<Shape>, LoadReport) {
    let mut report = LoadReport::default();
    let mut shapes = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        match record.to_shape(bounds) {
            Ok(shape) => shapes.push(shape),
            Err(error) => skip(&mut report, index, error),
        }
    }

    report.loaded = shapes.len();
    (shapes, report)
}

fn skip(report: &mut LoadReport, index: usize, error: RecordError) {
    let warning = LoadWarning { index, error };
    warn!("{warning}");
    report.warnings.push(warning);
}

pub fn to_json(log: &ShapeLog) -> PersistenceResult<String> {
    Ok(serde_json::to_string_pretty(&save(log))?)
}

/// Parse a drawing. Only a document that is not a JSON array is an error;
/// individual malformed records end up in the report.
pub fn from_json(json: &str, bounds: Bounds) -> PersistenceResult<(Vec<Shape>, LoadReport)> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(PersistenceError::InvalidDocument(
            "expected an array of shape records".to_owned(),
        ));
    };

    let mut report = LoadReport::default();
    let mut shapes = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let parsed = serde_json::from_value::<ShapeRecord>(entry)
            .map_err(RecordError::from)
            .and_then(|record| record.to_shape(bounds));
        match parsed {
            Ok(shape) => shapes.push(shape),
            Err(error) => skip(&mut report, index, error),
        }
    }

    report.loaded = shapes.len();
    Ok((shapes, report))
}

pub fn save_to_path(log: &ShapeLog, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(log)?)?;
    info!("saved drawing to {}", path.display());
    Ok(())
}

pub fn load_from_path(
    path: impl AsRef<Path>,
    bounds: Bounds,
) -> PersistenceResult<(Vec<Shape>, LoadReport)> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let loaded = from_json(&json, bounds)?;
    info!(
        "loaded {} shapes from {} ({} skipped)",
        loaded.1.loaded,
        path.display(),
        loaded.1.warnings.len()
    );
    Ok(loaded)
}
