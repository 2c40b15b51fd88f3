use thiserror::Error;

use crate::shape::ShapeKind;

/// Why a single persisted shape record was rejected.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unknown shape type `{0}`")]
    UnknownKind(String),

    #[error("{kind} needs {expected} vertices, found {found}")]
    VertexCount {
        kind: ShapeKind,
        expected: String,
        found: usize,
    },

    #[error("thickness {0} is outside 1..=25")]
    Thickness(u32),

    #[error("point ({x}, {y}) lies outside the {width}x{height} canvas")]
    OutOfCanvas {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("midpoint entry {0:?} does not name an edge of the polygon")]
    InvalidMidpoint([usize; 2]),

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A record skipped while loading. The rest of the load still goes through.
#[derive(Debug, Error)]
#[error("record {index} skipped: {error}")]
pub struct LoadWarning {
    pub index: usize,
    #[source]
    pub error: RecordError,
}

/// Outcome of a load: how many shapes made it in and what was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Errors that can occur while reading or writing a drawing
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize drawing: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access drawing file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid drawing data: {0}")]
    InvalidDocument(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors from writing the canvas out as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match canvas size {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
}
