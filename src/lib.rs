#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod persistence;
pub mod raster;
pub mod shape;
pub mod state;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{Canvas, Overlay};
pub use config::EditorSettings;
pub use document::ShapeLog;
pub use editor::Editor;
pub use error::{ExportError, LoadReport, PersistenceError, RecordError};
pub use geometry::hit_testing::Handle;
pub use geometry::{Bounds, Point};
pub use input::{InputEvent, MoveQueue};
pub use persistence::ShapeRecord;
pub use raster::PixelBuffer;
pub use shape::{Color, Shape, ShapeId, ShapeKind};
pub use state::EditorState;
pub use tools::Tool;
