use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shape::ShapeKind;

mod draw_shape_tool;
pub use draw_shape_tool::{Draft, DraftStep};

mod selection_tool;
pub use selection_tool::DragSession;

/// A tool the user can arm from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Draw a new shape of the given kind.
    Draw(ShapeKind),
    /// Pick a shape and drag its handles.
    Select,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Draw(ShapeKind::Line),
        Tool::Draw(ShapeKind::ThickLine),
        Tool::Draw(ShapeKind::Circle),
        Tool::Draw(ShapeKind::Polygon),
        Tool::Select,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Draw(kind) => kind.name(),
            Tool::Select => "Select",
        }
    }

    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Draw(kind) => Some(*kind),
            Tool::Select => None,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Tool::Select)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
