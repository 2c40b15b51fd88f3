use crate::tools::{Draft, DragSession, Tool};

/// Interaction state of the editor.
///
/// Each variant carries exactly what its transitions need, so operations that
/// make no sense in a state (finishing a draft with no tool armed, dragging
/// with nothing grabbed) have nothing to act on.
#[derive(Debug, Default, Clone)]
pub enum EditorState {
    /// No tool armed.
    #[default]
    Idle,
    /// A tool is armed and nothing is in progress.
    ToolArmed { tool: Tool },
    /// Vertices of a new shape are being placed.
    Drawing { draft: Draft },
    /// A handle of the selected shape is being dragged.
    Dragging { drag: DragSession },
}

impl EditorState {
    /// The armed tool, including the one implied by an in-progress gesture.
    pub fn active_tool(&self) -> Option<Tool> {
        match self {
            Self::Idle => None,
            Self::ToolArmed { tool } => Some(*tool),
            Self::Drawing { draft } => Some(Tool::Draw(draft.kind())),
            Self::Dragging { .. } => Some(Tool::Select),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ToolArmed { .. } => "ToolArmed",
            Self::Drawing { .. } => "Drawing",
            Self::Dragging { .. } => "Dragging",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
