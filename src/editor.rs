use log::{debug, info};
use std::mem;

use crate::canvas::{Canvas, Overlay};
use crate::config::EditorSettings;
use crate::error::{LoadReport, PersistenceResult};
use crate::geometry::hit_testing::Handle;
use crate::geometry::Point;
use crate::input::{InputEvent, MoveQueue};
use crate::persistence::{self, ShapeRecord};
use crate::raster::PixelBuffer;
use crate::shape::{Color, Shape, ShapeId};
use crate::state::EditorState;
use crate::tools::{Draft, DraftStep, DragSession, Tool};

/// The interaction controller.
///
/// Turns tool selections and pointer events into shape log mutations and
/// keeps the canvas frame in sync with what the user is doing. Positions
/// are canvas pixels; anything outside the canvas is clamped on entry.
#[derive(Debug)]
pub struct Editor {
    canvas: Canvas,
    state: EditorState,
    selection: Option<ShapeId>,
    settings: EditorSettings,
    last_pointer: Option<Point>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let mut canvas = Canvas::new(settings.bounds());
        canvas.set_antialiasing(settings.antialiasing);
        Self {
            canvas,
            state: EditorState::Idle,
            selection: None,
            settings,
            last_pointer: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    /// Log index of the selected shape.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.and_then(|id| self.canvas.log().index_of(id))
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn shapes(&self) -> &[Shape] {
        self.canvas.shapes()
    }

    pub fn can_undo(&self) -> bool {
        self.canvas.log().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.canvas.log().can_redo()
    }

    /// The buffer to present.
    pub fn render(&self) -> &PixelBuffer {
        self.canvas.frame()
    }

    /// Arm `tool`, abandoning any gesture in progress.
    ///
    /// Picking the tool that is already active disarms it. Arming Select
    /// selects the first live shape.
    pub fn select_tool(&mut self, tool: Tool) {
        self.cancel_drag();
        let previous = mem::take(&mut self.state);

        if previous.active_tool() == Some(tool) {
            debug!("{tool} disarmed");
            self.selection = None;
        } else {
            debug!("{tool} armed (was {})", previous.name());
            self.state = EditorState::ToolArmed { tool };
            self.selection = if tool.is_select() {
                self.canvas.log().first_live().map(Shape::id)
            } else {
                None
            };
        }
        self.refresh();
    }

    /// Same as [`Editor::select_tool`].
    pub fn create_and_arm_tool(&mut self, tool: Tool) {
        self.select_tool(tool);
    }

    pub fn pointer_down(&mut self, pos: Point) {
        let pos = pos.clamped(self.canvas.bounds());
        self.last_pointer = Some(pos);

        match self.state {
            EditorState::Idle => debug!("pointer down with no tool armed"),
            EditorState::ToolArmed { tool: Tool::Select } => {
                self.begin_drag(pos);
            }
            EditorState::ToolArmed { tool: Tool::Draw(_) } => {
                self.begin_draw(pos);
            }
            EditorState::Drawing { .. } => {
                if !self.close_if_eligible(pos) {
                    self.append_vertex(pos);
                }
            }
            EditorState::Dragging { .. } => debug!("pointer down while dragging ignored"),
        }
    }

    pub fn pointer_move(&mut self, pos: Point) {
        let pos = pos.clamped(self.canvas.bounds());
        self.last_pointer = Some(pos);

        match self.state {
            EditorState::Drawing { .. } => self.refresh(),
            EditorState::Dragging { .. } => self.drag_to(pos),
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, pos: Point) {
        if self.state.is_dragging() {
            self.drag_to(pos);
            self.end_drag();
        }
    }

    /// Place the first vertex of a new shape (the center, for a circle).
    pub fn begin_draw(&mut self, pos: Point) -> bool {
        let EditorState::ToolArmed { tool } = self.state else {
            debug!("begin_draw needs an armed tool, state is {}", self.state.name());
            return false;
        };
        let Some(kind) = tool.shape_kind() else {
            debug!("begin_draw needs a drawing tool, {tool} is armed");
            return false;
        };
        let pos = pos.clamped(self.canvas.bounds());
        let draft = Draft::begin(kind, pos, self.settings.color, self.settings.thickness);
        debug!("drawing {kind} from {pos:?}");

        self.state = EditorState::Drawing { draft };
        self.last_pointer = Some(pos);
        self.refresh();
        true
    }

    /// Add a vertex to the shape being drawn, committing it once complete.
    pub fn append_vertex(&mut self, pos: Point) -> bool {
        let pos = pos.clamped(self.canvas.bounds());
        let EditorState::Drawing { draft } = &mut self.state else {
            debug!("append_vertex outside of drawing, state is {}", self.state.name());
            return false;
        };

        match draft.accept(pos, self.settings.hit_radius) {
            DraftStep::Continue => self.refresh(),
            DraftStep::Ignored => {}
            DraftStep::Complete(shape) => self.finish_draft(shape),
        }
        true
    }

    /// Close the polygon being drawn if `pos` lands on its first vertex.
    pub fn close_if_eligible(&mut self, pos: Point) -> bool {
        let pos = pos.clamped(self.canvas.bounds());
        let EditorState::Drawing { draft } = &mut self.state else {
            return false;
        };
        if !draft.closes_at(pos, self.settings.hit_radius) {
            return false;
        }

        match draft.accept(pos, self.settings.hit_radius) {
            DraftStep::Complete(shape) => {
                self.finish_draft(shape);
                true
            }
            _ => false,
        }
    }

    fn finish_draft(&mut self, shape: Shape) {
        let tool = Tool::Draw(shape.kind());
        self.canvas.commit(shape);
        self.state = EditorState::ToolArmed { tool };
        self.refresh();
    }

    /// Grab a handle of the selected shape at `pos`.
    pub fn begin_drag(&mut self, pos: Point) -> Option<Handle> {
        if !matches!(self.state, EditorState::ToolArmed { tool: Tool::Select }) {
            debug!("begin_drag needs the select tool, state is {}", self.state.name());
            return None;
        }
        let index = self.selected_index()?;
        let shape = self.canvas.log().get(index)?;
        if shape.is_tombstoned() {
            return None;
        }

        let pos = pos.clamped(self.canvas.bounds());
        let drag = DragSession::begin(index, shape, pos, self.settings.hit_radius)?;
        let handle = drag.handle();
        let id = shape.id();

        self.canvas.hold_out(id);
        self.state = EditorState::Dragging { drag };
        self.last_pointer = Some(pos);
        self.refresh();
        Some(handle)
    }

    /// Move the grabbed handle to `pos` and preview the result.
    pub fn drag_to(&mut self, pos: Point) {
        let bounds = self.canvas.bounds();
        let EditorState::Dragging { drag } = &mut self.state else {
            return;
        };
        drag.drag_to(pos.clamped(bounds), bounds);
        self.refresh();
    }

    /// Commit the staged shape in place of the original.
    pub fn end_drag(&mut self) -> bool {
        match mem::take(&mut self.state) {
            EditorState::Dragging { drag } => {
                let (index, shape) = drag.finish();
                info!("reshaped shape {index}");
                self.canvas.replace(index, shape);
                self.state = EditorState::ToolArmed { tool: Tool::Select };
                self.refresh();
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Drop the staged shape and leave the log entry as it was.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.state.is_dragging() {
            return false;
        }
        debug!("drag cancelled");
        self.state = EditorState::ToolArmed { tool: Tool::Select };
        self.canvas.release();
        self.refresh();
        true
    }

    /// Tombstone the newest live shape. Works in any state.
    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        let undone = self.canvas.undo();
        self.drop_dead_selection();
        self.refresh();
        undone
    }

    /// Restore the most recently undone shape. Works in any state.
    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        let redone = self.canvas.redo();
        self.refresh();
        redone
    }

    /// Drop every shape and disarm.
    pub fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.selection = None;
        self.last_pointer = None;
        self.canvas.reset();
    }

    /// Replace the log with `records`, skipping the ones that fail to validate.
    pub fn load(&mut self, records: &[ShapeRecord]) -> LoadReport {
        let (shapes, report) = persistence::load(records, self.canvas.bounds());
        self.load_shapes(shapes);
        report
    }

    pub fn load_json(&mut self, json: &str) -> PersistenceResult<LoadReport> {
        let (shapes, report) = persistence::from_json(json, self.canvas.bounds())?;
        self.load_shapes(shapes);
        Ok(report)
    }

    /// Replace the log with already validated shapes.
    pub fn load_shapes(&mut self, shapes: Vec<Shape>) {
        info!("loading {} shapes", shapes.len());
        self.state = EditorState::Idle;
        self.selection = None;
        self.last_pointer = None;
        self.canvas.load(shapes);
    }

    /// Records for every live shape.
    pub fn save(&self) -> Vec<ShapeRecord> {
        persistence::save(self.canvas.log())
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        persistence::to_json(self.canvas.log())
    }

    /// Select the live shape at `index`, or clear the selection if it is
    /// already selected. Arms the select tool.
    pub fn select_shape(&mut self, index: usize) -> bool {
        let Some(id) = self
            .canvas
            .log()
            .get(index)
            .filter(|shape| !shape.is_tombstoned())
            .map(Shape::id)
        else {
            return false;
        };

        self.cancel_drag();
        self.state = EditorState::ToolArmed { tool: Tool::Select };
        self.selection = if self.selection == Some(id) {
            None
        } else {
            Some(id)
        };
        debug!("selection is now {:?}", self.selected_index());
        self.refresh();
        true
    }

    /// Set the drawing color and recolour the selected shape.
    pub fn set_color(&mut self, color: Color) {
        self.settings.color = color;
        if self.state.is_dragging() {
            return;
        }

        let selected = self
            .selected_index()
            .and_then(|index| Some((index, self.canvas.log().get(index)?.clone())));
        if let Some((index, mut shape)) = selected {
            if shape.color() != color {
                shape.set_color(color);
                self.canvas.replace(index, shape);
                self.refresh();
            }
        }
    }

    pub fn set_thickness(&mut self, thickness: u32) {
        self.settings.set_thickness(thickness);
    }

    pub fn adjust_thickness(&mut self, notches: i32) {
        self.settings.adjust_thickness(notches);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.settings.set_zoom(zoom);
    }

    pub fn zoom_by_wheel(&mut self, wheel_delta: f32) {
        self.settings.zoom_by_wheel(wheel_delta);
    }

    pub fn set_antialiasing(&mut self, antialiasing: bool) {
        self.settings.antialiasing = antialiasing;
        self.canvas.set_antialiasing(antialiasing);
        self.refresh();
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::SelectTool(tool) => self.select_tool(tool),
            InputEvent::PointerDown(pos) => self.pointer_down(pos),
            InputEvent::PointerMove(pos) => self.pointer_move(pos),
            InputEvent::PointerUp(pos) => self.pointer_up(pos),
            InputEvent::Undo => {
                self.undo();
            }
            InputEvent::Redo => {
                self.redo();
            }
        }
    }

    /// Apply the newest queued pointer move, if any.
    pub fn flush_moves(&mut self, queue: &MoveQueue) -> bool {
        match queue.take() {
            Some(pos) => {
                self.pointer_move(pos);
                true
            }
            None => false,
        }
    }

    fn drop_dead_selection(&mut self) {
        let alive = self
            .selected_index()
            .and_then(|index| self.canvas.log().get(index))
            .is_some_and(|shape| !shape.is_tombstoned());
        if !alive {
            self.selection = None;
        }
    }

    /// Rebuild the shown frame for the current state.
    fn refresh(&mut self) {
        let markers = self.settings.markers;
        match &self.state {
            EditorState::Drawing { draft } => {
                let vertices = draft.with_pointer(self.last_pointer);
                self.canvas.preview(&[Overlay::Outline(draft.outline(&vertices))]);
            }
            EditorState::Dragging { drag } => {
                let staged = drag.staged();
                self.canvas
                    .preview(&[Overlay::Shape(staged), Overlay::Handles(staged, &markers)]);
            }
            EditorState::Idle | EditorState::ToolArmed { .. } => {
                let selected = self
                    .selected_index()
                    .and_then(|index| self.canvas.log().get(index))
                    .filter(|shape| !shape.is_tombstoned())
                    .cloned();
                match selected {
                    Some(shape) => {
                        self.canvas.preview(&[Overlay::Handles(&shape, &markers)]);
                    }
                    None => self.canvas.show_baseline(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn draw_triangle(editor: &mut Editor) {
        editor.select_tool(Tool::Draw(ShapeKind::Polygon));
        editor.pointer_down(Point::new(100, 100));
        editor.pointer_down(Point::new(200, 100));
        editor.pointer_down(Point::new(150, 200));
        editor.pointer_down(Point::new(102, 101));
    }

    #[test]
    fn test_reselecting_tool_disarms() {
        let mut editor = Editor::default();
        editor.select_tool(Tool::Draw(ShapeKind::Line));
        assert_eq!(editor.state().active_tool(), Some(Tool::Draw(ShapeKind::Line)));
        editor.select_tool(Tool::Draw(ShapeKind::Line));
        assert!(editor.state().is_idle());
    }

    #[test]
    fn test_pointer_down_without_tool_does_nothing() {
        let mut editor = Editor::default();
        editor.pointer_down(Point::new(5, 5));
        assert!(editor.state().is_idle());
        assert!(editor.shapes().is_empty());
    }

    #[test]
    fn test_polygon_commits_and_rearms() {
        let mut editor = Editor::default();
        draw_triangle(&mut editor);

        assert_eq!(editor.shapes().len(), 1);
        assert_eq!(editor.shapes()[0].vertices().len(), 3);
        assert!(matches!(
            editor.state(),
            EditorState::ToolArmed { tool: Tool::Draw(ShapeKind::Polygon) }
        ));
    }

    #[test]
    fn test_select_tool_picks_first_live_shape() {
        let mut editor = Editor::default();
        draw_triangle(&mut editor);
        editor.select_tool(Tool::Select);
        assert_eq!(editor.selected_index(), Some(0));
        assert_eq!(editor.render().pixel(150, 133), Some([255, 140, 0, 255]));
    }

    #[test]
    fn test_switching_tool_mid_drag_keeps_log_entry() {
        let mut editor = Editor::default();
        draw_triangle(&mut editor);
        let before = editor.shapes()[0].vertices().to_vec();

        editor.select_tool(Tool::Select);
        assert_eq!(editor.begin_drag(Point::new(150, 133)), Some(Handle::Center));
        editor.drag_to(Point::new(170, 153));
        editor.select_tool(Tool::Draw(ShapeKind::Line));

        assert_eq!(editor.shapes()[0].vertices(), before.as_slice());
        assert!(editor.shapes()[0].is_rendered());
    }

    #[test]
    fn test_undo_drops_selection_of_undone_shape() {
        let mut editor = Editor::default();
        draw_triangle(&mut editor);
        editor.select_tool(Tool::Select);
        assert!(editor.undo());
        assert_eq!(editor.selection(), None);
        assert!(editor.redo());
        assert_eq!(editor.shapes().iter().filter(|s| !s.is_tombstoned()).count(), 1);
    }

    #[test]
    fn test_set_color_recolours_selection() {
        let mut editor = Editor::default();
        draw_triangle(&mut editor);
        editor.select_shape(0);
        editor.set_color(Color::rgba(0, 0, 255, 255));

        assert_eq!(editor.shapes()[0].color(), Color::rgba(0, 0, 255, 255));
        assert_eq!(editor.canvas().baseline().pixel(120, 100), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_select_shape_toggles() {
        let mut editor = Editor::default();
        draw_triangle(&mut editor);
        assert!(editor.select_shape(0));
        assert_eq!(editor.selected_index(), Some(0));
        assert!(editor.select_shape(0));
        assert_eq!(editor.selected_index(), None);
        assert!(!editor.select_shape(7));
    }
}
