use crate::geometry::Point;
use crate::input::InputEvent;
use crate::tools::Tool;
use crate::PaintApp;

const WHEEL_NOTCH: f32 = 120.0;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        handle_shortcuts(app, ui);

        let texture = app.frame_texture(ctx);
        let bounds = app.editor().canvas().bounds();
        let zoom = app.editor().settings().zoom;
        let size = egui::vec2(bounds.width as f32, bounds.height as f32) * zoom;

        egui::ScrollArea::both().show(ui, |ui| {
            let response = ui.add(
                egui::Image::new(egui::load::SizedTexture::new(texture, size))
                    .sense(egui::Sense::click_and_drag()),
            );
            handle_pointer(app, ui, &response);
        });
    });
}

fn handle_shortcuts(app: &mut PaintApp, ui: &egui::Ui) {
    let (undo, redo) = ui.input(|i| {
        let z = i.modifiers.command && i.key_pressed(egui::Key::Z);
        (z && !i.modifiers.shift, z && i.modifiers.shift)
    });
    if undo {
        app.dispatch(InputEvent::Undo);
    }
    if redo {
        app.dispatch(InputEvent::Redo);
    }

    let (command, shift, scroll) =
        ui.input(|i| (i.modifiers.command, i.modifiers.shift, i.raw_scroll_delta));
    // Shift turns vertical wheel motion horizontal on some platforms.
    let wheel = scroll.y + scroll.x;
    if wheel == 0.0 {
        return;
    }
    if command {
        // One frame of wheel motion counts as a single 120-unit notch.
        app.editor_mut().zoom_by_wheel(wheel.signum() * WHEEL_NOTCH);
    } else if shift {
        app.editor_mut().adjust_thickness(wheel.signum() as i32);
    }
}

fn to_canvas(pos: egui::Pos2, rect: egui::Rect, zoom: f32) -> Point {
    Point::from_pos2(((pos - rect.min) / zoom).to_pos2())
}

fn handle_pointer(app: &mut PaintApp, ui: &egui::Ui, response: &egui::Response) {
    let zoom = app.editor().settings().zoom;
    let (pressed, released, moved, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.is_moving(),
            i.pointer.latest_pos(),
        )
    });
    let Some(latest) = latest else {
        return;
    };
    let pos = to_canvas(latest, response.rect, zoom);
    let dragging = app.editor().state().is_dragging();

    if moved && (response.hovered() || dragging) {
        app.moves().push(pos);
    }
    let moves = app.moves().clone();
    app.editor_mut().flush_moves(&moves);

    if pressed && response.hovered() {
        app.dispatch(InputEvent::PointerDown(pos));
    }
    if released && dragging {
        app.dispatch(InputEvent::PointerUp(pos));
    }

    if response.hovered() {
        let cursor = match app.editor().state().active_tool() {
            Some(Tool::Select) => egui::CursorIcon::Grab,
            Some(Tool::Draw(_)) => egui::CursorIcon::Crosshair,
            None => egui::CursorIcon::Default,
        };
        ui.ctx().set_cursor_icon(cursor);
    }
}
