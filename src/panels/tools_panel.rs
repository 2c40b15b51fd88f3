use crate::input::InputEvent;
use crate::shape::{Color, MAX_THICKNESS, MIN_THICKNESS};
use crate::tools::Tool;
use crate::PaintApp;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.editor().state().active_tool();
            for tool in Tool::ALL {
                if ui.selectable_label(active_tool == Some(tool), tool.name()).clicked() {
                    log::info!("Tool selected from UI: {tool}");
                    app.dispatch(InputEvent::SelectTool(tool));
                }
            }
            ui.separator();

            let mut antialiasing = app.editor().settings().antialiasing;
            if ui.checkbox(&mut antialiasing, "Antialiasing").changed() {
                app.editor_mut().set_antialiasing(antialiasing);
            }

            ui.horizontal(|ui| {
                let mut color = egui::Color32::from(app.editor().settings().color);
                ui.label("Color");
                if ui.color_edit_button_srgba(&mut color).changed() {
                    app.editor_mut().set_color(Color::from(color));
                }
            });

            let mut thickness = app.editor().settings().thickness;
            if ui
                .add(egui::Slider::new(&mut thickness, MIN_THICKNESS..=MAX_THICKNESS).text("Thickness"))
                .changed()
            {
                app.editor_mut().set_thickness(thickness);
            }
            ui.label(format!("Zoom: {:.0}%", app.editor().settings().zoom * 100.0));
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.editor().can_undo();
                let can_redo = app.editor().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.dispatch(InputEvent::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.dispatch(InputEvent::Redo);
                }
                if ui.button("Reset").clicked() {
                    app.editor_mut().reset();
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    app.save_drawing();
                }
                if ui.button("Open").clicked() {
                    app.open_drawing();
                }
                if ui.button("Export PNG").clicked() {
                    app.export_png();
                }
            });

            if !app.status().is_empty() {
                ui.label(app.status().to_owned());
            }
            ui.separator();

            ui.strong("Shapes");
            let selected = app.editor().selected_index();
            let entries: Vec<(usize, String, bool)> = app
                .editor()
                .shapes()
                .iter()
                .enumerate()
                .map(|(index, shape)| {
                    let [r, g, b, a] = shape.color().0;
                    let label = format!("{index}: {} #{r:02x}{g:02x}{b:02x}{a:02x}", shape.kind());
                    (index, label, shape.is_tombstoned())
                })
                .collect();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, label, tombstoned) in entries {
                    if tombstoned {
                        ui.weak(label);
                    } else if ui.selectable_label(selected == Some(index), label).clicked() {
                        app.editor_mut().select_shape(index);
                    }
                }
            });
        });
}
