use std::path::{Path, PathBuf};

use crate::config::EditorSettings;
use crate::editor::Editor;
use crate::input::{InputEvent, MoveQueue};
use crate::panels::{central_panel, tools_panel};
use crate::persistence::{self, ShapeRecord};

const SAVE_DIR: &str = "saves";
const DRAWING_FILE: &str = "drawing.json";
const EXPORT_FILE: &str = "canvas.png";

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    settings: EditorSettings,
    drawing: Vec<ShapeRecord>,
    #[serde(skip)]
    editor: Editor,
    #[serde(skip)]
    texture: Option<egui::TextureHandle>,
    #[serde(skip)]
    moves: MoveQueue,
    #[serde(skip)]
    status: String,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self {
            settings: EditorSettings::default(),
            drawing: Vec::new(),
            editor: Editor::default(),
            texture: None,
            moves: MoveQueue::new(),
            status: String::new(),
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: PaintApp = match cc.storage {
            Some(storage) => eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
            None => PaintApp::default(),
        };

        app.editor = Editor::new(app.settings.clone());
        let report = app.editor.load(&app.drawing);
        if !report.is_clean() {
            app.status = format!("{} stored shapes could not be restored", report.warnings.len());
        }
        log::info!("restored {} shapes", report.loaded);
        app
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// Shared handle pointer moves are queued on.
    pub fn moves(&self) -> &MoveQueue {
        &self.moves
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn dispatch(&mut self, event: InputEvent) {
        self.editor.handle_event(event);
    }

    fn save_path(file: &str) -> PathBuf {
        Path::new(SAVE_DIR).join(file)
    }

    pub fn save_drawing(&mut self) {
        let path = Self::save_path(DRAWING_FILE);
        self.status = match persistence::save_to_path(self.editor.canvas().log(), &path) {
            Ok(()) => format!("Saved to {}", path.display()),
            Err(err) => {
                log::error!("save failed: {err}");
                err.to_string()
            }
        };
    }

    pub fn open_drawing(&mut self) {
        let path = Self::save_path(DRAWING_FILE);
        self.status = match persistence::load_from_path(&path, self.editor.canvas().bounds()) {
            Ok((shapes, report)) => {
                self.editor.load_shapes(shapes);
                if report.is_clean() {
                    format!("Opened {}", path.display())
                } else {
                    format!(
                        "Opened {} ({} records skipped)",
                        path.display(),
                        report.warnings.len()
                    )
                }
            }
            Err(err) => {
                log::error!("open failed: {err}");
                err.to_string()
            }
        };
    }

    pub fn export_png(&mut self) {
        let path = Self::save_path(EXPORT_FILE);
        if let Err(err) = std::fs::create_dir_all(SAVE_DIR) {
            log::error!("could not create {SAVE_DIR}: {err}");
            self.status = err.to_string();
            return;
        }
        self.status = match self.editor.canvas().export_png(&path) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(err) => {
                log::error!("export failed: {err}");
                err.to_string()
            }
        };
    }

    /// Upload the current frame and return its texture.
    pub fn frame_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let image = self.editor.render().to_color_image();
        let options = egui::TextureOptions::NEAREST;
        match &mut self.texture {
            Some(texture) => {
                texture.set(image, options);
                texture.id()
            }
            None => {
                let texture = ctx.load_texture("canvas", image, options);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings = self.editor.settings().clone();
        self.drawing = self.editor.save();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
