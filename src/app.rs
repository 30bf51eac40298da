use crate::command::{Command, CommandHistory, HistoryState};
use crate::document::Document;
use crate::grid::GridSettings;
use crate::input::{CanvasController, EditorMode};
use crate::panels;
use crate::renderer::Renderer;

/// The application shell: owns the document, the command history, and the
/// presentation collaborators, and wires them together once per frame.
///
/// Only UI preferences (mode, grid) persist across runs; the drawing and its
/// history are session-only.
#[derive(Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PolylineApp {
    mode: EditorMode,
    grid: GridSettings,
    #[serde(skip)]
    document: Document,
    #[serde(skip)]
    history: CommandHistory,
    #[serde(skip)]
    controller: CanvasController,
    #[serde(skip)]
    renderer: Renderer,
}

impl PolylineApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Restore UI preferences from the previous run, if any
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }
        Default::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    pub fn grid_mut(&mut self) -> &mut GridSettings {
        &mut self.grid
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state(&self.document)
    }

    /// Runs a command against the document, recording it in the history.
    pub fn execute(&mut self, command: Command) {
        if let Err(err) = self.history.execute(command, &mut self.document) {
            log::warn!("command rejected: {err}");
        }
    }

    pub fn undo(&mut self) {
        self.history.undo(&mut self.document);
    }

    pub fn redo(&mut self) {
        self.history.redo(&mut self.document);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Check the shifted chord first so plain Ctrl+Z does not shadow it
        let redo = ctx.input_mut(|i| {
            i.consume_key(
                egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
                egui::Key::Z,
            ) || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
        });
        if redo {
            self.redo();
        }
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z)) {
            self.undo();
        }
    }
}

impl eframe::App for PolylineApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        panels::tools_panel(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) =
                ui.allocate_painter(available_size, egui::Sense::click_and_drag());
            let canvas = response.rect;

            self.controller.handle(
                &response,
                canvas,
                self.mode,
                &self.grid,
                &mut self.document,
                &mut self.history,
            );

            self.renderer.paint(
                &painter,
                canvas,
                &self.document,
                &self.controller,
                &self.grid,
                self.mode,
            );
        });
    }
}
