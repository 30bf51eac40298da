use crate::PolylineApp;
use crate::command::Command;
use crate::input::EditorMode;
use crate::path::{DrawingStatus, PolylineType};

/// The left side panel: editor mode, undo/redo, path actions, grid settings,
/// and the command history listing.
pub fn tools_panel(app: &mut PolylineApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Polylines");

            ui.horizontal(|ui| {
                for mode in [EditorMode::Draw, EditorMode::Edit, EditorMode::Move] {
                    if ui
                        .selectable_label(app.mode() == mode, mode.label())
                        .clicked()
                    {
                        log::info!("mode selected from UI: {}", mode.label());
                        app.set_mode(mode);
                    }
                }
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.history().can_undo();
                let can_redo = app.history().can_redo();

                if ui
                    .add_enabled(can_undo, egui::Button::new("Undo"))
                    .clicked()
                {
                    app.undo();
                }
                if ui
                    .add_enabled(can_redo, egui::Button::new("Redo"))
                    .clicked()
                {
                    app.redo();
                }
            });

            let state = app.history_state();
            ui.label(format!(
                "Step {} of {}",
                state.position,
                state.history_len - 1
            ));

            ui.separator();

            let drawing = app
                .document()
                .active_path()
                .is_some_and(|path| path.is_drawing());
            let point_count = app
                .document()
                .active_id()
                .map_or(0, |id| app.document().points_of(id).len());

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        drawing && point_count >= 2,
                        egui::Button::new("Finish open"),
                    )
                    .clicked()
                {
                    app.execute(Command::FinishPolyline {
                        drawing_status: DrawingStatus::NotDrawing,
                        polyline_type: PolylineType::Open,
                    });
                }
                if ui
                    .add_enabled(
                        drawing && point_count >= 3,
                        egui::Button::new("Finish closed"),
                    )
                    .clicked()
                {
                    app.execute(Command::FinishPolyline {
                        drawing_status: DrawingStatus::NotDrawing,
                        polyline_type: PolylineType::Closed,
                    });
                }
            });

            ui.horizontal(|ui| {
                let active = app.document().active_id();
                if ui
                    .add_enabled(active.is_some(), egui::Button::new("Delete path"))
                    .clicked()
                {
                    if let Some(id) = active {
                        app.execute(Command::DeletePath { id });
                    }
                }
                if ui
                    .add_enabled(!app.document().is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    app.execute(Command::ClearCanvas);
                }
            });

            ui.separator();

            let grid = app.grid_mut();
            ui.checkbox(&mut grid.visible, "Show grid");
            ui.horizontal(|ui| {
                ui.label("Resolution:");
                ui.add(egui::Slider::new(&mut grid.resolution, 5.0..=50.0));
            });

            ui.separator();

            ui.strong("History");
            let position = app.history_state().position;
            let labels: Vec<&'static str> = app.history().labels().collect();
            egui::Grid::new("history_grid")
                .num_columns(2)
                .spacing([20.0, 2.0])
                .striped(true)
                .show(ui, |ui| {
                    for (index, label) in labels.iter().enumerate() {
                        ui.label(format!("{}", index + 1));
                        if index < position {
                            ui.label(*label);
                        } else {
                            // Undone entries stay listed until a new command prunes them
                            ui.label(egui::RichText::new(*label).weak());
                        }
                        ui.end_row();
                    }
                });
        });
}
