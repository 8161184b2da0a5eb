use eframe::egui::{self, Color32, RichText, Ui};

use crate::analysis::FieldSummary;
use crate::color::Colormap;
use crate::data::model::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – field and frame controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Field");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut field = state.field;
    for f in Field::ALL {
        ui.radio_value(&mut field, f, f.label());
    }
    if field != state.field {
        state.set_field(field);
    }
    ui.separator();

    // ---- Colour map ----
    ui.strong("Color map");
    egui::ComboBox::from_id_salt("colormap")
        .selected_text(state.colormap.name())
        .show_ui(ui, |ui: &mut Ui| {
            for cm in Colormap::ALL {
                ui.selectable_value(&mut state.colormap, cm, cm.name());
            }
        });
    ui.checkbox(&mut state.global_scale, "Same scale for all frames");
    ui.separator();

    // ---- Frame slider ----
    let n_frames = state.frames.len();
    ui.strong(format!("Frame ({n_frames} total)"));
    if n_frames > 1 {
        ui.add(egui::Slider::new(&mut state.frame, 0..=n_frames - 1));
        ui.horizontal(|ui: &mut Ui| {
            if ui.small_button("◀").clicked() {
                state.frame = state.frame.saturating_sub(1);
            }
            if ui.small_button("▶").clicked() {
                state.frame = (state.frame + 1).min(n_frames - 1);
            }
        });
    } else {
        ui.label("Single snapshot");
    }
    ui.separator();

    // ---- Summary of the current frame ----
    if let Some(summary) = state.current_frame().and_then(FieldSummary::of) {
        ui.label(format!("Shape: {} × {}", summary.shape.0, summary.shape.1));
        ui.label(format!("Min: {:.3}", summary.min));
        ui.label(format!("Max: {:.3}", summary.max));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open directory…").clicked() {
                open_directory_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(dir)) = (&state.dataset, &state.source_dir) {
            ui.label(format!(
                "{}: temperature {:?}, {} timesteps",
                dir.display(),
                ds.temperature.shape(),
                ds.values.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Directory dialog
// ---------------------------------------------------------------------------

pub fn open_directory_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open simulation output directory")
        .pick_folder();

    if let Some(dir) = dir {
        state.open_directory(&dir);
    }
}
