use eframe::egui;

use crate::state::AppState;
use crate::ui::plot::HeatmapTexture;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct WeldPoolApp {
    pub state: AppState,
    heatmap: HeatmapTexture,
}

impl eframe::App for WeldPoolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: field / frame controls ----
        egui::SidePanel::left("field_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: pool size over time ----
        egui::TopBottomPanel::bottom("pool_panel")
            .default_height(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::pool_size_plot(ui, &self.state);
            });

        // ---- Central panel: heatmap ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::field_plot(ui, &self.state, &mut self.heatmap);
        });
    }
}
