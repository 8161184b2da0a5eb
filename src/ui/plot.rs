use eframe::egui::{self, Color32, TextureHandle, TextureOptions, Ui};
use egui_plot::{Legend, Line, Plot, PlotImage, PlotPoint, PlotPoints};

use crate::color::{ColorScale, Colormap};
use crate::data::model::Matrix;
use crate::render::render_heatmap;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Heatmap texture cache
// ---------------------------------------------------------------------------

/// GPU texture for the heatmap, rebuilt only when its inputs change.
#[derive(Default)]
pub struct HeatmapTexture {
    key: Option<(u64, usize, Colormap, bool)>,
    handle: Option<TextureHandle>,
}

impl HeatmapTexture {
    fn get(&mut self, ctx: &egui::Context, state: &AppState) -> Option<&TextureHandle> {
        let key = (state.revision, state.frame, state.colormap, state.global_scale);
        if self.key != Some(key) {
            self.handle = build_texture(ctx, state);
            self.key = Some(key);
        }
        self.handle.as_ref()
    }
}

fn build_texture(ctx: &egui::Context, state: &AppState) -> Option<TextureHandle> {
    let frame = state.current_frame()?;
    let (min, max) = state.value_range()?;
    let scale = ColorScale::new(state.colormap, min, max).with_levels(state.levels());
    let img = render_heatmap(frame, &scale, 1);
    let size = [img.width() as usize, img.height() as usize];
    let color_image = egui::ColorImage::from_rgb(size, img.as_raw());
    Some(ctx.load_texture("heatmap", color_image, TextureOptions::NEAREST))
}

// ---------------------------------------------------------------------------
// Field heatmap (central panel)
// ---------------------------------------------------------------------------

/// Render the selected field as a heatmap on the unit square.
pub fn field_plot(ui: &mut Ui, state: &AppState, cache: &mut HeatmapTexture) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a simulation output directory  (File → Open directory…)");
        });
        return;
    }

    let Some(texture) = cache.get(ui.ctx(), state) else {
        ui.label("Selected field is empty.");
        return;
    };
    let texture_id = texture.id();
    let size = state.current_frame().map_or([1.0, 1.0], image_extent);

    Plot::new("field_plot")
        .data_aspect(1.0)
        .x_axis_label("X Position")
        .y_axis_label("Y Position")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                texture_id,
                PlotPoint::new(size[0] as f64 / 2.0, size[1] as f64 / 2.0),
                size,
            ));
        });
}

/// Plot-space extent of a frame: the longer side spans 1, the other keeps
/// the grid's proportions.
pub fn image_extent(frame: &Matrix) -> [f32; 2] {
    let longest = frame.rows().max(frame.cols()).max(1) as f32;
    [frame.cols() as f32 / longest, frame.rows() as f32 / longest]
}

// ---------------------------------------------------------------------------
// Pool size over time (bottom panel)
// ---------------------------------------------------------------------------

/// Width and depth of the weld pool against time.
pub fn pool_size_plot(ui: &mut Ui, state: &AppState) {
    let Some(values) = state.dataset.as_ref().map(|ds| &ds.values) else {
        return;
    };
    let (Some(time), Some(width), Some(depth)) =
        (values.time_ms(), values.width_cm(), values.depth_cm())
    else {
        ui.label("values file has no time/width/depth columns");
        return;
    };

    let series = |ys: &[f64]| -> PlotPoints {
        time.iter().zip(ys).map(|(&t, &y)| [t, y]).collect()
    };

    Plot::new("pool_size_plot")
        .legend(Legend::default())
        .x_axis_label("Time (ms)")
        .y_axis_label("Size (cm)")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(series(&width))
                    .name("Width")
                    .color(Color32::from_rgb(31, 119, 180))
                    .width(1.5),
            );
            plot_ui.line(
                Line::new(series(&depth))
                    .name("Depth")
                    .color(Color32::from_rgb(214, 39, 40))
                    .width(1.5),
            );
        });
}
