use std::path::PathBuf;

use eframe::egui;
use weldpool_viewer::app::WeldPoolApp;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional output directory to open on start-up.
    let initial_dir = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Weld Pool Viewer",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let mut app = WeldPoolApp::default();
            if let Some(dir) = initial_dir {
                app.state.open_directory(&dir);
            }
            Ok(Box::new(app))
        }),
    )
}
