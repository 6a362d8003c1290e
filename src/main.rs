mod app;
mod data;
mod processing;
mod render;
mod state;
mod ui;

use app::BoxPlotApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Boxplot Studio")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Boxplot Studio",
        options,
        Box::new(|cc| Ok(Box::new(BoxPlotApp::new(cc)))),
    )
}
