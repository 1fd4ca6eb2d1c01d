mod app;
mod color;
mod ui;

use app::TaggerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Tagger – Text Labeling",
        options,
        Box::new(|_cc| Ok(Box::new(TaggerApp::default()))),
    )
}
