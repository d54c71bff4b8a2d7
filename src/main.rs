mod analytics;
mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use app::CivicPulseApp;
use config::Settings;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Civic Pulse – Municipal Stability Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CivicPulseApp::new(settings)))),
    )
}
