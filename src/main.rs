#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use env_logger::Env;

use spritecutter::app::SpriteCutterApp;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "SpriteCutter - Image Grid Slicer",
        options,
        Box::new(|cc| Ok(Box::new(SpriteCutterApp::new(cc)))),
    )
}
