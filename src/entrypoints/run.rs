use super::metadata::log_version_info;
use crate::app::{BoardMapApp, settings::Settings};
use clap::Parser;

/// Native entry point
pub fn native_main() {
    // Setup logging
    tracing_subscriber::fmt::init();
    log_version_info();

    let settings = match Settings::try_parse() {
        Ok(settings) => settings,
        Err(e) => e.exit(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Boardmap"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Boardmap",
        native_options,
        Box::new(move |cc| Ok(Box::new(BoardMapApp::new(settings, cc)))),
    ) {
        tracing::error!("Map window terminated with an error: {e}");
    }
}
