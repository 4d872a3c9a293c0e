//! Dama GUI
//!
//! A graphical interface for playing 9x9 Dama against the AI or another player.

use dama::config::DamaConfig;
use dama::ui::DamaApp;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DamaConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Dama"),
        ..Default::default()
    };

    eframe::run_native(
        "Dama",
        options,
        Box::new(move |cc| Ok(Box::new(DamaApp::new(cc, config)))),
    )
}
