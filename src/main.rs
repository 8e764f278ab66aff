//! Game Cultural Fit Analysis - Interactive Quadrant Dashboard
//!
//! Loads the game dataset once, then filters it by quadrant, game and column
//! and charts the value distribution of each selected column.

mod charts;
mod config;
mod data;
mod gui;

use config::AppConfig;
use eframe::egui;
use gui::DashboardApp;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = AppConfig::load();
    tracing::info!("Starting dashboard for {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(&config.window_title),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run dashboard: {}", e))
}
