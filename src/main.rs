mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use app::BudgetViewerApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_args(std::env::args().skip(1));

    // The dataset is read once; without it there is nothing to show.
    let dataset = match data::loader::load_file(&config.dataset_path) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };

    if dataset.is_empty() {
        log::warn!("{} holds no budget rows", config.dataset_path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Ok(Box::new(BudgetViewerApp::new(dataset, title)))),
    )
    .map_err(|e| anyhow!("{e}"))
    .context("running the viewer window")
}
