mod app;
mod charts;
mod data;
mod state;
mod style;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::VibePandaApp;
use eframe::egui;

/// Dataset read at startup, relative to the working directory.
const DEFAULT_DATASET: &str = "reduced_dataset.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let dataset = match data::loader::load_file(Path::new(DEFAULT_DATASET)) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Cannot start without a dataset: {e}");
            return Err(e).with_context(|| format!("loading {DEFAULT_DATASET}"));
        }
    };
    if dataset.is_empty() {
        log::warn!("{DEFAULT_DATASET} has a header but no tracks; every chart will be empty");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Music Data Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(VibePandaApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
