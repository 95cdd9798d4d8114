mod app;
mod color;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::ClaimsDashboardApp;
use claims_dashboard::data::cache;
use claims_dashboard::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("resolving configuration")?;
    let loader = cache::shared(&config);

    // A dataset that cannot be loaded is fatal: there is nothing to show.
    let dataset = loader
        .load()
        .inspect_err(|e| log::error!("Failed to load dataset: {e}"))
        .with_context(|| format!("loading claims from {}", loader.path().display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Insurance Claims Dashboard",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(ClaimsDashboardApp::new(AppState::new(
                loader, dataset, &config,
            ))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
