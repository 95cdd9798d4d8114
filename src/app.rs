use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{cards, charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClaimsDashboardApp {
    pub state: AppState,
}

impl ClaimsDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ClaimsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let charts_data = &state.charts;

    ui.heading("Insurance Claims Analytics");
    ui.add_space(8.0);

    ui.strong("Key Metrics");
    cards::kpi_row(ui, &state.metrics);
    ui.separator();

    ui.strong("Claims Analysis");
    ui.columns(2, |cols: &mut [Ui]| {
        charts::claims_by_insurer(&mut cols[0], &charts_data.by_insurer, &state.insurer_colors);
        charts::incident_types(&mut cols[1], &charts_data.by_incident_type, &state.incident_colors);
    });
    ui.columns(2, |cols: &mut [Ui]| {
        charts::monthly_trend(&mut cols[0], &charts_data.monthly);
        charts::top_states(&mut cols[1], &charts_data.top_states, state.top_states());
    });
    ui.separator();

    ui.strong("Payment Analysis");
    ui.columns(2, |cols: &mut [Ui]| {
        charts::payments_by_insurer(&mut cols[0], &charts_data.payments);
        charts::injury_involvement(&mut cols[1], &charts_data.injury);
    });
}
