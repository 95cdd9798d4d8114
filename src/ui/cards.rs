use eframe::egui::{self, RichText, Ui};

use claims_dashboard::format::{format_currency, format_number, format_percent};
use claims_dashboard::ClaimMetrics;

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// Render one card per KPI, side by side.
pub fn kpi_row(ui: &mut Ui, metrics: &ClaimMetrics) {
    let cards = [
        (format_number(metrics.total_claims as u64), "Total Claims"),
        (format_currency(metrics.total_claimed_losses), "Total Claimed"),
        (format_currency(metrics.total_payments), "Total Paid"),
        (format_currency(metrics.average_claim), "Avg. Claim"),
        (format_percent(metrics.injury_rate), "Injury Rate"),
        (format_percent(metrics.lawsuit_rate), "Lawsuit Rate"),
        (format_percent(metrics.payment_ratio), "Payment Ratio"),
    ];

    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (ui, (value, label)) in columns.iter_mut().zip(&cards) {
            kpi_card(ui, value, label);
        }
    });
}

fn kpi_card(ui: &mut Ui, value: &str, label: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(value).size(22.0).strong());
            ui.label(RichText::new(label).weak());
        });
    });
}
