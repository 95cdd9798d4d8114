use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use claims_dashboard::data::series::{CountBucket, PaymentBucket};
use claims_dashboard::format::{format_currency, format_percent};

use crate::color::{self, CategoryColors};

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Axis formatter that prints `labels[i]` at integer position `i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || v.fract() != 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

fn chart_plot(id: &str) -> Plot {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

fn empty_notice(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No claims match the current filters.").weak());
        });
    });
}

fn labels_of(buckets: &[CountBucket]) -> Vec<String> {
    buckets.iter().map(|b| b.label.clone()).collect()
}

// ---------------------------------------------------------------------------
// Bar and line charts
// ---------------------------------------------------------------------------

/// Horizontal bars, one per insurer, smallest at the bottom.
pub fn claims_by_insurer(ui: &mut Ui, buckets: &[CountBucket], colors: &CategoryColors) {
    ui.strong("Claims by Insurer");
    if buckets.is_empty() {
        return empty_notice(ui);
    }

    let bars: Vec<Bar> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.count as f64)
                .name(&b.label)
                .fill(colors.color_for(&b.label))
        })
        .collect();

    chart_plot("claims_by_insurer")
        .y_axis_formatter(category_axis(labels_of(buckets)))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7).horizontal());
        });
}

/// Monthly claim counts as a line with markers.
pub fn monthly_trend(ui: &mut Ui, buckets: &[CountBucket]) {
    ui.strong("Monthly Claims Trend");
    if buckets.is_empty() {
        return empty_notice(ui);
    }

    let coords: Vec<[f64; 2]> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| [i as f64, b.count as f64])
        .collect();

    chart_plot("monthly_trend")
        .x_axis_formatter(category_axis(labels_of(buckets)))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Claims")
                    .color(color::PRIMARY)
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .color(color::PRIMARY)
                    .radius(4.0),
            );
        });
}

/// Vertical bars for the busiest states, shaded by count.
pub fn top_states(ui: &mut Ui, buckets: &[CountBucket], n: usize) {
    ui.strong(format!("Top {n} States by Claims"));
    if buckets.is_empty() {
        return empty_notice(ui);
    }

    let max = buckets.iter().map(|b| b.count).max().unwrap_or(1).max(1) as f32;
    let bars: Vec<Bar> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.count as f64)
                .name(&b.label)
                .fill(color::blues(b.count as f32 / max))
        })
        .collect();

    chart_plot("top_states")
        .x_axis_formatter(category_axis(labels_of(buckets)))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}

/// Claimed vs paid per insurer as grouped bars.
pub fn payments_by_insurer(ui: &mut Ui, buckets: &[PaymentBucket]) {
    ui.strong("Claims vs Payments by Insurer");
    if buckets.is_empty() {
        return empty_notice(ui);
    }

    let grouped = |offset: f64, amount: fn(&PaymentBucket) -> f64| -> Vec<Bar> {
        buckets
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Bar::new(i as f64 + offset, amount(b))
                    .name(format!("{} {}", b.insurer, format_currency(amount(b))))
            })
            .collect()
    };
    let claimed = BarChart::new(grouped(-0.2, |b| b.claimed))
        .name("Claimed")
        .color(color::CLAIMED)
        .width(0.4);
    let paid = BarChart::new(grouped(0.2, |b| b.paid))
        .name("Paid")
        .color(color::PAID)
        .width(0.4);

    let labels: Vec<String> = buckets.iter().map(|b| b.insurer.clone()).collect();
    chart_plot("payments_by_insurer")
        .legend(Legend::default())
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(claimed);
            plot_ui.bar_chart(paid);
        });
}

// ---------------------------------------------------------------------------
// Donut charts (egui_plot has no pie)
// ---------------------------------------------------------------------------

/// Incident-type share of the filtered claims.
pub fn incident_types(ui: &mut Ui, buckets: &[CountBucket], colors: &CategoryColors) {
    donut(ui, "Incident Type Distribution", buckets, |label| {
        colors.color_for(label)
    });
}

/// Injury / no-injury share of the filtered claims.
pub fn injury_involvement(ui: &mut Ui, buckets: &[CountBucket]) {
    donut(ui, "Injury Involvement", buckets, color::injury_color);
}

fn donut(ui: &mut Ui, title: &str, buckets: &[CountBucket], color_of: impl Fn(&str) -> Color32) {
    ui.strong(title);
    let total: usize = buckets.iter().map(|b| b.count).sum();
    if total == 0 {
        return empty_notice(ui);
    }

    ui.horizontal(|ui: &mut Ui| {
        let side = CHART_HEIGHT * 0.8;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = side / 2.0;

        // Slices are fanned out of thin triangles so each shape stays convex.
        let mut angle = -FRAC_PI_2;
        for b in buckets {
            let sweep = b.count as f32 / total as f32 * TAU;
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            let fill = color_of(&b.label);
            for step in 0..steps {
                let a0 = angle + sweep * step as f32 / steps as f32;
                let a1 = angle + sweep * (step + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * egui::vec2(a0.cos(), a0.sin()),
                        center + radius * egui::vec2(a1.cos(), a1.sin()),
                    ],
                    fill,
                    Stroke::NONE,
                ));
            }
            angle += sweep;
        }
        painter.circle_filled(center, radius * 0.4, ui.visuals().panel_fill);

        ui.vertical(|ui: &mut Ui| {
            for b in buckets {
                let share = b.count as f64 / total as f64 * 100.0;
                ui.label(
                    RichText::new(format!("■ {}  {}", b.label, format_percent(share)))
                        .color(color_of(&b.label)),
                );
            }
        });
    });
}
