use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use claims_dashboard::format::format_number;
use claims_dashboard::InjuryFilter;

use crate::state::{AppState, Category};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Insurance Dashboard");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            date_range(ui, state);
            ui.separator();

            for category in Category::ALL {
                category_filter(ui, state, category);
            }
            ui.separator();

            injury_filter(ui, state);
            ui.separator();

            ui.label(
                RichText::new(format!(
                    "Showing: {} of {} claims",
                    format_number(state.visible_indices.len() as u64),
                    format_number(state.dataset.len() as u64)
                ))
                .strong(),
            );
        });
}

fn date_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Date Range");

    let Some((mut start, mut end)) = state.selection.date_range else {
        ui.label("No dated claims in this dataset.");
        return;
    };

    let mut changed = false;
    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("date_start"))
            .changed();
        ui.end_row();

        ui.label("To");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("date_end"))
            .changed();
        ui.end_row();
    });

    if start > end {
        ui.label(RichText::new("Start is after end: nothing matches.").color(Color32::RED));
    }

    if changed {
        state.selection.date_range = Some((start, end));
        state.refilter();
    }
}

fn category_filter(ui: &mut Ui, state: &mut AppState, category: Category) {
    let options = category.options(&state.dataset).clone();
    let selected = category
        .selected_mut(&mut state.selection)
        .clone()
        .unwrap_or_default();

    // Show count of selected / total in the header
    let header_text = format!("{}  ({}/{})", category.title(), selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(category.title())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(category);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(category);
                }
            });

            for value in &options {
                let mut text = RichText::new(value);
                if category == Category::Insurer {
                    text = text.color(state.insurer_colors.color_for(value));
                }

                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_value(category, value);
                }
            }
        });
}

fn injury_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Injury Involved");

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        for option in InjuryFilter::OPTIONS {
            changed |= ui
                .radio_value(&mut state.selection.injury, option, option.label())
                .changed();
        }
    });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} claims loaded, {} visible",
            format_number(state.dataset.len() as u64),
            format_number(state.visible_indices.len() as u64)
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
