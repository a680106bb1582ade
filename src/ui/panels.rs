use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::chart::ChartKind;
use crate::data::loader;
use crate::data::model::title_case;
use crate::state::{AppState, Page, INDEX_YEARS};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: data folder, page navigation, status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        egui::ComboBox::from_id_salt("page_select")
            .selected_text(state.page.label())
            .show_ui(ui, |ui: &mut Ui| {
                for page in Page::ALL {
                    if ui
                        .selectable_label(state.page == page, page.label())
                        .clicked()
                    {
                        state.page = page;
                    }
                }
            });

        ui.separator();

        if let Some(data) = &state.data {
            ui.label(format!(
                "{} cropland / {} crop price / {} index rows",
                data.cropland.len(),
                data.crop_prices.len(),
                data.index.len()
            ));
        } else {
            ui.label("No data loaded");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel for the active page.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.data.is_none() {
        ui.label("No dataset loaded.");
        ui.label("Use File → Open data folder…");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.page.shows(Page::Cropland) {
                cropland_filters(ui, state);
            }
            if state.page.shows(Page::CropPrices) {
                commodity_filters(ui, state);
            }
            if state.page.shows(Page::PriceIndex) {
                ui.strong("Price index");
                ui.label(format!(
                    "Fixed window {}–{}, base year 2011 = 100.",
                    INDEX_YEARS.0, INDEX_YEARS.1
                ));
                ui.separator();
            }
        });
}

fn cropland_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("States");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_states();
        }
        if ui.small_button("None").clicked() {
            state.select_no_states();
        }
    });

    let available: Vec<String> = state
        .data
        .as_ref()
        .map(|d| d.cropland.entities.iter().cloned().collect())
        .unwrap_or_default();
    for entity in &available {
        let mut checked = state.selected_states.contains(entity);
        if ui.checkbox(&mut checked, title_case(entity)).changed() {
            state.toggle_state(entity);
        }
    }
    ui.separator();

    ui.strong("Year range");
    let bounds = state
        .data
        .as_ref()
        .and_then(|d| d.cropland.period_bounds)
        .unwrap_or(state.year_range);
    let (mut lo, mut hi) = state.year_range;
    let changed = ui
        .add(Slider::new(&mut lo, bounds.0..=bounds.1).text("From"))
        .changed()
        | ui.add(Slider::new(&mut hi, bounds.0..=bounds.1).text("To"))
            .changed();
    if changed {
        state.set_year_range((lo, hi));
    }
    ui.separator();

    ui.strong("Chart type");
    egui::ComboBox::from_id_salt("cropland_chart_type")
        .selected_text(&state.cropland_chart_type)
        .show_ui(ui, |ui: &mut Ui| {
            for label in ChartKind::LABELS {
                ui.selectable_value(&mut state.cropland_chart_type, label.to_string(), label);
            }
        });
    ui.separator();
}

fn commodity_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Commodities");
    let available: Vec<String> = state
        .data
        .as_ref()
        .map(|d| d.crop_prices.entities.iter().cloned().collect())
        .unwrap_or_default();
    for entity in &available {
        let mut checked = state.selected_commodities.contains(entity);
        if ui.checkbox(&mut checked, title_case(entity)).changed() {
            state.toggle_commodity(entity);
        }
    }
    ui.separator();
}

// ---------------------------------------------------------------------------
// Data folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open agricultural data folder")
        .pick_folder();

    if let Some(path) = folder {
        match loader::load_dir(&path) {
            Ok(data) => {
                state.set_data(data);
            }
            Err(e) => {
                log::error!("Failed to load data folder: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
