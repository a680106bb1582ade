use std::path::Path;

use eframe::egui::{self, Color32, ScrollArea, Ui};

use crate::data::aggregate;
use crate::data::chart::{build_chart, ChartConfig, ChartKind};
use crate::data::filter::FilterOutcome;
use crate::data::loader;
use crate::state::{AppState, Page};
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CropScopeApp {
    pub state: AppState,
}

impl CropScopeApp {
    pub fn new() -> Self {
        let mut state = AppState::default();
        try_load_startup_data(&mut state);
        Self { state }
    }
}

impl Default for CropScopeApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe the conventional locations for the three CSVs so the dashboard
/// comes up populated without a dialog round-trip.
fn try_load_startup_data(state: &mut AppState) {
    for dir in ["data", "."] {
        let dir = Path::new(dir);
        if !dir.join(loader::CROPLAND_FILE).exists() {
            continue;
        }
        match loader::load_dir(dir) {
            Ok(data) => state.set_data(data),
            Err(e) => {
                log::warn!("Startup load from {} failed: {e:#}", dir.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
        return;
    }
    log::info!("No data folder found at startup; waiting for File → Open");
}

impl eframe::App for CropScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: analysis sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.data.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a data folder to begin  (File → Open data folder…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let page = self.state.page;
                    if page.shows(Page::Cropland) {
                        cropland_section(ui, &self.state);
                        if page == Page::AllCharts {
                            ui.separator();
                        }
                    }
                    if page.shows(Page::CropPrices) {
                        crop_prices_section(ui, &self.state);
                        if page == Page::AllCharts {
                            ui.separator();
                        }
                    }
                    if page.shows(Page::PriceIndex) {
                        index_section(ui, &self.state);
                    }
                });
        });
    }
}

// ---------------------------------------------------------------------------
// Analysis sections
// ---------------------------------------------------------------------------

fn warning(ui: &mut Ui, text: &str) {
    ui.colored_label(Color32::GOLD, text);
}

fn cropland_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Regional Cropland Values");

    if state.selected_states.is_empty() {
        warning(ui, "Please select at least one state.");
        return;
    }

    let view = match &state.cropland_view {
        FilterOutcome::Rows(view) => view,
        FilterOutcome::Empty => {
            warning(ui, "No data available for selected filters.");
            return;
        }
    };

    match build_chart(view, &state.cropland_chart_type, &ChartConfig::cropland()) {
        Ok(spec) => {
            plot::chart(ui, "cropland_plot", &spec, view, &state.cropland_colors);
            ui.add_space(8.0);

            ui.strong("Summary Statistics");
            let rows = aggregate::summarize(view);
            let entity_label = spec.series_field.as_deref().unwrap_or("Series");
            tables::summary_table(ui, "cropland_summary", entity_label, &rows, spec.y_format);
        }
        // A bad chart kind is fatal to this chart only; the other sections
        // keep rendering.
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
        }
    }
}

fn crop_prices_section(ui: &mut Ui, state: &AppState) {
    ui.heading("National Crop Prices");

    if state.selected_commodities.is_empty() {
        warning(ui, "Please select at least one commodity.");
        return;
    }

    let view = match &state.crop_prices_view {
        FilterOutcome::Rows(view) => view,
        FilterOutcome::Empty => {
            warning(ui, "No data available for selected filters.");
            return;
        }
    };

    match build_chart(view, ChartKind::Line.label(), &ChartConfig::crop_prices()) {
        Ok(spec) => {
            plot::chart(ui, "crop_prices_plot", &spec, view, &state.crop_price_colors);
            ui.add_space(8.0);

            let latest_year = view.period_bounds().map(|(_, hi)| hi).unwrap_or_default();
            ui.strong(format!("Latest Prices ({latest_year})"));
            let entity_label = spec.series_field.as_deref().unwrap_or("Series");
            tables::latest_table(ui, "latest_prices", entity_label, view);
        }
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
        }
    }
}

fn index_section(ui: &mut Ui, state: &AppState) {
    ui.heading("National Price Index");

    let view = match &state.index_view {
        FilterOutcome::Rows(view) => view,
        FilterOutcome::Empty => {
            warning(ui, "No index data in the selected window.");
            return;
        }
    };

    match build_chart(view, ChartKind::Line.label(), &ChartConfig::price_index()) {
        Ok(spec) => {
            plot::chart(ui, "index_plot", &spec, view, &state.cropland_colors);
            ui.add_space(8.0);
            tables::index_metrics(ui, view);
        }
        Err(e) => {
            ui.colored_label(Color32::RED, e.to_string());
        }
    }
}
