use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::chart::ChartKind;
use crate::data::filter::{FilterOutcome, FilterSpec};
use crate::data::loader::LoadedData;

/// Year window the price-index page always shows, per the source analysis.
pub const INDEX_YEARS: (i32, i32) = (1990, 2025);

/// Default commodity selection for the crop-prices page.
const DEFAULT_COMMODITIES: [&str; 3] = ["WHEAT", "CORN", "SOYBEANS"];

// ---------------------------------------------------------------------------
// Page navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Cropland,
    CropPrices,
    PriceIndex,
    AllCharts,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Cropland,
        Page::CropPrices,
        Page::PriceIndex,
        Page::AllCharts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Cropland => "Regional Cropland Values",
            Page::CropPrices => "National Crop Prices",
            Page::PriceIndex => "National Price Index",
            Page::AllCharts => "All Charts",
        }
    }

    /// Whether this page's section is visible under the current navigation
    /// choice ("All Charts" shows every section).
    pub fn shows(&self, section: Page) -> bool {
        *self == section || *self == Page::AllCharts
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded datasets (None until a data folder is found).
    pub data: Option<LoadedData>,

    /// Active page.
    pub page: Page,

    // ---- Cropland page selections ----
    pub selected_states: BTreeSet<String>,
    pub year_range: (i32, i32),
    /// Chart-type label as shown in the combo box; parsed by the chart
    /// builder, which rejects anything it does not support.
    pub cropland_chart_type: String,

    // ---- Crop-prices page selections ----
    pub selected_commodities: BTreeSet<String>,

    // ---- Filter outcomes, recomputed on every selection change ----
    pub cropland_view: FilterOutcome,
    pub crop_prices_view: FilterOutcome,
    pub index_view: FilterOutcome,

    // ---- Stable series colours, built once per dataset ----
    pub cropland_colors: ColorMap,
    pub crop_price_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            data: None,
            page: Page::Cropland,
            selected_states: BTreeSet::new(),
            year_range: (1997, 2025),
            cropland_chart_type: ChartKind::Line.label().to_string(),
            selected_commodities: BTreeSet::new(),
            cropland_view: FilterOutcome::Empty,
            crop_prices_view: FilterOutcome::Empty,
            index_view: FilterOutcome::Empty,
            cropland_colors: ColorMap::default(),
            crop_price_colors: ColorMap::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest freshly loaded datasets: initialise selections, colours, and
    /// the filtered views.
    pub fn set_data(&mut self, data: LoadedData) {
        self.selected_states = data.cropland.entities.clone();
        self.selected_commodities = data
            .crop_prices
            .entities
            .iter()
            .filter(|e| DEFAULT_COMMODITIES.contains(&e.as_str()))
            .cloned()
            .collect();
        if self.selected_commodities.is_empty() {
            self.selected_commodities = data.crop_prices.entities.clone();
        }

        if let Some((lo, hi)) = data.cropland.period_bounds {
            self.year_range = (self.year_range.0.clamp(lo, hi), hi);
        }

        self.cropland_colors = ColorMap::new(&data.cropland.entities);
        self.crop_price_colors = ColorMap::new(&data.crop_prices.entities);

        self.data = Some(data);
        self.status_message = None;
        self.refilter();
    }

    /// The cropland page's active filter.
    pub fn cropland_spec(&self) -> FilterSpec {
        FilterSpec {
            entities: self.selected_states.clone(),
            period_range: self.year_range,
        }
    }

    /// The crop-prices page's active filter (full year range).
    pub fn crop_prices_spec(&self) -> FilterSpec {
        let period_range = self
            .data
            .as_ref()
            .and_then(|d| d.crop_prices.period_bounds)
            .unwrap_or((i32::MIN, i32::MAX));
        FilterSpec {
            entities: self.selected_commodities.clone(),
            period_range,
        }
    }

    /// The price-index page's fixed year window.
    pub fn index_spec(&self) -> FilterSpec {
        FilterSpec::years(INDEX_YEARS.0, INDEX_YEARS.1)
    }

    /// Recompute all filtered views after a selection change.
    ///
    /// At the engine level an empty entity set means "no entity constraint"
    /// (the index dataset needs that), so a zero-entity selection is mapped
    /// to an empty outcome here, before the engine runs.
    pub fn refilter(&mut self) {
        let Some(data) = &self.data else {
            return;
        };
        self.cropland_view = if self.selected_states.is_empty() {
            FilterOutcome::Empty
        } else {
            data.cropland.select(&self.cropland_spec())
        };
        self.crop_prices_view = if self.selected_commodities.is_empty() {
            FilterOutcome::Empty
        } else {
            data.crop_prices.select(&self.crop_prices_spec())
        };
        self.index_view = data.index.select(&self.index_spec());
    }

    /// Toggle one state in the cropland filter.
    pub fn toggle_state(&mut self, state: &str) {
        if !self.selected_states.remove(state) {
            self.selected_states.insert(state.to_string());
        }
        self.refilter();
    }

    /// Toggle one commodity in the crop-prices filter.
    pub fn toggle_commodity(&mut self, commodity: &str) {
        if !self.selected_commodities.remove(commodity) {
            self.selected_commodities.insert(commodity.to_string());
        }
        self.refilter();
    }

    /// Select every available state.
    pub fn select_all_states(&mut self) {
        if let Some(data) = &self.data {
            self.selected_states = data.cropland.entities.clone();
            self.refilter();
        }
    }

    /// Clear the state selection.
    pub fn select_no_states(&mut self) {
        self.selected_states.clear();
        self.refilter();
    }

    /// Set the cropland year range and refilter.
    pub fn set_year_range(&mut self, range: (i32, i32)) {
        self.year_range = range;
        self.refilter();
    }
}
