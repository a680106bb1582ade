use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: entity label → Color32
// ---------------------------------------------------------------------------

/// Maps the entity labels of a dataset (states or commodities) to distinct,
/// stable series colours. Built once per dataset from the full entity set so
/// a series keeps its colour regardless of the active filter.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map for the dataset's entity labels.
    pub fn new(entities: &BTreeSet<String>) -> Self {
        let palette = generate_palette(entities.len());
        let mapping = entities
            .iter()
            .cloned()
            .zip(palette)
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for an entity label; unknown labels fall back to
    /// grey.
    pub fn color_for(&self, entity: &str) -> Color32 {
        self.mapping.get(entity).copied().unwrap_or(Color32::GRAY)
    }
}
