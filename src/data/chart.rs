use std::str::FromStr;

use thiserror::Error;

use super::model::FilteredView;

// ---------------------------------------------------------------------------
// Chart kind
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A chart kind the renderer has no representation for. Fatal to the
    /// single build call only; nothing is silently defaulted.
    #[error("unsupported chart kind: {0:?}")]
    UnsupportedKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Area,
    Bar,
}

impl ChartKind {
    /// UI labels, in menu order.
    pub const LABELS: [&'static str; 3] = ["Line Chart", "Area Chart", "Bar Chart"];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Bar => "Bar Chart",
        }
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Line Chart" | "Line" => Ok(ChartKind::Line),
            "Area Chart" | "Area" => Ok(ChartKind::Area),
            "Bar Chart" | "Bar" => Ok(ChartKind::Bar),
            other => Err(ChartError::UnsupportedKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Axis value formatting
// ---------------------------------------------------------------------------

/// How y-axis and table values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Whole dollars with thousands separators: `$4,560`.
    DollarsWhole,
    /// Dollars and cents: `$5.47`.
    DollarsCents,
    /// Index points to one decimal: `112.3`.
    IndexPoints,
}

impl ValueFormat {
    pub fn format(&self, v: f64) -> String {
        match self {
            ValueFormat::DollarsWhole => format!("${}", group_thousands(v.round() as i64)),
            ValueFormat::DollarsCents => format!("${v:.2}"),
            ValueFormat::IndexPoints => format!("{v:.1}"),
        }
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// ChartSpec – declarative chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Horizontal reference marker at a fixed y value.
    HorizontalLine { y: f64, label: String },
}

/// A render-agnostic chart description. The egui layer consumes this; the
/// builder itself never touches pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x_field: String,
    pub y_field: String,
    /// Entity column name when the view has an entity dimension, `None` for
    /// a single-series chart.
    pub series_field: Option<String>,
    pub title: String,
    pub y_axis_label: String,
    pub y_format: ValueFormat,
    pub annotations: Vec<Annotation>,
}

/// Per-page chart configuration: subject line, axis labeling, and an
/// optional base-value reference annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub subject: String,
    pub y_axis_label: String,
    pub y_format: ValueFormat,
    /// Reference value for index-style series (the base period level).
    pub base_value: Option<f64>,
}

impl ChartConfig {
    pub fn cropland() -> Self {
        ChartConfig {
            subject: "Cropland Values per Acre".to_string(),
            y_axis_label: "Price per Acre ($)".to_string(),
            y_format: ValueFormat::DollarsWhole,
            base_value: None,
        }
    }

    pub fn crop_prices() -> Self {
        ChartConfig {
            subject: "National Crop Prices".to_string(),
            y_axis_label: "Price per Bushel ($)".to_string(),
            y_format: ValueFormat::DollarsCents,
            base_value: None,
        }
    }

    /// The index is defined relative to 2011 = 100, so every index chart
    /// carries a reference line at the base level.
    pub fn price_index() -> Self {
        ChartConfig {
            subject: "National Food Commodity Price Index".to_string(),
            y_axis_label: "Price Index (2011 = 100)".to_string(),
            y_format: ValueFormat::IndexPoints,
            base_value: Some(100.0),
        }
    }
}

/// Build a declarative chart description for a filtered view.
///
/// The title is derived from the subject and the view's period range, so the
/// same view and config always produce the same spec. `series_field` mirrors
/// the view's schema exactly.
pub fn build_chart(
    view: &FilteredView,
    kind: &str,
    config: &ChartConfig,
) -> Result<ChartSpec, ChartError> {
    let kind = kind.parse::<ChartKind>()?;

    let title = match view.period_bounds() {
        Some((lo, hi)) => format!("{} ({lo}-{hi})", config.subject),
        None => config.subject.clone(),
    };

    let annotations = config
        .base_value
        .map(|base| {
            vec![Annotation::HorizontalLine {
                y: base,
                label: format!("Base Year ({base:.0})"),
            }]
        })
        .unwrap_or_default();

    Ok(ChartSpec {
        kind,
        x_field: "Year".to_string(),
        y_field: "Value".to_string(),
        series_field: view.entity_field.clone(),
        title,
        y_axis_label: config.y_axis_label.clone(),
        y_format: config.y_format,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    fn cropland_view() -> FilteredView {
        FilteredView {
            entity_field: Some("State".to_string()),
            rows: vec![
                Observation {
                    entity: Some("KENTUCKY".to_string()),
                    period: 1997,
                    value: Some(1500.0),
                },
                Observation {
                    entity: Some("KENTUCKY".to_string()),
                    period: 2025,
                    value: Some(4560.0),
                },
            ],
        }
    }

    #[test]
    fn fields_round_trip_the_view_schema() {
        let spec = build_chart(&cropland_view(), "Line Chart", &ChartConfig::cropland()).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.x_field, "Year");
        assert_eq!(spec.y_field, "Value");
        assert_eq!(spec.series_field.as_deref(), Some("State"));
    }

    #[test]
    fn title_derives_from_period_range() {
        let spec = build_chart(&cropland_view(), "Area Chart", &ChartConfig::cropland()).unwrap();
        assert_eq!(spec.title, "Cropland Values per Acre (1997-2025)");
    }

    #[test]
    fn unsupported_kind_is_an_error() {
        let err = build_chart(&cropland_view(), "Pie Chart", &ChartConfig::cropland())
            .expect_err("pie charts are not supported");
        assert_eq!(err, ChartError::UnsupportedKind("Pie Chart".to_string()));
    }

    #[test]
    fn index_chart_carries_base_year_annotation() {
        let view = FilteredView {
            entity_field: None,
            rows: vec![Observation {
                entity: None,
                period: 2011,
                value: Some(100.0),
            }],
        };
        let spec = build_chart(&view, "Line Chart", &ChartConfig::price_index()).unwrap();
        assert_eq!(spec.series_field, None);
        assert_eq!(
            spec.annotations,
            vec![Annotation::HorizontalLine {
                y: 100.0,
                label: "Base Year (100)".to_string(),
            }]
        );
    }

    #[test]
    fn value_formats() {
        assert_eq!(ValueFormat::DollarsWhole.format(4560.4), "$4,560");
        assert_eq!(ValueFormat::DollarsWhole.format(1_234_567.0), "$1,234,567");
        assert_eq!(ValueFormat::DollarsCents.format(5.468), "$5.47");
        assert_eq!(ValueFormat::IndexPoints.format(112.34), "112.3");
    }

    #[test]
    fn kind_labels_parse_back() {
        for label in ChartKind::LABELS {
            let kind: ChartKind = label.parse().unwrap();
            assert_eq!(kind.label(), label);
        }
    }
}
