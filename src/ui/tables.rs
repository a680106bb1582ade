use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{self, SummaryRow};
use crate::data::chart::ValueFormat;
use crate::data::model::{title_case, FilteredView};

// ---------------------------------------------------------------------------
// Summary statistics table
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 20.0;

/// Per-entity mean/min/max/stddev table. Values are rounded for display
/// here; the summary rows themselves stay unrounded. An undefined stddev
/// (single observation) renders as a dash, never as zero.
pub fn summary_table(
    ui: &mut Ui,
    id: &str,
    entity_label: &str,
    rows: &[SummaryRow],
    format: ValueFormat,
) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(110.0))
            .columns(Column::remainder(), 4)
            .header(ROW_HEIGHT, |mut header| {
                for title in [entity_label, "Average", "Minimum", "Maximum", "Std Dev"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(title_case(&row.entity));
                        });
                        for value in [row.mean, row.min, row.max] {
                            table_row.col(|ui| {
                                ui.label(format.format(value));
                            });
                        }
                        table_row.col(|ui| {
                            match row.stddev {
                                Some(sd) => ui.label(format.format(sd)),
                                None => ui.label("—"),
                            };
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Latest prices table
// ---------------------------------------------------------------------------

/// Entity/value table at the view's most recent year, highest value first.
pub fn latest_table(ui: &mut Ui, id: &str, entity_label: &str, view: &FilteredView) {
    let rows = aggregate::latest(view);
    if rows.is_empty() {
        ui.label("No prices available for the latest year.");
        return;
    }

    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in [entity_label, "Price"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (entity, value) in &rows {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(title_case(entity));
                        });
                        table_row.col(|ui| {
                            ui.label(ValueFormat::DollarsCents.format(*value));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Index metric strip
// ---------------------------------------------------------------------------

/// Four key figures for the price-index page: current level (with delta vs
/// the 2011 = 100 base), average, highest, lowest.
pub fn index_metrics(ui: &mut Ui, view: &FilteredView) {
    let current = aggregate::latest_single(view);

    let mut n = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in view.rows.iter().filter_map(|r| r.value) {
        n += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    if n == 0 {
        ui.label("No index values in the selected window.");
        return;
    }

    let latest_year = view.period_bounds().map(|(_, hi)| hi).unwrap_or_default();
    let fmt = ValueFormat::IndexPoints;

    ui.columns(4, |cols| {
        metric(
            &mut cols[0],
            &format!("Current Index ({latest_year})"),
            current.map(|c| fmt.format(c)).unwrap_or_else(|| "—".to_string()),
            current.map(|c| format!("{:+.1} vs 2011", c - 100.0)),
        );
        metric(&mut cols[1], "Average Index", fmt.format(sum / n as f64), None);
        metric(&mut cols[2], "Highest Index", fmt.format(max), None);
        metric(&mut cols[3], "Lowest Index", fmt.format(min), None);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String, delta: Option<String>) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).small());
        ui.heading(value);
        if let Some(delta) = delta {
            ui.label(RichText::new(delta).small());
        }
    });
}
