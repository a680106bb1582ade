use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::chart::{Annotation, ChartKind, ChartSpec};
use crate::data::model::{title_case, FilteredView};

// ---------------------------------------------------------------------------
// ChartSpec renderer (central panel)
// ---------------------------------------------------------------------------

/// Render a chart described by a [`ChartSpec`] over a filtered view.
///
/// This is a pure consumer of the spec: series grouping, axis labels, value
/// formatting, and annotations all come from the spec and the view; nothing
/// is decided here.
pub fn chart(ui: &mut Ui, id: &str, spec: &ChartSpec, view: &FilteredView, colors: &ColorMap) {
    ui.strong(&spec.title);

    // Group rows into per-entity series, preserving row order within each
    // series. A view without an entity dimension is a single unnamed series.
    let mut series: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for row in &view.rows {
        let Some(value) = row.value else {
            continue; // missing values are simply not plotted
        };
        let key = row.entity.clone().unwrap_or_default();
        series
            .entry(key)
            .or_default()
            .push([row.period as f64, value]);
    }

    let y_format = spec.y_format;
    let mut plot = Plot::new(id.to_string())
        .height(360.0)
        .x_axis_label(&spec.x_field)
        .y_axis_label(&spec.y_axis_label)
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .y_axis_formatter(move |mark, _range| y_format.format(mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    // Reference annotations surface their label through the legend too.
    if spec.series_field.is_some() || !spec.annotations.is_empty() {
        plot = plot.legend(Legend::default());
    }

    let n_series = series.len().max(1);

    plot.show(ui, |plot_ui| {
        for (series_idx, (entity, points)) in series.iter().enumerate() {
            let color = if spec.series_field.is_some() {
                colors.color_for(entity)
            } else {
                Color32::LIGHT_BLUE
            };
            let name = title_case(entity);

            match spec.kind {
                ChartKind::Line => {
                    let line = Line::new(PlotPoints::from(points.clone()))
                        .name(&name)
                        .color(color)
                        .width(1.5);
                    plot_ui.line(line);
                }
                ChartKind::Area => {
                    let line = Line::new(PlotPoints::from(points.clone()))
                        .name(&name)
                        .color(color)
                        .width(1.5)
                        .fill(0.0);
                    plot_ui.line(line);
                }
                ChartKind::Bar => {
                    // Side-by-side bars: split the year slot across series.
                    let slot = 0.8 / n_series as f64;
                    let offset = (series_idx as f64 + 0.5) * slot - 0.4;
                    let bars: Vec<Bar> = points
                        .iter()
                        .map(|&[x, y]| Bar::new(x + offset, y).width(slot * 0.9))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&name).color(color));
                }
            }
        }

        for annotation in &spec.annotations {
            match annotation {
                Annotation::HorizontalLine { y, label } => {
                    plot_ui.hline(
                        HLine::new(*y)
                            .name(label)
                            .style(LineStyle::dashed_loose())
                            .width(1.0),
                    );
                }
            }
        }
    });
}
