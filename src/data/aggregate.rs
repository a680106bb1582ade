use std::collections::BTreeMap;

use super::model::FilteredView;

// ---------------------------------------------------------------------------
// SummaryRow – per-entity descriptive statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics for one entity over a filtered view. Values are
/// kept unrounded; the display layer rounds for currency contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub entity: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n−1 denominator). `None` when the entity
    /// has fewer than two non-missing values, where it is undefined.
    pub stddev: Option<f64>,
}

// Per-entity running accumulator: single pass, no stored samples except the
// sum of squares needed for the sample variance.
#[derive(Debug, Default)]
struct Accumulator {
    n: usize,
    sum: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn push(&mut self, v: f64) {
        if self.n == 0 {
            self.min = v;
            self.max = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self.n += 1;
        self.sum += v;
        self.sum_sq += v * v;
    }

    fn finish(&self, entity: &str) -> SummaryRow {
        let n = self.n as f64;
        let mean = self.sum / n;
        let stddev = if self.n >= 2 {
            let var = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
            // Guard against tiny negative values from floating-point error.
            Some(var.max(0.0).sqrt())
        } else {
            None
        };
        SummaryRow {
            entity: entity.to_string(),
            mean,
            min: self.min,
            max: self.max,
            stddev,
        }
    }
}

/// Compute per-entity statistics over the view's non-missing values.
///
/// One output row per distinct entity that has at least one non-missing
/// value; entities whose observations are all missing are absent from the
/// output entirely. Rows are ordered alphabetically by stored entity name.
pub fn summarize(view: &FilteredView) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for row in &view.rows {
        let (Some(entity), Some(value)) = (&row.entity, row.value) else {
            continue;
        };
        groups.entry(entity.as_str()).or_default().push(value);
    }

    groups
        .iter()
        .map(|(entity, acc)| acc.finish(entity))
        .collect()
}

// ---------------------------------------------------------------------------
// Latest-period slices
// ---------------------------------------------------------------------------

/// (entity, value) pairs at the most recent period in the view, non-missing
/// only, sorted by value descending with entity name ascending as tie-break.
/// The ordering is total and deterministic so repeated calls render the same
/// table.
pub fn latest(view: &FilteredView) -> Vec<(String, f64)> {
    let Some((_, max_period)) = view.period_bounds() else {
        return Vec::new();
    };

    let mut out: Vec<(String, f64)> = view
        .rows
        .iter()
        .filter(|r| r.period == max_period)
        .filter_map(|r| Some((r.entity.clone()?, r.value?)))
        .collect();

    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Value of the single series at the most recent period in the view.
///
/// If the source data carries duplicate rows for the max period, the first
/// one in dataset order wins — a deliberate tie-break on questionable data,
/// never an average. Returns `None` for an empty view or a missing value.
pub fn latest_single(view: &FilteredView) -> Option<f64> {
    let (_, max_period) = view.period_bounds()?;
    view.rows
        .iter()
        .find(|r| r.period == max_period)
        .and_then(|r| r.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    fn obs(entity: &str, period: i32, value: Option<f64>) -> Observation {
        Observation {
            entity: Some(entity.to_string()),
            period,
            value,
        }
    }

    fn view(rows: Vec<Observation>) -> FilteredView {
        FilteredView {
            entity_field: Some("State".to_string()),
            rows,
        }
    }

    #[test]
    fn summarize_two_states() {
        let v = view(vec![
            obs("KENTUCKY", 2020, Some(100.0)),
            obs("KENTUCKY", 2021, Some(200.0)),
            obs("OHIO", 2020, Some(150.0)),
        ]);
        let rows = summarize(&v);
        assert_eq!(rows.len(), 2);

        let ky = &rows[0];
        assert_eq!(ky.entity, "KENTUCKY");
        assert_eq!(ky.mean, 150.0);
        assert_eq!(ky.min, 100.0);
        assert_eq!(ky.max, 200.0);
        let sd = ky.stddev.expect("two samples have a stddev");
        assert!((sd - 70.710678).abs() < 1e-6);

        let oh = &rows[1];
        assert_eq!(oh.entity, "OHIO");
        assert_eq!((oh.mean, oh.min, oh.max), (150.0, 150.0, 150.0));
        assert_eq!(oh.stddev, None, "n=1 stddev is undefined, not zero");
    }

    #[test]
    fn summarize_skips_missing_values() {
        let v = view(vec![
            obs("KENTUCKY", 2020, Some(100.0)),
            obs("KENTUCKY", 2021, None),
            obs("KENTUCKY", 2022, Some(300.0)),
        ]);
        let rows = summarize(&v);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mean, 200.0);
    }

    #[test]
    fn fully_missing_entity_is_omitted() {
        let v = view(vec![
            obs("KENTUCKY", 2020, Some(100.0)),
            obs("OHIO", 2020, None),
            obs("OHIO", 2021, None),
        ]);
        let rows = summarize(&v);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity, "KENTUCKY");
    }

    #[test]
    fn summarize_empty_view_is_empty() {
        let v = view(Vec::new());
        assert!(summarize(&v).is_empty());
    }

    #[test]
    fn latest_sorts_by_value_then_name() {
        let v = view(vec![
            obs("CORN", 2023, Some(4.0)),
            obs("WHEAT", 2024, Some(5.5)),
            obs("CORN", 2024, Some(4.5)),
            obs("SOYBEANS", 2024, Some(4.5)),
        ]);
        let rows = latest(&v);
        assert_eq!(
            rows,
            vec![
                ("WHEAT".to_string(), 5.5),
                ("CORN".to_string(), 4.5),
                ("SOYBEANS".to_string(), 4.5),
            ]
        );
    }

    #[test]
    fn latest_skips_missing_values_at_max_period() {
        let v = view(vec![
            obs("CORN", 2024, None),
            obs("WHEAT", 2024, Some(5.5)),
        ]);
        assert_eq!(latest(&v), vec![("WHEAT".to_string(), 5.5)]);
    }

    #[test]
    fn latest_single_takes_first_duplicate() {
        let v = FilteredView {
            entity_field: None,
            rows: vec![
                Observation {
                    entity: None,
                    period: 2024,
                    value: Some(100.0),
                },
                Observation {
                    entity: None,
                    period: 2024,
                    value: Some(102.0),
                },
            ],
        };
        assert_eq!(latest_single(&v), Some(100.0));
    }

    #[test]
    fn latest_single_empty_view() {
        let v = FilteredView {
            entity_field: None,
            rows: Vec::new(),
        };
        assert_eq!(latest_single(&v), None);
    }
}
