use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Observation – one row of a source table
// ---------------------------------------------------------------------------

/// One (entity, period, value) fact.
///
/// * `entity` – categorical label (state or commodity), stored upper-case;
///   `None` for the entity-less price-index series.
/// * `period` – calendar year.
/// * `value`  – normalized measurement; `None` when the source text was
///   unparseable (the row is kept for row-count accounting).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub entity: Option<String>,
    pub period: i32,
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – a complete loaded table
// ---------------------------------------------------------------------------

/// An immutable loaded dataset with pre-computed filter-widget indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Name of the entity column ("State", "Commodity"), `None` for the
    /// single-series index table.
    pub entity_field: Option<String>,
    /// All observations, in source order.
    pub rows: Vec<Observation>,
    /// Sorted set of distinct entity labels.
    pub entities: BTreeSet<String>,
    /// (min, max) period present, `None` for an empty dataset.
    pub period_bounds: Option<(i32, i32)>,
}

impl Dataset {
    /// Build the entity and period indices from the loaded rows.
    pub fn from_rows(entity_field: Option<&str>, rows: Vec<Observation>) -> Self {
        let mut entities = BTreeSet::new();
        let mut period_bounds: Option<(i32, i32)> = None;

        for row in &rows {
            if let Some(e) = &row.entity {
                entities.insert(e.clone());
            }
            period_bounds = Some(match period_bounds {
                Some((lo, hi)) => (lo.min(row.period), hi.max(row.period)),
                None => (row.period, row.period),
            });
        }

        Dataset {
            entity_field: entity_field.map(str::to_string),
            rows,
            entities,
            period_bounds,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the subset of a Dataset satisfying a FilterSpec
// ---------------------------------------------------------------------------

/// An order-preserving subset of a dataset, produced by the filter engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    /// Carried over from the source dataset so downstream consumers (chart
    /// spec builder, tables) know the schema they operate on.
    pub entity_field: Option<String>,
    pub rows: Vec<Observation>,
}

impl FilteredView {
    /// (min, max) period present in the view.
    pub fn period_bounds(&self) -> Option<(i32, i32)> {
        let mut bounds: Option<(i32, i32)> = None;
        for row in &self.rows {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(row.period), hi.max(row.period)),
                None => (row.period, row.period),
            });
        }
        bounds
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Title-case an upper-case entity label for display ("KENTUCKY" → "Kentucky").
/// Stored labels stay upper-case; only the presentation changes.
pub fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(entity: &str, period: i32, value: f64) -> Observation {
        Observation {
            entity: Some(entity.to_string()),
            period,
            value: Some(value),
        }
    }

    #[test]
    fn dataset_indices_from_rows() {
        let ds = Dataset::from_rows(
            Some("State"),
            vec![obs("OHIO", 2020, 1.0), obs("KENTUCKY", 1997, 2.0)],
        );
        assert_eq!(ds.entity_field.as_deref(), Some("State"));
        assert_eq!(ds.period_bounds, Some((1997, 2020)));
        let names: Vec<&str> = ds.entities.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["KENTUCKY", "OHIO"]);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::from_rows(None, Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.period_bounds, None);
        assert!(ds.entities.is_empty());
    }

    #[test]
    fn title_case_multi_word() {
        assert_eq!(title_case("KENTUCKY"), "Kentucky");
        assert_eq!(title_case("NEW MEXICO"), "New Mexico");
        assert_eq!(title_case(""), "");
    }
}
