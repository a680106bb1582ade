use std::collections::BTreeSet;

use super::model::{Dataset, FilteredView, Observation};

// ---------------------------------------------------------------------------
// FilterSpec – the user's selection
// ---------------------------------------------------------------------------

/// A user-selected filter: which entities to keep and the inclusive year
/// range. An empty entity set means "no entity constraint" — required for
/// the entity-less index dataset, where there is nothing to match against.
/// Entity labels are matched against the stored (upper-case) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub entities: BTreeSet<String>,
    pub period_range: (i32, i32),
}

impl FilterSpec {
    /// Spec with no entity constraint over the given year range.
    pub fn years(min: i32, max: i32) -> Self {
        FilterSpec {
            entities: BTreeSet::new(),
            period_range: (min, max),
        }
    }

    fn keeps(&self, row: &Observation) -> bool {
        let (lo, hi) = self.period_range;
        if row.period < lo || row.period > hi {
            return false;
        }
        match &row.entity {
            Some(e) => self.entities.is_empty() || self.entities.contains(e),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterOutcome – tagged result, empty selection is first-class
// ---------------------------------------------------------------------------

/// Result of applying a [`FilterSpec`]. An empty match is not an error; it is
/// its own variant so callers handle the "no data" path explicitly instead of
/// probing row counts downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Rows(FilteredView),
    Empty,
}

impl FilterOutcome {
    pub fn as_view(&self) -> Option<&FilteredView> {
        match self {
            FilterOutcome::Rows(view) => Some(view),
            FilterOutcome::Empty => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Apply a filter spec to a sequence of observations. Pure and
/// order-preserving: the view keeps the input order, and the same input
/// always produces the same outcome. An inverted period range (min > max)
/// matches nothing.
pub fn apply_filter(
    entity_field: Option<&str>,
    rows: &[Observation],
    spec: &FilterSpec,
) -> FilterOutcome {
    let kept: Vec<Observation> = rows.iter().filter(|r| spec.keeps(r)).cloned().collect();
    if kept.is_empty() {
        FilterOutcome::Empty
    } else {
        FilterOutcome::Rows(FilteredView {
            entity_field: entity_field.map(str::to_string),
            rows: kept,
        })
    }
}

impl Dataset {
    /// Constrain this dataset by the given spec.
    pub fn select(&self, spec: &FilterSpec) -> FilterOutcome {
        apply_filter(self.entity_field.as_deref(), &self.rows, spec)
    }
}

impl FilteredView {
    /// Re-apply a spec to an already-filtered view. Filtering with the same
    /// spec twice is a no-op on the second pass.
    pub fn select(&self, spec: &FilterSpec) -> FilterOutcome {
        apply_filter(self.entity_field.as_deref(), &self.rows, spec)
    }
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

    fn sample_dataset() -> Dataset {
        Dataset::from_rows(
            Some("State"),
            vec![
                obs("KENTUCKY", 2020, 100.0),
                obs("KENTUCKY", 2021, 200.0),
                obs("OHIO", 2020, 150.0),
            ],
        )
    }

    fn spec(entities: &[&str], min: i32, max: i32) -> FilterSpec {
        FilterSpec {
            entities: entities.iter().map(|e| e.to_string()).collect(),
            period_range: (min, max),
        }
    }

    #[test]
    fn entity_and_period_predicates() {
        let ds = sample_dataset();

        match ds.select(&spec(&["KENTUCKY", "OHIO"], 2020, 2021)) {
            FilterOutcome::Rows(view) => {
                assert_eq!(view.rows.len(), 3);
                assert_eq!(view.entity_field.as_deref(), Some("State"));
            }
            FilterOutcome::Empty => panic!("expected rows"),
        }

        match ds.select(&spec(&["OHIO"], 2020, 2021)) {
            FilterOutcome::Rows(view) => {
                assert_eq!(view.rows.len(), 1);
                assert_eq!(view.rows[0].entity.as_deref(), Some("OHIO"));
            }
            FilterOutcome::Empty => panic!("expected rows"),
        }
    }

    #[test]
    fn empty_entity_set_means_no_constraint() {
        let ds = sample_dataset();
        match ds.select(&FilterSpec::years(2020, 2020)) {
            FilterOutcome::Rows(view) => assert_eq!(view.rows.len(), 2),
            FilterOutcome::Empty => panic!("expected rows"),
        }
    }

    #[test]
    fn out_of_range_years_yield_empty() {
        let ds = sample_dataset();
        assert_eq!(
            ds.select(&spec(&["KENTUCKY", "OHIO"], 2030, 2031)),
            FilterOutcome::Empty
        );
    }

    #[test]
    fn inverted_range_always_empty() {
        let ds = sample_dataset();
        assert_eq!(
            ds.select(&FilterSpec::years(2021, 2020)),
            FilterOutcome::Empty
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let s = spec(&["KENTUCKY"], 2020, 2021);

        let first = match ds.select(&s) {
            FilterOutcome::Rows(view) => view,
            FilterOutcome::Empty => panic!("expected rows"),
        };
        let second = match first.select(&s) {
            FilterOutcome::Rows(view) => view,
            FilterOutcome::Empty => panic!("expected rows"),
        };
        assert_eq!(first, second);
    }

    #[test]
    fn input_order_is_preserved() {
        let ds = sample_dataset();
        match ds.select(&spec(&["KENTUCKY", "OHIO"], 2020, 2021)) {
            FilterOutcome::Rows(view) => {
                let periods: Vec<i32> = view.rows.iter().map(|r| r.period).collect();
                assert_eq!(periods, vec![2020, 2021, 2020]);
            }
            FilterOutcome::Empty => panic!("expected rows"),
        }
    }

    #[test]
    fn entity_less_rows_pass_entity_predicate() {
        let ds = Dataset::from_rows(
            None,
            vec![Observation {
                entity: None,
                period: 2011,
                value: Some(100.0),
            }],
        );
        match ds.select(&FilterSpec::years(1990, 2025)) {
            FilterOutcome::Rows(view) => assert_eq!(view.rows.len(), 1),
            FilterOutcome::Empty => panic!("expected rows"),
        }
    }
}
