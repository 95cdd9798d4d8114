use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{ClaimRecord, ClaimsView, Dataset, YesNo};

// ---------------------------------------------------------------------------
// Selection types
// ---------------------------------------------------------------------------

/// Tri-state injury selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryFilter {
    #[default]
    All,
    Yes,
    No,
}

impl InjuryFilter {
    pub const OPTIONS: [InjuryFilter; 3] = [InjuryFilter::All, InjuryFilter::Yes, InjuryFilter::No];

    pub fn label(self) -> &'static str {
        match self {
            InjuryFilter::All => "All",
            InjuryFilter::Yes => "Yes",
            InjuryFilter::No => "No",
        }
    }

    fn matches(self, value: YesNo) -> bool {
        match self {
            InjuryFilter::All => true,
            InjuryFilter::Yes => value == YesNo::Yes,
            InjuryFilter::No => value == YesNo::No,
        }
    }
}

/// What a supplied-but-empty categorical selection means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Nothing selected → nothing passes.
    #[default]
    ExcludeAll,
    /// Nothing selected → the dimension is not constrained.
    Unconstrained,
}

/// Per-render predicate bundle.
///
/// A `None` field is "not supplied" and constrains nothing. A supplied set is a
/// membership test; what an empty set means is decided by `empty_selection`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Inclusive `[start, end]`.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub insurers: Option<BTreeSet<String>>,
    pub states: Option<BTreeSet<String>>,
    pub incident_types: Option<BTreeSet<String>>,
    pub injury: InjuryFilter,
    pub empty_selection: EmptySelectionPolicy,
}

impl FilterSelection {
    /// Initialise a selection the way the sidebar widgets start out: the full
    /// date bounds and every distinct category ticked.
    ///
    /// Records with a null loss date fall outside any date range, so they are
    /// hidden by this selection whenever the dataset has date bounds. When no
    /// date parsed at all the range stays `None` and every row shows.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        FilterSelection {
            date_range: dataset.date_bounds,
            insurers: Some(dataset.insurers.clone()),
            states: Some(dataset.states.clone()),
            incident_types: Some(dataset.incident_types.clone()),
            injury: InjuryFilter::All,
            empty_selection: EmptySelectionPolicy::default(),
        }
    }

    pub fn with_empty_selection(mut self, policy: EmptySelectionPolicy) -> Self {
        self.empty_selection = policy;
        self
    }

    /// Whether a single record satisfies every active predicate.
    pub fn matches(&self, record: &ClaimRecord) -> bool {
        if let Some((start, end)) = self.date_range {
            match record.loss_date {
                Some(d) if start <= d && d <= end => {}
                _ => return false,
            }
        }
        self.member(&self.insurers, &record.insurer_name)
            && self.member(&self.states, &record.insured_state)
            && self.member(&self.incident_types, &record.incident_type)
            && self.injury.matches(record.injury_involved)
    }

    fn member(&self, selected: &Option<BTreeSet<String>>, value: &str) -> bool {
        match selected {
            None => true,
            Some(set) if set.is_empty() => {
                self.empty_selection == EmptySelectionPolicy::Unconstrained
            }
            Some(set) => set.contains(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the records of `dataset` that pass `selection`, in file order.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> ClaimsView<'a> {
    dataset
        .records()
        .iter()
        .filter(|rec| selection.matches(rec))
        .collect()
}

/// Same as [`apply`] but yields row indices, for callers that cache the
/// result across frames.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect();
    log::debug!("filter kept {} of {} claims", indices.len(), dataset.len());
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{claim, date};

    fn two_claims() -> Dataset {
        let mut a = claim("Geico", "CA", "Collision");
        a.loss_date = date(2023, 1, 15);
        a.injury_involved = YesNo::Yes;
        let mut b = claim("StateFarm", "TX", "Hit and run");
        b.loss_date = date(2023, 6, 20);
        b.injury_involved = YesNo::No;
        Dataset::from_records(vec![a, b])
    }

    fn set(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    fn full_year_selection() -> FilterSelection {
        FilterSelection {
            date_range: Some((date(2023, 1, 1).unwrap(), date(2023, 12, 31).unwrap())),
            insurers: set(&["Geico", "StateFarm"]),
            states: set(&["CA", "TX"]),
            incident_types: set(&["Collision", "Hit and run"]),
            ..Default::default()
        }
    }

    #[test]
    fn default_selection_keeps_everything_in_order() {
        let ds = two_claims();
        let view = apply(&ds, &FilterSelection::default());
        assert_eq!(view, ds.view());
    }

    #[test]
    fn full_selection_keeps_both_rows() {
        let ds = two_claims();
        assert_eq!(apply(&ds, &full_year_selection()).len(), 2);
    }

    #[test]
    fn insurer_selection_keeps_only_selected() {
        let ds = two_claims();
        let sel = FilterSelection {
            insurers: set(&["Geico"]),
            ..full_year_selection()
        };
        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap().insurer_name, "Geico");
    }

    #[test]
    fn injury_selection_keeps_only_matching() {
        let ds = two_claims();
        let sel = FilterSelection {
            injury: InjuryFilter::Yes,
            ..full_year_selection()
        };
        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap().injury_involved, YesNo::Yes);
    }

    #[test]
    fn unknown_injury_value_matches_neither_yes_nor_no() {
        let mut rec = claim("Geico", "CA", "Collision");
        rec.injury_involved = YesNo::Unknown;
        let ds = Dataset::from_records(vec![rec]);
        for injury in [InjuryFilter::Yes, InjuryFilter::No] {
            let sel = FilterSelection {
                injury,
                ..Default::default()
            };
            assert!(apply(&ds, &sel).is_empty());
        }
    }

    #[test]
    fn empty_categorical_set_excludes_all_by_default() {
        let ds = two_claims();
        for sel in [
            FilterSelection { insurers: set(&[]), ..Default::default() },
            FilterSelection { states: set(&[]), ..Default::default() },
            FilterSelection { incident_types: set(&[]), ..Default::default() },
        ] {
            assert!(apply(&ds, &sel).is_empty());
        }
    }

    #[test]
    fn empty_categorical_set_is_ignored_when_unconstrained() {
        let ds = two_claims();
        let sel = FilterSelection {
            insurers: set(&[]),
            states: set(&["TX"]),
            ..Default::default()
        }
        .with_empty_selection(EmptySelectionPolicy::Unconstrained);
        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap().insured_state, "TX");
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let ds = two_claims();
        let sel = FilterSelection {
            date_range: Some((date(2023, 1, 15).unwrap(), date(2023, 6, 20).unwrap())),
            ..Default::default()
        };
        assert_eq!(apply(&ds, &sel).len(), 2);

        let sel = FilterSelection {
            date_range: Some((date(2023, 1, 16).unwrap(), date(2023, 6, 19).unwrap())),
            ..Default::default()
        };
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn reversed_date_range_yields_nothing() {
        let ds = two_claims();
        let sel = FilterSelection {
            date_range: Some((date(2023, 12, 31).unwrap(), date(2023, 1, 1).unwrap())),
            ..Default::default()
        };
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn null_dates_pass_only_without_date_predicate() {
        let mut rec = claim("Geico", "CA", "Collision");
        rec.loss_date = None;
        let ds = Dataset::from_records(vec![rec]);
        assert_eq!(apply(&ds, &FilterSelection::default()).len(), 1);
        let sel = FilterSelection {
            date_range: Some((date(1900, 1, 1).unwrap(), date(2100, 1, 1).unwrap())),
            ..Default::default()
        };
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn empty_dataset_yields_empty_view() {
        let ds = Dataset::default();
        assert!(apply(&ds, &full_year_selection()).is_empty());
        assert!(filtered_indices(&ds, &FilterSelection::default()).is_empty());
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let ds = two_claims();
        let sel = FilterSelection {
            states: set(&["TX"]),
            ..full_year_selection()
        };
        let once = Dataset::from_records(apply(&ds, &sel).to_records());
        let twice = apply(&once, &sel);
        assert_eq!(twice, once.view());
    }

    #[test]
    fn from_dataset_matches_every_dated_record() {
        let ds = two_claims();
        let sel = FilterSelection::from_dataset(&ds);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1]);
    }

    #[test]
    fn from_dataset_without_any_date_leaves_range_open() {
        let mut a = claim("Geico", "CA", "Collision");
        a.loss_date = None;
        let mut b = claim("StateFarm", "TX", "Theft");
        b.loss_date = None;
        let ds = Dataset::from_records(vec![a, b]);

        let sel = FilterSelection::from_dataset(&ds);
        assert_eq!(sel.date_range, None);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1]);
    }
}
