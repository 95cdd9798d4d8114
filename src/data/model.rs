use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// YesNo – boolean-like categorical cell
// ---------------------------------------------------------------------------

/// A `Yes`/`No` flag as written by the data provider.
///
/// Any other cell content is kept as `Unknown`, which never compares equal to
/// `Yes` or `No`, so it is never counted by a rate nor matched by the injury
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
    Unknown,
}

impl YesNo {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Yes" => YesNo::Yes,
            "No" => YesNo::No,
            _ => YesNo::Unknown,
        }
    }

    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }

    pub fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
            YesNo::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ClaimRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single insurance claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// `None` when the source cell could not be parsed as a date.
    pub loss_date: Option<NaiveDate>,
    pub insurer_name: String,
    /// Region code, e.g. `CA`.
    pub insured_state: String,
    pub incident_type: String,
    pub injury_involved: YesNo,
    pub lawsuit_filed: YesNo,
    /// `None` when the source cell was blank.
    pub total_claimed_losses: Option<f64>,
    /// `None` when the source cell was blank.
    pub total_insurance_payment: Option<f64>,
}

impl ClaimRecord {
    /// Claimed amount, blank counted as zero.
    pub fn claimed(&self) -> f64 {
        self.total_claimed_losses.unwrap_or(0.0)
    }

    /// Paid amount, blank counted as zero.
    pub fn paid(&self) -> f64 {
        self.total_insurance_payment.unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable dataset with pre-computed filter options.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ClaimRecord>,
    /// Sorted distinct insurer names.
    pub insurers: BTreeSet<String>,
    /// Sorted distinct state codes.
    pub states: BTreeSet<String>,
    /// Sorted distinct incident types.
    pub incident_types: BTreeSet<String>,
    /// Earliest and latest non-null loss date.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    /// Build option indices from the loaded records.
    pub fn from_records(records: Vec<ClaimRecord>) -> Self {
        let mut insurers = BTreeSet::new();
        let mut states = BTreeSet::new();
        let mut incident_types = BTreeSet::new();
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;

        for rec in &records {
            insurers.insert(rec.insurer_name.clone());
            states.insert(rec.insured_state.clone());
            incident_types.insert(rec.incident_type.clone());
            if let Some(d) = rec.loss_date {
                date_bounds = Some(match date_bounds {
                    Some((lo, hi)) => (lo.min(d), hi.max(d)),
                    None => (d, d),
                });
            }
        }

        Dataset {
            records,
            insurers,
            states,
            incident_types,
            date_bounds,
        }
    }

    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A view over every record, in file order.
    pub fn view(&self) -> ClaimsView<'_> {
        ClaimsView::from_slice(&self.records)
    }

    /// A view over the given row indices. Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> ClaimsView<'_> {
        indices.iter().filter_map(|&i| self.records.get(i)).collect()
    }
}

// ---------------------------------------------------------------------------
// ClaimsView – an ordered subsequence of a dataset
// ---------------------------------------------------------------------------

/// Borrowed, ordered subsequence of a [`Dataset`]. Filtering produces views;
/// the source records are never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimsView<'a> {
    rows: Vec<&'a ClaimRecord>,
}

impl<'a> ClaimsView<'a> {
    pub fn from_slice(records: &'a [ClaimRecord]) -> Self {
        records.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a ClaimRecord> {
        self.rows.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ClaimRecord> + '_ {
        self.rows.iter().copied()
    }

    /// Clone the viewed records into an owned vector.
    pub fn to_records(&self) -> Vec<ClaimRecord> {
        self.rows.iter().map(|r| (*r).clone()).collect()
    }
}

impl<'a> FromIterator<&'a ClaimRecord> for ClaimsView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a ClaimRecord>>(iter: I) -> Self {
        ClaimsView {
            rows: iter.into_iter().collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{claim, date};
    use super::*;

    #[test]
    fn from_records_collects_sorted_options_and_bounds() {
        let mut a = claim("StateFarm", "TX", "Collision");
        a.loss_date = date(2023, 6, 20);
        let mut b = claim("Geico", "CA", "Hit and run");
        b.loss_date = date(2022, 3, 1);
        let mut c = claim("Geico", "CA", "Collision");
        c.loss_date = None;

        let ds = Dataset::from_records(vec![a, b, c]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.insurers.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Geico", "StateFarm"]
        );
        assert_eq!(ds.states.len(), 2);
        assert_eq!(ds.incident_types.len(), 2);
        assert_eq!(
            ds.date_bounds,
            Some((date(2022, 3, 1).unwrap(), date(2023, 6, 20).unwrap()))
        );
    }

    #[test]
    fn all_null_dates_have_no_bounds() {
        let mut a = claim("Geico", "CA", "Collision");
        a.loss_date = None;
        let ds = Dataset::from_records(vec![a]);
        assert_eq!(ds.date_bounds, None);
    }

    #[test]
    fn select_preserves_index_order_and_skips_out_of_range() {
        let ds = Dataset::from_records(vec![
            claim("A", "CA", "x"),
            claim("B", "CA", "x"),
            claim("C", "CA", "x"),
        ]);
        let view = ds.select(&[2, 0, 9]);
        let names: Vec<_> = view.iter().map(|r| r.insurer_name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn yes_no_parsing_is_exact() {
        assert_eq!(YesNo::parse("Yes"), YesNo::Yes);
        assert_eq!(YesNo::parse(" No "), YesNo::No);
        assert_eq!(YesNo::parse("yes"), YesNo::Unknown);
        assert_eq!(YesNo::parse(""), YesNo::Unknown);
    }
}
