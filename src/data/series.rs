use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use super::model::{ClaimRecord, ClaimsView};

// ---------------------------------------------------------------------------
// Chart series: explicit group → accumulate → sort
// ---------------------------------------------------------------------------

/// One bar / slice / point: a category label and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBucket {
    pub label: String,
    pub count: usize,
}

/// Claimed vs paid totals for one insurer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentBucket {
    pub insurer: String,
    pub claimed: f64,
    pub paid: f64,
}

/// Group by `key` into a name-ordered count table.
fn count_by<F>(view: &ClaimsView<'_>, key: F) -> BTreeMap<String, usize>
where
    F: Fn(&ClaimRecord) -> Option<String>,
{
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for rec in view.iter() {
        if let Some(k) = key(rec) {
            *groups.entry(k).or_default() += 1;
        }
    }
    groups
}

fn into_buckets(groups: BTreeMap<String, usize>) -> Vec<CountBucket> {
    groups
        .into_iter()
        .map(|(label, count)| CountBucket { label, count })
        .collect()
}

/// Claims per insurer, smallest first (horizontal bar order). Ties keep name order.
pub fn claims_by_insurer(view: &ClaimsView<'_>) -> Vec<CountBucket> {
    let mut buckets = into_buckets(count_by(view, |r| Some(r.insurer_name.clone())));
    buckets.sort_by_key(|b| b.count);
    buckets
}

/// Claims per incident type, by name.
pub fn claims_by_incident_type(view: &ClaimsView<'_>) -> Vec<CountBucket> {
    into_buckets(count_by(view, |r| Some(r.incident_type.clone())))
}

/// Claims per `YYYY-MM` of the loss date, oldest first. Undated claims are skipped.
pub fn monthly_trend(view: &ClaimsView<'_>) -> Vec<CountBucket> {
    into_buckets(count_by(view, |r| {
        r.loss_date
            .map(|d| format!("{:04}-{:02}", d.year(), d.month()))
    }))
}

/// The `n` states with the most claims, largest first. Ties keep name order.
pub fn top_states(view: &ClaimsView<'_>, n: usize) -> Vec<CountBucket> {
    let mut buckets = into_buckets(count_by(view, |r| Some(r.insured_state.clone())));
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets.truncate(n);
    buckets
}

/// Claims per injury flag, by label.
pub fn injury_breakdown(view: &ClaimsView<'_>) -> Vec<CountBucket> {
    into_buckets(count_by(view, |r| Some(r.injury_involved.label().to_string())))
}

/// Claimed and paid sums per insurer, by name.
pub fn payments_by_insurer(view: &ClaimsView<'_>) -> Vec<PaymentBucket> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for rec in view.iter() {
        let acc = groups.entry(rec.insurer_name.as_str()).or_default();
        acc.0 += rec.claimed();
        acc.1 += rec.paid();
    }
    groups
        .into_iter()
        .map(|(insurer, (claimed, paid))| PaymentBucket {
            insurer: insurer.to_string(),
            claimed,
            paid,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{claim, date};
    use crate::data::model::{Dataset, YesNo};

    fn labels(buckets: &[CountBucket]) -> Vec<(&str, usize)> {
        buckets.iter().map(|b| (b.label.as_str(), b.count)).collect()
    }

    fn sample() -> Dataset {
        let mut rows = vec![
            claim("Geico", "CA", "Collision"),
            claim("Geico", "TX", "Collision"),
            claim("Allstate", "TX", "Theft"),
            claim("StateFarm", "NY", "Collision"),
            claim("StateFarm", "TX", "Hail"),
            claim("Geico", "NY", "Theft"),
        ];
        rows[0].loss_date = date(2023, 2, 3);
        rows[1].loss_date = date(2023, 2, 28);
        rows[2].loss_date = date(2022, 12, 31);
        rows[3].loss_date = None;
        rows[4].injury_involved = YesNo::Yes;
        rows[0].total_claimed_losses = Some(100.0);
        rows[0].total_insurance_payment = Some(40.0);
        rows[5].total_claimed_losses = Some(50.0);
        rows[5].total_insurance_payment = Some(10.0);
        Dataset::from_records(rows)
    }

    #[test]
    fn insurers_ascending_by_count() {
        let ds = sample();
        assert_eq!(
            labels(&claims_by_insurer(&ds.view())),
            vec![("Allstate", 1), ("StateFarm", 2), ("Geico", 3)]
        );
    }

    #[test]
    fn incident_types_by_name() {
        let ds = sample();
        assert_eq!(
            labels(&claims_by_incident_type(&ds.view())),
            vec![("Collision", 3), ("Hail", 1), ("Theft", 2)]
        );
    }

    #[test]
    fn monthly_trend_skips_undated_and_sorts_by_month() {
        let ds = sample();
        // Four rows keep the fixture default of 2023-01-15.
        assert_eq!(
            labels(&monthly_trend(&ds.view())),
            vec![("2022-12", 1), ("2023-01", 2), ("2023-02", 2)]
        );
    }

    #[test]
    fn top_states_descending_then_truncated() {
        let ds = sample();
        assert_eq!(
            labels(&top_states(&ds.view(), 2)),
            vec![("TX", 3), ("NY", 2)]
        );
        assert_eq!(top_states(&ds.view(), 10).len(), 3);
    }

    #[test]
    fn injury_breakdown_counts_labels() {
        let ds = sample();
        assert_eq!(
            labels(&injury_breakdown(&ds.view())),
            vec![("No", 5), ("Yes", 1)]
        );
    }

    #[test]
    fn payments_grouped_per_insurer() {
        let ds = sample();
        let payments = payments_by_insurer(&ds.view());
        assert_eq!(payments.len(), 3);
        let geico = payments.iter().find(|p| p.insurer == "Geico").unwrap();
        assert_eq!(geico.claimed, 150.0);
        assert_eq!(geico.paid, 50.0);
    }

    #[test]
    fn empty_view_has_empty_series() {
        let view = ClaimsView::default();
        assert!(claims_by_insurer(&view).is_empty());
        assert!(monthly_trend(&view).is_empty());
        assert!(payments_by_insurer(&view).is_empty());
    }

    #[test]
    fn tied_counts_keep_name_order() {
        let ds = Dataset::from_records(vec![
            claim("Zed", "TX", "Theft"),
            claim("Abe", "CA", "Theft"),
        ]);
        assert_eq!(
            labels(&claims_by_insurer(&ds.view())),
            vec![("Abe", 1), ("Zed", 1)]
        );
        assert_eq!(
            labels(&top_states(&ds.view(), 10)),
            vec![("CA", 1), ("TX", 1)]
        );
        assert_eq!(labels(&top_states(&ds.view(), 1)), vec![("CA", 1)]);
    }
}
