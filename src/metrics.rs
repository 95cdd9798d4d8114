//! Scalar KPIs over a filtered view. Every function is total: empty input and
//! zero denominators yield `0` rather than `NaN`.

use serde::Serialize;

use crate::data::model::ClaimsView;

/// Number of claims.
pub fn total_claims(view: &ClaimsView<'_>) -> usize {
    view.len()
}

/// Sum of claimed losses.
pub fn total_claimed_losses(view: &ClaimsView<'_>) -> f64 {
    view.iter().map(|r| r.claimed()).sum()
}

/// Sum of insurance payments.
pub fn total_payments(view: &ClaimsView<'_>) -> f64 {
    view.iter().map(|r| r.paid()).sum()
}

/// Mean claimed loss over the claims whose amount is present.
pub fn average_claim(view: &ClaimsView<'_>) -> f64 {
    let (sum, n) = view
        .iter()
        .filter_map(|r| r.total_claimed_losses)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    sum / n as f64
}

/// Percentage of claims that involved an injury.
pub fn injury_rate(view: &ClaimsView<'_>) -> f64 {
    percent_of(view, view.iter().filter(|r| r.injury_involved.is_yes()).count())
}

/// Percentage of claims with a lawsuit filed.
pub fn lawsuit_rate(view: &ClaimsView<'_>) -> f64 {
    percent_of(view, view.iter().filter(|r| r.lawsuit_filed.is_yes()).count())
}

/// Payments as a percentage of claimed losses (loss ratio).
pub fn payment_ratio(view: &ClaimsView<'_>) -> f64 {
    let claimed = total_claimed_losses(view);
    if claimed == 0.0 {
        return 0.0;
    }
    total_payments(view) / claimed * 100.0
}

fn percent_of(view: &ClaimsView<'_>, hits: usize) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    hits as f64 / view.len() as f64 * 100.0
}

// ---------------------------------------------------------------------------
// ClaimMetrics – all KPIs for one render pass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClaimMetrics {
    pub total_claims: usize,
    pub total_claimed_losses: f64,
    pub total_payments: f64,
    pub average_claim: f64,
    pub injury_rate: f64,
    pub lawsuit_rate: f64,
    pub payment_ratio: f64,
}

impl ClaimMetrics {
    pub fn compute(view: &ClaimsView<'_>) -> Self {
        ClaimMetrics {
            total_claims: total_claims(view),
            total_claimed_losses: total_claimed_losses(view),
            total_payments: total_payments(view),
            average_claim: average_claim(view),
            injury_rate: injury_rate(view),
            lawsuit_rate: lawsuit_rate(view),
            payment_ratio: payment_ratio(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::claim;
    use crate::data::model::{ClaimRecord, YesNo};

    fn with_injuries(flags: &[YesNo]) -> Vec<ClaimRecord> {
        flags
            .iter()
            .map(|&f| {
                let mut r = claim("Geico", "CA", "Collision");
                r.injury_involved = f;
                r
            })
            .collect()
    }

    fn with_amounts(amounts: &[(f64, f64)]) -> Vec<ClaimRecord> {
        amounts
            .iter()
            .map(|&(claimed, paid)| {
                let mut r = claim("Geico", "CA", "Collision");
                r.total_claimed_losses = Some(claimed);
                r.total_insurance_payment = Some(paid);
                r
            })
            .collect()
    }

    #[test]
    fn empty_view_is_all_zero() {
        let view = ClaimsView::default();
        assert_eq!(ClaimMetrics::compute(&view), ClaimMetrics::default());
        assert_eq!(average_claim(&view), 0.0);
        assert_eq!(injury_rate(&view), 0.0);
        assert_eq!(lawsuit_rate(&view), 0.0);
    }

    #[test]
    fn injury_rate_half() {
        let rows = with_injuries(&[YesNo::Yes, YesNo::Yes, YesNo::No, YesNo::No]);
        assert_eq!(injury_rate(&ClaimsView::from_slice(&rows)), 50.0);
    }

    #[test]
    fn injury_rate_extremes() {
        let all = with_injuries(&[YesNo::Yes; 3]);
        let none = with_injuries(&[YesNo::No; 3]);
        assert_eq!(injury_rate(&ClaimsView::from_slice(&all)), 100.0);
        assert_eq!(injury_rate(&ClaimsView::from_slice(&none)), 0.0);
    }

    #[test]
    fn lawsuit_rate_quarter() {
        let rows: Vec<_> = [YesNo::Yes, YesNo::No, YesNo::No, YesNo::No]
            .iter()
            .map(|&f| {
                let mut r = claim("Geico", "CA", "Collision");
                r.lawsuit_filed = f;
                r
            })
            .collect();
        assert_eq!(lawsuit_rate(&ClaimsView::from_slice(&rows)), 25.0);
    }

    #[test]
    fn sums_mean_and_ratio() {
        let rows = with_amounts(&[(1000.0, 500.0), (3000.0, 1500.0)]);
        let m = ClaimMetrics::compute(&ClaimsView::from_slice(&rows));
        assert_eq!(m.total_claims, 2);
        assert_eq!(m.total_claimed_losses, 4000.0);
        assert_eq!(m.total_payments, 2000.0);
        assert_eq!(m.average_claim, 2000.0);
        assert_eq!(m.payment_ratio, 50.0);
    }

    #[test]
    fn blank_claimed_amounts_stay_out_of_the_average() {
        let mut rows = with_amounts(&[(100.0, 50.0), (0.0, 0.0)]);
        rows[1].total_claimed_losses = None;
        rows[1].total_insurance_payment = None;
        let m = ClaimMetrics::compute(&ClaimsView::from_slice(&rows));
        assert_eq!(m.total_claims, 2);
        assert_eq!(m.total_claimed_losses, 100.0);
        assert_eq!(m.average_claim, 100.0);
        assert_eq!(m.payment_ratio, 50.0);
    }

    #[test]
    fn average_is_zero_when_every_amount_is_blank() {
        let mut rows = with_amounts(&[(0.0, 0.0)]);
        rows[0].total_claimed_losses = None;
        assert_eq!(average_claim(&ClaimsView::from_slice(&rows)), 0.0);
    }

    #[test]
    fn payment_ratio_zero_when_nothing_claimed() {
        let rows = with_amounts(&[(0.0, 250.0), (0.0, 0.0)]);
        assert_eq!(payment_ratio(&ClaimsView::from_slice(&rows)), 0.0);
    }
}
