//! Quarterly compliance trend.
//!
//! The per-case score is a fixed proxy: closed cases count as fully
//! compliant, everything else as partially compliant. Dashboards already
//! plot these numbers, so the constants must not drift.

use std::collections::BTreeMap;

use caseboard_core::{Case, CaseStatus, ChartDataPoint, QuarterKey};

use crate::stats::Tally;

pub const CLOSED_SCORE: u64 = 100;
pub const UNRESOLVED_SCORE: u64 = 85;

pub fn compliance_score(status: CaseStatus) -> u64 {
    if status.is_closed() {
        CLOSED_SCORE
    } else {
        UNRESOLVED_SCORE
    }
}

/// Mean compliance score per quarter of case creation, as
/// `{name: "2024 Q1", score}` points sorted by label.
pub fn compliance_trend(cases: &[Case]) -> Vec<ChartDataPoint> {
    // Keyed by label: the chart orders quarters by label text.
    let mut quarterly: BTreeMap<String, Tally> = BTreeMap::new();
    for case in cases {
        quarterly
            .entry(QuarterKey::of(&case.created_at).label())
            .or_default()
            .add(compliance_score(case.status));
    }

    quarterly
        .into_iter()
        .map(|(label, tally)| ChartDataPoint::new(label).with("score", tally.rounded_mean()))
        .collect()
}
