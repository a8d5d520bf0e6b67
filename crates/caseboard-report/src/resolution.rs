//! Case resolution time: how long closed cases took, overall and per month.

use std::collections::BTreeMap;

use caseboard_core::{Case, ChartDataPoint, MonthKey};

use crate::stats::Tally;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed between creation and last modification.
///
/// Floor of the elapsed duration, so partial days never count. A case
/// modified before it was created contributes 0.
pub fn resolution_days(case: &Case) -> u64 {
    let elapsed = case.last_modified - case.created_at;
    elapsed.num_seconds().div_euclid(SECONDS_PER_DAY).max(0) as u64
}

/// Mean resolution days over CLOSED cases, rounded; 0 if none are closed.
pub fn avg_case_resolution_days(cases: &[Case]) -> u64 {
    let mut tally = Tally::default();
    for case in cases.iter().filter(|c| c.status.is_closed()) {
        tally.add(resolution_days(case));
    }
    tally.rounded_mean()
}

/// Mean resolution days of CLOSED cases, bucketed by the month they were
/// last modified in.
///
/// Points are `{name: "Jan 24", days}` in calendar order. Months without a
/// closed case are absent.
pub fn case_resolution_series(cases: &[Case]) -> Vec<ChartDataPoint> {
    let mut monthly: BTreeMap<MonthKey, Tally> = BTreeMap::new();
    for case in cases.iter().filter(|c| c.status.is_closed()) {
        monthly
            .entry(MonthKey::of(&case.last_modified))
            .or_default()
            .add(resolution_days(case));
    }

    monthly
        .into_iter()
        .map(|(month, tally)| ChartDataPoint::new(month.label()).with("days", tally.rounded_mean()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseboard_core::CaseStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn case(status: CaseStatus, created: DateTime<Utc>, modified: DateTime<Utc>) -> Case {
        Case {
            id: "c".into(),
            title: "Case".into(),
            description: String::new(),
            status,
            assigned_to: String::new(),
            documents: vec![],
            logs: vec![],
            created_at: created,
            last_modified: modified,
        }
    }

    #[test]
    fn partial_days_are_truncated() {
        let c = case(CaseStatus::Closed, ts(2024, 1, 1, 18), ts(2024, 1, 3, 12));
        // 1 day 18 hours
        assert_eq!(resolution_days(&c), 1);
    }

    #[test]
    fn modified_before_created_counts_as_zero() {
        let c = case(CaseStatus::Closed, ts(2024, 1, 5, 0), ts(2024, 1, 1, 0));
        assert_eq!(resolution_days(&c), 0);
    }

    #[test]
    fn average_zero_without_closed_cases() {
        assert_eq!(avg_case_resolution_days(&[]), 0);
        let cases = vec![
            case(CaseStatus::Open, ts(2024, 1, 1, 0), ts(2024, 1, 11, 0)),
            case(CaseStatus::Archived, ts(2024, 1, 1, 0), ts(2024, 2, 1, 0)),
        ];
        assert_eq!(avg_case_resolution_days(&cases), 0);
    }

    #[test]
    fn average_over_closed_only() {
        let cases = vec![
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 1, 3, 0)), // 2
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 1, 4, 0)), // 3
            case(CaseStatus::Open, ts(2024, 1, 1, 0), ts(2024, 3, 1, 0)),
        ];
        // 2.5 rounds up
        assert_eq!(avg_case_resolution_days(&cases), 3);
    }

    #[test]
    fn series_sorted_by_calendar_month() {
        let cases = vec![
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 2, 10, 0)), // 40, Feb 24
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 1, 11, 0)), // 10, Jan 24
            case(CaseStatus::Closed, ts(2023, 12, 1, 0), ts(2023, 12, 5, 0)), // 4, Dec 23
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 1, 21, 0)), // 20, Jan 24
        ];
        let series = case_resolution_series(&cases);
        let names: Vec<&str> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Dec 23", "Jan 24", "Feb 24"]);
        assert_eq!(series[0].get("days"), Some(4));
        assert_eq!(series[1].get("days"), Some(15));
        assert_eq!(series[2].get("days"), Some(40));
    }

    #[test]
    fn series_skips_open_cases_and_empty_months() {
        let cases = vec![
            case(CaseStatus::Open, ts(2024, 1, 1, 0), ts(2024, 3, 1, 0)),
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 5, 1, 0)),
        ];
        let series = case_resolution_series(&cases);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "May 24");
        assert!(case_resolution_series(&[]).is_empty());
    }

    #[test]
    fn series_is_idempotent() {
        let cases = vec![
            case(CaseStatus::Closed, ts(2024, 1, 1, 0), ts(2024, 2, 10, 0)),
            case(CaseStatus::Closed, ts(2023, 12, 1, 0), ts(2023, 12, 5, 0)),
        ];
        assert_eq!(case_resolution_series(&cases), case_resolution_series(&cases));
        assert_eq!(
            avg_case_resolution_days(&cases),
            avg_case_resolution_days(&cases)
        );
    }
}
