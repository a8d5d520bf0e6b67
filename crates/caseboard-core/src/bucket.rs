//! Calendar bucket keys for grouping cases by quarter and month.
//!
//! Keys order chronologically (year-major, then quarter or month), so they
//! can key a `BTreeMap` directly. Rendering to a display label happens only
//! after grouping and sorting, because labels such as `"Dec 23"` and
//! `"Jan 24"` do not sort correctly as strings.
//!
//! All keys are taken in UTC.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar quarter, e.g. 2024 Q1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterKey {
    pub year: i32,
    /// 1..=4
    pub quarter: u32,
}

impl QuarterKey {
    pub fn of(ts: &DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            quarter: ts.month0() / 3 + 1,
        }
    }

    /// `"2024 Q1"`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Q{}", self.year, self.quarter)
    }
}

/// A calendar month, e.g. January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    pub fn of(ts: &DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// Sortable token: `"2024-01"`.
    pub fn token(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Chart label: `"Jan 24"`.
    pub fn label(&self) -> String {
        let abbr = MONTH_ABBREVIATIONS[(self.month as usize + 11) % 12];
        format!("{} {:02}", abbr, self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(QuarterKey::of(&at(2024, 1, 1)).quarter, 1);
        assert_eq!(QuarterKey::of(&at(2024, 3, 31)).quarter, 1);
        assert_eq!(QuarterKey::of(&at(2024, 4, 1)).quarter, 2);
        assert_eq!(QuarterKey::of(&at(2024, 9, 30)).quarter, 3);
        assert_eq!(QuarterKey::of(&at(2024, 12, 31)).quarter, 4);
    }

    #[test]
    fn quarter_label() {
        assert_eq!(QuarterKey::of(&at(2024, 2, 10)).label(), "2024 Q1");
        assert_eq!(QuarterKey::of(&at(2023, 11, 10)).label(), "2023 Q4");
    }

    #[test]
    fn quarter_key_uses_utc() {
        let late = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        assert_eq!(QuarterKey::of(&late).label(), "2024 Q1");
    }

    #[test]
    fn month_token_and_label() {
        let key = MonthKey::of(&at(2024, 1, 15));
        assert_eq!(key.token(), "2024-01");
        assert_eq!(key.label(), "Jan 24");
        assert_eq!(MonthKey::of(&at(2009, 12, 1)).label(), "Dec 09");
    }

    #[test]
    fn month_keys_sort_chronologically() {
        let dec = MonthKey::of(&at(2023, 12, 5));
        let jan = MonthKey::of(&at(2024, 1, 5));
        let feb = MonthKey::of(&at(2024, 2, 5));
        assert!(dec < jan);
        assert!(jan < feb);
        // "Feb 24" < "Jan 24" as strings.
        assert!(jan.label() > feb.label());
    }
}
