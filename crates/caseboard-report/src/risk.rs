//! Risk reporting: flagged-case count and title-based risk categories.

use std::fmt;

use caseboard_core::{Case, ChartDataPoint};

/// Risk category assigned from a case title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    Aml,
    Gdpr,
    Kyc,
    Fraud,
    Other,
}

impl RiskCategory {
    /// Every category, in chart order.
    pub const ALL: [RiskCategory; 5] = [
        Self::Aml,
        Self::Gdpr,
        Self::Kyc,
        Self::Fraud,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aml => "AML",
            Self::Gdpr => "GDPR",
            Self::Kyc => "KYC",
            Self::Fraud => "Fraud",
            Self::Other => "Other",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Aml => 0,
            Self::Gdpr => 1,
            Self::Kyc => 2,
            Self::Fraud => 3,
            Self::Other => 4,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification rules, checked in order against the lower-cased title.
/// The first keyword contained anywhere in the title wins.
const RULES: &[(&str, RiskCategory)] = &[
    ("aml", RiskCategory::Aml),
    ("gdpr", RiskCategory::Gdpr),
    ("kyc", RiskCategory::Kyc),
    ("fraud", RiskCategory::Fraud),
];

/// Classify a case title. Substring match, so `"GDPRcompliance"` is GDPR.
pub fn classify_title(title: &str) -> RiskCategory {
    let title = title.to_lowercase();
    RULES
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|&(_, category)| category)
        .unwrap_or(RiskCategory::Other)
}

/// Number of cases not CLOSED. ARCHIVED cases count as flagged.
pub fn risks_flagged(cases: &[Case]) -> u64 {
    cases.iter().filter(|c| !c.status.is_closed()).count() as u64
}

/// Case count per risk category as `{name, value}` points, in fixed
/// category order, omitting categories with no cases.
pub fn risk_distribution(cases: &[Case]) -> Vec<ChartDataPoint> {
    let mut counts = [0u64; RiskCategory::ALL.len()];
    for case in cases {
        counts[classify_title(&case.title).index()] += 1;
    }

    RiskCategory::ALL
        .iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(category, count)| ChartDataPoint::new(category.as_str()).with("value", count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseboard_core::CaseStatus;
    use chrono::{TimeZone, Utc};

    fn case(title: &str, status: CaseStatus) -> Case {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Case {
            id: title.to_lowercase(),
            title: title.into(),
            description: String::new(),
            status,
            assigned_to: String::new(),
            documents: vec![],
            logs: vec![],
            created_at: ts,
            last_modified: ts,
        }
    }

    fn titled(titles: &[&str]) -> Vec<Case> {
        titles.iter().map(|t| case(t, CaseStatus::Open)).collect()
    }

    #[test]
    fn classify_case_insensitive_substring() {
        assert_eq!(classify_title("AML Review"), RiskCategory::Aml);
        assert_eq!(classify_title("GDPRcompliance"), RiskCategory::Gdpr);
        assert_eq!(classify_title("customer kyc refresh"), RiskCategory::Kyc);
        assert_eq!(classify_title("Suspected FRAUD"), RiskCategory::Fraud);
        assert_eq!(classify_title("Random"), RiskCategory::Other);
        assert_eq!(classify_title(""), RiskCategory::Other);
    }

    #[test]
    fn embedded_keywords_match() {
        // "hamlet" contains "aml".
        assert_eq!(classify_title("Hamlet archive"), RiskCategory::Aml);
    }

    #[test]
    fn priority_breaks_ties() {
        // Contains both "kyc" and "gdpr"; GDPR is checked first.
        assert_eq!(classify_title("KYC GDPR check"), RiskCategory::Gdpr);
        // AML outranks everything.
        assert_eq!(classify_title("Fraud and AML sweep"), RiskCategory::Aml);
        assert_eq!(classify_title("KYC fraud ring"), RiskCategory::Kyc);
    }

    #[test]
    fn distribution_counts_and_filters_zero() {
        let cases = titled(&["AML Review", "GDPR Audit", "KYC GDPR check", "Random"]);
        let dist = risk_distribution(&cases);
        let pairs: Vec<(&str, u64)> = dist
            .iter()
            .map(|p| (p.name.as_str(), p.get("value").unwrap()))
            .collect();
        assert_eq!(pairs, vec![("AML", 1), ("GDPR", 2), ("Other", 1)]);
    }

    #[test]
    fn distribution_keeps_fixed_category_order() {
        let cases = titled(&["Other thing", "fraud case", "kyc", "aml"]);
        let names: Vec<String> = risk_distribution(&cases)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["AML", "KYC", "Fraud", "Other"]);
    }

    #[test]
    fn distribution_empty_input() {
        assert!(risk_distribution(&[]).is_empty());
    }

    #[test]
    fn flagged_counts_every_non_closed_status() {
        let cases: Vec<Case> = CaseStatus::ALL.iter().map(|&s| case("x", s)).collect();
        // OPEN, IN_PROGRESS, PENDING_REVIEW, ARCHIVED
        assert_eq!(risks_flagged(&cases), 4);
        assert_eq!(risks_flagged(&[]), 0);
        assert_eq!(risks_flagged(&[case("x", CaseStatus::Closed)]), 0);
    }
}
