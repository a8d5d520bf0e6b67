//! Reporting aggregation engine: turns a case snapshot into dashboard
//! metrics and chart series.
//!
//! Every function here is a pure transform over `&[Case]`. Fetching lives
//! in [`ReportingService`], which degrades a failed source to an empty
//! snapshot before aggregating.

mod resolution;
mod risk;
mod service;
mod stats;
mod trend;

pub use resolution::{avg_case_resolution_days, case_resolution_series, resolution_days};
pub use risk::{RiskCategory, classify_title, risk_distribution, risks_flagged};
pub use service::ReportingService;
pub use trend::{CLOSED_SCORE, UNRESOLVED_SCORE, compliance_score, compliance_trend};

use caseboard_core::{Case, ChartDataPoint, DashboardMetrics};
use serde::Serialize;

/// All dashboard outputs computed from one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub metrics: DashboardMetrics,
    pub compliance_trend: Vec<ChartDataPoint>,
    pub risk_distribution: Vec<ChartDataPoint>,
    pub case_resolution: Vec<ChartDataPoint>,
}

/// Headline metrics. `documents_processed` comes from the document source.
pub fn build_metrics(cases: &[Case], documents_processed: u64) -> DashboardMetrics {
    DashboardMetrics {
        documents_processed,
        risks_flagged: risks_flagged(cases),
        avg_case_resolution_days: avg_case_resolution_days(cases),
    }
}

pub fn build_report(cases: &[Case], documents_processed: u64) -> DashboardReport {
    DashboardReport {
        metrics: build_metrics(cases, documents_processed),
        compliance_trend: compliance_trend(cases),
        risk_distribution: risk_distribution(cases),
        case_resolution: case_resolution_series(cases),
    }
}
