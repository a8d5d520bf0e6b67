//! Fetch-then-aggregate entry points used by the dashboard.

use std::sync::Arc;

use caseboard_core::{Case, CaseSource, ChartDataPoint, DashboardMetrics, DocumentSource};
use tracing::{debug, info};

use crate::{
    DashboardReport, build_metrics, build_report, case_resolution_series, compliance_trend,
    risk_distribution,
};

/// Reads from a case source and a document source and produces report
/// outputs. A failed fetch yields the empty form of each output.
#[derive(Clone)]
pub struct ReportingService {
    cases: Arc<dyn CaseSource>,
    documents: Arc<dyn DocumentSource>,
}

impl ReportingService {
    pub fn new(cases: Arc<dyn CaseSource>, documents: Arc<dyn DocumentSource>) -> Self {
        Self { cases, documents }
    }

    async fn fetch_cases(&self) -> Vec<Case> {
        let cases = self.cases.get_cases().await.or_empty("cases");
        debug!(count = cases.len(), "case snapshot fetched");
        cases
    }

    /// Fetch cases and documents concurrently. Either side degrades to empty
    /// on failure; the document side only contributes its count.
    async fn fetch_snapshot(&self) -> (Vec<Case>, u64) {
        let (cases, documents) =
            futures::join!(self.cases.get_cases(), self.documents.get_documents());
        let cases = cases.or_empty("cases");
        let documents_processed = documents.or_empty("documents").len() as u64;
        debug!(
            cases = cases.len(),
            documents = documents_processed,
            "snapshot fetched"
        );
        (cases, documents_processed)
    }

    pub async fn dashboard_metrics(&self) -> DashboardMetrics {
        let (cases, documents_processed) = self.fetch_snapshot().await;
        build_metrics(&cases, documents_processed)
    }

    pub async fn compliance_trend_data(&self) -> Vec<ChartDataPoint> {
        compliance_trend(&self.fetch_cases().await)
    }

    pub async fn risk_distribution_data(&self) -> Vec<ChartDataPoint> {
        risk_distribution(&self.fetch_cases().await)
    }

    pub async fn case_resolution_data(&self) -> Vec<ChartDataPoint> {
        case_resolution_series(&self.fetch_cases().await)
    }

    /// Every dashboard output from a single concurrent fetch of both sources.
    pub async fn dashboard_report(&self) -> DashboardReport {
        let (cases, documents_processed) = self.fetch_snapshot().await;
        info!(
            cases = cases.len(),
            documents = documents_processed,
            "building dashboard report"
        );
        build_report(&cases, documents_processed)
    }
}
