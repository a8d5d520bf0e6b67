//! Shapes handed to the presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub documents_processed: u64,
    pub risks_flagged: u64,
    pub avg_case_resolution_days: u64,
}

/// One point of a chart series: a `name` label plus report-specific numeric
/// fields, serialised flat (`{"name": "2024 Q1", "score": 95}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, u64>,
}

impl ChartDataPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: u64) -> Self {
        self.values.insert(field.to_string(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<u64> {
        self.values.get(field).copied()
    }
}
