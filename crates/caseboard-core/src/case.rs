//! Case records as exchanged with the case API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Open,
    InProgress,
    PendingReview,
    Closed,
    Archived,
}

impl CaseStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [CaseStatus; 5] = [
        Self::Open,
        Self::InProgress,
        Self::PendingReview,
        Self::Closed,
        Self::Archived,
    ];

    /// Wire form, e.g. `PENDING_REVIEW`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::PendingReview => "PENDING_REVIEW",
            Self::Closed => "CLOSED",
            Self::Archived => "ARCHIVED",
        }
    }

    /// Human label, e.g. `PENDING REVIEW`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN PROGRESS",
            Self::PendingReview => "PENDING REVIEW",
            Self::Closed => "CLOSED",
            Self::Archived => "ARCHIVED",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown case status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for CaseStatus {
    type Err = ParseStatusError;

    /// Accepts `in_progress`, `IN PROGRESS`, `in-progress` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalised)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A tracked investigation.
///
/// Only `status`, `title`, `created_at` and `last_modified` feed the
/// reporting engine; the remaining fields are carried for CRUD round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: CaseStatus,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub documents: Vec<serde_json::Value>,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Create payload. The server assigns `id`, `createdAt` and `lastModified`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    pub title: String,
    pub description: String,
    pub status: CaseStatus,
    pub assigned_to: String,
    pub documents: Vec<serde_json::Value>,
    pub logs: Vec<serde_json::Value>,
}

impl Default for NewCase {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: CaseStatus::Open,
            assigned_to: "unassigned".to_string(),
            documents: Vec::new(),
            logs: Vec::new(),
        }
    }
}

/// Partial update. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl CaseUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A stored document. Reporting only counts these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}
