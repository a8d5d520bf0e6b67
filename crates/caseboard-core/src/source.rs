//! Data sources the reporting engine reads from.
//!
//! A source answers with a [`SourceResponse`] envelope rather than a
//! `Result`: a failed fetch is an expected state the dashboard renders as
//! empty, not an error to propagate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::case::{Case, DocumentMetadata};

/// `{success, data?, error?}` as returned by a case or document source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> SourceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// The payload, or `None` when the fetch failed or carried no data.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

impl<T: Default> SourceResponse<T> {
    /// The payload, or `T::default()` when unavailable.
    ///
    /// `what` names the source in the warning logged on failure.
    pub fn or_empty(self, what: &str) -> T {
        match (self.success, self.data) {
            (true, Some(data)) => data,
            (success, _) => {
                warn!(
                    source = what,
                    success,
                    error = self.error.as_deref().unwrap_or("no data"),
                    "source unavailable, using empty snapshot"
                );
                T::default()
            }
        }
    }
}

/// Supplies the current collection of cases.
#[async_trait]
pub trait CaseSource: Send + Sync {
    async fn get_cases(&self) -> SourceResponse<Vec<Case>>;
}

/// Supplies the current collection of documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn get_documents(&self) -> SourceResponse<Vec<DocumentMetadata>>;
}
