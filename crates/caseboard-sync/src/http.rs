//! HTTP clients for the case and document REST APIs.
//!
//! Successful responses wrap their payload as `{"data": ...}`; failures carry
//! `{"error": "..."}` with a non-2xx status.

use std::time::Duration;

use async_trait::async_trait;
use caseboard_core::{
    Case, CaseSource, CaseUpdate, DocumentMetadata, DocumentSource, NewCase, SourceResponse,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response from {0} carried no data")]
    MissingData(String),
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// Message for a non-2xx response body.
fn server_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error: Some(msg) }) => msg,
        Ok(ErrorEnvelope { error: None }) => "An unknown error occurred".to_string(),
        Err(_) => format!("HTTP error! status: {status}"),
    }
}

/// Map a client result onto the source envelope, logging the failure.
pub fn into_source_response<T>(what: &str, result: Result<T, SyncError>) -> SourceResponse<T> {
    match result {
        Ok(data) => SourceResponse::ok(data),
        Err(e) => {
            warn!(source = what, error = %e, "fetch failed");
            SourceResponse::failed(e.to_string())
        }
    }
}

/// Shared request plumbing for the API clients.
#[derive(Clone)]
struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, SyncError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(SyncError::Server {
            status: status.as_u16(),
            message: server_error_message(status.as_u16(), &body),
        })
    }

    async fn data<T: DeserializeOwned>(
        &self,
        url: &str,
        resp: reqwest::Response,
    ) -> Result<T, SyncError> {
        let resp = Self::check(resp).await?;
        let body = resp.text().await?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)?;
        envelope
            .data
            .ok_or_else(|| SyncError::MissingData(url.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SyncError> {
        let url = self.url(path);
        info!(url = %url, "GET");
        let resp = self.client.get(&url).send().await?;
        self.data(&url, resp).await
    }
}

/// Client for `/api/cases`.
#[derive(Clone)]
pub struct CaseClient {
    api: ApiClient,
}

impl CaseClient {
    /// `base_url` should be like `http://localhost:8787`; a trailing slash is dropped.
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        Ok(Self {
            api: ApiClient::new(base_url, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub async fn list_cases(&self) -> Result<Vec<Case>, SyncError> {
        let cases: Vec<Case> = self.api.get("/api/cases").await?;
        info!(count = cases.len(), "fetched cases");
        Ok(cases)
    }

    pub async fn get_case(&self, id: &str) -> Result<Case, SyncError> {
        self.api.get(&format!("/api/cases/{id}")).await
    }

    pub async fn create_case(&self, new_case: &NewCase) -> Result<Case, SyncError> {
        let url = self.api.url("/api/cases");
        info!(url = %url, title = %new_case.title, "creating case");
        let resp = self.api.client.post(&url).json(new_case).send().await?;
        let created: Case = self.api.data(&url, resp).await?;
        info!(id = %created.id, "case created");
        Ok(created)
    }

    pub async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<Case, SyncError> {
        let url = self.api.url(&format!("/api/cases/{id}"));
        info!(url = %url, "updating case");
        let resp = self.api.client.put(&url).json(update).send().await?;
        self.api.data(&url, resp).await
    }

    pub async fn delete_case(&self, id: &str) -> Result<(), SyncError> {
        let url = self.api.url(&format!("/api/cases/{id}"));
        info!(url = %url, "deleting case");
        let resp = self.api.client.delete(&url).send().await?;
        ApiClient::check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl CaseSource for CaseClient {
    async fn get_cases(&self) -> SourceResponse<Vec<Case>> {
        into_source_response("cases", self.list_cases().await)
    }
}

/// Client for `/api/documents`.
#[derive(Clone)]
pub struct DocumentClient {
    api: ApiClient,
}

impl DocumentClient {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        Ok(Self {
            api: ApiClient::new(base_url, timeout)?,
        })
    }

    pub async fn list_documents(&self) -> Result<Vec<DocumentMetadata>, SyncError> {
        let documents: Vec<DocumentMetadata> = self.api.get("/api/documents").await?;
        info!(count = documents.len(), "fetched documents");
        Ok(documents)
    }
}

#[async_trait]
impl DocumentSource for DocumentClient {
    async fn get_documents(&self) -> SourceResponse<Vec<DocumentMetadata>> {
        into_source_response("documents", self.list_documents().await)
    }
}
