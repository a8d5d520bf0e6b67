//! File-backed case snapshots for offline reporting.

use std::path::Path;

use async_trait::async_trait;
use caseboard_core::{Case, CaseSource, DocumentMetadata, DocumentSource, SourceResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::StoreError;

/// On-disk layouts a snapshot may use.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full {
        cases: Vec<Case>,
        #[serde(default)]
        documents: Vec<DocumentMetadata>,
    },
    Bare(Vec<Case>),
}

#[derive(Serialize)]
struct SnapshotFileRef<'a> {
    cases: &'a [Case],
    documents: &'a [DocumentMetadata],
}

/// An immutable case and document collection captured at one point in time.
///
/// Files are JSON, either a bare array of cases or
/// `{"cases": [...], "documents": [...]}` with `documents` optional.
/// A loaded snapshot serves as both a [`CaseSource`] and a [`DocumentSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    cases: Vec<Case>,
    documents: Vec<DocumentMetadata>,
}

impl SnapshotStore {
    pub fn new(cases: Vec<Case>, documents: Vec<DocumentMetadata>) -> Self {
        Self { cases, documents }
    }

    /// Load a snapshot file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::SnapshotNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let store = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            cases = store.cases.len(),
            documents = store.documents.len(),
            "loaded snapshot"
        );
        Ok(store)
    }

    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let file: SnapshotFile = serde_json::from_str(text)?;
        let store = match file {
            SnapshotFile::Full { cases, documents } => Self { cases, documents },
            SnapshotFile::Bare(cases) => Self {
                cases,
                documents: Vec::new(),
            },
        };
        Ok(store)
    }

    /// Write the snapshot as pretty-printed `{"cases", "documents"}` JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let file = SnapshotFileRef {
            cases: &self.cases,
            documents: &self.documents,
        };
        let text = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, text)?;
        info!(
            path = %path.display(),
            cases = self.cases.len(),
            documents = self.documents.len(),
            "saved snapshot"
        );
        Ok(())
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn documents(&self) -> &[DocumentMetadata] {
        &self.documents
    }
}

#[async_trait]
impl CaseSource for SnapshotStore {
    async fn get_cases(&self) -> SourceResponse<Vec<Case>> {
        SourceResponse::ok(self.cases.clone())
    }
}

#[async_trait]
impl DocumentSource for SnapshotStore {
    async fn get_documents(&self) -> SourceResponse<Vec<DocumentMetadata>> {
        SourceResponse::ok(self.documents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseboard_core::CaseStatus;
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    const BARE: &str = r#"[
        {
            "id": "case-001",
            "title": "AML Review",
            "status": "CLOSED",
            "createdAt": "2024-01-02T00:00:00Z",
            "lastModified": "2024-01-12T00:00:00Z"
        }
    ]"#;

    fn sample_case() -> Case {
        Case {
            id: "case-002".into(),
            title: "Fraud ring".into(),
            description: "Card-not-present cluster".into(),
            status: CaseStatus::InProgress,
            assigned_to: "user-007".into(),
            documents: vec![],
            logs: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap(),
            last_modified: Utc.with_ymd_and_hms(2024, 4, 3, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn parse_bare_array() {
        let store = SnapshotStore::from_json(BARE).unwrap();
        assert_eq!(store.cases().len(), 1);
        assert!(store.documents().is_empty());
    }

    #[test]
    fn parse_object_without_documents() {
        let text = format!(r#"{{"cases": {BARE}}}"#);
        let store = SnapshotStore::from_json(&text).unwrap();
        assert_eq!(store.cases()[0].id, "case-001");
        assert!(store.documents().is_empty());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            SnapshotStore::from_json(r#"{"items": []}"#),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn open_missing_file_errors() {
        let result = SnapshotStore::open(Path::new("/nonexistent/snapshot.json"));
        assert!(matches!(result, Err(StoreError::SnapshotNotFound(_))));
    }

    #[test]
    fn open_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BARE.as_bytes()).unwrap();
        let store = SnapshotStore::open(file.path()).unwrap();
        assert_eq!(store.cases()[0].title, "AML Review");
    }

    #[test]
    fn save_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let documents = vec![
            serde_json::from_str::<DocumentMetadata>(r#"{"id": "doc-1", "name": "kyc.pdf"}"#)
                .unwrap(),
        ];
        let store = SnapshotStore::new(vec![sample_case()], documents);
        store.save(&path).unwrap();

        let loaded = SnapshotStore::open(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[tokio::test]
    async fn serves_as_both_sources() {
        let store = SnapshotStore::from_json(BARE).unwrap();
        let cases = store.get_cases().await;
        assert!(cases.success);
        assert_eq!(cases.into_data().unwrap().len(), 1);
        let documents = store.get_documents().await;
        assert_eq!(documents.into_data(), Some(vec![]));
    }
}
