//! Sync layer: REST clients that feed the reporting engine and back the CLI's case commands.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{CaseClient, DocumentClient, SyncError};
