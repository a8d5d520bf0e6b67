//! Storage layer: JSON case snapshots for offline reporting.

mod error;
mod snapshot;

pub use error::StoreError;
pub use snapshot::SnapshotStore;
