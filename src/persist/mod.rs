//! Snapshot persistence for the airport store.

/// JSON file sink.
pub mod json_file;

use thiserror::Error;

use crate::core::store::{AirportStore, StoreError, StoreSnapshot};

/// Storage failures.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed or unserializable JSON.
    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Anything else, already formatted.
    #[error("{0}")]
    Message(String),
}

impl From<StoreError> for PersistError {
    fn from(value: StoreError) -> Self {
        Self::Message(format!("store error: {value:?}"))
    }
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Whole-collection storage backend. Every write replaces the previous state.
pub trait SnapshotSink: Send {
    /// Reads the stored collection.
    fn load(&mut self) -> PersistResult<StoreSnapshot>;
    /// Replaces the stored collection with `snapshot`.
    fn write_snapshot(&mut self, snapshot: &StoreSnapshot) -> PersistResult<()>;
}

/// Loads the store from `sink`, starting empty when storage is missing or unreadable.
pub fn load_store_or_empty(sink: &mut dyn SnapshotSink) -> AirportStore {
    let loaded = sink
        .load()
        .and_then(|snapshot| AirportStore::from_snapshot(snapshot).map_err(PersistError::from));
    match loaded {
        Ok(store) => {
            tracing::info!(records = store.len(), "loaded airport data");
            store
        }
        Err(PersistError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("airport data file not found, starting with an empty store");
            AirportStore::new()
        }
        Err(err) => {
            tracing::error!("error loading airport data: {err}");
            AirportStore::new()
        }
    }
}
