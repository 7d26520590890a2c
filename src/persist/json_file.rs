//! JSON-file sink holding the whole collection as one object keyed by ICAO.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    airport::{AirportDraft, AirportRecord},
    core::store::{AirportStore, StoreSnapshot},
};

use super::{PersistResult, SnapshotSink};

/// File-backed implementation of [`crate::persist::SnapshotSink`].
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink for `path`. Nothing is touched until the first load or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads a store, failing on a missing or malformed file.
    pub fn load_store(&self) -> PersistResult<AirportStore> {
        Ok(AirportStore::from_snapshot(self.read_snapshot()?)?)
    }

    /// Reads every entry of the file in document order.
    ///
    /// Entries that cannot be normalized into a record are skipped with a warning.
    pub fn read_snapshot(&self) -> PersistResult<StoreSnapshot> {
        let bytes = fs::read(&self.path)?;
        let entries: Map<String, Value> = serde_json::from_slice(&bytes)?;

        let mut records = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match decode_entry(&key, value) {
                Ok(rec) => records.push(rec),
                Err(reason) => tracing::warn!(icao = %key, "skipping stored airport: {reason}"),
            }
        }
        Ok(StoreSnapshot { records })
    }

    /// Replaces the file with `snapshot`, writing through a sibling temp file.
    pub fn write_snapshot(&self, snapshot: &StoreSnapshot) -> PersistResult<()> {
        let mut entries = Map::with_capacity(snapshot.records.len());
        for rec in &snapshot.records {
            let mut entry = serde_json::to_value(rec)?;
            if let (Some(raw), Value::Object(fields)) = (&rec.elevation_raw, &mut entry) {
                fields.insert("elevation".to_string(), raw.clone());
            }
            entries.insert(rec.icao.clone(), entry);
        }
        let payload = serde_json::to_vec_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), records = snapshot.records.len(), "wrote airport data");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "airports.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotSink for JsonFileSink {
    fn load(&mut self) -> PersistResult<StoreSnapshot> {
        self.read_snapshot()
    }

    fn write_snapshot(&mut self, snapshot: &StoreSnapshot) -> PersistResult<()> {
        JsonFileSink::write_snapshot(self, snapshot)
    }
}

/// The map key is the store identity; it fills in or overrides the entry's own `icao`.
fn decode_entry(key: &str, value: Value) -> Result<AirportRecord, String> {
    if !value.is_object() {
        return Err("entry is not an object".to_string());
    }
    let mut draft: AirportDraft =
        serde_json::from_value(value).map_err(|e| format!("entry decode failed: {e}"))?;

    let key_value = Value::String(key.to_string());
    if let Some(existing) = draft.icao.as_ref().filter(|v| **v != key_value) {
        tracing::warn!(icao = %key, stored = %existing, "stored icao differs from key, using key");
    }
    draft.icao = Some(key_value);

    draft.into_record().map_err(|e| format!("{e} (missing: {})", e.missing.join(", ")))
}
