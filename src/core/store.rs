//! Insertion-ordered airport store keyed by ICAO.

use hashbrown::HashMap;
use thiserror::Error;

use crate::{airport::AirportRecord, types::Icao};

/// Key-level store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The ICAO code is already taken.
    #[error("Airport with this ICAO code already exists")]
    DuplicateKey(Icao),
    /// No airport under that ICAO code.
    #[error("Airport not found")]
    NotFound(Icao),
}

/// Ordered copy of the whole collection, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    /// Records in store order.
    pub records: Vec<AirportRecord>,
}

/// Authoritative in-memory collection.
#[derive(Debug, Default)]
pub struct AirportStore {
    records: HashMap<Icao, AirportRecord>,
    order: Vec<Icao>,
}

impl AirportStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store, rejecting duplicate keys.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for rec in snapshot.records {
            store.insert(rec)?;
        }
        Ok(store)
    }

    /// Copies every record in store order.
    pub fn export_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            records: self.list(),
        }
    }

    /// Adds `rec` under its ICAO code. Existing keys are never overwritten.
    pub fn insert(&mut self, rec: AirportRecord) -> Result<(), StoreError> {
        if self.records.contains_key(&rec.icao) {
            return Err(StoreError::DuplicateKey(rec.icao));
        }

        self.order.push(rec.icao.clone());
        self.records.insert(rec.icao.clone(), rec);
        Ok(())
    }

    /// Removes and returns the record under `icao`.
    pub fn remove(&mut self, icao: &str) -> Result<AirportRecord, StoreError> {
        let rec = self
            .records
            .remove(icao)
            .ok_or_else(|| StoreError::NotFound(icao.to_string()))?;
        if let Some(pos) = self.order.iter().position(|k| k == icao) {
            self.order.remove(pos);
        }
        Ok(rec)
    }

    /// Borrows the record under `icao`.
    pub fn get(&self, icao: &str) -> Result<&AirportRecord, StoreError> {
        self.records
            .get(icao)
            .ok_or_else(|| StoreError::NotFound(icao.to_string()))
    }

    /// Owned copy of the record under `icao`.
    pub fn get_cloned(&self, icao: &str) -> Result<AirportRecord, StoreError> {
        self.get(icao).cloned()
    }

    /// Whether `icao` is present.
    pub fn contains(&self, icao: &str) -> bool {
        self.records.contains_key(icao)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AirportRecord> + '_ {
        self.order.iter().filter_map(|k| self.records.get(k))
    }

    /// Owned copy of every record; mutating it never touches the store.
    pub fn list(&self) -> Vec<AirportRecord> {
        self.iter().cloned().collect()
    }

    /// ICAO codes in insertion order.
    pub fn ordered_keys(&self) -> &[Icao] {
        &self.order
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
