//! In-memory authoritative record store.

/// Airport store keyed by ICAO code.
pub mod store;
