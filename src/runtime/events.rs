//! Runtime event stream payloads.

use crate::types::Icao;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirportEvent {
    /// A new airport was inserted.
    Inserted {
        /// Inserted ICAO code.
        icao: Icao,
    },
    /// An airport was removed.
    Removed {
        /// Removed ICAO code.
        icao: Icao,
    },
    /// The whole collection was written to storage.
    Persisted {
        /// Number of records written.
        records: usize,
    },
    /// Writing the collection failed; memory already reflects the mutation.
    PersistFailed {
        /// Sink error text.
        message: String,
    },
}
