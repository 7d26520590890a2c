//! Airport records keyed by ICAO code, held in memory and persisted as one JSON file.
//!
//! # Examples
//!
//! Querying records directly with [`engine::query::run_query`]:
//! ```
//! use airportdb::{
//!     airport::AirportDraft,
//!     core::store::AirportStore,
//!     engine::query::{run_query, ListQuery},
//! };
//!
//! let draft: AirportDraft = serde_json::from_value(serde_json::json!({
//!     "icao": "00AZ",
//!     "name": "Cordes Airport",
//!     "country": "US",
//!     "state": "Arizona",
//!     "elevation": "3810",
//! })).expect("draft");
//!
//! let mut store = AirportStore::new();
//! store.insert(draft.into_record().expect("valid")).expect("insert");
//!
//! let out = run_query(store.iter(), &ListQuery::default());
//! assert_eq!(out.total(), 1);
//! assert_eq!(out.data()[0].region.as_deref(), Some("US-Arizona"));
//! ```
//!
//! Runtime usage with the JSON file sink:
//! ```no_run
//! use airportdb::{
//!     airport::AirportDraft,
//!     persist::{json_file::JsonFileSink, load_store_or_empty},
//!     runtime::handle::{spawn_airport_runtime, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut sink = JsonFileSink::new("data/airports.json");
//! let store = load_store_or_empty(&mut sink);
//! let handle = spawn_airport_runtime(store, Some(Box::new(sink)), RuntimeConfig::default());
//! let draft: AirportDraft = serde_json::from_value(serde_json::json!({
//!     "icao": "KSEA",
//!     "name": "Seattle-Tacoma",
//!     "country": "US",
//! })).expect("draft");
//! let view = handle.insert(draft).await.expect("insert");
//! assert_eq!(view.id, "KSEA");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Airport record, creation draft, and read view.
pub mod airport;
/// Server configuration.
pub mod config;
/// Core in-memory store.
pub mod core;
/// Query pipeline and aggregate reports.
pub mod engine;
/// REST endpoints.
pub mod http;
/// Persistence abstraction and JSON file implementation.
pub mod persist;
/// Text rendering of the reports for the command line.
pub mod report;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
