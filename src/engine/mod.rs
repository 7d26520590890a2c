//! Query pipeline and aggregate reports.

/// Filter, sort, and pagination for listings.
pub mod query;
/// Aggregate reports over the whole collection.
pub mod reports;
