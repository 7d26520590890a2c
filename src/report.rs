//! Plain-text rendering of the aggregate reports for the `report` subcommand.

use std::fmt::Write;

use clap::ValueEnum;

use crate::{core::store::AirportStore, engine::reports};

/// Which report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Mean elevation over every airport.
    AverageElevation,
    /// Mean elevation per country.
    AverageElevationPerCountry,
    /// Airports without an IATA code.
    NoIata,
    /// Most common timezones.
    TopTimezones,
    /// Every report in turn.
    All,
}

/// Renders `kind` over `store`, one line per entry.
pub fn render(kind: ReportKind, store: &AirportStore, limit: usize) -> String {
    let mut out = String::new();
    match kind {
        ReportKind::AverageElevation => average_elevation(&mut out, store),
        ReportKind::AverageElevationPerCountry => per_country(&mut out, store),
        ReportKind::NoIata => no_iata(&mut out, store),
        ReportKind::TopTimezones => top_timezones(&mut out, store, limit),
        ReportKind::All => {
            average_elevation(&mut out, store);
            per_country(&mut out, store);
            no_iata(&mut out, store);
            top_timezones(&mut out, store, limit);
        }
    }
    out
}

// Writing into a String cannot fail.

fn average_elevation(out: &mut String, store: &AirportStore) {
    let _ = writeln!(out, "Average Elevation: {} ft", reports::average_elevation(store.iter()));
}

fn per_country(out: &mut String, store: &AirportStore) {
    for row in reports::average_elevation_per_country(store.iter()) {
        let _ = writeln!(out, "{}: {} ft", row.country, row.average);
    }
}

fn no_iata(out: &mut String, store: &AirportStore) {
    let rows = reports::missing_iata(store.iter());
    let _ = writeln!(out, "Found {} airports without IATA codes:", rows.len());
    for view in rows {
        let _ = writeln!(out, "{} ({})", view.record.name, view.record.icao);
    }
}

fn top_timezones(out: &mut String, store: &AirportStore, limit: usize) {
    let _ = writeln!(out, "Top {limit} timezones:");
    for row in reports::top_timezones(store.iter(), limit) {
        let _ = writeln!(out, "{}: {} airports", row.timezone, row.count);
    }
}
