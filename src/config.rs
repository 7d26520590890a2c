//! Server configuration from flags and environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{engine::reports::DEFAULT_TOP_TIMEZONES, report::ReportKind};

/// Command-line and environment options for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "airportdb")]
#[command(about = "Airport records service backed by a JSON file", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port
    #[arg(short, long, env = "PORT", default_value_t = 5050)]
    pub port: u16,

    /// JSON file holding the airport collection
    #[arg(short, long, env = "AIRPORTS_FILE", default_value = "data/airports.json")]
    pub data_file: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// What the binary does after loading configuration.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Serve the REST API
    Serve,

    /// Print a report from the data file and exit
    Report {
        /// Report to print
        #[arg(value_enum, default_value = "all")]
        kind: ReportKind,

        /// Number of timezones for the top-timezones report
        #[arg(long, default_value_t = DEFAULT_TOP_TIMEZONES)]
        limit: usize,
    },
}

impl ServerConfig {
    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
