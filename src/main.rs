//! Airport records server
//!
//! Loads the JSON collection (starting empty if it is missing or broken),
//! then either serves the REST API through the single-writer runtime or
//! prints a report and exits.

use airportdb::{
    config::{Commands, ServerConfig},
    http::{AppState, create_router, serve},
    persist::{json_file::JsonFileSink, load_store_or_empty},
    report,
    runtime::handle::{RuntimeConfig, spawn_airport_runtime},
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut sink = JsonFileSink::new(&config.data_file);

    if let Some(Commands::Report { kind, limit }) = config.command {
        let store = load_store_or_empty(&mut sink);
        print!("{}", report::render(kind, &store, limit.max(1)));
        return Ok(());
    }

    tracing::info!(data_file = %config.data_file.display(), "starting airport service");

    let store = load_store_or_empty(&mut sink);
    let handle = spawn_airport_runtime(store, Some(Box::new(sink)), RuntimeConfig::default());

    let router = create_router(AppState::new(handle.clone()));
    serve(router, &config.bind_addr()).await?;

    handle.shutdown().await?;
    Ok(())
}
