//! REST surface over the airport runtime.

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::runtime::handle::AirportHandle;

/// Airport CRUD and listing endpoints.
pub mod airports;
/// JSON error responses.
pub mod error;
/// Aggregate report endpoints.
pub mod scripts;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the task owning the store.
    pub airports: AirportHandle,
}

impl AppState {
    /// Wraps a runtime handle.
    pub fn new(airports: AirportHandle) -> Self {
        Self { airports }
    }
}

/// Builds the router with every endpoint and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/airports",
            get(airports::list_airports).post(airports::create_airport),
        )
        .route(
            "/airports/:icao",
            get(airports::get_airport).delete(airports::delete_airport),
        )
        .route("/scripts/average-elevation", get(scripts::average_elevation))
        .route(
            "/scripts/average-elevation-per-country",
            get(scripts::average_elevation_per_country),
        )
        .route("/scripts/no-iata", get(scripts::no_iata))
        .route("/scripts/top-timezones", get(scripts::top_timezones))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Binds `addr` and serves until ctrl-c.
pub async fn serve(router: Router, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn root() -> &'static str {
    "Airport Data Management API is running"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
