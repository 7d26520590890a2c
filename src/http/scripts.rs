//! Aggregate report endpoints

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    airport::AirportView,
    engine::reports::{CountryElevation, TimezoneCount, parse_top_limit},
};

use super::{AppState, error::ApiError};

/// Overall mean elevation, rounded.
#[derive(Debug, Serialize, Deserialize)]
pub struct AverageElevation {
    /// Feet.
    pub average: i64,
}

/// Query string for `/scripts/top-timezones`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopTimezonesParams {
    /// How many timezones to return.
    pub limit: Option<String>,
}

/// `GET /scripts/average-elevation`
pub async fn average_elevation(
    State(state): State<AppState>,
) -> Result<Json<AverageElevation>, ApiError> {
    let average = state.airports.average_elevation().await?;
    Ok(Json(AverageElevation { average }))
}

/// `GET /scripts/average-elevation-per-country`
pub async fn average_elevation_per_country(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryElevation>>, ApiError> {
    Ok(Json(state.airports.average_elevation_per_country().await?))
}

/// `GET /scripts/no-iata`
pub async fn no_iata(State(state): State<AppState>) -> Result<Json<Vec<AirportView>>, ApiError> {
    Ok(Json(state.airports.missing_iata().await?))
}

/// `GET /scripts/top-timezones`
pub async fn top_timezones(
    State(state): State<AppState>,
    Query(params): Query<TopTimezonesParams>,
) -> Result<Json<Vec<TimezoneCount>>, ApiError> {
    let limit = parse_top_limit(params.limit.as_deref());
    Ok(Json(state.airports.top_timezones(limit).await?))
}
