//! Airport listing, lookup, creation, and deletion endpoints

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    airport::{AirportDraft, AirportRecord, AirportView},
    engine::query::{ListParams, ListQuery, ListResponse},
};

use super::{AppState, error::ApiError};

/// Body returned by a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Confirmation text.
    pub message: String,
    /// The record as it was before removal.
    pub airport: AirportRecord,
}

/// `GET /airports`
pub async fn list_airports(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let query = ListQuery::from(params);
    tracing::debug!(?query, "listing airports");
    let response = state.airports.query(query).await?;
    Ok(Json(response))
}

/// `GET /airports/:icao`
pub async fn get_airport(
    State(state): State<AppState>,
    Path(icao): Path<String>,
) -> Result<Json<AirportView>, ApiError> {
    let view = state.airports.get(icao).await?;
    Ok(Json(view))
}

/// `POST /airports`; 201 with the stored view.
pub async fn create_airport(
    State(state): State<AppState>,
    body: Result<Json<AirportDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<AirportView>), ApiError> {
    let Json(draft) = body.map_err(|rejection| {
        tracing::warn!("rejected airport body: {rejection}");
        ApiError::bad_request(rejection.body_text())
    })?;

    match state.airports.insert(draft).await {
        Ok(view) => Ok((StatusCode::CREATED, Json(view))),
        Err(err) => {
            tracing::warn!("create airport failed: {err}");
            Err(ApiError::from_runtime(err, "Failed to save airport data"))
        }
    }
}

/// `DELETE /airports/:icao`
pub async fn delete_airport(
    State(state): State<AppState>,
    Path(icao): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    match state.airports.remove(icao).await {
        Ok(airport) => Ok(Json(DeleteResponse {
            message: "Airport deleted successfully".to_string(),
            airport,
        })),
        Err(err) => {
            tracing::warn!("delete airport failed: {err}");
            Err(ApiError::from_runtime(err, "Failed to delete airport"))
        }
    }
}
