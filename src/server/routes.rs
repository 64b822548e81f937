//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::reverse::resolve_address;
use crate::geo::{Candidate, GeoBackend};
use crate::picker::{Notice, ResolvedLocation};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/normalize", get(normalize_handler))
        .route("/api/search", get(search_handler))
        .route("/api/reverse", get(reverse_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Geo(_) | Error::Http(_) => "GEOCODER_UNAVAILABLE",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Geocoding provider base URL
    pub geocoder: String,
    /// Country searches are restricted to
    pub country_code: String,
    /// Response language
    pub locale: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        geocoder: state.geocoder.base_url().to_string(),
        country_code: state.config.region.country_code.clone(),
        locale: state.config.region.locale.clone(),
    })
}

/// `?q=` query parameter
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub q: String,
}

/// Normalization response
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub raw: String,
    pub normalized: String,
}

/// Show how a query will be sent to the geocoder
///
/// GET /api/normalize?q=
async fn normalize_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Json<NormalizeResponse> {
    let normalized = state.normalizer.normalize(&params.q).to_string();
    Json(NormalizeResponse {
        raw: params.q,
        normalized,
    })
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Query as typed
    pub query: String,
    /// Query as sent to the geocoder (absent when too short to search)
    pub normalized: Option<String>,
    /// Ranked candidates
    pub candidates: Vec<Candidate>,
    /// Advisory for the user, if any
    pub notice: Option<Notice>,
    /// Advisory text in the configured locale
    pub message: Option<String>,
}

/// Forward search
///
/// GET /api/search?q=
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ApiError>)> {
    if !state.searchable(&params.q) {
        return Ok(Json(SearchResponse {
            query: params.q,
            normalized: None,
            candidates: Vec::new(),
            notice: None,
            message: None,
        }));
    }

    let normalized = state.normalizer.normalize(&params.q);
    let candidates = state
        .geocoder
        .search(&normalized, &state.search_options)
        .await
        .map_err(|e| {
            warn!(query = %normalized, error = %e, "search failed");
            (StatusCode::BAD_GATEWAY, Json(ApiError::from(e)))
        })?;

    let notice = candidates.is_empty().then_some(Notice::NoResults);
    Ok(Json(SearchResponse {
        query: params.q,
        normalized: Some(normalized.to_string()),
        candidates,
        notice,
        message: notice.map(|n| n.to_string()),
    }))
}

/// `?lat=&lng=` query parameters
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lat: f64,
    pub lng: f64,
}

/// Resolve coordinates to a location ready for the booking form
///
/// GET /api/reverse?lat=&lng=
async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<ResolvedLocation>, ApiError> {
    let position = Coordinates::new(params.lat, params.lng);
    position.validate().map_err(ApiError::from)?;

    let address = resolve_address(&state.geocoder, position).await;
    Ok(Json(ResolvedLocation::new(position, address)))
}
