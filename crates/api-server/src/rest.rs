//! REST API handlers for the public pricing surface and operational
//! endpoints. Public reads resolve against the latest published snapshot,
//! never the live catalog tables.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use aeroplan_catalog::{CatalogStore, Location, Tier, OWN_STORAGE_SLUG};
use aeroplan_core::PricingError;
use aeroplan_pricing::quote::PriceMatrix;
use aeroplan_pricing::{PricingSnapshot, Quote, QuoteRequest, QuoteService, SnapshotPublisher};

/// Maximum add-on selections per quote request.
const MAX_ADD_ONS: usize = 50;

/// Maximum id/slug field length.
const MAX_FIELD_LEN: usize = 128;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub publisher: Arc<SnapshotPublisher>,
    pub quotes: Arc<QuoteService>,
    pub node_id: String,
    pub start_time: Instant,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map an engine error onto an HTTP response.
pub fn error_response(err: PricingError) -> ApiError {
    let (status, code) = match &err {
        PricingError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        PricingError::MissingInput(_) => (StatusCode::BAD_REQUEST, "missing_input"),
        PricingError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_quote_request".to_string(),
            message: message.to_string(),
        }),
    )
}

/// Validate a quote request at the API boundary.
fn validate_quote_request(req: &QuoteRequest) -> Result<(), &'static str> {
    if req.tier_id.is_empty() {
        return Err("quote 'tier_id' must not be empty");
    }
    if req.tier_id.len() > MAX_FIELD_LEN {
        return Err("quote 'tier_id' exceeds maximum length");
    }
    if req.add_on_ids.len() > MAX_ADD_ONS {
        return Err("quote exceeds maximum number of add-ons");
    }
    if req
        .add_on_ids
        .iter()
        .any(|id| id.is_empty() || id.len() > MAX_FIELD_LEN)
    {
        return Err("quote add-on id is empty or exceeds maximum length");
    }
    if let Some(band) = &req.usage_band_id {
        if band.is_empty() || band.len() > MAX_FIELD_LEN {
            return Err("quote 'usage_band_id' is empty or exceeds maximum length");
        }
    }
    if let Some(location) = &req.location_id {
        if location.is_empty() || location.len() > MAX_FIELD_LEN {
            return Err("quote 'location_id' is empty or exceeds maximum length");
        }
    }
    Ok(())
}

/// POST /v1/pricing/quote — price one set of selections.
#[utoipa::path(
    post,
    path = "/v1/pricing/quote",
    tag = "Pricing",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Quote computed", body = Quote),
        (status = 400, description = "Invalid or incomplete selections", body = ErrorResponse),
        (status = 404, description = "Unknown tier, band, location, or snapshot", body = ErrorResponse),
    )
)]
pub async fn handle_quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<Quote>, ApiError> {
    if let Err(msg) = validate_quote_request(&req) {
        warn!(tier_id = %req.tier_id, error = msg, "Quote request validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return Err(bad_request(msg));
    }
    metrics::counter!("api.quotes").increment(1);
    state.quotes.quote(&req).map(Json).map_err(error_response)
}

/// POST /v1/pricing/matrix — the same selections priced at every usage band.
#[utoipa::path(
    post,
    path = "/v1/pricing/matrix",
    tag = "Pricing",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Per-band price comparison", body = PriceMatrix),
        (status = 404, description = "Unknown tier or snapshot", body = ErrorResponse),
    )
)]
pub async fn handle_matrix(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<PriceMatrix>, ApiError> {
    if let Err(msg) = validate_quote_request(&req) {
        metrics::counter!("api.validation_errors").increment(1);
        return Err(bad_request(msg));
    }
    state.quotes.matrix(&req).map(Json).map_err(error_response)
}

/// GET /v1/pricing/snapshot — the latest published snapshot.
#[utoipa::path(
    get,
    path = "/v1/pricing/snapshot",
    tag = "Pricing",
    responses(
        (status = 200, description = "Latest published snapshot", body = PricingSnapshot),
        (status = 404, description = "Nothing published yet", body = ErrorResponse),
    )
)]
pub async fn latest_snapshot(
    State(state): State<AppState>,
) -> Result<Json<PricingSnapshot>, ApiError> {
    state
        .publisher
        .latest()
        .map(Json)
        .ok_or_else(|| error_response(PricingError::not_found("snapshot", "latest")))
}

/// GET /v1/pricing/snapshots/{id} — a specific published snapshot.
#[utoipa::path(
    get,
    path = "/v1/pricing/snapshots/{id}",
    tag = "Pricing",
    params(("id" = Uuid, Path, description = "Snapshot id")),
    responses(
        (status = 200, description = "Snapshot", body = PricingSnapshot),
        (status = 404, description = "Unknown snapshot", body = ErrorResponse),
    )
)]
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PricingSnapshot>, ApiError> {
    state
        .publisher
        .get(id)
        .map(Json)
        .ok_or_else(|| error_response(PricingError::not_found("snapshot", id.to_string())))
}

/// GET /v1/pricing/tiers — active tiers from the latest snapshot, in display
/// order. This is what the marketing pricing page renders.
#[utoipa::path(
    get,
    path = "/v1/pricing/tiers",
    tag = "Pricing",
    responses(
        (status = 200, description = "Active tiers", body = [Tier]),
        (status = 404, description = "Nothing published yet", body = ErrorResponse),
    )
)]
pub async fn public_tiers(State(state): State<AppState>) -> Result<Json<Vec<Tier>>, ApiError> {
    let snapshot = state
        .publisher
        .latest()
        .ok_or_else(|| error_response(PricingError::not_found("snapshot", "latest")))?;
    let mut tiers: Vec<Tier> = snapshot
        .payload
        .tiers
        .into_iter()
        .filter(|t| t.active)
        .collect();
    tiers.sort_by_key(|t| t.sort_order);
    Ok(Json(tiers))
}

/// GET /v1/pricing/locations — hangar partners from the latest snapshot.
/// The reserved own-storage entry is excluded from the listing.
#[utoipa::path(
    get,
    path = "/v1/pricing/locations",
    tag = "Pricing",
    responses(
        (status = 200, description = "Hangar partner locations", body = [Location]),
        (status = 404, description = "Nothing published yet", body = ErrorResponse),
    )
)]
pub async fn public_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let snapshot = state
        .publisher
        .latest()
        .ok_or_else(|| error_response(PricingError::not_found("snapshot", "latest")))?;
    let mut locations: Vec<Location> = snapshot
        .payload
        .locations
        .into_iter()
        .filter(|l| l.active && l.slug != OWN_STORAGE_SLUG)
        .collect();
    locations.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(Json(locations))
}

// ─── Operational endpoints ─────────────────────────────────────────────────

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe. Ready once a snapshot is available to
/// serve quotes from.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to serve quotes"),
        (status = 503, description = "No published snapshot yet"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.publisher.latest().is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
