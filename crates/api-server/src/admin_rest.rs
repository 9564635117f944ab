//! Axum REST handlers for the admin console: live-catalog editing, snapshot
//! publishing, margin analysis, and the audit log. All routes here sit
//! behind the bearer-token middleware.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use aeroplan_catalog::*;
use aeroplan_pricing::analysis::{margin_report, MarginReport};
use aeroplan_pricing::PricingSnapshot;

use crate::auth::{self, LoginRequest, LoginResponse};
use crate::rest::{error_response, ApiError, AppState, ErrorResponse};

// ─── Auth ──────────────────────────────────────────────────────────────────

pub async fn handle_login(
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match auth::authenticate(&req) {
        Ok(resp) => Ok(Json(resp)),
        Err(msg) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "auth_failed".to_string(),
                message: msg,
            }),
        )),
    }
}

// ─── Tiers ─────────────────────────────────────────────────────────────────

pub async fn list_tiers(State(state): State<AppState>) -> Json<Vec<Tier>> {
    Json(state.store.list_tiers())
}

pub async fn get_tier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tier>, StatusCode> {
    state.store.get_tier(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_tier(
    State(state): State<AppState>,
    Json(req): Json<CreateTierRequest>,
) -> Result<(StatusCode, Json<Tier>), ApiError> {
    let tier = state.store.create_tier(req, "admin").map_err(error_response)?;
    metrics::counter!("admin.tiers.created").increment(1);
    Ok((StatusCode::CREATED, Json(tier)))
}

pub async fn update_tier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTierRequest>,
) -> Result<Json<Tier>, ApiError> {
    state
        .store
        .update_tier(&id, req, "admin")
        .map(Json)
        .map_err(error_response)
}

/// DELETE on a tier referenced by a published snapshot downgrades to
/// deactivation so historical snapshots keep resolving; an unreferenced
/// tier is removed outright.
pub async fn delete_tier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.publisher.references_tier(&id) {
        state
            .store
            .deactivate_tier(&id, "admin")
            .map_err(error_response)?;
        Ok(StatusCode::OK)
    } else if state.store.delete_tier(&id, "admin") {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

// ─── Usage bands ───────────────────────────────────────────────────────────

pub async fn list_usage_bands(State(state): State<AppState>) -> Json<Vec<UsageBand>> {
    Json(state.store.usage_bands())
}

pub async fn replace_usage_bands(
    State(state): State<AppState>,
    Json(req): Json<ReplaceUsageBandsRequest>,
) -> Result<Json<Vec<UsageBand>>, ApiError> {
    state
        .store
        .replace_usage_bands(req.bands, "admin")
        .map(Json)
        .map_err(error_response)
}

// ─── Add-ons ───────────────────────────────────────────────────────────────

pub async fn list_add_ons(State(state): State<AppState>) -> Json<Vec<AddOn>> {
    Json(state.store.list_add_ons())
}

pub async fn create_add_on(
    State(state): State<AppState>,
    Json(req): Json<CreateAddOnRequest>,
) -> Result<(StatusCode, Json<AddOn>), ApiError> {
    let add_on = state.store.create_add_on(req, "admin").map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(add_on)))
}

pub async fn update_add_on(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAddOnRequest>,
) -> Result<Json<AddOn>, ApiError> {
    state
        .store
        .update_add_on(&id, req, "admin")
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_add_on(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.store.delete_add_on(&id, "admin") {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ─── Locations ─────────────────────────────────────────────────────────────

pub async fn list_locations(State(state): State<AppState>) -> Json<Vec<Location>> {
    Json(state.store.list_locations())
}

pub async fn create_location(
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let location = state
        .store
        .create_location(req, "admin")
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(location)))
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<Location>, ApiError> {
    state
        .store
        .update_location(&slug, req, "admin")
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_location(&slug, "admin")
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

// ─── Assumptions ───────────────────────────────────────────────────────────

pub async fn get_assumptions(State(state): State<AppState>) -> Json<PricingAssumptions> {
    Json(state.store.assumptions())
}

pub async fn update_assumptions(
    State(state): State<AppState>,
    Json(req): Json<UpdateAssumptionsRequest>,
) -> Json<PricingAssumptions> {
    Json(state.store.update_assumptions(req, "admin"))
}

// ─── Overrides ─────────────────────────────────────────────────────────────

pub async fn list_overrides(State(state): State<AppState>) -> Json<Vec<AircraftPricingOverride>> {
    Json(state.store.list_overrides())
}

pub async fn upsert_override(
    State(state): State<AppState>,
    Json(req): Json<UpsertOverrideRequest>,
) -> Json<AircraftPricingOverride> {
    Json(state.store.upsert_override(req, "admin"))
}

pub async fn delete_override(
    State(state): State<AppState>,
    Path(aircraft_id): Path<Uuid>,
) -> StatusCode {
    if state.store.delete_override(aircraft_id, "admin") {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ─── Snapshots ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    pub label: String,
}

pub async fn publish_snapshot(
    State(state): State<AppState>,
    Json(req): Json<PublishRequest>,
) -> Result<(StatusCode, Json<PricingSnapshot>), ApiError> {
    let snapshot = state
        .publisher
        .publish(&req.label, &state.store.snapshot_state())
        .map_err(error_response)?;
    state.store.log_audit(
        "admin",
        AuditAction::Publish,
        "snapshot",
        &snapshot.id.to_string(),
        serde_json::json!({"label": &snapshot.label}),
    );
    metrics::counter!("admin.snapshots.published").increment(1);
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn list_snapshots(State(state): State<AppState>) -> Json<Vec<PricingSnapshot>> {
    Json(state.publisher.list())
}

// ─── Analysis ──────────────────────────────────────────────────────────────

/// Margin report over the live catalog and current assumptions.
pub async fn margin_analysis(State(state): State<AppState>) -> Json<MarginReport> {
    Json(margin_report(&state.store.snapshot_state()))
}

// ─── Audit log ─────────────────────────────────────────────────────────────

pub async fn audit_log(State(state): State<AppState>) -> Json<Vec<AuditLogEntry>> {
    Json(state.store.audit_log())
}
