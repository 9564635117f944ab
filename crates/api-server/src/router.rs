//! Admin API router — mounts all admin endpoints under /api/v1/admin.

use crate::admin_rest as handlers;
use crate::rest::AppState;
use axum::routing::{get, post, put};
use axum::Router;

/// Build the admin router. The caller merges this into the main app and
/// applies the auth middleware over the whole router.
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        // Auth
        .route("/api/v1/admin/auth/login", post(handlers::handle_login))
        // Tiers
        .route(
            "/api/v1/admin/tiers",
            get(handlers::list_tiers).post(handlers::create_tier),
        )
        .route(
            "/api/v1/admin/tiers/:id",
            get(handlers::get_tier)
                .put(handlers::update_tier)
                .delete(handlers::delete_tier),
        )
        // Usage bands (whole-set replace: exhaustiveness is a set property)
        .route(
            "/api/v1/admin/usage-bands",
            get(handlers::list_usage_bands).put(handlers::replace_usage_bands),
        )
        // Add-ons
        .route(
            "/api/v1/admin/add-ons",
            get(handlers::list_add_ons).post(handlers::create_add_on),
        )
        .route(
            "/api/v1/admin/add-ons/:id",
            put(handlers::update_add_on).delete(handlers::delete_add_on),
        )
        // Locations
        .route(
            "/api/v1/admin/locations",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route(
            "/api/v1/admin/locations/:slug",
            put(handlers::update_location).delete(handlers::delete_location),
        )
        // Assumptions
        .route(
            "/api/v1/admin/assumptions",
            get(handlers::get_assumptions).put(handlers::update_assumptions),
        )
        // Overrides
        .route(
            "/api/v1/admin/overrides",
            get(handlers::list_overrides).post(handlers::upsert_override),
        )
        .route(
            "/api/v1/admin/overrides/:aircraft_id",
            axum::routing::delete(handlers::delete_override),
        )
        // Snapshots
        .route(
            "/api/v1/admin/snapshots",
            get(handlers::list_snapshots),
        )
        .route(
            "/api/v1/admin/snapshots/publish",
            post(handlers::publish_snapshot),
        )
        // Analysis
        .route(
            "/api/v1/admin/analysis/margin",
            get(handlers::margin_analysis),
        )
        // Audit log
        .route("/api/v1/admin/audit-log", get(handlers::audit_log))
        .with_state(state)
}
