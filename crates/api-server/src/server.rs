//! API server — public pricing surface, admin console, Swagger UI, and the
//! Prometheus metrics side port.

use crate::rest::{self, AppState};
use crate::router::admin_router;
use crate::swagger::ApiDoc;
use axum::routing::{get, post};
use axum::Router;
use aeroplan_core::config::AppConfig;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = Router::new()
            // Public pricing endpoints
            .route("/v1/pricing/quote", post(rest::handle_quote))
            .route("/v1/pricing/matrix", post(rest::handle_matrix))
            .route("/v1/pricing/snapshot", get(rest::latest_snapshot))
            .route("/v1/pricing/snapshots/:id", get(rest::get_snapshot))
            .route("/v1/pricing/tiers", get(rest::public_tiers))
            .route("/v1/pricing/locations", get(rest::public_locations))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            .with_state(self.state.clone())
            // Admin console
            .merge(admin_router(self.state.clone()))
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            // Middleware
            .layer(axum::middleware::from_fn(crate::auth::auth_middleware))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
