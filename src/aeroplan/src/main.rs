//! AeroPlan — pricing engine and admin console for aircraft management
//! services.
//!
//! Main entry point that wires the catalog store, snapshot publisher, and
//! quote service, then starts the API server.

use aeroplan_api::{ApiServer, AppState};
use aeroplan_catalog::CatalogStore;
use aeroplan_core::config::AppConfig;
use aeroplan_pricing::{QuoteService, SnapshotPublisher};
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "aeroplan")]
#[command(about = "Pricing engine for aircraft management services")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "AEROPLAN__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "AEROPLAN__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Skip demo catalog seeding and the initial snapshot
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aeroplan=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("AeroPlan starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        default_usage_band = ?config.pricing.default_usage_band,
        "Configuration loaded"
    );

    // Wire the engine
    let store = Arc::new(CatalogStore::new());
    let publisher = Arc::new(SnapshotPublisher::new());

    if config.catalog.seed_demo_data && !cli.no_seed {
        store.seed_demo_data();
        match publisher.publish("initial", &store.snapshot_state()) {
            Ok(snapshot) => info!(snapshot_id = %snapshot.id, "Published initial snapshot"),
            Err(e) => error!(error = %e, "Failed to publish initial snapshot"),
        }
    }

    let quotes = Arc::new(QuoteService::new(
        store.clone(),
        publisher.clone(),
        &config.pricing,
    ));

    let state = AppState {
        store,
        publisher,
        quotes,
        node_id: config.node_id.clone(),
        start_time: Instant::now(),
    };

    let server = ApiServer::new(config, state);
    server.start_metrics().await?;
    server.start_http().await?;

    Ok(())
}
