//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AeroPlan Pricing API",
        version = "0.1.0",
        description = "Pricing engine for aircraft management services.\n\nQuotes resolve against immutable published snapshots: tier base price × usage-band multiplier + add-ons + hangar cost.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Pricing", description = "Snapshot-backed quote and catalog read endpoints"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Pricing
        crate::rest::handle_quote,
        crate::rest::handle_matrix,
        crate::rest::latest_snapshot,
        crate::rest::get_snapshot,
        crate::rest::public_tiers,
        crate::rest::public_locations,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Core types
        aeroplan_core::money::Money,
        // Engine types
        aeroplan_pricing::quote::QuoteRequest,
        aeroplan_pricing::quote::Quote,
        aeroplan_pricing::quote::PriceMatrix,
        aeroplan_pricing::calculator::QuoteInput,
        aeroplan_pricing::calculator::PriceBreakdown,
        aeroplan_pricing::calculator::AddOnLine,
        aeroplan_pricing::calculator::BandPrice,
        aeroplan_pricing::snapshot::PricingSnapshot,
        aeroplan_pricing::snapshot::SnapshotPayload,
        // Catalog types
        aeroplan_catalog::models::Tier,
        aeroplan_catalog::models::TierFeature,
        aeroplan_catalog::models::UsageBand,
        aeroplan_catalog::models::AddOn,
        aeroplan_catalog::models::AddOnPricing,
        aeroplan_catalog::models::Location,
        aeroplan_catalog::models::PricingAssumptions,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
