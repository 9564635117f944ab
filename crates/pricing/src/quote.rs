//! Quote resolution on top of the pure calculator: snapshot pinning, the
//! documented default-band policy, and per-aircraft override substitution.

use crate::calculator::{calculate_monthly_price, price_matrix, BandPrice, PriceBreakdown, QuoteInput};
use crate::snapshot::{PricingSnapshot, SnapshotPublisher};
use aeroplan_catalog::{AircraftPricingOverride, CatalogStore};
use aeroplan_core::config::PricingConfig;
use aeroplan_core::{Money, PricingError, PricingResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// A quote request. `snapshot_id` pins the quote to a specific publication
/// (the invoicing path); omitted, the latest snapshot is used. `aircraft_id`
/// opts into per-aircraft override resolution.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    pub tier_id: String,
    #[serde(default)]
    pub usage_band_id: Option<String>,
    #[serde(default)]
    pub add_on_ids: Vec<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub aircraft_id: Option<Uuid>,
    #[serde(default)]
    pub snapshot_id: Option<Uuid>,
}

/// A resolved quote. `total` is the figure to present; it differs from
/// `breakdown.total` only when an override applied. `stale_override` flags
/// an override that referenced ids missing from the payload and was
/// therefore ignored — surfaced for administrator review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    pub snapshot_id: Uuid,
    pub snapshot_label: String,
    pub breakdown: PriceBreakdown,
    pub total: Money,
    pub override_applied: bool,
    pub stale_override: bool,
}

/// Price matrix across all usage bands of one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceMatrix {
    pub snapshot_id: Uuid,
    pub rows: Vec<BandPrice>,
}

/// Stateless facade over the snapshot registry, the catalog store (for
/// overrides only), and the calculator. Every price a caller sees comes out
/// of a published snapshot, never the live tables.
pub struct QuoteService {
    store: Arc<CatalogStore>,
    publisher: Arc<SnapshotPublisher>,
    default_usage_band: Option<String>,
}

impl QuoteService {
    pub fn new(
        store: Arc<CatalogStore>,
        publisher: Arc<SnapshotPublisher>,
        pricing: &PricingConfig,
    ) -> Self {
        if let Some(band) = &pricing.default_usage_band {
            info!(band = %band, "Default usage band configured for bandless quotes");
        }
        Self {
            store,
            publisher,
            default_usage_band: pricing.default_usage_band.clone(),
        }
    }

    fn resolve_snapshot(&self, id: Option<Uuid>) -> PricingResult<PricingSnapshot> {
        match id {
            Some(id) => self
                .publisher
                .get(id)
                .ok_or_else(|| PricingError::not_found("snapshot", id.to_string())),
            None => self
                .publisher
                .latest()
                .ok_or_else(|| PricingError::not_found("snapshot", "latest")),
        }
    }

    fn to_input(&self, req: &QuoteRequest) -> QuoteInput {
        QuoteInput {
            tier_id: req.tier_id.clone(),
            // Fail closed unless an operator documented a default band.
            usage_band_id: req
                .usage_band_id
                .clone()
                .or_else(|| self.default_usage_band.clone()),
            add_on_ids: req.add_on_ids.clone(),
            location_id: req.location_id.clone(),
        }
    }

    /// Compute a quote, then substitute any in-scope aircraft override.
    pub fn quote(&self, req: &QuoteRequest) -> PricingResult<Quote> {
        let snapshot = self.resolve_snapshot(req.snapshot_id)?;
        let breakdown = calculate_monthly_price(&self.to_input(req), &snapshot.payload)?;

        let mut total = breakdown.total;
        let mut override_applied = false;
        let mut stale_override = false;

        if let Some(aircraft_id) = req.aircraft_id {
            if let Some(ovr) = self.store.override_for(aircraft_id) {
                match override_disposition(&ovr, req, &snapshot) {
                    OverrideDisposition::Applies => {
                        let hangar = ovr
                            .override_hangar_cost
                            .or(breakdown.hangar_cost)
                            .unwrap_or(Money::ZERO);
                        total = ovr.override_monthly + hangar;
                        override_applied = true;
                    }
                    OverrideDisposition::OutOfScope => {}
                    OverrideDisposition::Stale(reason) => {
                        warn!(
                            aircraft_id = %aircraft_id,
                            reason = %reason,
                            "Ignoring stale pricing override, falling back to computed price"
                        );
                        stale_override = true;
                    }
                }
            }
        }

        Ok(Quote {
            snapshot_id: snapshot.id,
            snapshot_label: snapshot.label,
            breakdown,
            total,
            override_applied,
            stale_override,
        })
    }

    /// The same selections priced at every band of the resolved snapshot.
    pub fn matrix(&self, req: &QuoteRequest) -> PricingResult<PriceMatrix> {
        let snapshot = self.resolve_snapshot(req.snapshot_id)?;
        let rows = price_matrix(&self.to_input(req), &snapshot.payload)?;
        Ok(PriceMatrix {
            snapshot_id: snapshot.id,
            rows,
        })
    }
}

enum OverrideDisposition {
    Applies,
    OutOfScope,
    Stale(String),
}

/// An override applies when its scoping ids resolve in the payload and match
/// the request. Scoping ids that no longer resolve mark the override stale
/// (`InvalidOverride` condition): the quote falls back to the computed price
/// rather than failing.
fn override_disposition(
    ovr: &AircraftPricingOverride,
    req: &QuoteRequest,
    snapshot: &PricingSnapshot,
) -> OverrideDisposition {
    if let Some(class_id) = &ovr.class_id {
        if snapshot.payload.tier(class_id).is_none() {
            return OverrideDisposition::Stale(
                PricingError::InvalidOverride(format!("unknown tier '{class_id}'")).to_string(),
            );
        }
        if class_id != &req.tier_id {
            return OverrideDisposition::OutOfScope;
        }
    }
    if let Some(slug) = &ovr.location_slug {
        if snapshot.payload.location(slug).is_none() {
            return OverrideDisposition::Stale(
                PricingError::InvalidOverride(format!("unknown location '{slug}'")).to_string(),
            );
        }
        if req.location_id.as_deref() != Some(slug.as_str()) {
            return OverrideDisposition::OutOfScope;
        }
    }
    OverrideDisposition::Applies
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use aeroplan_catalog::UpsertOverrideRequest;

    fn service(default_band: Option<&str>) -> QuoteService {
        let store = Arc::new(CatalogStore::new());
        store.seed_demo_data();
        let publisher = Arc::new(SnapshotPublisher::new());
        publisher.publish("launch", &store.snapshot_state()).unwrap();
        QuoteService::new(
            store,
            publisher,
            &PricingConfig {
                default_usage_band: default_band.map(Into::into),
            },
        )
    }

    fn request(tier: &str, band: Option<&str>) -> QuoteRequest {
        QuoteRequest {
            tier_id: tier.into(),
            usage_band_id: band.map(Into::into),
            add_on_ids: vec![],
            location_id: None,
            aircraft_id: None,
            snapshot_id: None,
        }
    }

    #[test]
    fn test_quote_against_latest_snapshot() {
        let svc = service(None);
        let quote = svc.quote(&request("performance", Some("20-50"))).unwrap();
        assert_eq!(quote.total, Money::from_cents(239_250));
        assert_eq!(quote.snapshot_label, "launch");
        assert!(!quote.override_applied);
    }

    #[test]
    fn test_no_band_fails_closed_without_configured_default() {
        let svc = service(None);
        let err = svc.quote(&request("performance", None)).unwrap_err();
        assert!(matches!(err, PricingError::MissingInput(_)));
    }

    #[test]
    fn test_configured_default_band_is_applied() {
        let svc = service(Some("20-50"));
        let quote = svc.quote(&request("performance", None)).unwrap();
        assert_eq!(quote.total, Money::from_cents(239_250));
    }

    #[test]
    fn test_unknown_snapshot_id_is_not_found() {
        let svc = service(None);
        let mut req = request("performance", Some("20-50"));
        req.snapshot_id = Some(Uuid::new_v4());
        assert!(matches!(
            svc.quote(&req).unwrap_err(),
            PricingError::NotFound { kind: "snapshot", .. }
        ));
    }

    #[test]
    fn test_override_supersedes_computed_price() {
        let svc = service(None);
        let aircraft = Uuid::new_v4();
        svc.store.upsert_override(
            UpsertOverrideRequest {
                aircraft_id: aircraft,
                location_slug: None,
                class_id: None,
                override_monthly: Money::from_dollars(1200),
                override_hangar_cost: None,
                notes: String::new(),
            },
            "admin",
        );

        let mut req = request("performance", Some("20-50"));
        req.aircraft_id = Some(aircraft);
        let quote = svc.quote(&req).unwrap();
        assert!(quote.override_applied);
        assert_eq!(quote.total, Money::from_dollars(1200));
        // The computed breakdown is still reported alongside
        assert_eq!(quote.breakdown.total, Money::from_cents(239_250));
    }

    #[test]
    fn test_override_hangar_cost_replaces_location_cost() {
        let svc = service(None);
        let aircraft = Uuid::new_v4();
        svc.store.upsert_override(
            UpsertOverrideRequest {
                aircraft_id: aircraft,
                location_slug: None,
                class_id: None,
                override_monthly: Money::from_dollars(1200),
                override_hangar_cost: Some(Money::from_dollars(900)),
                notes: String::new(),
            },
            "admin",
        );

        let mut req = request("performance", Some("20-50"));
        req.aircraft_id = Some(aircraft);
        req.location_id = Some("sky-harbour".into());
        let quote = svc.quote(&req).unwrap();
        assert_eq!(quote.total, Money::from_dollars(2100));
    }

    #[test]
    fn test_out_of_scope_override_is_ignored() {
        let svc = service(None);
        let aircraft = Uuid::new_v4();
        svc.store.upsert_override(
            UpsertOverrideRequest {
                aircraft_id: aircraft,
                location_slug: None,
                class_id: Some("turbine".into()),
                override_monthly: Money::from_dollars(1200),
                override_hangar_cost: None,
                notes: String::new(),
            },
            "admin",
        );

        let mut req = request("performance", Some("20-50"));
        req.aircraft_id = Some(aircraft);
        let quote = svc.quote(&req).unwrap();
        assert!(!quote.override_applied);
        assert!(!quote.stale_override);
        assert_eq!(quote.total, Money::from_cents(239_250));
    }

    #[test]
    fn test_stale_override_falls_back_and_flags() {
        let svc = service(None);
        let aircraft = Uuid::new_v4();
        svc.store.upsert_override(
            UpsertOverrideRequest {
                aircraft_id: aircraft,
                location_slug: Some("closed-hangar".into()),
                class_id: None,
                override_monthly: Money::from_dollars(1200),
                override_hangar_cost: None,
                notes: String::new(),
            },
            "admin",
        );

        let mut req = request("performance", Some("20-50"));
        req.aircraft_id = Some(aircraft);
        let quote = svc.quote(&req).unwrap();
        assert!(!quote.override_applied);
        assert!(quote.stale_override);
        assert_eq!(quote.total, Money::from_cents(239_250));
    }

    #[test]
    fn test_matrix_rows_sorted_by_band() {
        let svc = service(None);
        let matrix = svc.matrix(&request("light", None)).unwrap();
        let ids: Vec<&str> = matrix.rows.iter().map(|r| r.usage_band_id.as_str()).collect();
        assert_eq!(ids, vec!["0-20", "20-50", "50+"]);
    }
}
