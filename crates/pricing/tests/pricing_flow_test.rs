//! Integration test for the full catalog → publish → quote flow.
//! Everything runs in-memory; no external services required.

#[cfg(test)]
mod tests {
    use aeroplan_catalog::{CatalogStore, UpdateTierRequest, UpsertOverrideRequest};
    use aeroplan_core::config::PricingConfig;
    use aeroplan_core::Money;
    use aeroplan_pricing::{PricingSnapshot, QuoteRequest, QuoteService, SnapshotPublisher};
    use std::sync::Arc;
    use uuid::Uuid;

    fn quote_service() -> (Arc<CatalogStore>, Arc<SnapshotPublisher>, QuoteService) {
        let store = Arc::new(CatalogStore::new());
        store.seed_demo_data();
        let publisher = Arc::new(SnapshotPublisher::new());
        publisher
            .publish("launch", &store.snapshot_state())
            .unwrap();
        let service = QuoteService::new(
            store.clone(),
            publisher.clone(),
            &PricingConfig::default(),
        );
        (store, publisher, service)
    }

    fn request(tier: &str, band: &str) -> QuoteRequest {
        QuoteRequest {
            tier_id: tier.into(),
            usage_band_id: Some(band.into()),
            add_on_ids: vec![],
            location_id: None,
            aircraft_id: None,
            snapshot_id: None,
        }
    }

    #[test]
    fn test_worked_pricing_scenarios() {
        let (_store, _publisher, service) = quote_service();

        // Performance at 20-50 hours, nothing else: round(1650 × 1.45)
        let q1 = service.quote(&request("performance", "20-50")).unwrap();
        assert_eq!(q1.total, Money::from_cents(239_250));

        // Same plus the sky-harbour hangar
        let mut r2 = request("performance", "20-50");
        r2.location_id = Some("sky-harbour".into());
        let q2 = service.quote(&r2).unwrap();
        assert_eq!(q2.total, Money::from_cents(439_250));

        // Light at 50+ with two flat add-ons
        let mut r3 = request("light", "50+");
        r3.add_on_ids = vec!["database-updates".into(), "detailing".into()];
        let q3 = service.quote(&r3).unwrap();
        assert_eq!(q3.breakdown.usage_adjusted_price, Money::from_dollars(1615));
        assert_eq!(q3.breakdown.add_ons_total, Money::from_dollars(170));
        assert_eq!(q3.total, Money::from_dollars(1785));

        // Unknown tier: no partial result
        assert!(service.quote(&request("nonexistent", "0-20")).is_err());
    }

    #[test]
    fn test_override_bypasses_computed_price() {
        let (store, _publisher, service) = quote_service();
        let aircraft = Uuid::new_v4();
        store.upsert_override(
            UpsertOverrideRequest {
                aircraft_id: aircraft,
                location_slug: None,
                class_id: None,
                override_monthly: Money::from_dollars(1200),
                override_hangar_cost: None,
                notes: "Negotiated 2024 contract".into(),
            },
            "admin",
        );

        let mut req = request("performance", "20-50");
        req.aircraft_id = Some(aircraft);
        let quote = service.quote(&req).unwrap();
        assert!(quote.override_applied);
        assert_eq!(quote.total, Money::from_dollars(1200));
    }

    #[test]
    fn test_invoice_reproducible_from_pinned_snapshot() {
        let (store, publisher, service) = quote_service();

        let quoted = service.quote(&request("performance", "20-50")).unwrap();
        let pinned = quoted.snapshot_id;

        // Catalog changes and a new snapshot lands after the customer was quoted
        store
            .update_tier(
                "performance",
                UpdateTierRequest {
                    name: None,
                    base_monthly: Some(Money::from_dollars(1800)),
                    description: None,
                    features: None,
                    example_aircraft: None,
                    sort_order: None,
                    active: None,
                },
                "admin",
            )
            .unwrap();
        publisher
            .publish("price-rise", &store.snapshot_state())
            .unwrap();

        // Fresh quotes see the new price
        let fresh = service.quote(&request("performance", "20-50")).unwrap();
        assert_eq!(fresh.total, Money::from_cents(261_000));
        assert_ne!(fresh.snapshot_id, pinned);

        // The invoice for the original session reproduces the quoted figure
        let mut invoice_req = request("performance", "20-50");
        invoice_req.snapshot_id = Some(pinned);
        let invoiced = service.quote(&invoice_req).unwrap();
        assert_eq!(invoiced.total, quoted.total);
        assert_eq!(invoiced.total, Money::from_cents(239_250));
    }

    #[test]
    fn test_snapshot_payload_round_trips_exactly() {
        let (_store, publisher, _service) = quote_service();
        let snapshot = publisher.latest().unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: PricingSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.id, snapshot.id);
        assert_eq!(decoded.payload.tiers.len(), snapshot.payload.tiers.len());
        let tier = decoded.payload.tier("performance").unwrap();
        assert_eq!(tier.base_monthly, Money::from_dollars(1650));
    }
}
