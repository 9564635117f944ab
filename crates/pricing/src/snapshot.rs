//! Immutable pricing snapshots.
//!
//! Public pricing surfaces never read the live catalog: an administrator
//! publishes a snapshot — a frozen structural copy of every tier, band,
//! add-on, location, and the cost assumptions — and quotes resolve against
//! that. Later catalog edits cannot move a price a customer was already
//! quoted, and an invoice is reproducible from the snapshot it was quoted
//! against.

use aeroplan_catalog::{
    validate_bands, AddOn, CatalogState, Location, PricingAssumptions, Tier, UsageBand,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use aeroplan_core::{PricingError, PricingResult};

/// The frozen catalog copy inside a snapshot. Embedded copies, not foreign
/// keys — deliberate denormalization so the payload stays resolvable no
/// matter what happens to the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SnapshotPayload {
    pub tiers: Vec<Tier>,
    pub usage_bands: Vec<UsageBand>,
    pub add_ons: Vec<AddOn>,
    pub locations: Vec<Location>,
    pub assumptions: PricingAssumptions,
}

impl From<CatalogState> for SnapshotPayload {
    fn from(state: CatalogState) -> Self {
        Self {
            tiers: state.tiers,
            usage_bands: state.usage_bands,
            add_ons: state.add_ons,
            locations: state.locations,
            assumptions: state.assumptions,
        }
    }
}

impl SnapshotPayload {
    pub fn tier(&self, id: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn band(&self, id: &str) -> Option<&UsageBand> {
        self.usage_bands.iter().find(|b| b.id == id)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    pub fn location(&self, slug: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.slug == slug)
    }

    pub fn bands_sorted(&self) -> Vec<UsageBand> {
        let mut bands = self.usage_bands.clone();
        bands.sort_by_key(|b| b.lower_hours);
        bands
    }
}

/// One published, immutable pricing record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricingSnapshot {
    pub id: Uuid,
    pub label: String,
    pub published_at: DateTime<Utc>,
    pub payload: SnapshotPayload,
}

/// Insert-only snapshot registry. Publishing is a single atomic insert;
/// readers see either the prior latest or the new one, never a partial
/// record. There is no retract or amend — administrators supersede.
pub struct SnapshotPublisher {
    snapshots: DashMap<Uuid, PricingSnapshot>,
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self {
            snapshots: DashMap::new(),
        }
    }

    /// Freeze the given catalog state under a label. Fails without any
    /// visible side effect if the catalog is not in a publishable state.
    pub fn publish(
        &self,
        label: &str,
        state: &CatalogState,
    ) -> PricingResult<PricingSnapshot> {
        validate_bands(&state.usage_bands)?;
        if !state.tiers.iter().any(|t| t.active) {
            return Err(PricingError::Validation(
                "cannot publish a snapshot with no active tiers".into(),
            ));
        }

        let snapshot = PricingSnapshot {
            id: Uuid::new_v4(),
            label: label.to_string(),
            published_at: Utc::now(),
            payload: SnapshotPayload::from(state.clone()),
        };
        self.snapshots.insert(snapshot.id, snapshot.clone());
        info!(
            snapshot_id = %snapshot.id,
            label = %snapshot.label,
            tiers = snapshot.payload.tiers.len(),
            "Published pricing snapshot"
        );
        Ok(snapshot)
    }

    /// The snapshot with the greatest `published_at` (id breaks ties).
    pub fn latest(&self) -> Option<PricingSnapshot> {
        self.snapshots
            .iter()
            .max_by_key(|r| (r.value().published_at, r.value().id))
            .map(|r| r.value().clone())
    }

    pub fn get(&self, id: Uuid) -> Option<PricingSnapshot> {
        self.snapshots.get(&id).map(|r| r.value().clone())
    }

    /// All snapshots, newest first.
    pub fn list(&self) -> Vec<PricingSnapshot> {
        let mut snapshots: Vec<PricingSnapshot> =
            self.snapshots.iter().map(|r| r.value().clone()).collect();
        snapshots.sort_by(|a, b| (b.published_at, b.id).cmp(&(a.published_at, a.id)));
        snapshots
    }

    /// Whether any published snapshot embeds the given tier. Referenced
    /// tiers must never be hard-deleted, only deactivated.
    pub fn references_tier(&self, tier_id: &str) -> bool {
        self.snapshots
            .iter()
            .any(|r| r.value().payload.tier(tier_id).is_some())
    }
}

#[cfg(test)]
pub(crate) fn test_payload() -> SnapshotPayload {
    let store = aeroplan_catalog::CatalogStore::new();
    store.seed_demo_data();
    SnapshotPayload::from(store.snapshot_state())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate_monthly_price, QuoteInput};
    use aeroplan_catalog::{CatalogStore, UpdateTierRequest};
    use aeroplan_core::Money;

    #[test]
    fn test_publish_and_latest() {
        let store = CatalogStore::new();
        store.seed_demo_data();
        let publisher = SnapshotPublisher::new();

        let first = publisher.publish("launch", &store.snapshot_state()).unwrap();
        let second = publisher.publish("spring", &store.snapshot_state()).unwrap();

        assert_eq!(publisher.list().len(), 2);
        let latest = publisher.latest().unwrap();
        assert_eq!(latest.id, second.id);
        assert!(publisher.get(first.id).is_some());
        assert!(publisher.references_tier("performance"));
        assert!(!publisher.references_tier("ghost"));
    }

    #[test]
    fn test_publish_rejects_empty_catalog() {
        let store = CatalogStore::new();
        let publisher = SnapshotPublisher::new();
        assert!(publisher.publish("empty", &store.snapshot_state()).is_err());
        assert!(publisher.latest().is_none());
    }

    #[test]
    fn test_snapshot_immutability() {
        let store = CatalogStore::new();
        store.seed_demo_data();
        let publisher = SnapshotPublisher::new();
        let snapshot = publisher.publish("frozen", &store.snapshot_state()).unwrap();

        let input = QuoteInput {
            tier_id: "performance".into(),
            usage_band_id: Some("20-50".into()),
            add_on_ids: vec![],
            location_id: None,
        };
        let before = calculate_monthly_price(&input, &snapshot.payload).unwrap();

        // Reprice the live catalog after publishing
        store
            .update_tier(
                "performance",
                UpdateTierRequest {
                    name: None,
                    base_monthly: Some(Money::from_dollars(9999)),
                    description: None,
                    features: None,
                    example_aircraft: None,
                    sort_order: None,
                    active: None,
                },
                "admin",
            )
            .unwrap();

        let frozen = publisher.get(snapshot.id).unwrap();
        let after = calculate_monthly_price(&input, &frozen.payload).unwrap();
        assert_eq!(before, after);
        assert_eq!(after.total, Money::from_cents(239_250));
    }
}
