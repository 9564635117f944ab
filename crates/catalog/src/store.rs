//! In-memory catalog store backed by DashMap.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store.
//! This provides the same API surface for development and testing. The
//! pricing engine never reads this store directly — it consumes immutable
//! snapshot payloads published from [`CatalogStore::snapshot_state`].

use crate::models::*;
use aeroplan_core::{Money, PricingError, PricingResult};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

/// Thread-safe in-memory store for tiers, usage bands, add-ons, locations,
/// cost assumptions, per-aircraft overrides, and the audit log.
pub struct CatalogStore {
    tiers: DashMap<String, Tier>,
    usage_bands: RwLock<Vec<UsageBand>>,
    add_ons: DashMap<String, AddOn>,
    locations: DashMap<String, Location>,
    assumptions: RwLock<PricingAssumptions>,
    overrides: DashMap<Uuid, AircraftPricingOverride>,
    audit_log: DashMap<Uuid, AuditLogEntry>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        info!("Catalog store initialized (in-memory, development mode)");
        Self {
            tiers: DashMap::new(),
            usage_bands: RwLock::new(Vec::new()),
            add_ons: DashMap::new(),
            locations: DashMap::new(),
            assumptions: RwLock::new(PricingAssumptions::default()),
            overrides: DashMap::new(),
            audit_log: DashMap::new(),
        }
    }

    // ─── Tiers ─────────────────────────────────────────────────────────────

    pub fn list_tiers(&self) -> Vec<Tier> {
        let mut tiers: Vec<Tier> = self.tiers.iter().map(|r| r.value().clone()).collect();
        tiers.sort_by_key(|t| t.sort_order);
        tiers
    }

    pub fn get_tier(&self, id: &str) -> Option<Tier> {
        self.tiers.get(id).map(|r| r.value().clone())
    }

    pub fn create_tier(&self, req: CreateTierRequest, actor: &str) -> PricingResult<Tier> {
        if req.base_monthly.is_negative() {
            return Err(PricingError::Validation(
                "tier base_monthly must be non-negative".into(),
            ));
        }
        if self.tiers.contains_key(&req.id) {
            return Err(PricingError::Validation(format!(
                "tier id '{}' already exists",
                req.id
            )));
        }
        let now = Utc::now();
        let tier = Tier {
            id: req.id,
            name: req.name,
            base_monthly: req.base_monthly,
            description: req.description,
            features: req.features,
            example_aircraft: req.example_aircraft,
            sort_order: req.sort_order,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.tiers.insert(tier.id.clone(), tier.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "tier",
            &tier.id,
            serde_json::json!({"name": &tier.name}),
        );
        Ok(tier)
    }

    pub fn update_tier(
        &self,
        id: &str,
        req: UpdateTierRequest,
        actor: &str,
    ) -> PricingResult<Tier> {
        if let Some(base) = req.base_monthly {
            if base.is_negative() {
                return Err(PricingError::Validation(
                    "tier base_monthly must be non-negative".into(),
                ));
            }
        }
        let mut entry = self
            .tiers
            .get_mut(id)
            .ok_or_else(|| PricingError::not_found("tier", id))?;
        let t = entry.value_mut();
        if let Some(name) = req.name {
            t.name = name;
        }
        if let Some(base) = req.base_monthly {
            t.base_monthly = base;
        }
        if let Some(description) = req.description {
            t.description = description;
        }
        if let Some(features) = req.features {
            t.features = features;
        }
        if let Some(aircraft) = req.example_aircraft {
            t.example_aircraft = aircraft;
        }
        if let Some(sort_order) = req.sort_order {
            t.sort_order = sort_order;
        }
        if let Some(active) = req.active {
            t.active = active;
        }
        t.updated_at = Utc::now();
        let updated = t.clone();
        drop(entry);
        self.log_audit(actor, AuditAction::Update, "tier", id, serde_json::json!({}));
        Ok(updated)
    }

    /// Soft removal: historical snapshots keep resolving the tier, the live
    /// catalog stops offering it.
    pub fn deactivate_tier(&self, id: &str, actor: &str) -> PricingResult<Tier> {
        let mut entry = self
            .tiers
            .get_mut(id)
            .ok_or_else(|| PricingError::not_found("tier", id))?;
        entry.value_mut().active = false;
        entry.value_mut().updated_at = Utc::now();
        let tier = entry.value().clone();
        drop(entry);
        self.log_audit(
            actor,
            AuditAction::Deactivate,
            "tier",
            id,
            serde_json::json!({}),
        );
        Ok(tier)
    }

    /// Hard delete. Callers must first check the tier is not referenced by
    /// any published snapshot and deactivate instead when it is.
    pub fn delete_tier(&self, id: &str, actor: &str) -> bool {
        let removed = self.tiers.remove(id).is_some();
        if removed {
            self.log_audit(actor, AuditAction::Delete, "tier", id, serde_json::json!({}));
        }
        removed
    }

    // ─── Usage bands ───────────────────────────────────────────────────────

    pub fn usage_bands(&self) -> Vec<UsageBand> {
        let mut bands = self.usage_bands.read().clone();
        bands.sort_by_key(|b| b.lower_hours);
        bands
    }

    /// Replace the whole band set. Exhaustiveness over [0, ∞) is a property
    /// of the set, so bands are only ever written as a unit.
    pub fn replace_usage_bands(
        &self,
        bands: Vec<UsageBand>,
        actor: &str,
    ) -> PricingResult<Vec<UsageBand>> {
        validate_bands(&bands)?;
        let count = bands.len();
        *self.usage_bands.write() = bands;
        self.log_audit(
            actor,
            AuditAction::Update,
            "usage_bands",
            "all",
            serde_json::json!({"count": count}),
        );
        Ok(self.usage_bands())
    }

    // ─── Add-ons ───────────────────────────────────────────────────────────

    pub fn list_add_ons(&self) -> Vec<AddOn> {
        let mut add_ons: Vec<AddOn> = self.add_ons.iter().map(|r| r.value().clone()).collect();
        add_ons.sort_by(|a, b| a.id.cmp(&b.id));
        add_ons
    }

    pub fn get_add_on(&self, id: &str) -> Option<AddOn> {
        self.add_ons.get(id).map(|r| r.value().clone())
    }

    pub fn create_add_on(&self, req: CreateAddOnRequest, actor: &str) -> PricingResult<AddOn> {
        validate_add_on_pricing(&req.pricing)?;
        if self.add_ons.contains_key(&req.id) {
            return Err(PricingError::Validation(format!(
                "add-on id '{}' already exists",
                req.id
            )));
        }
        let add_on = AddOn {
            id: req.id,
            name: req.name,
            description: req.description,
            pricing: req.pricing,
            category: req.category,
            active: true,
        };
        self.add_ons.insert(add_on.id.clone(), add_on.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "add_on",
            &add_on.id,
            serde_json::json!({"name": &add_on.name}),
        );
        Ok(add_on)
    }

    pub fn update_add_on(
        &self,
        id: &str,
        req: UpdateAddOnRequest,
        actor: &str,
    ) -> PricingResult<AddOn> {
        if let Some(pricing) = &req.pricing {
            validate_add_on_pricing(pricing)?;
        }
        let mut entry = self
            .add_ons
            .get_mut(id)
            .ok_or_else(|| PricingError::not_found("add-on", id))?;
        let a = entry.value_mut();
        if let Some(name) = req.name {
            a.name = name;
        }
        if let Some(description) = req.description {
            a.description = description;
        }
        if let Some(pricing) = req.pricing {
            a.pricing = pricing;
        }
        if let Some(category) = req.category {
            a.category = category;
        }
        if let Some(active) = req.active {
            a.active = active;
        }
        let updated = a.clone();
        drop(entry);
        self.log_audit(
            actor,
            AuditAction::Update,
            "add_on",
            id,
            serde_json::json!({}),
        );
        Ok(updated)
    }

    /// Add-ons may be hard-deleted: saved selections referencing a removed
    /// add-on are dropped by the calculator rather than erroring.
    pub fn delete_add_on(&self, id: &str, actor: &str) -> bool {
        let removed = self.add_ons.remove(id).is_some();
        if removed {
            self.log_audit(
                actor,
                AuditAction::Delete,
                "add_on",
                id,
                serde_json::json!({}),
            );
        }
        removed
    }

    // ─── Locations ─────────────────────────────────────────────────────────

    pub fn list_locations(&self) -> Vec<Location> {
        let mut locations: Vec<Location> =
            self.locations.iter().map(|r| r.value().clone()).collect();
        locations.sort_by(|a, b| a.slug.cmp(&b.slug));
        locations
    }

    /// Hangar partners shown on the public site: active locations minus the
    /// reserved own-storage entry.
    pub fn partner_locations(&self) -> Vec<Location> {
        self.list_locations()
            .into_iter()
            .filter(|l| l.active && l.slug != OWN_STORAGE_SLUG)
            .collect()
    }

    pub fn get_location(&self, slug: &str) -> Option<Location> {
        self.locations.get(slug).map(|r| r.value().clone())
    }

    pub fn create_location(
        &self,
        req: CreateLocationRequest,
        actor: &str,
    ) -> PricingResult<Location> {
        if req.hangar_cost_monthly.is_negative() {
            return Err(PricingError::Validation(
                "hangar_cost_monthly must be non-negative".into(),
            ));
        }
        if self.locations.contains_key(&req.slug) {
            return Err(PricingError::Validation(format!(
                "location slug '{}' already exists",
                req.slug
            )));
        }
        let now = Utc::now();
        let location = Location {
            id: Uuid::new_v4(),
            name: req.name,
            slug: req.slug,
            hangar_cost_monthly: req.hangar_cost_monthly,
            description: req.description,
            amenities: req.amenities,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.locations
            .insert(location.slug.clone(), location.clone());
        self.log_audit(
            actor,
            AuditAction::Create,
            "location",
            &location.slug,
            serde_json::json!({"name": &location.name}),
        );
        Ok(location)
    }

    pub fn update_location(
        &self,
        slug: &str,
        req: UpdateLocationRequest,
        actor: &str,
    ) -> PricingResult<Location> {
        if let Some(cost) = req.hangar_cost_monthly {
            if cost.is_negative() {
                return Err(PricingError::Validation(
                    "hangar_cost_monthly must be non-negative".into(),
                ));
            }
        }
        let mut entry = self
            .locations
            .get_mut(slug)
            .ok_or_else(|| PricingError::not_found("location", slug))?;
        let l = entry.value_mut();
        if let Some(name) = req.name {
            l.name = name;
        }
        if let Some(cost) = req.hangar_cost_monthly {
            l.hangar_cost_monthly = cost;
        }
        if let Some(description) = req.description {
            l.description = description;
        }
        if let Some(amenities) = req.amenities {
            l.amenities = amenities;
        }
        if let Some(active) = req.active {
            l.active = active;
        }
        l.updated_at = Utc::now();
        let updated = l.clone();
        drop(entry);
        self.log_audit(
            actor,
            AuditAction::Update,
            "location",
            slug,
            serde_json::json!({}),
        );
        Ok(updated)
    }

    pub fn delete_location(&self, slug: &str, actor: &str) -> PricingResult<()> {
        if slug == OWN_STORAGE_SLUG {
            return Err(PricingError::Validation(format!(
                "location '{}' is reserved and cannot be deleted",
                OWN_STORAGE_SLUG
            )));
        }
        if self.locations.remove(slug).is_none() {
            return Err(PricingError::not_found("location", slug));
        }
        self.log_audit(
            actor,
            AuditAction::Delete,
            "location",
            slug,
            serde_json::json!({}),
        );
        Ok(())
    }

    // ─── Assumptions ───────────────────────────────────────────────────────

    pub fn assumptions(&self) -> PricingAssumptions {
        self.assumptions.read().clone()
    }

    pub fn update_assumptions(
        &self,
        req: UpdateAssumptionsRequest,
        actor: &str,
    ) -> PricingAssumptions {
        let mut guard = self.assumptions.write();
        if let Some(v) = req.labor_rate_hourly {
            guard.labor_rate_hourly = v;
        }
        if let Some(v) = req.labor_hours_monthly {
            guard.labor_hours_monthly = v;
        }
        if let Some(v) = req.card_fee_bps {
            guard.card_fee_bps = v;
        }
        if let Some(v) = req.cfi_allocation_monthly {
            guard.cfi_allocation_monthly = v;
        }
        if let Some(v) = req.cleaning_supplies_monthly {
            guard.cleaning_supplies_monthly = v;
        }
        if let Some(v) = req.per_aircraft_overhead_monthly {
            guard.per_aircraft_overhead_monthly = v;
        }
        if let Some(v) = req.avionics_database_annual {
            guard.avionics_database_annual = v;
        }
        guard.updated_at = Utc::now();
        let updated = guard.clone();
        drop(guard);
        self.log_audit(
            actor,
            AuditAction::Update,
            "assumptions",
            "singleton",
            serde_json::json!({}),
        );
        updated
    }

    // ─── Overrides ─────────────────────────────────────────────────────────

    pub fn list_overrides(&self) -> Vec<AircraftPricingOverride> {
        let mut overrides: Vec<AircraftPricingOverride> =
            self.overrides.iter().map(|r| r.value().clone()).collect();
        overrides.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        overrides
    }

    pub fn override_for(&self, aircraft_id: Uuid) -> Option<AircraftPricingOverride> {
        self.overrides.get(&aircraft_id).map(|r| r.value().clone())
    }

    pub fn upsert_override(
        &self,
        req: UpsertOverrideRequest,
        actor: &str,
    ) -> AircraftPricingOverride {
        let now = Utc::now();
        let created_at = self
            .overrides
            .get(&req.aircraft_id)
            .map(|r| r.value().created_at)
            .unwrap_or(now);
        let ovr = AircraftPricingOverride {
            aircraft_id: req.aircraft_id,
            location_slug: req.location_slug,
            class_id: req.class_id,
            override_monthly: req.override_monthly,
            override_hangar_cost: req.override_hangar_cost,
            notes: req.notes,
            created_at,
            updated_at: now,
        };
        self.overrides.insert(ovr.aircraft_id, ovr.clone());
        self.log_audit(
            actor,
            AuditAction::Update,
            "override",
            &ovr.aircraft_id.to_string(),
            serde_json::json!({"override_monthly": ovr.override_monthly}),
        );
        ovr
    }

    pub fn delete_override(&self, aircraft_id: Uuid, actor: &str) -> bool {
        let removed = self.overrides.remove(&aircraft_id).is_some();
        if removed {
            self.log_audit(
                actor,
                AuditAction::Delete,
                "override",
                &aircraft_id.to_string(),
                serde_json::json!({}),
            );
        }
        removed
    }

    // ─── Audit log ─────────────────────────────────────────────────────────

    pub fn log_audit(
        &self,
        actor: &str,
        action: AuditAction,
        entity: &str,
        entity_id: &str,
        detail: serde_json::Value,
    ) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            action,
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
            detail,
            at: Utc::now(),
        };
        self.audit_log.insert(entry.id, entry);
    }

    pub fn audit_log(&self) -> Vec<AuditLogEntry> {
        let mut entries: Vec<AuditLogEntry> =
            self.audit_log.iter().map(|r| r.value().clone()).collect();
        entries.sort_by(|a, b| b.at.cmp(&a.at));
        entries
    }

    // ─── Snapshot source ───────────────────────────────────────────────────

    /// Deep copy of the live catalog for the snapshot publisher.
    pub fn snapshot_state(&self) -> CatalogState {
        CatalogState {
            tiers: self.list_tiers(),
            usage_bands: self.usage_bands(),
            add_ons: self.list_add_ons(),
            locations: self.list_locations(),
            assumptions: self.assumptions(),
        }
    }

    // ─── Seed data ─────────────────────────────────────────────────────────

    /// Seed the demo fleet catalog: 3 tiers, 3 usage bands, 4 add-ons,
    /// 3 locations (including the reserved own-storage entry).
    pub fn seed_demo_data(&self) {
        let actor = "seed";

        let _ = self.create_tier(
            CreateTierRequest {
                id: "light".into(),
                name: "Light".into(),
                base_monthly: Money::from_dollars(850),
                description: "Piston singles and light twins".into(),
                features: vec![
                    TierFeature {
                        name: "Scheduled maintenance coordination".into(),
                        description: String::new(),
                        included: true,
                    },
                    TierFeature {
                        name: "Monthly wash and interior detail".into(),
                        description: String::new(),
                        included: true,
                    },
                    TierFeature {
                        name: "Dedicated crew coordination".into(),
                        description: String::new(),
                        included: false,
                    },
                ],
                example_aircraft: vec!["Cirrus SR22".into(), "Cessna 182".into()],
                sort_order: 1,
            },
            actor,
        );

        let _ = self.create_tier(
            CreateTierRequest {
                id: "performance".into(),
                name: "Performance".into(),
                base_monthly: Money::from_dollars(1650),
                description: "High-performance pistons and turboprop singles".into(),
                features: vec![
                    TierFeature {
                        name: "Scheduled maintenance coordination".into(),
                        description: String::new(),
                        included: true,
                    },
                    TierFeature {
                        name: "Avionics database management".into(),
                        description: String::new(),
                        included: true,
                    },
                    TierFeature {
                        name: "Dedicated crew coordination".into(),
                        description: String::new(),
                        included: true,
                    },
                ],
                example_aircraft: vec!["TBM 960".into(), "Piper M600".into()],
                sort_order: 2,
            },
            actor,
        );

        let _ = self.create_tier(
            CreateTierRequest {
                id: "turbine".into(),
                name: "Turbine".into(),
                base_monthly: Money::from_dollars(3200),
                description: "Light jets and turboprop twins".into(),
                features: vec![
                    TierFeature {
                        name: "Full dispatch and trip support".into(),
                        description: String::new(),
                        included: true,
                    },
                    TierFeature {
                        name: "Dedicated crew coordination".into(),
                        description: String::new(),
                        included: true,
                    },
                ],
                example_aircraft: vec!["Phenom 100".into(), "King Air 260".into()],
                sort_order: 3,
            },
            actor,
        );

        let _ = self.replace_usage_bands(
            vec![
                UsageBand {
                    id: "0-20".into(),
                    lower_hours: 0,
                    upper_hours: Some(20),
                    multiplier_bps: 10_000,
                },
                UsageBand {
                    id: "20-50".into(),
                    lower_hours: 20,
                    upper_hours: Some(50),
                    multiplier_bps: 14_500,
                },
                UsageBand {
                    id: "50+".into(),
                    lower_hours: 50,
                    upper_hours: None,
                    multiplier_bps: 19_000,
                },
            ],
            actor,
        );

        let _ = self.create_add_on(
            CreateAddOnRequest {
                id: "detailing".into(),
                name: "Premium detailing".into(),
                description: "Quarterly deep clean with ceramic top-up".into(),
                pricing: AddOnPricing::Flat {
                    amount: Money::from_dollars(120),
                },
                category: "care".into(),
            },
            actor,
        );
        let _ = self.create_add_on(
            CreateAddOnRequest {
                id: "database-updates".into(),
                name: "Navdata subscription management".into(),
                description: String::new(),
                pricing: AddOnPricing::Flat {
                    amount: Money::from_dollars(50),
                },
                category: "avionics".into(),
            },
            actor,
        );
        let _ = self.create_add_on(
            CreateAddOnRequest {
                id: "oxygen-service".into(),
                name: "Oxygen service".into(),
                description: String::new(),
                pricing: AddOnPricing::Flat {
                    amount: Money::from_dollars(75),
                },
                category: "care".into(),
            },
            actor,
        );
        let _ = self.create_add_on(
            CreateAddOnRequest {
                id: "concierge".into(),
                name: "Owner concierge".into(),
                description: "Trip planning and scheduling desk".into(),
                pricing: AddOnPricing::PercentOfAdjusted { bps: 500 },
                category: "service".into(),
            },
            actor,
        );

        let _ = self.create_location(
            CreateLocationRequest {
                name: "Own storage".into(),
                slug: OWN_STORAGE_SLUG.into(),
                hangar_cost_monthly: Money::ZERO,
                description: "Customer provides own hangar or tie-down".into(),
                amenities: vec![],
            },
            actor,
        );
        let _ = self.create_location(
            CreateLocationRequest {
                name: "Sky Harbour".into(),
                slug: "sky-harbour".into(),
                hangar_cost_monthly: Money::from_dollars(2000),
                description: "Private hangar campus, 24/7 line service".into(),
                amenities: vec![
                    "Climate controlled".into(),
                    "Line service".into(),
                    "Owner lounge".into(),
                ],
            },
            actor,
        );
        let _ = self.create_location(
            CreateLocationRequest {
                name: "Falcon Field".into(),
                slug: "falcon-field".into(),
                hangar_cost_monthly: Money::from_dollars(1450),
                description: "Shared community hangar".into(),
                amenities: vec!["Shared hangar".into(), "Fuel discount".into()],
            },
            actor,
        );

        info!("Seeded demo catalog: 3 tiers, 3 usage bands, 4 add-ons, 3 locations");
    }
}

fn validate_add_on_pricing(pricing: &AddOnPricing) -> PricingResult<()> {
    match pricing {
        AddOnPricing::Flat { amount } if amount.is_negative() => Err(PricingError::Validation(
            "add-on flat amount must be non-negative".into(),
        )),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_crud_and_deactivate() {
        let store = CatalogStore::new();
        store.seed_demo_data();

        let tier = store.get_tier("performance").unwrap();
        assert_eq!(tier.base_monthly, Money::from_dollars(1650));
        assert!(tier.active);

        let updated = store
            .update_tier(
                "performance",
                UpdateTierRequest {
                    name: None,
                    base_monthly: Some(Money::from_dollars(1700)),
                    description: None,
                    features: None,
                    example_aircraft: None,
                    sort_order: None,
                    active: None,
                },
                "admin",
            )
            .unwrap();
        assert_eq!(updated.base_monthly, Money::from_dollars(1700));

        let deactivated = store.deactivate_tier("performance", "admin").unwrap();
        assert!(!deactivated.active);
        // Still resolvable for historical snapshots
        assert!(store.get_tier("performance").is_some());
    }

    #[test]
    fn test_duplicate_tier_id_rejected() {
        let store = CatalogStore::new();
        store.seed_demo_data();
        let err = store.create_tier(
            CreateTierRequest {
                id: "light".into(),
                name: "Duplicate".into(),
                base_monthly: Money::from_dollars(1),
                description: String::new(),
                features: vec![],
                example_aircraft: vec![],
                sort_order: 9,
            },
            "admin",
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_band_replace_validates_set() {
        let store = CatalogStore::new();
        let err = store.replace_usage_bands(
            vec![UsageBand {
                id: "10+".into(),
                lower_hours: 10,
                upper_hours: None,
                multiplier_bps: 10_000,
            }],
            "admin",
        );
        assert!(err.is_err());
        assert!(store.usage_bands().is_empty());
    }

    #[test]
    fn test_partner_locations_exclude_own_storage() {
        let store = CatalogStore::new();
        store.seed_demo_data();

        let partners = store.partner_locations();
        assert!(partners.iter().all(|l| l.slug != OWN_STORAGE_SLUG));
        assert_eq!(partners.len(), 2);

        // Reserved slug still resolves as a pricing input with cost 0
        let own = store.get_location(OWN_STORAGE_SLUG).unwrap();
        assert_eq!(own.hangar_cost_monthly, Money::ZERO);

        // And cannot be deleted
        assert!(store.delete_location(OWN_STORAGE_SLUG, "admin").is_err());
    }

    #[test]
    fn test_override_upsert_and_delete() {
        let store = CatalogStore::new();
        let aircraft = Uuid::new_v4();

        let ovr = store.upsert_override(
            UpsertOverrideRequest {
                aircraft_id: aircraft,
                location_slug: None,
                class_id: None,
                override_monthly: Money::from_dollars(1200),
                override_hangar_cost: None,
                notes: "Legacy contract".into(),
            },
            "admin",
        );
        assert_eq!(ovr.override_monthly, Money::from_dollars(1200));
        assert!(store.override_for(aircraft).is_some());

        assert!(store.delete_override(aircraft, "admin"));
        assert!(store.override_for(aircraft).is_none());
    }

    #[test]
    fn test_audit_log_records_mutations() {
        let store = CatalogStore::new();
        store.seed_demo_data();
        let entries = store.audit_log();
        assert!(!entries.is_empty());
        assert!(entries.iter().any(|e| e.entity == "tier"));
        assert!(entries.iter().any(|e| e.entity == "usage_bands"));
    }
}
