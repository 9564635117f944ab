//! Catalog domain types — tiers, usage bands, add-ons, locations, cost
//! assumptions, per-aircraft overrides, and the audit log.

use aeroplan_core::{Money, PricingError, PricingResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Reserved location slug meaning "customer provides own storage".
/// Prices as zero hangar cost and is excluded from hangar-partner listings.
pub const OWN_STORAGE_SLUG: &str = "none";

// ─── Tier ──────────────────────────────────────────────────────────────────

/// A management service class ("Light", "Performance", "Turbine").
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tier {
    /// Stable slug. Immutable once referenced by a published snapshot.
    pub id: String,
    pub name: String,
    pub base_monthly: Money,
    pub description: String,
    #[serde(default)]
    pub features: Vec<TierFeature>,
    /// Example aircraft shown next to the tier on the marketing surface.
    #[serde(default)]
    pub example_aircraft: Vec<String>,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TierFeature {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub included: bool,
}

// ─── Usage band ────────────────────────────────────────────────────────────

/// A monthly flight-hour bracket with its price multiplier in basis points
/// (10_000 = ×1.00). Bands form a non-overlapping, exhaustive cover of
/// [0, ∞); `upper_hours: None` means unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsageBand {
    pub id: String,
    pub lower_hours: u32,
    pub upper_hours: Option<u32>,
    pub multiplier_bps: u32,
}

/// Validate that a band set covers [0, ∞) without gaps or overlaps and
/// carries unique ids. Bands may arrive in any order.
pub fn validate_bands(bands: &[UsageBand]) -> PricingResult<()> {
    if bands.is_empty() {
        return Err(PricingError::Validation(
            "usage band set must not be empty".into(),
        ));
    }

    let mut sorted: Vec<&UsageBand> = bands.iter().collect();
    sorted.sort_by_key(|b| b.lower_hours);

    let mut seen = std::collections::HashSet::new();
    for band in &sorted {
        if !seen.insert(band.id.as_str()) {
            return Err(PricingError::Validation(format!(
                "duplicate usage band id '{}'",
                band.id
            )));
        }
        if band.multiplier_bps == 0 {
            return Err(PricingError::Validation(format!(
                "usage band '{}' has a zero multiplier",
                band.id
            )));
        }
    }

    if sorted[0].lower_hours != 0 {
        return Err(PricingError::Validation(
            "usage bands must start at 0 hours".into(),
        ));
    }

    for pair in sorted.windows(2) {
        match pair[0].upper_hours {
            Some(upper) if upper == pair[1].lower_hours => {}
            Some(upper) => {
                return Err(PricingError::Validation(format!(
                    "usage bands '{}' and '{}' do not meet: {} vs {}",
                    pair[0].id, pair[1].id, upper, pair[1].lower_hours
                )));
            }
            None => {
                return Err(PricingError::Validation(format!(
                    "unbounded usage band '{}' must be last",
                    pair[0].id
                )));
            }
        }
    }

    if sorted[sorted.len() - 1].upper_hours.is_some() {
        return Err(PricingError::Validation(
            "last usage band must be unbounded".into(),
        ));
    }

    Ok(())
}

// ─── Add-on ────────────────────────────────────────────────────────────────

/// An optional service, togglable independently of tier and band.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pricing: AddOnPricing,
    /// Cosmetic grouping only.
    pub category: String,
    pub active: bool,
}

/// How an add-on prices: a flat monthly amount, or a computed cost
/// evaluated against the usage-adjusted price of the same quote.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AddOnPricing {
    Flat { amount: Money },
    PercentOfAdjusted { bps: u32 },
}

// ─── Location ──────────────────────────────────────────────────────────────

/// A hangar/storage option. The slug is the stable pricing identifier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub hangar_cost_monthly: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Pricing assumptions ───────────────────────────────────────────────────

/// Global cost parameters for internal margin analysis. Singleton; never an
/// input to the customer-facing price.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricingAssumptions {
    pub labor_rate_hourly: Money,
    pub labor_hours_monthly: u32,
    /// Card-processing fee as basis points of revenue.
    pub card_fee_bps: u32,
    pub cfi_allocation_monthly: Money,
    pub cleaning_supplies_monthly: Money,
    pub per_aircraft_overhead_monthly: Money,
    pub avionics_database_annual: Money,
    pub updated_at: DateTime<Utc>,
}

impl Default for PricingAssumptions {
    fn default() -> Self {
        Self {
            labor_rate_hourly: Money::from_dollars(38),
            labor_hours_monthly: 10,
            card_fee_bps: 290,
            cfi_allocation_monthly: Money::from_dollars(150),
            cleaning_supplies_monthly: Money::from_dollars(45),
            per_aircraft_overhead_monthly: Money::from_dollars(210),
            avionics_database_annual: Money::from_dollars(540),
            updated_at: Utc::now(),
        }
    }
}

// ─── Aircraft pricing override ─────────────────────────────────────────────

/// Manual price exception for a single aircraft (legacy/negotiated pricing).
/// When present and in scope it supersedes the computed result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AircraftPricingOverride {
    pub aircraft_id: Uuid,
    /// Optional scoping: only applies when the quote selects this location.
    #[serde(default)]
    pub location_slug: Option<String>,
    /// Optional scoping: only applies to this tier.
    #[serde(default)]
    pub class_id: Option<String>,
    pub override_monthly: Money,
    #[serde(default)]
    pub override_hangar_cost: Option<Money>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ─── Catalog state ─────────────────────────────────────────────────────────

/// A deep copy of the live catalog, the input to snapshot publishing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogState {
    pub tiers: Vec<Tier>,
    pub usage_bands: Vec<UsageBand>,
    pub add_ons: Vec<AddOn>,
    pub locations: Vec<Location>,
    pub assumptions: PricingAssumptions,
}

// ─── Request DTOs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTierRequest {
    pub id: String,
    pub name: String,
    pub base_monthly: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<TierFeature>,
    #[serde(default)]
    pub example_aircraft: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTierRequest {
    pub name: Option<String>,
    pub base_monthly: Option<Money>,
    pub description: Option<String>,
    pub features: Option<Vec<TierFeature>>,
    pub example_aircraft: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReplaceUsageBandsRequest {
    pub bands: Vec<UsageBand>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAddOnRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pricing: AddOnPricing,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAddOnRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub pricing: Option<AddOnPricing>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLocationRequest {
    pub name: String,
    pub slug: String,
    pub hangar_cost_monthly: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub hangar_cost_monthly: Option<Money>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAssumptionsRequest {
    pub labor_rate_hourly: Option<Money>,
    pub labor_hours_monthly: Option<u32>,
    pub card_fee_bps: Option<u32>,
    pub cfi_allocation_monthly: Option<Money>,
    pub cleaning_supplies_monthly: Option<Money>,
    pub per_aircraft_overhead_monthly: Option<Money>,
    pub avionics_database_annual: Option<Money>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertOverrideRequest {
    pub aircraft_id: Uuid,
    #[serde(default)]
    pub location_slug: Option<String>,
    #[serde(default)]
    pub class_id: Option<String>,
    pub override_monthly: Money,
    #[serde(default)]
    pub override_hangar_cost: Option<Money>,
    #[serde(default)]
    pub notes: String,
}

// ─── Audit log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Deactivate,
    Delete,
    Publish,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub actor: String,
    pub action: AuditAction,
    pub entity: String,
    pub entity_id: String,
    #[schema(value_type = Object)]
    pub detail: serde_json::Value,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(id: &str, lower: u32, upper: Option<u32>, bps: u32) -> UsageBand {
        UsageBand {
            id: id.into(),
            lower_hours: lower,
            upper_hours: upper,
            multiplier_bps: bps,
        }
    }

    #[test]
    fn test_valid_band_set() {
        let bands = vec![
            band("20-50", 20, Some(50), 14_500),
            band("0-20", 0, Some(20), 10_000),
            band("50+", 50, None, 19_000),
        ];
        assert!(validate_bands(&bands).is_ok());
    }

    #[test]
    fn test_band_gap_rejected() {
        let bands = vec![
            band("0-20", 0, Some(20), 10_000),
            band("30+", 30, None, 19_000),
        ];
        assert!(validate_bands(&bands).is_err());
    }

    #[test]
    fn test_band_overlap_rejected() {
        let bands = vec![
            band("0-20", 0, Some(20), 10_000),
            band("15+", 15, None, 19_000),
        ];
        assert!(validate_bands(&bands).is_err());
    }

    #[test]
    fn test_band_must_start_at_zero() {
        let bands = vec![band("10+", 10, None, 10_000)];
        assert!(validate_bands(&bands).is_err());
    }

    #[test]
    fn test_last_band_must_be_unbounded() {
        let bands = vec![band("0-20", 0, Some(20), 10_000)];
        assert!(validate_bands(&bands).is_err());
    }
}
