//! Internal margin analysis over the pricing assumptions.
//!
//! Administrator-only: relates customer-facing revenue (per tier × band) to
//! the operating cost model. Never feeds back into the quoted price.

use aeroplan_catalog::{CatalogState, PricingAssumptions};
use aeroplan_core::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One tier × band margin line.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarginRow {
    pub tier_id: String,
    pub tier_name: String,
    pub usage_band_id: String,
    /// Usage-adjusted service price, excluding add-ons and hangar.
    pub revenue: Money,
    pub operating_cost: Money,
    pub card_fee: Money,
    pub margin: Money,
    pub margin_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarginReport {
    pub generated_at: DateTime<Utc>,
    pub assumptions: PricingAssumptions,
    pub rows: Vec<MarginRow>,
}

/// Fixed monthly operating cost per managed aircraft under the given
/// assumptions. Annual items are spread evenly across 12 months.
fn monthly_operating_cost(a: &PricingAssumptions) -> Money {
    let labor = Money::from_cents(a.labor_rate_hourly.cents() * a.labor_hours_monthly as i64);
    let avionics_monthly = Money::from_cents(a.avionics_database_annual.cents() / 12);
    labor
        + a.cleaning_supplies_monthly
        + a.per_aircraft_overhead_monthly
        + a.cfi_allocation_monthly
        + avionics_monthly
}

/// Build the margin report for every active tier at every usage band.
pub fn margin_report(state: &CatalogState) -> MarginReport {
    let assumptions = state.assumptions.clone();
    let operating_cost = monthly_operating_cost(&assumptions);

    let mut bands = state.usage_bands.clone();
    bands.sort_by_key(|b| b.lower_hours);

    let mut rows = Vec::new();
    for tier in state.tiers.iter().filter(|t| t.active) {
        for band in &bands {
            let revenue = tier.base_monthly.apply_bps(band.multiplier_bps);
            let card_fee = revenue.apply_bps(assumptions.card_fee_bps);
            let margin = revenue - operating_cost - card_fee;
            let margin_percent = if revenue.cents() > 0 {
                margin.cents() as f64 / revenue.cents() as f64 * 100.0
            } else {
                0.0
            };
            rows.push(MarginRow {
                tier_id: tier.id.clone(),
                tier_name: tier.name.clone(),
                usage_band_id: band.id.clone(),
                revenue,
                operating_cost,
                card_fee,
                margin,
                margin_percent,
            });
        }
    }

    MarginReport {
        generated_at: Utc::now(),
        assumptions,
        rows,
    }
}
