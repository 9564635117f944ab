//! The pure price calculator.
//!
//! `tier base × usage multiplier + add-ons + hangar` against an immutable
//! snapshot payload. No I/O, no state, deterministic — safe to call on every
//! keystroke of an interactive configurator, and the same function reproduces
//! an invoice line server-side from the snapshot the customer was quoted
//! against.

use crate::snapshot::SnapshotPayload;
use aeroplan_catalog::AddOnPricing;
use aeroplan_core::{Money, PricingError, PricingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

/// Customer selections for one quote. `location_id` is the location slug;
/// `None` means "not yet selected", which is distinct from the zero-cost
/// own-storage location.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteInput {
    pub tier_id: String,
    #[serde(default)]
    pub usage_band_id: Option<String>,
    #[serde(default)]
    pub add_on_ids: Vec<String>,
    #[serde(default)]
    pub location_id: Option<String>,
}

/// One resolved add-on on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddOnLine {
    pub id: String,
    pub name: String,
    pub price: Money,
}

/// The priced breakdown. `hangar_cost: None` means no location was selected;
/// `Some(0)` means a free location (own storage) was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceBreakdown {
    pub base_price: Money,
    pub usage_adjusted_price: Money,
    pub add_ons_total: Money,
    pub add_on_lines: Vec<AddOnLine>,
    pub hangar_cost: Option<Money>,
    pub total: Money,
}

/// Compute the monthly price for one set of selections against a snapshot
/// payload.
///
/// - Unresolvable tier or location ids are configuration errors
///   (`NotFound`); tier lists are catalog selections, never free text.
/// - A missing usage band fails closed with `MissingInput`; the documented
///   default (if any) is applied by the quote service, one layer up.
/// - Unknown add-on ids are dropped, so saved selections survive catalog
///   evolution. Duplicate selections count once.
///
/// Rounding happens exactly once per money flow: at multiplier application
/// (usage band, percent-priced add-ons). All composition is exact integer
/// cents.
pub fn calculate_monthly_price(
    input: &QuoteInput,
    payload: &SnapshotPayload,
) -> PricingResult<PriceBreakdown> {
    let tier = payload
        .tier(&input.tier_id)
        .ok_or_else(|| PricingError::not_found("tier", &input.tier_id))?;

    let band_id = input
        .usage_band_id
        .as_deref()
        .ok_or(PricingError::MissingInput("usage_band_id"))?;
    let band = payload
        .band(band_id)
        .ok_or_else(|| PricingError::not_found("usage band", band_id))?;

    let base_price = tier.base_monthly;
    let usage_adjusted_price = base_price.apply_bps(band.multiplier_bps);

    let mut seen = HashSet::new();
    let mut add_on_lines = Vec::new();
    for id in &input.add_on_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        // Unknown ids are dropped by design.
        let Some(add_on) = payload.add_on(id) else {
            continue;
        };
        let price = match &add_on.pricing {
            AddOnPricing::Flat { amount } => *amount,
            AddOnPricing::PercentOfAdjusted { bps } => usage_adjusted_price.apply_bps(*bps),
        };
        add_on_lines.push(AddOnLine {
            id: add_on.id.clone(),
            name: add_on.name.clone(),
            price,
        });
    }
    let add_ons_total: Money = add_on_lines.iter().map(|l| l.price).sum();

    let hangar_cost = match input.location_id.as_deref() {
        Some(slug) => {
            let location = payload
                .location(slug)
                .ok_or_else(|| PricingError::not_found("location", slug))?;
            Some(location.hangar_cost_monthly)
        }
        None => None,
    };

    let total = usage_adjusted_price + add_ons_total + hangar_cost.unwrap_or(Money::ZERO);

    Ok(PriceBreakdown {
        base_price,
        usage_adjusted_price,
        add_ons_total,
        add_on_lines,
        hangar_cost,
        total,
    })
}

/// The same selections priced at every usage band, for the side-by-side
/// comparison view. Bands come out sorted by lower hour bound.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BandPrice {
    pub usage_band_id: String,
    pub multiplier_bps: u32,
    pub breakdown: PriceBreakdown,
}

pub fn price_matrix(input: &QuoteInput, payload: &SnapshotPayload) -> PricingResult<Vec<BandPrice>> {
    payload
        .bands_sorted()
        .into_iter()
        .map(|band| {
            let per_band = QuoteInput {
                usage_band_id: Some(band.id.clone()),
                ..input.clone()
            };
            calculate_monthly_price(&per_band, payload).map(|breakdown| BandPrice {
                usage_band_id: band.id,
                multiplier_bps: band.multiplier_bps,
                breakdown,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::test_payload;
    use aeroplan_core::PricingError;

    fn input(tier: &str, band: Option<&str>, add_ons: &[&str], location: Option<&str>) -> QuoteInput {
        QuoteInput {
            tier_id: tier.into(),
            usage_band_id: band.map(Into::into),
            add_on_ids: add_ons.iter().map(|s| s.to_string()).collect(),
            location_id: location.map(Into::into),
        }
    }

    #[test]
    fn test_performance_mid_band_no_extras() {
        // round(1650.00 × 1.45) = 2392.50
        let payload = test_payload();
        let b = calculate_monthly_price(&input("performance", Some("20-50"), &[], None), &payload)
            .unwrap();
        assert_eq!(b.base_price, Money::from_dollars(1650));
        assert_eq!(b.usage_adjusted_price, Money::from_cents(239_250));
        assert_eq!(b.add_ons_total, Money::ZERO);
        assert_eq!(b.hangar_cost, None);
        assert_eq!(b.total, Money::from_cents(239_250));
    }

    #[test]
    fn test_hangar_composition_is_exact() {
        let payload = test_payload();
        let without =
            calculate_monthly_price(&input("performance", Some("20-50"), &[], None), &payload)
                .unwrap();
        let with = calculate_monthly_price(
            &input("performance", Some("20-50"), &[], Some("sky-harbour")),
            &payload,
        )
        .unwrap();
        assert_eq!(with.hangar_cost, Some(Money::from_dollars(2000)));
        assert_eq!(with.total, without.total + Money::from_dollars(2000));
        assert_eq!(with.total, Money::from_cents(439_250));
    }

    #[test]
    fn test_light_high_band_with_add_ons() {
        // round(850 × 1.9) = 1615; add-ons 50 + 120 = 170; total 1785
        let payload = test_payload();
        let b = calculate_monthly_price(
            &input("light", Some("50+"), &["database-updates", "detailing"], None),
            &payload,
        )
        .unwrap();
        assert_eq!(b.usage_adjusted_price, Money::from_dollars(1615));
        assert_eq!(b.add_ons_total, Money::from_dollars(170));
        assert_eq!(b.total, Money::from_dollars(1785));
    }

    #[test]
    fn test_unknown_tier_is_not_found() {
        let payload = test_payload();
        let err =
            calculate_monthly_price(&input("nonexistent", Some("0-20"), &[], None), &payload)
                .unwrap_err();
        assert!(matches!(err, PricingError::NotFound { kind: "tier", .. }));
    }

    #[test]
    fn test_unknown_location_is_not_found() {
        let payload = test_payload();
        let err = calculate_monthly_price(
            &input("light", Some("0-20"), &[], Some("atlantis")),
            &payload,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::NotFound { kind: "location", .. }));
    }

    #[test]
    fn test_missing_band_fails_closed() {
        let payload = test_payload();
        let err = calculate_monthly_price(&input("light", None, &[], None), &payload).unwrap_err();
        assert!(matches!(err, PricingError::MissingInput(_)));
    }

    #[test]
    fn test_unknown_add_on_tolerated() {
        let payload = test_payload();
        let with_unknown = calculate_monthly_price(
            &input("light", Some("0-20"), &["detailing", "retired-addon"], None),
            &payload,
        )
        .unwrap();
        let without = calculate_monthly_price(
            &input("light", Some("0-20"), &["detailing"], None),
            &payload,
        )
        .unwrap();
        assert_eq!(with_unknown.add_ons_total, without.add_ons_total);
        assert_eq!(with_unknown.total, without.total);
    }

    #[test]
    fn test_duplicate_add_on_counted_once() {
        let payload = test_payload();
        let b = calculate_monthly_price(
            &input("light", Some("0-20"), &["detailing", "detailing"], None),
            &payload,
        )
        .unwrap();
        assert_eq!(b.add_on_lines.len(), 1);
        assert_eq!(b.add_ons_total, Money::from_dollars(120));
    }

    #[test]
    fn test_add_on_additivity() {
        let payload = test_payload();
        let one = calculate_monthly_price(
            &input("performance", Some("20-50"), &["detailing"], None),
            &payload,
        )
        .unwrap();
        let two = calculate_monthly_price(
            &input(
                "performance",
                Some("20-50"),
                &["detailing", "database-updates"],
                None,
            ),
            &payload,
        )
        .unwrap();
        assert_eq!(two.total, one.total + Money::from_dollars(50));
        assert!(two.add_ons_total >= one.add_ons_total);
    }

    #[test]
    fn test_percent_add_on_tracks_adjusted_price() {
        // concierge is 5% of the usage-adjusted price
        let payload = test_payload();
        let b = calculate_monthly_price(
            &input("performance", Some("20-50"), &["concierge"], None),
            &payload,
        )
        .unwrap();
        // 5% of 2392.50 = 119.625 → 119.63 half-up
        assert_eq!(b.add_ons_total, Money::from_cents(11_963));
        assert_eq!(b.total, Money::from_cents(239_250 + 11_963));
    }

    #[test]
    fn test_own_storage_is_free_but_selected() {
        let payload = test_payload();
        let b = calculate_monthly_price(
            &input("light", Some("0-20"), &[], Some("none")),
            &payload,
        )
        .unwrap();
        // Selected-and-free is distinct from not-selected
        assert_eq!(b.hangar_cost, Some(Money::ZERO));
    }

    #[test]
    fn test_determinism() {
        let payload = test_payload();
        let q = input(
            "turbine",
            Some("50+"),
            &["concierge", "detailing"],
            Some("sky-harbour"),
        );
        let a = calculate_monthly_price(&q, &payload).unwrap();
        let b = calculate_monthly_price(&q, &payload).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotonicity_in_usage() {
        let payload = test_payload();
        let rows = price_matrix(&input("performance", None, &[], None), &payload).unwrap();
        assert_eq!(rows.len(), 3);
        for pair in rows.windows(2) {
            assert!(pair[1].breakdown.total >= pair[0].breakdown.total);
        }
    }
}
