//! Integer-cent currency arithmetic.
//!
//! All monetary amounts in the engine are US cents held in an `i64`. Usage
//! multipliers and percentage fees are basis points (10_000 = ×1.00), so the
//! only rounding anywhere is the single half-up step in [`Money::apply_bps`].
//! Everything else composes by exact integer addition.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Basis points per whole unit (×1.00).
pub const BPS_SCALE: i128 = 10_000;

/// A monetary amount in integer US cents.
///
/// Serializes as a bare integer of cents, so snapshot payloads round-trip
/// without any floating-point representation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole-dollar constructor, mostly for seed data and tests.
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply by a basis-point factor, rounding half-up to the nearest
    /// cent. This is the engine's single rounding point; callers must not
    /// re-round the result.
    pub fn apply_bps(self, bps: u32) -> Money {
        let n = self.0 as i128 * bps as i128;
        let q = n / BPS_SCALE;
        let r = n % BPS_SCALE;
        if r.abs() * 2 >= BPS_SCALE {
            Money((q + n.signum()) as i64)
        } else {
            Money(q as i64)
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bps_rounds_half_up() {
        // 1650.00 × 1.45 = 2392.50 exactly
        assert_eq!(
            Money::from_dollars(1650).apply_bps(14_500),
            Money::from_cents(239_250)
        );
        // 0.01 × 1.45 = 0.0145 → 0.01
        assert_eq!(Money::from_cents(1).apply_bps(14_500), Money::from_cents(1));
        // 0.01 × 1.50 = 0.015 → rounds up to 0.02
        assert_eq!(Money::from_cents(1).apply_bps(15_000), Money::from_cents(2));
        // identity multiplier
        assert_eq!(
            Money::from_cents(123_456).apply_bps(10_000),
            Money::from_cents(123_456)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(239_250).to_string(), "$2392.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1200).to_string(), "-$12.00");
    }

    #[test]
    fn test_serde_as_cents() {
        let m: Money = serde_json::from_str("165000").unwrap();
        assert_eq!(m, Money::from_dollars(1650));
        assert_eq!(serde_json::to_string(&m).unwrap(), "165000");
    }
}
