//! Money - integer minor units
//!
//! All prices and totals in the system are [`Money`], a wrapper over i64
//! cents. There is no floating-point money anywhere; arithmetic that could
//! overflow is checked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An amount of money in minor units (cents).
///
/// Serializes as a plain integer cent count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create from a cent count.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// The cent count.
    pub const fn as_cents(&self) -> i64 {
        self.0
    }

    /// Multiply a unit price by a quantity, `None` on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// Add two amounts, saturating at the i64 bounds.
    pub fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.saturating_add(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    /// Renders as major units with two decimals, e.g. `25.00` or `-0.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2500).to_string(), "25.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_checked_mul() {
        let price = Money::from_cents(2500);
        assert_eq!(price.checked_mul(2), Some(Money::from_cents(5000)));
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn test_serde_as_cents() {
        let m = Money::from_cents(2500);
        assert_eq!(serde_json::to_string(&m).unwrap(), "2500");
        let back: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(back, m);
    }
}
