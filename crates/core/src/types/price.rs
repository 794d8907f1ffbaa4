//! Type-safe price representation using decimal arithmetic.
//!
//! Shopify transmits money amounts as decimal strings to preserve currency
//! precision. Binary floating point would accumulate representation error
//! across bulk recomputations, so prices are held as `rust_decimal::Decimal`
//! end to end. The `serde-with-str` feature keeps the wire format a string.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A variant price in the shop's currency.
///
/// Stored as an exact decimal, serialized as a decimal string
/// (e.g. `"19.99"`), which is the format the Admin API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to two decimal places using half-up midpoint rounding.
    ///
    /// Half-up (`MidpointAwayFromZero`) is the conventional currency
    /// rounding mode and is applied consistently everywhere a derived
    /// price is produced.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Format as a two-decimal amount string (e.g. `"21.99"`).
    ///
    /// This is the exact representation submitted to the price mutation.
    #[must_use]
    pub fn to_amount_string(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    #[test]
    fn test_amount_string_pads_to_two_decimals() {
        assert_eq!(price("5").to_amount_string(), "5.00");
        assert_eq!(price("19.9").to_amount_string(), "19.90");
        assert_eq!(price("21.99").to_amount_string(), "21.99");
    }

    #[test]
    fn test_rounded_half_up() {
        // 21.989 has no midpoint; plain truncation would give 21.98
        assert_eq!(price("21.989").rounded(), price("21.99"));
        // Exact midpoint rounds away from zero
        assert_eq!(price("0.015").rounded(), price("0.02"));
        assert_eq!(price("2.345").rounded(), price("2.35"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&price("19.99")).unwrap();
        assert_eq!(json, "\"19.99\"");

        let back: Price = serde_json::from_str("\"7.50\"").unwrap();
        assert_eq!(back, price("7.50"));
    }
}
