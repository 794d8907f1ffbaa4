//! Bulk price-edit rules and their arithmetic.
//!
//! An [`EditRule`] describes one transformation applied uniformly to a set
//! of selected products: raise or lower the current price by a percentage
//! or by a flat amount. Applying a rule is a pure function of the current
//! price; all I/O lives in the admin crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::price::Price;

/// How the magnitude of an edit is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Magnitude is a percentage of the current price.
    Percent,
    /// Magnitude is a flat amount in the shop's currency.
    Amount,
}

/// Whether an edit raises or lowers the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditDirection {
    Increase,
    Decrease,
}

/// A single price-transformation rule applied to every selected product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRule {
    pub mode: EditMode,
    pub direction: EditDirection,
    /// Non-negative size of the change (percentage points or currency
    /// amount, depending on `mode`).
    pub magnitude: Decimal,
}

/// Errors raised when a rule is structurally invalid.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Magnitude must be non-negative; direction carries the sign.
    #[error("magnitude must be non-negative, got {0}")]
    NegativeMagnitude(Decimal),
}

impl EditRule {
    /// Create a rule, rejecting negative magnitudes.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NegativeMagnitude` if `magnitude < 0`.
    pub fn new(
        mode: EditMode,
        direction: EditDirection,
        magnitude: Decimal,
    ) -> Result<Self, RuleError> {
        let rule = Self {
            mode,
            direction,
            magnitude,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Check the rule's structural invariants.
    ///
    /// Deserialized rules must be validated before use; serde cannot
    /// express the non-negativity constraint.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::NegativeMagnitude` if `magnitude < 0`.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.magnitude < Decimal::ZERO {
            return Err(RuleError::NegativeMagnitude(self.magnitude));
        }
        Ok(())
    }

    /// Compute the new price for a product under this rule.
    ///
    /// Pure and deterministic. The result is clamped to be non-negative
    /// (a decrease never produces a negative price) and rounded to two
    /// decimal places half-up (see [`Price::rounded`]).
    #[must_use]
    pub fn apply(&self, price: Price) -> Price {
        let current = price.amount();

        let delta = match self.mode {
            EditMode::Percent => current * self.magnitude / Decimal::ONE_HUNDRED,
            EditMode::Amount => self.magnitude,
        };

        let raw = match self.direction {
            EditDirection::Increase => current + delta,
            EditDirection::Decrease => current - delta,
        };

        Price::new(raw.max(Decimal::ZERO)).rounded()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rule(mode: EditMode, direction: EditDirection, magnitude: &str) -> EditRule {
        EditRule::new(mode, direction, dec(magnitude)).unwrap()
    }

    #[test]
    fn test_percent_increase_formula() {
        // newPrice == round2(price * (1 + magnitude / 100))
        let r = rule(EditMode::Percent, EditDirection::Increase, "25");
        assert_eq!(r.apply(price("40.00")), price("50.00"));
        assert_eq!(r.apply(price("0.00")), price("0.00"));
    }

    #[test]
    fn test_percent_increase_rounds_half_up() {
        // 19.99 * 1.10 = 21.989 -> 21.99
        let r = rule(EditMode::Percent, EditDirection::Increase, "10");
        assert_eq!(r.apply(price("19.99")), price("21.99"));
    }

    #[test]
    fn test_amount_decrease_clamps_at_zero() {
        // 5.00 - 10.00 would be negative; clamp to 0.00
        let r = rule(EditMode::Amount, EditDirection::Decrease, "10");
        assert_eq!(r.apply(price("5.00")), price("0.00"));
        assert_eq!(r.apply(price("5.00")).to_amount_string(), "0.00");
    }

    #[test]
    fn test_percent_decrease_over_hundred_clamps() {
        let r = rule(EditMode::Percent, EditDirection::Decrease, "150");
        assert_eq!(r.apply(price("12.34")), price("0.00"));
    }

    #[test]
    fn test_amount_increase() {
        let r = rule(EditMode::Amount, EditDirection::Increase, "2.50");
        assert_eq!(r.apply(price("7.49")), price("9.99"));
    }

    #[test]
    fn test_apply_is_deterministic() {
        let r = rule(EditMode::Percent, EditDirection::Increase, "10");
        let p = price("19.99");
        assert_eq!(r.apply(p), r.apply(p));
        assert_eq!(r.apply(p), r.apply(p));
    }

    #[test]
    fn test_zero_magnitude_is_identity_after_rounding() {
        let r = rule(EditMode::Amount, EditDirection::Decrease, "0");
        assert_eq!(r.apply(price("10.00")), price("10.00"));
    }

    #[test]
    fn test_negative_magnitude_rejected() {
        let result = EditRule::new(EditMode::Percent, EditDirection::Increase, dec("-1"));
        assert!(matches!(result, Err(RuleError::NegativeMagnitude(_))));
    }

    #[test]
    fn test_rule_serde_wire_format() {
        let r = rule(EditMode::Percent, EditDirection::Increase, "10");
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["mode"], "percent");
        assert_eq!(json["direction"], "increase");
        assert_eq!(json["magnitude"], "10");
    }
}
