//! Protocol fee rate and fee calculation
//!
//! The fee rate is a percentage in `[0, 10]`. Each offer snapshots the rate
//! at creation time; later governance changes never affect it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lower bound of the governable fee rate, in percent.
pub const MIN_FEE_RATE: Decimal = Decimal::ZERO;

/// Upper bound of the governable fee rate, in percent.
pub const MAX_FEE_RATE: Decimal = Decimal::TEN;

/// Rejected fee rate outside the governable bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("fee rate outside [0, 10]: {0}")]
pub struct InvalidFeeRate(pub Decimal);

/// Protocol fee rate as a percentage of the traded amount.
///
/// Constructed only through [`FeeRate::try_new`], so a held value is always
/// within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRate(Decimal);

impl FeeRate {
    /// Validate and wrap a percentage rate.
    pub fn try_new(rate: Decimal) -> Result<Self, InvalidFeeRate> {
        if rate < MIN_FEE_RATE || rate > MAX_FEE_RATE {
            return Err(InvalidFeeRate(rate));
        }
        Ok(Self(rate))
    }

    /// Zero-fee rate.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Fee charged on `amount` at this rate: `amount * rate / 100`.
    pub fn fee_on(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }

    /// Get the percentage value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_fee_rate_bounds() {
        assert!(FeeRate::try_new(Decimal::ZERO).is_ok());
        assert!(FeeRate::try_new(Decimal::TEN).is_ok());
        assert!(FeeRate::try_new(dec("0.8")).is_ok());

        assert_eq!(
            FeeRate::try_new(dec("-0.1")),
            Err(InvalidFeeRate(dec("-0.1")))
        );
        assert_eq!(
            FeeRate::try_new(dec("10.5")),
            Err(InvalidFeeRate(dec("10.5")))
        );
    }

    #[test]
    fn test_fee_on() {
        let rate = FeeRate::try_new(dec("0.8")).unwrap();
        assert_eq!(rate.fee_on(Decimal::from(50)), dec("0.4"));
        assert_eq!(rate.fee_on(Decimal::from(2000)), Decimal::from(16));
    }

    #[test]
    fn test_zero_rate_charges_nothing() {
        let rate = FeeRate::zero();
        assert_eq!(rate.fee_on(Decimal::from(1000)), Decimal::ZERO);
    }

    #[test]
    fn test_fee_rate_serialization() {
        let rate = FeeRate::try_new(dec("0.8")).unwrap();
        let json = serde_json::to_string(&rate).unwrap();
        let deserialized: FeeRate = serde_json::from_str(&json).unwrap();
        assert_eq!(rate, deserialized);
    }

    #[test]
    fn test_invalid_fee_rate_display() {
        let err = InvalidFeeRate(dec("12"));
        assert_eq!(err.to_string(), "fee rate outside [0, 10]: 12");
    }
}
