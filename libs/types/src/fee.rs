//! Deposit fee parameter
//!
//! The fee is stored and validated as a whole number in `[0, 100]` but is
//! applied per-mille: a fee of `100` withholds 10% of the gross amount.
//! Fee amounts are floored, so rounding always favours the custodian.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::TypesError;
use crate::numeric::Amount;

/// Bounded fee setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct FeePercentage(u64);

impl FeePercentage {
    /// Largest accepted setting.
    pub const MAX: u64 = 100;

    /// Divisor applied to `gross * fee`.
    pub const DENOMINATOR: u128 = 1000;

    pub const ZERO: FeePercentage = FeePercentage(0);

    /// Validate and wrap a raw fee value.
    pub fn new(value: u64) -> Result<Self, TypesError> {
        if value > Self::MAX {
            return Err(TypesError::FeeOutOfRange {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Fee withheld from `gross`: `floor(gross * fee / 1000)`.
    ///
    /// Computed by splitting `gross` on the denominator so the product never
    /// overflows, even for `gross == u128::MAX`.
    pub fn fee_on(&self, gross: Amount) -> Amount {
        let fee = self.0 as u128;
        let whole = gross / Self::DENOMINATOR;
        let rest = gross % Self::DENOMINATOR;
        whole * fee + (rest * fee) / Self::DENOMINATOR
    }

    /// Amount credited after the fee is withheld.
    pub fn net_of(&self, gross: Amount) -> Amount {
        gross - self.fee_on(gross)
    }

    /// Effective rate as a fraction of gross (e.g. `20` -> `0.020`).
    pub fn rate(&self) -> Decimal {
        Decimal::new(self.0 as i64, 3)
    }
}

impl TryFrom<u64> for FeePercentage {
    type Error = TypesError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeePercentage> for u64 {
    fn from(fee: FeePercentage) -> Self {
        fee.0
    }
}

impl fmt::Display for FeePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(FeePercentage::new(0).is_ok());
        assert!(FeePercentage::new(100).is_ok());
        assert_eq!(
            FeePercentage::new(101),
            Err(TypesError::FeeOutOfRange { value: 101, max: 100 })
        );
    }

    #[test]
    fn test_fee_is_per_mille() {
        let fee = FeePercentage::new(20).unwrap();
        assert_eq!(fee.fee_on(50), 1);
        assert_eq!(fee.net_of(50), 49);

        let max = FeePercentage::new(100).unwrap();
        assert_eq!(max.net_of(1000), 900);
    }

    #[test]
    fn test_floor_favours_custodian() {
        let fee = FeePercentage::new(1).unwrap();
        // 999 * 1 / 1000 floors to zero
        assert_eq!(fee.fee_on(999), 0);
        assert_eq!(fee.fee_on(1000), 1);
    }

    #[test]
    fn test_no_overflow_at_max_amount() {
        let fee = FeePercentage::new(100).unwrap();
        let fee_amount = fee.fee_on(u128::MAX);
        assert_eq!(fee_amount, u128::MAX / 10);
        assert!(fee.net_of(u128::MAX) <= u128::MAX);
    }

    #[test]
    fn test_rate() {
        let fee = FeePercentage::new(20).unwrap();
        assert_eq!(fee.rate(), Decimal::new(2, 2));
        assert_eq!(FeePercentage::ZERO.rate(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let fee: FeePercentage = serde_json::from_str("100").unwrap();
        assert_eq!(fee.value(), 100);
        assert!(serde_json::from_str::<FeePercentage>("101").is_err());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Split arithmetic agrees with the direct formula wherever it fits.
            #[test]
            fn fee_matches_direct_formula(gross in 0u128..=u128::MAX / 100, f in 0u64..=100) {
                let fee = FeePercentage::new(f).unwrap();
                prop_assert_eq!(fee.fee_on(gross), gross * f as u128 / 1000);
                prop_assert_eq!(fee.fee_on(gross) + fee.net_of(gross), gross);
            }
        }
    }
}
