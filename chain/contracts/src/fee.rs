//! Fee engine
//!
//! Holds the current deposit fee and turns gross deposits into net credits.
//! Changing the fee affects only deposits made afterwards.

use rust_decimal::Decimal;
use types::fee::FeePercentage;
use types::numeric::Amount;

use crate::errors::BankError;

/// Net amount credited for `gross` under `fee`: `gross - floor(gross * fee / 1000)`.
pub fn compute_net(gross: Amount, fee: FeePercentage) -> Amount {
    fee.net_of(gross)
}

/// Breakdown of a gross deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    pub gross: Amount,
    pub fee: Amount,
    pub net: Amount,
}

#[derive(Debug, Clone)]
pub struct FeeEngine {
    current: FeePercentage,
}

impl FeeEngine {
    pub fn new(initial: FeePercentage) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> FeePercentage {
        self.current
    }

    /// Effective fraction withheld (fee 20 -> 0.020).
    pub fn rate(&self) -> Decimal {
        self.current.rate()
    }

    /// Split `gross` using the current fee.
    pub fn quote(&self, gross: Amount) -> FeeQuote {
        let fee = self.current.fee_on(gross);
        FeeQuote {
            gross,
            fee,
            net: gross - fee,
        }
    }

    /// Replace the fee, returning the previous one.
    ///
    /// Values above [`FeePercentage::MAX`] are rejected and leave the fee unchanged.
    pub fn update(&mut self, new_fee: u64) -> Result<FeePercentage, BankError> {
        let validated = FeePercentage::new(new_fee).map_err(|_| BankError::InvalidParameter {
            value: new_fee,
            max: FeePercentage::MAX,
        })?;
        Ok(std::mem::replace(&mut self.current, validated))
    }
}
