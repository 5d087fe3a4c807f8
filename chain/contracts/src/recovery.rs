//! Asset recovery — full-balance sweeps out of custody
//!
//! A sweep moves the whole custody balance of one asset to a recipient. It
//! does not separate stray balances from funds backing active deposits; the
//! overlap is reported as `stranded` so operators can see what they took.

use tracing::warn;
use types::asset::Asset;
use types::ids::Address;
use types::numeric::Amount;

use crate::errors::BankError;
use crate::gateway::AssetGateway;

/// Outcome of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub asset: Asset,
    /// Amount moved to the recipient (zero for an empty balance).
    pub amount: Amount,
    /// Portion of `amount` that was backing active deposits.
    pub stranded: Amount,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

/// Transfer the entire custody balance of `asset` to `to`.
///
/// An empty balance is a no-op: no transfer is issued and a zero sweep is
/// returned. `locked` is the sum of active deposits in `asset`.
pub fn sweep<G: AssetGateway + ?Sized>(
    gateway: &mut G,
    asset: &Asset,
    to: &Address,
    locked: Amount,
) -> Result<Sweep, BankError> {
    let balance = gateway.custody_balance(asset);
    if balance == 0 {
        return Ok(Sweep {
            asset: *asset,
            amount: 0,
            stranded: 0,
        });
    }

    let stranded = balance.min(locked);
    if stranded > 0 {
        warn!(
            asset = %asset,
            stranded,
            "Sweep includes funds backing active deposits"
        );
    }

    gateway
        .push_to(asset, to, balance)
        .map_err(|reason| BankError::TransferFailed {
            asset: asset.to_string(),
            reason,
        })?;

    Ok(Sweep {
        asset: *asset,
        amount: balance,
        stranded,
    })
}
