//! Asset movement capability
//!
//! The bank never touches balances directly: it pulls value into custody and
//! pushes it back out through an [`AssetGateway`]. A failed movement must be
//! reported, never swallowed, so the bank can abort atomically.

use std::collections::{HashMap, HashSet};

use types::asset::Asset;
use types::ids::Address;
use types::numeric::Amount;

use crate::errors::GatewayError;

/// Token transfer capability consumed by the bank.
pub trait AssetGateway {
    /// Move `amount` of `asset` from `from` into custody.
    ///
    /// For tokens this spends an allowance previously granted to the bank;
    /// for the native currency it models value attached to the call.
    fn pull_from(&mut self, asset: &Asset, from: &Address, amount: Amount)
        -> Result<(), GatewayError>;

    /// Move `amount` of `asset` out of custody to `to`.
    fn push_to(&mut self, asset: &Asset, to: &Address, amount: Amount)
        -> Result<(), GatewayError>;

    /// Balance of `asset` currently held in custody.
    fn custody_balance(&self, asset: &Asset) -> Amount;
}

/// In-process gateway holding balances in maps.
///
/// Used by tests and simulations. Transfers of an asset can be made to fail
/// with [`InMemoryGateway::reject_transfers`] to model a paused or hostile
/// token contract.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    /// (asset, holder) -> balance outside custody
    holdings: HashMap<(Asset, Address), Amount>,
    /// (token, owner) -> amount the bank may pull
    allowances: HashMap<(Address, Address), Amount>,
    /// asset -> balance inside custody
    custody: HashMap<Asset, Amount>,
    rejecting: HashSet<Asset>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `holder` with freshly created `amount` of `asset`.
    pub fn mint(&mut self, asset: Asset, holder: Address, amount: Amount) {
        let balance = self.holdings.entry((asset, holder)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Balance of `holder` outside custody.
    pub fn balance_of(&self, asset: &Asset, holder: &Address) -> Amount {
        self.holdings.get(&(*asset, *holder)).copied().unwrap_or(0)
    }

    /// Let the bank pull up to `amount` of `token` from `owner`.
    pub fn approve(&mut self, token: Address, owner: Address, amount: Amount) {
        self.allowances.insert((token, owner), amount);
    }

    pub fn allowance(&self, token: &Address, owner: &Address) -> Amount {
        self.allowances.get(&(*token, *owner)).copied().unwrap_or(0)
    }

    /// Plain transfer into custody, bypassing the bank (an airdrop or a
    /// misdirected send). Needs no allowance.
    pub fn send_to_custody(
        &mut self,
        asset: &Asset,
        from: &Address,
        amount: Amount,
    ) -> Result<(), GatewayError> {
        self.move_in(asset, from, amount, false)
    }

    /// Make every transfer of `asset` fail (`true`) or succeed again (`false`).
    pub fn reject_transfers(&mut self, asset: Asset, reject: bool) {
        if reject {
            self.rejecting.insert(asset);
        } else {
            self.rejecting.remove(&asset);
        }
    }

    fn check_accepting(&self, asset: &Asset) -> Result<(), GatewayError> {
        if self.rejecting.contains(asset) {
            return Err(GatewayError::Rejected {
                asset: asset.to_string(),
            });
        }
        Ok(())
    }

    fn move_in(
        &mut self,
        asset: &Asset,
        from: &Address,
        amount: Amount,
        spend_allowance: bool,
    ) -> Result<(), GatewayError> {
        self.check_accepting(asset)?;

        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(GatewayError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let allowance_key = match asset {
            Asset::Token(token) if spend_allowance => Some((*token, *from)),
            _ => None,
        };
        if let Some(key) = allowance_key {
            let approved = self.allowances.get(&key).copied().unwrap_or(0);
            if approved < amount {
                return Err(GatewayError::InsufficientAllowance {
                    required: amount,
                    approved,
                });
            }
        }

        let new_custody = self
            .custody_balance(asset)
            .checked_add(amount)
            .ok_or(GatewayError::Overflow)?;

        // All checks passed: commit
        self.holdings.insert((*asset, *from), available - amount);
        if let Some(key) = allowance_key {
            if let Some(approved) = self.allowances.get_mut(&key) {
                *approved -= amount;
            }
        }
        self.custody.insert(*asset, new_custody);
        Ok(())
    }
}

impl AssetGateway for InMemoryGateway {
    fn pull_from(
        &mut self,
        asset: &Asset,
        from: &Address,
        amount: Amount,
    ) -> Result<(), GatewayError> {
        self.move_in(asset, from, amount, true)
    }

    fn push_to(&mut self, asset: &Asset, to: &Address, amount: Amount) -> Result<(), GatewayError> {
        self.check_accepting(asset)?;

        let available = self.custody_balance(asset);
        if available < amount {
            return Err(GatewayError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let new_holding = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(GatewayError::Overflow)?;

        self.custody.insert(*asset, available - amount);
        self.holdings.insert((*asset, *to), new_holding);
        Ok(())
    }

    fn custody_balance(&self, asset: &Asset) -> Amount {
        self.custody.get(asset).copied().unwrap_or(0)
    }
}
