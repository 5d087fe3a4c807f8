//! Deposit ledger — per-principal, append-only deposit records
//!
//! Each principal owns an ordered list of deposits addressed by insertion
//! index. Records are never removed: a withdrawal zeroes the amount and the
//! slot stays in place, so indices remain stable for the life of the ledger.
//!
//! Per record: `Active -> Withdrawn`, no way back. The ledger also keeps the
//! sum of active amounts per asset so custody can be reconciled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::asset::Asset;
use types::ids::Address;
use types::numeric::{Amount, Timestamp};

use crate::errors::BankError;

/// Lifecycle state of a deposit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositStatus {
    /// Funds held, awaiting unlock or withdrawal
    Active,
    /// Funds released; terminal
    Withdrawn,
}

/// A single deposit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub token: Asset,
    /// Net amount credited; zero once withdrawn.
    pub amount: Amount,
    pub unlock_time: Timestamp,
}

impl Deposit {
    pub fn status(&self) -> DepositStatus {
        if self.amount == 0 {
            DepositStatus::Withdrawn
        } else {
            DepositStatus::Active
        }
    }

    pub fn is_unlocked(&self, now: Timestamp) -> bool {
        now >= self.unlock_time
    }
}

/// Read-only view returned by `deposits(principal, index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositView {
    pub token: Asset,
    pub amount: Amount,
    pub unlock_time: Timestamp,
    pub status: DepositStatus,
}

impl From<&Deposit> for DepositView {
    fn from(d: &Deposit) -> Self {
        Self {
            token: d.token,
            amount: d.amount,
            unlock_time: d.unlock_time,
            status: d.status(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DepositLedger {
    /// principal -> deposits in insertion order
    entries: HashMap<Address, Vec<Deposit>>,
    /// asset -> sum of active amounts
    locked: HashMap<Asset, Amount>,
}

impl DepositLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Recording ─────────────────────────

    /// Check that a deposit of `amount` could be recorded.
    ///
    /// Lets callers validate before moving funds, so that `record` cannot
    /// fail once the transfer has happened.
    pub fn ensure_recordable(&self, token: &Asset, amount: Amount) -> Result<(), BankError> {
        if amount == 0 {
            return Err(BankError::InvalidAmount);
        }
        self.locked_total(token)
            .checked_add(amount)
            .ok_or(BankError::Overflow)?;
        Ok(())
    }

    /// Append an active deposit for `principal` and return its index.
    pub fn record(&mut self, principal: Address, deposit: Deposit) -> Result<usize, BankError> {
        self.ensure_recordable(&deposit.token, deposit.amount)?;

        let locked = self.locked.entry(deposit.token).or_insert(0);
        *locked += deposit.amount;

        let slots = self.entries.entry(principal).or_default();
        slots.push(deposit);
        Ok(slots.len() - 1)
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn get(&self, principal: &Address, index: usize) -> Result<&Deposit, BankError> {
        self.entries
            .get(principal)
            .and_then(|slots| slots.get(index))
            .ok_or_else(|| BankError::NotFound {
                principal: principal.to_string(),
                index,
            })
    }

    pub fn view(&self, principal: &Address, index: usize) -> Result<DepositView, BankError> {
        self.get(principal, index).map(DepositView::from)
    }

    /// All deposits of `principal` in insertion order.
    pub fn deposits_of(&self, principal: &Address) -> &[Deposit] {
        self.entries
            .get(principal)
            .map(|slots| slots.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, principal: &Address) -> usize {
        self.deposits_of(principal).len()
    }

    /// Sum of active deposit amounts held for `asset`.
    pub fn locked_total(&self, asset: &Asset) -> Amount {
        self.locked.get(asset).copied().unwrap_or(0)
    }

    // ───────────────────────── Settlement ─────────────────────────

    /// Move a deposit to `Withdrawn` and return it as it was before.
    ///
    /// The record is zeroed here, before the caller releases any funds.
    pub fn settle(
        &mut self,
        principal: &Address,
        index: usize,
        now: Timestamp,
    ) -> Result<Deposit, BankError> {
        let slot = self
            .entries
            .get_mut(principal)
            .and_then(|slots| slots.get_mut(index))
            .ok_or_else(|| BankError::NotFound {
                principal: principal.to_string(),
                index,
            })?;

        if slot.status() == DepositStatus::Withdrawn {
            return Err(BankError::AlreadyWithdrawn { index });
        }
        if !slot.is_unlocked(now) {
            return Err(BankError::NotYetUnlocked {
                unlock_time: slot.unlock_time,
                now,
            });
        }

        let released = slot.clone();
        slot.amount = 0;

        if let Some(locked) = self.locked.get_mut(&released.token) {
            *locked = locked.saturating_sub(released.amount);
        }
        Ok(released)
    }

    /// Undo a `settle` whose payout failed.
    pub(crate) fn reinstate(&mut self, principal: &Address, index: usize, released: &Deposit) {
        if let Some(slot) = self
            .entries
            .get_mut(principal)
            .and_then(|slots| slots.get_mut(index))
        {
            slot.amount = released.amount;
            let locked = self.locked.entry(released.token).or_insert(0);
            *locked = locked.saturating_add(released.amount);
        }
    }
}
