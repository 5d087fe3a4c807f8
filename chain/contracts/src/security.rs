//! Shared security primitives for the bank
//!
//! A reentrancy guard wrapped around every mutating entry point, and the
//! single-owner gate that protects administrative operations.

use types::ids::Address;

use crate::errors::BankError;

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A contract function acquires the guard before executing state-changing
/// logic and releases it on completion. Any nested call attempt fails.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Single-owner access gate.
///
/// The owner is fixed when the bank is constructed and cannot be rotated.
#[derive(Debug, Clone)]
pub struct OwnerGate {
    owner: Address,
}

impl OwnerGate {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Fail with [`BankError::Unauthorized`] unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), BankError> {
        if !self.is_owner(caller) {
            return Err(BankError::Unauthorized);
        }
        Ok(())
    }
}
