//! Pool safety oracle
//!
//! Compares the liquidity pair an external registry currently reports for the
//! custodied token with the reference pair set by the owner. A mismatch means
//! the pair was swapped out underneath the bank. The result is diagnostic
//! only; nothing in the bank is gated on it.

use std::collections::HashMap;

use types::ids::Address;

/// Read-only lookup of the pair registered for a token.
pub trait PairRegistry {
    fn pair_for(&self, token: &Address) -> Option<Address>;
}

/// In-memory registry. Re-register a token to simulate a pair swap.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    pairs: HashMap<Address, Address>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a single `token -> pair` entry.
    pub fn with_pair(token: Address, pair: Address) -> Self {
        let mut registry = Self::new();
        registry.register(token, pair);
        registry
    }

    pub fn register(&mut self, token: Address, pair: Address) {
        self.pairs.insert(token, pair);
    }

    pub fn unregister(&mut self, token: &Address) {
        self.pairs.remove(token);
    }
}

impl PairRegistry for StaticRegistry {
    fn pair_for(&self, token: &Address) -> Option<Address> {
        self.pairs.get(token).copied()
    }
}

#[derive(Debug, Clone)]
pub struct PoolSafetyOracle {
    custodied_token: Address,
    safe_pair: Address,
}

impl PoolSafetyOracle {
    pub fn new(custodied_token: Address, safe_pair: Address) -> Self {
        Self {
            custodied_token,
            safe_pair,
        }
    }

    pub fn custodied_token(&self) -> &Address {
        &self.custodied_token
    }

    pub fn safe_pair(&self) -> &Address {
        &self.safe_pair
    }

    /// Overwrite the reference pair, returning the old one. Not checked
    /// against the registry.
    pub fn set_pair(&mut self, pair: Address) -> Address {
        std::mem::replace(&mut self.safe_pair, pair)
    }

    /// `true` iff the registry's pair for the custodied token is the
    /// reference pair. An unregistered token reads as the zero address.
    pub fn check<R: PairRegistry + ?Sized>(&self, registry: &R) -> bool {
        let registered = registry
            .pair_for(&self.custodied_token)
            .unwrap_or(Address::ZERO);
        registered == self.safe_pair
    }
}
