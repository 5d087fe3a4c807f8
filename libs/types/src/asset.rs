//! Asset identifiers
//!
//! The chain's intrinsic currency is a distinguished value; every other asset
//! is an external fungible-token contract named by its address.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::Address;

/// Kind of value held in custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// Native currency of the platform
    Native,
    /// External fungible token at the given contract address
    Token(Address),
}

impl Asset {
    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    /// Token contract address, `None` for the native currency.
    pub fn token_address(&self) -> Option<&Address> {
        match self {
            Asset::Native => None,
            Asset::Token(addr) => Some(addr),
        }
    }
}

impl From<Address> for Asset {
    fn from(addr: Address) -> Self {
        Asset::Token(addr)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token(addr) => write!(f, "{}", addr),
        }
    }
}
