//! Bank configuration
//!
//! Deployment parameters for a bank instance. Defaults match the BSC
//! deployment: USDT as the custodied token and its PancakeSwap pair as the
//! initial reference.

use serde::{Deserialize, Serialize};
use types::fee::FeePercentage;
use types::ids::Address;

/// USDT (BEP-20) on BSC.
pub const DEFAULT_CUSTODIED_TOKEN: Address = Address::new([
    0x55, 0xd3, 0x98, 0x32, 0x6f, 0x99, 0x05, 0x9f, 0xf7, 0x75, 0x48, 0x52, 0x46, 0x99, 0x90, 0x27,
    0xb3, 0x19, 0x79, 0x55,
]);

/// PancakeSwap pair registered for USDT at deployment.
pub const DEFAULT_SAFE_PAIR: Address = Address::new([
    0x7e, 0xfa, 0xef, 0x62, 0xfd, 0xdc, 0xca, 0x95, 0x04, 0x18, 0x31, 0x2c, 0x6c, 0x91, 0xae, 0xf3,
    0x21, 0x37, 0x5a, 0x00,
]);

/// Configuration for a bank instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Token whose liquidity pair the pool-integrity check watches.
    pub custodied_token: Address,
    /// Initial reference pair.
    pub safe_pair: Address,
    /// Initial fee, in `[0, 100]` per-mille units.
    pub initial_fee: u64,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            custodied_token: DEFAULT_CUSTODIED_TOKEN,
            safe_pair: DEFAULT_SAFE_PAIR,
            initial_fee: 0,
        }
    }
}

impl BankConfig {
    /// Parse from JSON. Missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Override the initial fee.
    pub fn with_fee(mut self, fee: u64) -> Self {
        self.initial_fee = fee;
        self
    }

    /// Validated initial fee.
    pub fn fee(&self) -> Option<FeePercentage> {
        FeePercentage::new(self.initial_fee).ok()
    }
}
