//! Contract events
//!
//! Immutable records appended to the bank's journal by every successful
//! state change. Hosts drain the journal; the core does not publish it.

use serde::{Deserialize, Serialize};
use types::asset::Asset;
use types::ids::Address;
use types::numeric::{Amount, Timestamp};

/// A deposit was taken into custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub principal: Address,
    pub index: usize,
    pub token: Asset,
    pub gross: Amount,
    pub net: Amount,
    pub fee: Amount,
    pub unlock_time: Timestamp,
}

/// A deposit was released to its depositor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub principal: Address,
    pub index: usize,
    pub token: Asset,
    pub amount: Amount,
}

/// Owner changed the deposit fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeUpdated {
    pub old_fee: u64,
    pub new_fee: u64,
}

/// Owner changed the reference liquidity pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairUpdated {
    pub old_pair: Address,
    pub new_pair: Address,
}

/// Native currency arrived without a deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeReceived {
    pub from: Address,
    pub amount: Amount,
}

/// Owner swept a whole balance out of custody.
///
/// `stranded` is the part of `amount` that was backing active deposits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recovered {
    pub asset: Asset,
    pub amount: Amount,
    pub to: Address,
    pub stranded: Amount,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    FeeUpdated(FeeUpdated),
    PairUpdated(PairUpdated),
    NativeReceived(NativeReceived),
    Recovered(Recovered),
}
