//! Timelocked custody contract
//!
//! Depositors lock fungible value for a fixed period, pay a fee at deposit
//! time and withdraw the net amount once the lock expires. A single owner
//! tunes the fee, maintains a reference liquidity pair used to detect pool
//! tampering, and can sweep stray balances.
//!
//! # Modules
//! - `errors`: Contract error taxonomy
//! - `events`: Journal of state changes
//! - `security`: Reentrancy guard, single-owner gate
//! - `config`: Deployment parameters
//! - `clock`: Time source
//! - `gateway`: Asset movement capability
//! - `fee`: Fee engine
//! - `oracle`: Pool safety oracle and pair registry
//! - `ledger`: Per-principal deposit records
//! - `recovery`: Full-balance sweeps
//! - `bank`: The boundary operations tying it together

pub mod errors;
pub mod events;
pub mod security;
pub mod config;
pub mod clock;
pub mod gateway;
pub mod fee;
pub mod oracle;
pub mod ledger;
pub mod recovery;
pub mod bank;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";

pub use bank::PiggyBank;
