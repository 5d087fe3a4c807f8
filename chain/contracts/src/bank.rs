//! Piggy bank — the custody contract's boundary operations
//!
//! Depositors lock value for a chosen duration and pay a fee up front; once
//! the lock expires they withdraw the net amount exactly once. The owner tunes
//! the fee, maintains the reference liquidity pair and sweeps balances.
//!
//! Every mutating operation:
//! 1. Acquires the reentrancy guard
//! 2. Checks access control (where applicable)
//! 3. Validates inputs before any state or funds move
//! 4. Commits ledger state before releasing funds
//!
//! A failure at any step leaves the bank exactly as it was.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use types::asset::Asset;
use types::fee::FeePercentage;
use types::ids::Address;
use types::numeric::{Amount, Seconds};

use crate::clock::Clock;
use crate::config::BankConfig;
use crate::errors::BankError;
use crate::events::{
    ContractEvent, Deposited, FeeUpdated, NativeReceived, PairUpdated, Recovered, Withdrawn,
};
use crate::fee::FeeEngine;
use crate::gateway::AssetGateway;
use crate::ledger::{Deposit, DepositLedger, DepositView};
use crate::oracle::{PairRegistry, PoolSafetyOracle};
use crate::recovery;
use crate::security::{OwnerGate, ReentrancyGuard};

#[derive(Debug)]
pub struct PiggyBank<G, R, C> {
    owner: OwnerGate,
    fee: FeeEngine,
    oracle: PoolSafetyOracle,
    ledger: DepositLedger,
    /// Fees withheld per asset since deployment
    fees_collected: HashMap<Asset, Amount>,
    gateway: G,
    registry: R,
    clock: C,
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl<G, R, C> PiggyBank<G, R, C>
where
    G: AssetGateway,
    R: PairRegistry,
    C: Clock,
{
    /// Deploy a bank owned by `deployer`.
    ///
    /// Fails with [`BankError::InvalidParameter`] if the configured fee is
    /// out of range.
    pub fn new(
        deployer: Address,
        config: BankConfig,
        gateway: G,
        registry: R,
        clock: C,
    ) -> Result<Self, BankError> {
        let fee = config.fee().ok_or(BankError::InvalidParameter {
            value: config.initial_fee,
            max: FeePercentage::MAX,
        })?;

        info!(
            owner = %deployer,
            custodied_token = %config.custodied_token,
            safe_pair = %config.safe_pair,
            fee = fee.value(),
            "PiggyBank deployed"
        );

        Ok(Self {
            owner: OwnerGate::new(deployer),
            fee: FeeEngine::new(fee),
            oracle: PoolSafetyOracle::new(config.custodied_token, config.safe_pair),
            ledger: DepositLedger::new(),
            fees_collected: HashMap::new(),
            gateway,
            registry,
            clock,
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        })
    }

    // ───────────────────────── Fee ─────────────────────────

    pub fn fee_percentage(&self) -> u64 {
        self.fee.current().value()
    }

    /// Effective fraction of gross withheld by the current fee.
    pub fn fee_rate(&self) -> Decimal {
        self.fee.rate()
    }

    /// Set the deposit fee. Owner-only; `new_fee` must be at most 100.
    pub fn set_fee_percentage(&mut self, caller: &Address, new_fee: u64) -> Result<(), BankError> {
        self.guarded(|bank| {
            bank.ensure_owner(caller, "set_fee_percentage")?;
            let old = bank.fee.update(new_fee).inspect_err(|_| {
                warn!(new_fee, "Rejected out-of-range fee");
            })?;

            info!(old_fee = old.value(), new_fee, "Fee updated");
            bank.events.push(ContractEvent::FeeUpdated(FeeUpdated {
                old_fee: old.value(),
                new_fee,
            }));
            Ok(())
        })
    }

    // ───────────────────────── Pool Safety ─────────────────────────

    pub fn safe_pair(&self) -> Address {
        *self.oracle.safe_pair()
    }

    /// Replace the reference pair. Owner-only, not checked against the registry.
    pub fn set_pair(&mut self, caller: &Address, pair: Address) -> Result<(), BankError> {
        self.guarded(|bank| {
            bank.ensure_owner(caller, "set_pair")?;
            let old = bank.oracle.set_pair(pair);

            info!(old_pair = %old, new_pair = %pair, "Safe pair updated");
            bank.events.push(ContractEvent::PairUpdated(PairUpdated {
                old_pair: old,
                new_pair: pair,
            }));
            Ok(())
        })
    }

    /// `true` iff the registry's pair for the custodied token equals the
    /// reference pair. No side effects.
    pub fn check_pool_integrity(&self) -> bool {
        let intact = self.oracle.check(&self.registry);
        if !intact {
            warn!(
                token = %self.oracle.custodied_token(),
                safe_pair = %self.oracle.safe_pair(),
                "Registered pair differs from safe pair"
            );
        }
        intact
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Lock `amount` of `token` for `lock_duration` seconds.
    ///
    /// The stored fee applies; `fee_hint` is accepted for call-site
    /// compatibility and otherwise ignored. Returns the index of the new
    /// record in the caller's ledger.
    pub fn deposit(
        &mut self,
        caller: &Address,
        token: Asset,
        amount: Amount,
        lock_duration: Seconds,
        fee_hint: u64,
    ) -> Result<usize, BankError> {
        self.guarded(|bank| {
            if amount == 0 {
                warn!(principal = %caller, "Rejected zero deposit");
                return Err(BankError::InvalidAmount);
            }
            if fee_hint != bank.fee.current().value() {
                debug!(
                    fee_hint,
                    fee = bank.fee.current().value(),
                    "Fee hint differs from stored fee; using stored fee"
                );
            }

            let quote = bank.fee.quote(amount);
            let now = bank.clock.now();
            let unlock_time = i64::try_from(lock_duration)
                .ok()
                .and_then(|d| now.checked_add(d))
                .ok_or(BankError::Overflow)?;

            bank.ledger.ensure_recordable(&token, quote.net)?;
            let fees_total = bank
                .fees_collected(&token)
                .checked_add(quote.fee)
                .ok_or(BankError::Overflow)?;

            bank.gateway
                .pull_from(&token, caller, amount)
                .map_err(|reason| {
                    warn!(principal = %caller, token = %token, amount, %reason, "Deposit pull failed");
                    BankError::TransferFailed {
                        asset: token.to_string(),
                        reason,
                    }
                })?;

            let index = bank.ledger.record(
                *caller,
                Deposit {
                    token,
                    amount: quote.net,
                    unlock_time,
                },
            )?;
            bank.fees_collected.insert(token, fees_total);

            info!(
                principal = %caller,
                index,
                token = %token,
                gross = quote.gross,
                net = quote.net,
                fee = quote.fee,
                unlock_time,
                "Deposit recorded"
            );
            bank.events.push(ContractEvent::Deposited(Deposited {
                principal: *caller,
                index,
                token,
                gross: quote.gross,
                net: quote.net,
                fee: quote.fee,
                unlock_time,
            }));
            Ok(index)
        })
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Release deposit `index` to the caller once unlocked.
    ///
    /// The record is zeroed before funds move; if the payout fails the record
    /// is restored and the error returned. Returns the amount released.
    pub fn withdraw(&mut self, caller: &Address, index: usize) -> Result<Amount, BankError> {
        self.guarded(|bank| {
            let now = bank.clock.now();
            let released = bank.ledger.settle(caller, index, now).inspect_err(|e| {
                debug!(principal = %caller, index, error = %e, "Withdrawal rejected");
            })?;

            if let Err(reason) = bank
                .gateway
                .push_to(&released.token, caller, released.amount)
            {
                bank.ledger.reinstate(caller, index, &released);
                warn!(principal = %caller, index, %reason, "Withdrawal payout failed; record restored");
                return Err(BankError::TransferFailed {
                    asset: released.token.to_string(),
                    reason,
                });
            }

            info!(
                principal = %caller,
                index,
                token = %released.token,
                amount = released.amount,
                "Deposit withdrawn"
            );
            bank.events.push(ContractEvent::Withdrawn(Withdrawn {
                principal: *caller,
                index,
                token: released.token,
                amount: released.amount,
            }));
            Ok(released.amount)
        })
    }

    // ───────────────────────── Ledger Queries ─────────────────────────

    /// Deposit `index` of `principal`.
    pub fn deposits(&self, principal: &Address, index: usize) -> Result<DepositView, BankError> {
        self.ledger.view(principal, index)
    }

    pub fn deposit_count(&self, principal: &Address) -> usize {
        self.ledger.count(principal)
    }

    /// All deposits of `principal` in index order.
    pub fn deposits_of(&self, principal: &Address) -> Vec<DepositView> {
        self.ledger
            .deposits_of(principal)
            .iter()
            .map(DepositView::from)
            .collect()
    }

    /// Sum of active deposits in `asset`.
    pub fn locked_total(&self, asset: &Asset) -> Amount {
        self.ledger.locked_total(asset)
    }

    pub fn fees_collected(&self, asset: &Asset) -> Amount {
        self.fees_collected.get(asset).copied().unwrap_or(0)
    }

    // ───────────────────────── Recovery ─────────────────────────

    /// Accept native currency sent without a deposit.
    pub fn receive_native(&mut self, from: &Address, amount: Amount) -> Result<(), BankError> {
        self.guarded(|bank| {
            if amount == 0 {
                return Err(BankError::InvalidAmount);
            }
            bank.gateway
                .pull_from(&Asset::Native, from, amount)
                .map_err(|reason| BankError::TransferFailed {
                    asset: Asset::Native.to_string(),
                    reason,
                })?;

            debug!(from = %from, amount, "Native currency received");
            bank.events.push(ContractEvent::NativeReceived(NativeReceived {
                from: *from,
                amount,
            }));
            Ok(())
        })
    }

    /// Sweep the entire balance of `token` to the owner. Owner-only.
    ///
    /// Includes funds backing active deposits of that token.
    pub fn recover_erc20(&mut self, caller: &Address, token: Address) -> Result<Amount, BankError> {
        self.guarded(|bank| {
            bank.ensure_owner(caller, "recover_erc20")?;
            bank.sweep_to_owner(Asset::Token(token))
        })
    }

    /// Sweep the entire native balance to the owner. Owner-only.
    ///
    /// Active native deposits are stranded by this call.
    pub fn recover(&mut self, caller: &Address) -> Result<Amount, BankError> {
        self.guarded(|bank| {
            bank.ensure_owner(caller, "recover")?;
            bank.sweep_to_owner(Asset::Native)
        })
    }

    fn sweep_to_owner(&mut self, asset: Asset) -> Result<Amount, BankError> {
        let owner = *self.owner.owner();
        let locked = self.ledger.locked_total(&asset);
        let swept = recovery::sweep(&mut self.gateway, &asset, &owner, locked)?;

        if swept.is_empty() {
            debug!(asset = %asset, "Nothing to recover");
            return Ok(0);
        }

        info!(
            asset = %asset,
            amount = swept.amount,
            stranded = swept.stranded,
            "Balance recovered to owner"
        );
        self.events.push(ContractEvent::Recovered(Recovered {
            asset,
            amount: swept.amount,
            to: owner,
            stranded: swept.stranded,
        }));
        Ok(swept.amount)
    }

    // ───────────────────────── Access Control ─────────────────────────

    pub fn owner(&self) -> &Address {
        self.owner.owner()
    }

    fn ensure_owner(&self, caller: &Address, action: &'static str) -> Result<(), BankError> {
        self.owner.ensure_owner(caller).inspect_err(|_| {
            warn!(caller = %caller, action, "Unauthorized administrative call");
        })
    }

    // ───────────────────────── Collaborators ─────────────────────────

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    /// Run `op` holding the reentrancy guard; released on every exit path.
    fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, BankError>,
    ) -> Result<T, BankError> {
        if !self.reentrancy_guard.acquire() {
            return Err(BankError::Reentrancy);
        }
        let result = op(self);
        self.reentrancy_guard.release();
        result
    }
}
