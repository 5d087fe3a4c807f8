//! End-to-end bank scenarios
//!
//! One deployment per scenario group, driven the way a client would:
//! - Fee administration
//! - Pool integrity
//! - Recovery of stray balances
//! - Deposit and withdrawal

use contracts::clock::ManualClock;
use contracts::config::{BankConfig, DEFAULT_CUSTODIED_TOKEN, DEFAULT_SAFE_PAIR};
use contracts::errors::BankError;
use contracts::gateway::{AssetGateway, InMemoryGateway};
use contracts::oracle::StaticRegistry;
use contracts::PiggyBank;
use types::asset::Asset;
use types::ids::Address;
use types::numeric::{parse_units, Amount};

type Bank = PiggyBank<InMemoryGateway, StaticRegistry, ManualClock>;

const DEPLOYED_AT: i64 = 1_700_000_000;

struct Fixture {
    bank: Bank,
    clock: ManualClock,
    owner: Address,
    addr1: Address,
}

fn usdt() -> Asset {
    Asset::Token(DEFAULT_CUSTODIED_TOKEN)
}

fn units(whole: u128) -> Amount {
    parse_units(whole, 18).unwrap()
}

fn deploy() -> Fixture {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let owner = Address::repeat_byte(0x01);
    let addr1 = Address::repeat_byte(0xa1);
    let clock = ManualClock::new(DEPLOYED_AT);
    let registry = StaticRegistry::with_pair(DEFAULT_CUSTODIED_TOKEN, DEFAULT_SAFE_PAIR);

    let mut gateway = InMemoryGateway::new();
    gateway.mint(usdt(), addr1, units(100));

    let bank = PiggyBank::new(owner, BankConfig::default(), gateway, registry, clock.clone())
        .expect("default config is valid");

    Fixture {
        bank,
        clock,
        owner,
        addr1,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Fee
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_owner_sets_new_fee() {
    let mut f = deploy();
    let initial = f.bank.fee_percentage();

    f.bank.set_fee_percentage(&f.owner, 20).unwrap();

    assert_ne!(f.bank.fee_percentage(), initial);
    assert_eq!(f.bank.fee_percentage(), 20);
}

#[test]
fn test_fee_above_100_rejected() {
    let mut f = deploy();
    let err = f.bank.set_fee_percentage(&f.owner, 101).unwrap_err();
    assert!(err.to_string().contains("Don't be greedy"));
    assert_eq!(f.bank.fee_percentage(), 0);
}

#[test]
fn test_fee_setter_owner_only() {
    let mut f = deploy();
    let err = f.bank.set_fee_percentage(&f.addr1, 10).unwrap_err();
    assert_eq!(err.to_string(), "Only the contract owner may perform this action");
}

#[test]
fn test_fee_boundaries() {
    let mut f = deploy();
    f.bank.set_fee_percentage(&f.owner, 0).unwrap();
    assert_eq!(f.bank.fee_percentage(), 0);
    f.bank.set_fee_percentage(&f.owner, 100).unwrap();
    assert_eq!(f.bank.fee_percentage(), 100);
}

// ═══════════════════════════════════════════════════════════════════
// Pool integrity
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_pool_integrity_sequence() {
    let mut f = deploy();

    // Default pair matches the registry
    assert!(f.bank.check_pool_integrity());

    // Point at a different pair
    let new_pair = Address::parse("0x531FEbfeb9a61D948c384ACFBe6dCc51057AEa7e").unwrap();
    f.bank.set_pair(&f.owner, new_pair).unwrap();
    assert_eq!(f.bank.safe_pair(), new_pair);
    assert!(!f.bank.check_pool_integrity());

    // Restore the default pair
    let default_pair = Address::parse("0x7EFaEf62fDdCCa950418312c6C91Aef321375A00").unwrap();
    f.bank.set_pair(&f.owner, default_pair).unwrap();
    assert!(f.bank.check_pool_integrity());
}

#[test]
fn test_registry_swap_detected() {
    let mut f = deploy();
    let attacker_pair = Address::repeat_byte(0xee);
    f.bank
        .registry_mut()
        .register(DEFAULT_CUSTODIED_TOKEN, attacker_pair);

    assert!(!f.bank.check_pool_integrity());
    // Diagnostic only: deposits are not blocked
    f.bank
        .gateway_mut()
        .approve(DEFAULT_CUSTODIED_TOKEN, f.addr1, units(1));
    assert!(f.bank.deposit(&f.addr1, usdt(), units(1), 60, 0).is_ok());
}

// ═══════════════════════════════════════════════════════════════════
// Recovery
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_recover_erc20() {
    let mut f = deploy();
    let holder = Address::repeat_byte(0xd1);
    f.bank.gateway_mut().mint(usdt(), holder, units(100));
    f.bank
        .gateway_mut()
        .send_to_custody(&usdt(), &holder, units(100))
        .unwrap();

    let before = f.bank.gateway().balance_of(&usdt(), &f.owner);
    let recovered = f.bank.recover_erc20(&f.owner, DEFAULT_CUSTODIED_TOKEN).unwrap();
    let after = f.bank.gateway().balance_of(&usdt(), &f.owner);

    assert_eq!(recovered, units(100));
    assert!(after > before);
    assert_eq!(f.bank.gateway().custody_balance(&usdt()), 0);
}

#[test]
fn test_recover_native() {
    let mut f = deploy();
    let one = units(1);
    f.bank.gateway_mut().mint(Asset::Native, f.owner, one);
    f.bank.receive_native(&f.owner, one).unwrap();

    let before = f.bank.gateway().balance_of(&Asset::Native, &f.owner);
    assert_eq!(f.bank.gateway().custody_balance(&Asset::Native), one);

    f.bank.recover(&f.owner).unwrap();

    let after = f.bank.gateway().balance_of(&Asset::Native, &f.owner);
    assert!(after > before);
    assert_eq!(f.bank.gateway().custody_balance(&Asset::Native), 0);
}

#[test]
fn test_recover_native_twice_is_noop() {
    let mut f = deploy();
    f.bank.gateway_mut().mint(Asset::Native, f.owner, 5);
    f.bank.receive_native(&f.owner, 5).unwrap();

    assert_eq!(f.bank.recover(&f.owner).unwrap(), 5);
    assert_eq!(f.bank.recover(&f.owner).unwrap(), 0);
    assert_eq!(f.bank.gateway().balance_of(&Asset::Native, &f.owner), 5);
}

// ═══════════════════════════════════════════════════════════════════
// Bank
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_deposit_then_withdraw() {
    let mut f = deploy();
    f.bank.set_fee_percentage(&f.owner, 20).unwrap();

    let amount = units(50);
    f.bank
        .gateway_mut()
        .approve(DEFAULT_CUSTODIED_TOKEN, f.addr1, amount);
    let duration = 1_000;

    let index = f.bank.deposit(&f.addr1, usdt(), amount, duration, 10).unwrap();
    assert_eq!(index, 0);

    let deposit = f.bank.deposits(&f.addr1, 0).unwrap();
    let fee = f.bank.fee_percentage() as u128;
    let expected = amount - amount * fee / 1000;
    assert_eq!(deposit.amount, expected);
    assert_eq!(deposit.amount, units(49));
    assert_eq!(deposit.token, usdt());
    assert_eq!(deposit.unlock_time, DEPLOYED_AT + duration as i64);

    // 30 days later
    f.clock.advance(60 * 60 * 24 * 30);

    let before = f.bank.gateway().balance_of(&usdt(), &f.addr1);
    let released = f.bank.withdraw(&f.addr1, 0).unwrap();
    let after = f.bank.gateway().balance_of(&usdt(), &f.addr1);

    assert_eq!(released, units(49));
    assert_eq!(after - before, units(49));
    assert_eq!(f.bank.deposits(&f.addr1, 0).unwrap().amount, 0);

    // Fee stays in custody
    assert_eq!(f.bank.gateway().custody_balance(&usdt()), units(1));
    assert_eq!(f.bank.fees_collected(&usdt()), units(1));
}

#[test]
fn test_deposit_without_approval_fails() {
    let mut f = deploy();
    let result = f.bank.deposit(&f.addr1, usdt(), units(10), 60, 0);
    assert!(matches!(result, Err(BankError::TransferFailed { .. })));
    assert_eq!(f.bank.deposit_count(&f.addr1), 0);
    assert_eq!(f.bank.gateway().balance_of(&usdt(), &f.addr1), units(100));
}

#[test]
fn test_indices_are_stable_after_withdrawal() {
    let mut f = deploy();
    f.bank
        .gateway_mut()
        .approve(DEFAULT_CUSTODIED_TOKEN, f.addr1, units(30));

    for lock in [10u64, 20, 30] {
        f.bank.deposit(&f.addr1, usdt(), units(10), lock, 0).unwrap();
    }

    f.clock.advance(15);
    f.bank.withdraw(&f.addr1, 0).unwrap();
    assert!(matches!(
        f.bank.withdraw(&f.addr1, 1),
        Err(BankError::NotYetUnlocked { .. })
    ));

    let all = f.bank.deposits_of(&f.addr1);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].amount, 0);
    assert_eq!(all[1].amount, units(10));
    assert_eq!(all[2].unlock_time, DEPLOYED_AT + 30);
    assert_eq!(f.bank.locked_total(&usdt()), units(20));
}
