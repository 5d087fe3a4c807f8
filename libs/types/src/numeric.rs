//! Integer quantities used by the ledger
//!
//! Token amounts are unsigned base units (no decimals are implied here; an
//! 18-decimal token stores `1.0` as `10^18`). Times are unix seconds.

/// Amount of an asset in base units.
pub type Amount = u128;

/// Absolute time in unix seconds.
pub type Timestamp = i64;

/// Relative duration in seconds.
pub type Seconds = u64;

/// Scale a whole-unit quantity by `10^decimals`.
///
/// Returns `None` if the result does not fit in an [`Amount`].
pub fn parse_units(whole: u128, decimals: u32) -> Option<Amount> {
    10u128.checked_pow(decimals)?.checked_mul(whole)
}
