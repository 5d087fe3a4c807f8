//! Error types for value construction and parsing

use thiserror::Error;

/// Errors raised while building shared value types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Fee {value} out of range: must be at most {max}")]
    FeeOutOfRange { value: u64, max: u64 },
}
