//! Contract-specific error types
//!
//! Every variant aborts the whole operation: no ledger, parameter or custody
//! state changes when an error is returned.

use thiserror::Error;

/// Failures reported by an asset gateway when moving value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: u128, approved: u128 },

    #[error("transfer rejected by {asset}")]
    Rejected { asset: String },

    #[error("balance overflow")]
    Overflow,
}

/// Bank errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankError {
    #[error("Only the contract owner may perform this action")]
    Unauthorized,

    #[error("Don't be greedy: fee {value} exceeds maximum {max}")]
    InvalidParameter { value: u64, max: u64 },

    #[error("Deposit amount must be positive")]
    InvalidAmount,

    #[error("Deposit not found: {principal} has no deposit at index {index}")]
    NotFound { principal: String, index: usize },

    #[error("Deposit locked until {unlock_time} (now {now})")]
    NotYetUnlocked { unlock_time: i64, now: i64 },

    #[error("Deposit {index} already withdrawn")]
    AlreadyWithdrawn { index: usize },

    #[error("Transfer of {asset} failed: {reason}")]
    TransferFailed { asset: String, reason: GatewayError },

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Arithmetic overflow in custody accounting")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        assert_eq!(
            BankError::Unauthorized.to_string(),
            "Only the contract owner may perform this action"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = BankError::InvalidParameter { value: 101, max: 100 };
        assert!(err.to_string().starts_with("Don't be greedy"));
        assert!(err.to_string().contains("101"));
    }

    #[test]
    fn test_transfer_failed_carries_reason() {
        let err = BankError::TransferFailed {
            asset: "native".to_string(),
            reason: GatewayError::InsufficientBalance {
                required: 10,
                available: 3,
            },
        };
        assert!(err.to_string().contains("required 10, available 3"));
    }
}
