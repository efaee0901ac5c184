//! Error types for Sarraf operations.

use crate::{CustomerId, TransactionId, TransactionStatus, VaultId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for Sarraf operations.
///
/// Every variant is a locally-recovered condition: the operation that
/// raised it aborted before any mutation, and the caller may retry with
/// corrected input.
#[derive(Error, Debug)]
pub enum SarrafError {
    /// Amount is zero or negative.
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// Rate value is zero or negative.
    #[error("Invalid rate: buy {buy}, sell {sell}")]
    InvalidRate { buy: Decimal, sell: Decimal },

    /// Sell rate does not exceed the buy rate.
    #[error("Invalid spread: sell {sell} must exceed buy {buy}")]
    InvalidSpread { buy: Decimal, sell: Decimal },

    /// Transaction number is empty or malformed.
    #[error("Invalid transaction number")]
    InvalidTransactionNumber,

    /// Transaction number already in use.
    #[error("Duplicate transaction number: {0}")]
    DuplicateTransactionNumber(String),

    /// Transfer has no paying party.
    #[error("Transfer source missing")]
    MissingSource,

    /// Transfer has no destination vault.
    #[error("Transfer destination missing")]
    MissingDestination,

    /// Vault balance does not cover the debit.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// No vault is designated as the main vault.
    #[error("No main vault designated")]
    NoMainVault,

    /// Destination vault of a transfer no longer exists.
    #[error("Recipient account not found: {0}")]
    RecipientAccountNotFound(VaultId),

    /// Vault not found.
    #[error("Vault not found: {0}")]
    VaultNotFound(VaultId),

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Invalid lifecycle transition.
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SarrafError {
    /// Get a stable code for notifications and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            SarrafError::InvalidAmount(_) => "INVALID_AMOUNT",
            SarrafError::InvalidRate { .. } => "INVALID_RATE",
            SarrafError::InvalidSpread { .. } => "INVALID_SPREAD",
            SarrafError::InvalidTransactionNumber => "INVALID_TRANSACTION_NUMBER",
            SarrafError::DuplicateTransactionNumber(_) => "DUPLICATE_TRANSACTION_NUMBER",
            SarrafError::MissingSource => "MISSING_SOURCE",
            SarrafError::MissingDestination => "MISSING_DESTINATION",
            SarrafError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            SarrafError::NoMainVault => "NO_MAIN_VAULT",
            SarrafError::RecipientAccountNotFound(_) => "RECIPIENT_ACCOUNT_NOT_FOUND",
            SarrafError::VaultNotFound(_) => "VAULT_NOT_FOUND",
            SarrafError::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            SarrafError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            SarrafError::InvalidTransition { .. } => "INVALID_TRANSITION",
            SarrafError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type alias for Sarraf operations.
pub type Result<T> = std::result::Result<T, SarrafError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        let err = SarrafError::InsufficientFunds {
            required: dec!(100),
            available: dec!(50),
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
        assert_eq!(SarrafError::NoMainVault.error_code(), "NO_MAIN_VAULT");
    }

    #[test]
    fn test_display_includes_amounts() {
        let err = SarrafError::InsufficientFunds {
            required: dec!(100),
            available: dec!(50),
        };
        let text = err.to_string();
        assert!(text.contains("100"));
        assert!(text.contains("50"));
    }
}
