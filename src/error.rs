//! Custom error types for BankVault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for BankVault operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The key file exists but cannot be used
    #[error("Encryption key unavailable: {0}")]
    KeyUnavailable(String),

    /// Wrong key, or the data file was corrupted or tampered with
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Decrypted data is not a valid ledger
    #[error("Corrupt ledger data: {0}")]
    CorruptData(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Zero, negative, malformed, or overflowing amounts
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds in account {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: String,
        needed: Money,
        available: Money,
    },

    #[error("Cannot transfer from account {0} to itself")]
    SameAccountTransfer(String),

    /// Disk I/O error while saving the ledger
    #[error("Failed to save ledger: {0}")]
    PersistenceFailed(String),

    #[error("Invalid account holder name: {0}")]
    InvalidHolderName(String),

    #[error("No account numbers left to allocate")]
    AccountNumbersExhausted,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside of ledger persistence
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create an "account not found" error
    pub fn account_not_found(identifier: impl ToString) -> Self {
        Self::AccountNotFound(identifier.to_string())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// Errors that make it unsafe to continue with the ledger at startup
    ///
    /// The caller must stop instead of falling back to an empty ledger.
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(
            self,
            Self::KeyUnavailable(_) | Self::DecryptionFailed(_) | Self::CorruptData(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::CorruptData(err.to_string())
    }
}

/// Result type alias for BankVault operations
pub type LedgerResult<T> = Result<T, LedgerError>;
