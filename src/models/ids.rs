//! Identifier types for accounts and transactions
//!
//! Account numbers are short decimal numbers handed out by the ledger's
//! counter; transaction IDs are random UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// An 8-digit account number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(u32);

impl AccountNumber {
    /// The first number handed out by a fresh ledger
    pub const FIRST: AccountNumber = AccountNumber(10_000_000);

    /// The largest number that still has 8 digits
    pub const LAST: AccountNumber = AccountNumber(99_999_999);

    /// Counter value of a ledger that has handed out every number
    pub(crate) const PAST_LAST: AccountNumber = AccountNumber(100_000_000);

    /// Create an account number, returning `None` if it is not 8 digits
    pub fn new(value: u32) -> Option<Self> {
        let number = Self(value);
        (Self::FIRST..=Self::LAST).contains(&number).then_some(number)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The number after this one, if it still has 8 digits
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).and_then(Self::new)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = AccountNumberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AccountNumberParseError(s.to_string()));
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| AccountNumberParseError(s.to_string()))
    }
}

/// Error for strings that are not 8-digit account numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNumberParseError(pub String);

impl fmt::Display for AccountNumberParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid account number: '{}' (expected 8 digits)", self.0)
    }
}

impl std::error::Error for AccountNumberParseError {}

/// Unique identifier of a single transaction, printed on receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn-{}", &self.0.to_string()[..8])
    }
}
