//! Account model
//!
//! Represents one bank account: its holder, balance, and history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountNumber;
use super::money::Money;
use super::transaction::Transaction;

/// Maximum length of a holder name, in characters
pub const MAX_HOLDER_NAME_LEN: usize = 100;

/// A bank account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub number: AccountNumber,

    pub holder_name: String,

    /// Current balance, never negative
    pub balance: Money,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// Append-only history, oldest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Create a new account with a zero balance and no history
    pub fn new(number: AccountNumber, holder_name: impl Into<String>) -> Self {
        Self {
            number,
            holder_name: holder_name.into(),
            balance: Money::zero(),
            created_at: Utc::now(),
            transactions: Vec::new(),
        }
    }

    /// Last `limit` transactions, oldest first
    pub fn recent_transactions(&self, limit: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(limit);
        &self.transactions[start..]
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        let name = self.holder_name.trim();
        if name.is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_HOLDER_NAME_LEN {
            return Err(AccountValidationError::NameTooLong(len));
        }

        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.balance));
        }

        for (index, txn) in self.transactions.iter().enumerate() {
            if !txn.amount.is_positive() {
                return Err(AccountValidationError::NonPositiveAmount {
                    index,
                    amount: txn.amount,
                });
            }
            if txn.counterparty.is_some() != txn.kind.is_transfer() {
                return Err(AccountValidationError::CounterpartyMismatch { index });
            }
        }

        let replayed = Money::checked_sum(self.transactions.iter().map(|t| t.signed_amount()))
            .ok_or(AccountValidationError::HistoryOverflow)?;
        if replayed != self.balance {
            return Err(AccountValidationError::HistoryMismatch {
                balance: self.balance,
                history: replayed,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.holder_name)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeBalance(Money),
    NonPositiveAmount { index: usize, amount: Money },
    CounterpartyMismatch { index: usize },
    HistoryOverflow,
    HistoryMismatch { balance: Money, history: Money },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account holder name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(
                    f,
                    "Account holder name too long ({} chars, max {})",
                    len, MAX_HOLDER_NAME_LEN
                )
            }
            Self::NegativeBalance(balance) => write!(f, "Negative balance {}", balance),
            Self::NonPositiveAmount { index, amount } => {
                write!(f, "Transaction {} has non-positive amount {}", index, amount)
            }
            Self::CounterpartyMismatch { index } => write!(
                f,
                "Transaction {} has a counterparty that does not match its type",
                index
            ),
            Self::HistoryOverflow => write!(f, "Transaction history total is out of range"),
            Self::HistoryMismatch { balance, history } => write!(
                f,
                "Balance {} does not match transaction history total {}",
                balance, history
            ),
        }
    }
}

impl std::error::Error for AccountValidationError {}
