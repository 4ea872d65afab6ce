//! Transaction model
//!
//! A transaction is one entry in an account's append-only history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountNumber, TransactionId};
use super::money::Money;

/// What kind of movement a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money paid into the account from outside the ledger
    Deposit,
    /// Money taken out of the ledger
    Withdrawal,
    /// Incoming side of a transfer between two accounts
    TransferIn,
    /// Outgoing side of a transfer between two accounts
    TransferOut,
}

impl TransactionKind {
    /// Returns true if this kind increases the balance
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::TransferIn | Self::TransferOut)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdrawal => write!(f, "Withdrawal"),
            Self::TransferIn => write!(f, "Transfer In"),
            Self::TransferOut => write!(f, "Transfer Out"),
        }
    }
}

/// A single entry in an account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Always positive; the kind carries the direction
    pub amount: Money,

    pub timestamp: DateTime<Utc>,

    /// The other account of a transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<AccountNumber>,

    /// Account balance right after this transaction was applied
    pub balance_after: Money,
}

impl Transaction {
    /// Create a new transaction stamped with the current time
    pub fn new(kind: TransactionKind, amount: Money, balance_after: Money) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            timestamp: Utc::now(),
            counterparty: None,
            balance_after,
        }
    }

    /// Create one side of a transfer
    pub fn transfer(
        kind: TransactionKind,
        amount: Money,
        balance_after: Money,
        counterparty: AccountNumber,
    ) -> Self {
        let mut txn = Self::new(kind, amount, balance_after);
        txn.counterparty = Some(counterparty);
        txn
    }

    /// The amount with the sign of its effect on the balance
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Human-readable description, e.g. "Transfer to 10000001"
    pub fn description(&self) -> String {
        match (self.kind, self.counterparty) {
            (TransactionKind::TransferOut, Some(other)) => format!("Transfer to {}", other),
            (TransactionKind::TransferIn, Some(other)) => format!("Transfer from {}", other),
            (kind, _) => kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let amount = Money::from_cents(500);
        let deposit = Transaction::new(TransactionKind::Deposit, amount, amount);
        let withdrawal = Transaction::new(TransactionKind::Withdrawal, amount, Money::zero());
        assert_eq!(deposit.signed_amount().cents(), 500);
        assert_eq!(withdrawal.signed_amount().cents(), -500);
    }

    #[test]
    fn test_transfer_description() {
        let other = AccountNumber::FIRST;
        let out = Transaction::transfer(
            TransactionKind::TransferOut,
            Money::from_cents(100),
            Money::zero(),
            other,
        );
        assert_eq!(out.description(), "Transfer to 10000000");
        assert!(out.kind.is_transfer());

        let deposit = Transaction::new(TransactionKind::Deposit, Money::from_cents(1), Money::from_cents(1));
        assert_eq!(deposit.description(), "Deposit");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&TransactionKind::TransferOut).unwrap();
        assert_eq!(json, "\"transfer_out\"");
    }

    #[test]
    fn test_counterparty_omitted_when_none() {
        let txn = Transaction::new(TransactionKind::Deposit, Money::from_cents(1), Money::from_cents(1));
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("counterparty"));
        assert!(json.contains("\"type\":\"deposit\""));
    }
}
