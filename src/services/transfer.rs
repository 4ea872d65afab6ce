//! Transfer service
//!
//! Provides business logic for transfers between accounts.
//! A transfer records a linked pair of transactions: an outgoing entry on
//! the source account and an incoming entry on the destination account.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, Ledger, Money, Transaction, TransactionKind};

use super::account::ensure_positive;

/// Service for transfers between accounts
pub struct TransferService<'a> {
    ledger: &'a mut Ledger,
}

/// Result of a transfer
#[derive(Debug, Clone)]
pub struct TransferResult {
    /// The outgoing transaction (on the source account)
    pub from_transaction: Transaction,
    /// The incoming transaction (on the destination account)
    pub to_transaction: Transaction,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(ledger: &'a mut Ledger) -> Self {
        Self { ledger }
    }

    /// Move money from one account to another
    ///
    /// All checks run before either account is touched; both balances and
    /// both history entries are then updated together.
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Money,
    ) -> LedgerResult<TransferResult> {
        ensure_positive(amount)?;

        if from == to {
            return Err(LedgerError::SameAccountTransfer(from.to_string()));
        }

        if !self.ledger.contains(from) {
            return Err(LedgerError::account_not_found(from));
        }
        let (source, destination) = self
            .ledger
            .get_pair_mut(from, to)
            .ok_or_else(|| LedgerError::account_not_found(to))?;

        if source.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: from.to_string(),
                needed: amount,
                available: source.balance,
            });
        }

        let destination_balance = destination.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!(
                "{} would overflow the balance of account {}",
                amount, to
            ))
        })?;
        let source_balance = source.balance - amount;

        let from_txn =
            Transaction::transfer(TransactionKind::TransferOut, amount, source_balance, to);
        let to_txn =
            Transaction::transfer(TransactionKind::TransferIn, amount, destination_balance, from);

        source.balance = source_balance;
        source.transactions.push(from_txn.clone());
        destination.balance = destination_balance;
        destination.transactions.push(to_txn.clone());

        tracing::info!(
            from = %from,
            to = %to,
            cents = amount.cents(),
            "transfer"
        );

        Ok(TransferResult {
            from_transaction: from_txn,
            to_transaction: to_txn,
        })
    }
}
