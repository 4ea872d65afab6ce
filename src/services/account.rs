//! Account service
//!
//! Provides business logic for account management: opening accounts,
//! deposits, withdrawals, and history queries. Every operation validates
//! fully before it touches the ledger, so a failed call leaves it unchanged.

use crate::error::{LedgerError, LedgerResult};
use crate::models::account::MAX_HOLDER_NAME_LEN;
use crate::models::{Account, AccountNumber, Ledger, Money, Transaction, TransactionKind};

/// Service for account management
pub struct AccountService<'a> {
    ledger: &'a mut Ledger,
}

/// Reject zero and negative amounts
pub(crate) fn ensure_positive(amount: Money) -> LedgerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(format!(
            "{} (must be greater than zero)",
            amount
        )))
    }
}

/// Reject new money that would push the ledger total out of range
///
/// Balances are never negative, so a total that fits bounds every balance.
pub(crate) fn ensure_total_fits(ledger: &Ledger, amount: Money) -> LedgerResult<()> {
    ledger
        .total_balance()
        .and_then(|total| total.checked_add(amount))
        .map(|_| ())
        .ok_or_else(|| {
            LedgerError::InvalidAmount(format!("{} would overflow the ledger total", amount))
        })
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(ledger: &'a mut Ledger) -> Self {
        Self { ledger }
    }

    /// Open a new account and return its number
    ///
    /// A positive opening balance is recorded as the first deposit.
    pub fn create_account(
        &mut self,
        holder_name: &str,
        opening_balance: Money,
    ) -> LedgerResult<AccountNumber> {
        let holder_name = holder_name.trim();
        if holder_name.is_empty() {
            return Err(LedgerError::InvalidHolderName(
                "holder name cannot be empty".into(),
            ));
        }
        if holder_name.chars().count() > MAX_HOLDER_NAME_LEN {
            return Err(LedgerError::InvalidHolderName(format!(
                "holder name longer than {} characters",
                MAX_HOLDER_NAME_LEN
            )));
        }
        if opening_balance.is_negative() {
            return Err(LedgerError::InvalidAmount(format!(
                "opening balance {} cannot be negative",
                opening_balance
            )));
        }
        ensure_total_fits(self.ledger, opening_balance)?;

        let next = self.ledger.next_account_number();
        if self.ledger.contains(next) {
            return Err(LedgerError::DuplicateAccount(next.to_string()));
        }
        let number = self
            .ledger
            .allocate_number()
            .ok_or(LedgerError::AccountNumbersExhausted)?;

        let mut account = Account::new(number, holder_name);
        if opening_balance.is_positive() {
            account.balance = opening_balance;
            account.transactions.push(Transaction::new(
                TransactionKind::Deposit,
                opening_balance,
                opening_balance,
            ));
        }
        self.ledger.insert(account);

        tracing::info!(
            account = %number,
            opening_cents = opening_balance.cents(),
            "created account"
        );
        Ok(number)
    }

    /// Get an account by number
    pub fn get(&self, number: AccountNumber) -> LedgerResult<&Account> {
        self.ledger
            .get(number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// All accounts ordered by number
    pub fn list(&self) -> Vec<&Account> {
        self.ledger.accounts().collect()
    }

    /// Sum of all balances in the ledger, `None` if it does not fit
    pub fn total_balance(&self) -> Option<Money> {
        self.ledger.total_balance()
    }

    /// Add money to an account
    pub fn deposit(&mut self, number: AccountNumber, amount: Money) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;
        if !self.ledger.contains(number) {
            return Err(LedgerError::account_not_found(number));
        }
        ensure_total_fits(self.ledger, amount)?;
        let account = self
            .ledger
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        let new_balance = account.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("{} would overflow the balance", amount))
        })?;

        account.balance = new_balance;
        let txn = Transaction::new(TransactionKind::Deposit, amount, new_balance);
        account.transactions.push(txn.clone());

        tracing::info!(account = %number, cents = amount.cents(), "deposit");
        Ok(txn)
    }

    /// Take money out of an account
    pub fn withdraw(&mut self, number: AccountNumber, amount: Money) -> LedgerResult<Transaction> {
        ensure_positive(amount)?;
        let account = self
            .ledger
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: number.to_string(),
                needed: amount,
                available: account.balance,
            });
        }

        let new_balance = account.balance - amount;
        account.balance = new_balance;
        let txn = Transaction::new(TransactionKind::Withdrawal, amount, new_balance);
        account.transactions.push(txn.clone());

        tracing::info!(account = %number, cents = amount.cents(), "withdrawal");
        Ok(txn)
    }

    /// Full history of an account, oldest first
    pub fn get_history(&self, number: AccountNumber) -> LedgerResult<&[Transaction]> {
        Ok(&self.get(number)?.transactions)
    }

    /// The last `limit` transactions of an account, oldest first
    pub fn recent_history(
        &self,
        number: AccountNumber,
        limit: usize,
    ) -> LedgerResult<&[Transaction]> {
        Ok(self.get(number)?.recent_transactions(limit))
    }
}
