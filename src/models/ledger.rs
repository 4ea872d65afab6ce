//! Ledger model
//!
//! The ledger is the full set of accounts plus the counter that hands out
//! account numbers. It is the unit that gets encrypted and persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::account::Account;
use super::ids::AccountNumber;
use super::money::Money;

/// Current on-disk schema version of the ledger
pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// All accounts, keyed by account number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default = "default_schema_version")]
    schema_version: u32,

    /// Next number to hand out; every existing account number is below it
    next_account_number: AccountNumber,

    #[serde(default)]
    accounts: BTreeMap<AccountNumber, Account>,
}

fn default_schema_version() -> u32 {
    LEDGER_SCHEMA_VERSION
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            next_account_number: AccountNumber::FIRST,
            accounts: BTreeMap::new(),
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn next_account_number(&self) -> AccountNumber {
        self.next_account_number
    }

    pub fn get(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    pub fn contains(&self, number: AccountNumber) -> bool {
        self.accounts.contains_key(&number)
    }

    /// All accounts ordered by number
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every account balance
    ///
    /// `None` if the total does not fit; operations that add money to the
    /// ledger refuse to get it there.
    pub fn total_balance(&self) -> Option<Money> {
        Money::checked_sum(self.accounts.values().map(|a| a.balance))
    }

    pub(crate) fn get_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(&number)
    }

    /// Get two distinct accounts mutably at once
    pub(crate) fn get_pair_mut(
        &mut self,
        first: AccountNumber,
        second: AccountNumber,
    ) -> Option<(&mut Account, &mut Account)> {
        if first == second {
            return None;
        }

        let mut first_account = None;
        let mut second_account = None;
        for (number, account) in self.accounts.iter_mut() {
            if *number == first {
                first_account = Some(account);
            } else if *number == second {
                second_account = Some(account);
            }
        }

        Some((first_account?, second_account?))
    }

    pub(crate) fn insert(&mut self, account: Account) {
        self.accounts.insert(account.number, account);
    }

    /// Reserve the next account number and advance the counter
    ///
    /// Returns `None` once the 8-digit space is used up.
    pub(crate) fn allocate_number(&mut self) -> Option<AccountNumber> {
        let number = self.next_account_number;
        if number > AccountNumber::LAST {
            return None;
        }
        // Past LAST the counter parks on a sentinel so the next call fails.
        self.next_account_number = number.next().unwrap_or(AccountNumber::PAST_LAST);
        Some(number)
    }

    /// Check the structural invariants of a ledger read back from storage
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != LEDGER_SCHEMA_VERSION {
            return Err(format!(
                "unsupported ledger schema version {}",
                self.schema_version
            ));
        }

        if self.next_account_number < AccountNumber::FIRST
            || self.next_account_number > AccountNumber::PAST_LAST
        {
            return Err(format!(
                "next account number {} is out of range",
                self.next_account_number
            ));
        }

        for (key, account) in &self.accounts {
            if *key != account.number {
                return Err(format!(
                    "account stored under {} carries number {}",
                    key, account.number
                ));
            }
            if account.number < AccountNumber::FIRST || account.number > AccountNumber::LAST {
                return Err(format!("account number {} is not 8 digits", account.number));
            }
            if account.number >= self.next_account_number {
                return Err(format!(
                    "account {} is not below the next account number {}",
                    account.number, self.next_account_number
                ));
            }
            account
                .validate()
                .map_err(|e| format!("account {}: {}", account.number, e))?;
        }

        if self.total_balance().is_none() {
            return Err("total of all balances is out of range".to_string());
        }

        Ok(())
    }
}
