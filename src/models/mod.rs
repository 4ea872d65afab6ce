//! Core data models for BankVault
//!
//! This module contains the data structures of the bookkeeping domain:
//! money amounts, identifiers, accounts, transactions, and the ledger that
//! holds them all.

pub mod account;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountValidationError};
pub use ids::{AccountNumber, AccountNumberParseError, TransactionId};
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind};
