//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod shell;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use shell::{run_shell, Session};
pub use transaction::{
    handle_deposit, handle_export, handle_history, handle_receipt, handle_transfer,
    handle_withdraw,
};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, Money};

/// Parse an account number typed by the user
///
/// Anything that is not a valid number cannot name an account, so it is
/// reported as not found.
pub fn parse_account_number(s: &str) -> LedgerResult<AccountNumber> {
    s.parse()
        .map_err(|_| LedgerError::account_not_found(s.trim()))
}

/// Parse an amount typed by the user
pub fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| {
        LedgerError::InvalidAmount(format!("{} (use a format like '100.00' or '100')", e))
    })
}
