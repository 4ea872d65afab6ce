//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts, transaction registers and
//! receipts for terminal display.

pub mod account;
pub mod receipt;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use receipt::format_receipt;
pub use transaction::{format_transaction_register, format_transaction_row};
