//! Export module for BankVault
//!
//! Writes plaintext statements of a single account's history:
//! - CSV: spreadsheet-compatible rows, one per transaction
//! - JSON: the account and its history with schema versioning
//!
//! Exports are never written unless the user asks for one.

pub mod csv;
pub mod json;

use std::io::Write;

use clap::ValueEnum;

use crate::error::LedgerResult;
use crate::models::Account;

pub use self::csv::export_statement_csv;
pub use self::json::{export_statement_json, AccountStatement, STATEMENT_SCHEMA_VERSION};

/// Statement format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// CSV rows, one per transaction
    #[default]
    Csv,
    /// JSON statement with the account and its full history
    Json,
}

/// Write a statement of `account` in the given format
pub fn export_statement<W: Write>(
    account: &Account,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => export_statement_csv(account, writer),
        ExportFormat::Json => export_statement_json(account, writer),
    }
}
