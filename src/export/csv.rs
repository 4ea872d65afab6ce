//! CSV Export functionality
//!
//! Writes one account's history as a spreadsheet-compatible statement.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Account;

const HEADER: [&str; 7] = [
    "ID",
    "Timestamp",
    "Type",
    "Counterparty",
    "Amount",
    "Signed Amount",
    "Balance After",
];

/// Export an account's full history to CSV
///
/// Amounts are written as plain decimals (no currency symbol) so that
/// spreadsheets read them as numbers.
pub fn export_statement_csv<W: Write>(account: &Account, writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADER).map_err(export_error)?;

    for txn in &account.transactions {
        let counterparty = txn
            .counterparty
            .map(|number| number.to_string())
            .unwrap_or_default();

        csv_writer
            .write_record([
                txn.id.as_uuid().to_string(),
                txn.timestamp.to_rfc3339(),
                txn.kind.to_string(),
                counterparty,
                txn.amount.format_with_symbol(""),
                txn.signed_amount().format_with_symbol(""),
                txn.balance_after.format_with_symbol(""),
            ])
            .map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    tracing::info!(
        account = %account.number,
        rows = account.transactions.len(),
        "exported csv statement"
    );
    Ok(())
}

fn export_error(e: csv::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}
