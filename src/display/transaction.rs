//! Transaction display formatting
//!
//! Register views of an account's history.

use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency: &str) -> String {
    format!(
        "{} {:<13} {:<24} {:>14} {:>14}",
        txn.timestamp.format("%Y-%m-%d %H:%M:%S"),
        txn.id.to_string(),
        truncate(&txn.description(), 24),
        txn.signed_amount().format_with_symbol(currency),
        txn.balance_after.format_with_symbol(currency),
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:19} {:<13} {:<24} {:>14} {:>14}\n",
        "Date", "ID", "Description", "Amount", "Balance"
    ));
    output.push_str(&"-".repeat(88));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency));
        output.push('\n');
    }

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
