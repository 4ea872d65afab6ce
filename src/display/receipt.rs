//! Receipt formatting
//!
//! A receipt shows the holder, the current balance, and the most recent
//! transactions of one account.

use crate::models::{Account, Transaction};

const RULE: &str = "-------------------";

/// Format a receipt for an account and its most recent transactions
pub fn format_receipt(account: &Account, recent: &[Transaction], currency: &str) -> String {
    let mut output = String::new();

    output.push_str("Transaction Receipt\n");
    output.push_str(RULE);
    output.push('\n');
    output.push_str(&format!("Account Holder: {}\n", account.holder_name));
    output.push_str(&format!("Account Number: {}\n", account.number));
    output.push_str(&format!(
        "Balance: {}\n",
        account.balance.format_with_symbol(currency)
    ));
    output.push_str("Recent Transactions:\n");

    if recent.is_empty() {
        output.push_str("  (none)\n");
    }
    for txn in recent {
        output.push_str(&format!(
            "- {} [{}] {} {} (balance {})\n",
            txn.timestamp.format("%Y-%m-%d %H:%M:%S"),
            txn.id,
            txn.description(),
            txn.amount.format_with_symbol(currency),
            txn.balance_after.format_with_symbol(currency),
        ));
    }

    output.push_str(RULE);
    output.push('\n');
    output
}
