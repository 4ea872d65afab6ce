//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Format a list of accounts with balances as a table
///
/// `total` is the ledger total; `None` renders as out of range.
pub fn format_account_list(accounts: &[&Account], total: Option<Money>, currency: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    // Calculate column widths
    let name_width = accounts
        .iter()
        .map(|a| a.holder_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>14}  {:>5}\n",
        "Number",
        "Holder",
        "Balance",
        "Txns",
        name_width = name_width,
    ));
    output.push_str(&separator(name_width));

    for account in accounts {
        output.push_str(&format!(
            "{:<8}  {:<name_width$}  {:>14}  {:>5}\n",
            account.number.to_string(),
            account.holder_name,
            account.balance.format_with_symbol(currency),
            account.transactions.len(),
            name_width = name_width,
        ));
    }

    let total = match total {
        Some(total) => total.format_with_symbol(currency),
        None => "out of range".to_string(),
    };
    output.push_str(&separator(name_width));
    output.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>14}\n",
        "TOTAL",
        "",
        total,
        name_width = name_width,
    ));

    output
}

fn separator(name_width: usize) -> String {
    format!(
        "{:-<8}  {:-<name_width$}  {:->14}  {:->5}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    )
}

/// Format a single account's details
pub fn format_account_details(account: &Account, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.number));
    output.push_str(&format!("  Holder:       {}\n", account.holder_name));
    output.push_str(&format!(
        "  Opened:       {}\n",
        account.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "  Balance:      {}\n",
        account.balance.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Transactions: {}\n",
        account.transactions.len()
    ));

    if let Some(last) = account.transactions.last() {
        output.push_str(&format!(
            "  Last Activity: {}\n",
            last.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
