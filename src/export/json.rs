//! JSON Export functionality
//!
//! Exports one account and its history as a versioned JSON statement.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountNumber, Money, Transaction};

/// Current statement schema version
pub const STATEMENT_SCHEMA_VERSION: &str = "1.0.0";

/// One account's statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatement {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub account_number: AccountNumber,
    pub holder_name: String,
    pub opened_at: DateTime<Utc>,
    pub balance: Money,

    /// Full history, oldest first
    pub transactions: Vec<Transaction>,
}

impl AccountStatement {
    /// Build a statement from an account
    pub fn from_account(account: &Account) -> Self {
        Self {
            schema_version: STATEMENT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            account_number: account.number,
            holder_name: account.holder_name.clone(),
            opened_at: account.created_at,
            balance: account.balance,
            transactions: account.transactions.clone(),
        }
    }
}

/// Export an account statement to pretty-printed JSON
pub fn export_statement_json<W: Write>(account: &Account, writer: &mut W) -> LedgerResult<()> {
    let statement = AccountStatement::from_account(account);

    serde_json::to_writer_pretty(&mut *writer, &statement)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    tracing::info!(account = %account.number, "exported json statement");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ledger;
    use crate::services::AccountService;

    #[test]
    fn test_export_statement_json() {
        let mut ledger = Ledger::new();
        let number = AccountService::new(&mut ledger)
            .create_account("Alice", Money::from_cents(4200))
            .unwrap();

        let mut output = Vec::new();
        export_statement_json(ledger.get(number).unwrap(), &mut output).unwrap();

        let parsed: AccountStatement = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.schema_version, STATEMENT_SCHEMA_VERSION);
        assert_eq!(parsed.account_number, number);
        assert_eq!(parsed.holder_name, "Alice");
        assert_eq!(parsed.balance.cents(), 4200);
        assert_eq!(parsed.transactions.len(), 1);
    }
}
