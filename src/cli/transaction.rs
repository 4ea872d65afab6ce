//! Transaction CLI commands
//!
//! One-shot deposit, withdrawal and transfer commands, plus the read-only
//! receipt, history and export views of a single account.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::display::{format_receipt, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_statement, ExportFormat};
use crate::services::{AccountService, TransferService};
use crate::storage::LedgerStore;

use super::{parse_account_number, parse_amount, Session};

/// Handle the deposit command
pub fn handle_deposit<S: LedgerStore>(
    session: &mut Session<S>,
    number: &str,
    amount: &str,
) -> LedgerResult<()> {
    let number = parse_account_number(number)?;
    let amount = parse_amount(amount)?;

    let txn = AccountService::new(session.ledger_mut()).deposit(number, amount)?;
    session.save()?;

    let symbol = &session.settings().currency_symbol;
    println!(
        "Deposited {} to {}. New balance: {}",
        txn.amount.format_with_symbol(symbol),
        number,
        txn.balance_after.format_with_symbol(symbol)
    );
    println!("  Transaction: {}", txn.id);
    Ok(())
}

/// Handle the withdraw command
pub fn handle_withdraw<S: LedgerStore>(
    session: &mut Session<S>,
    number: &str,
    amount: &str,
) -> LedgerResult<()> {
    let number = parse_account_number(number)?;
    let amount = parse_amount(amount)?;

    let txn = AccountService::new(session.ledger_mut()).withdraw(number, amount)?;
    session.save()?;

    let symbol = &session.settings().currency_symbol;
    println!(
        "Withdrew {} from {}. New balance: {}",
        txn.amount.format_with_symbol(symbol),
        number,
        txn.balance_after.format_with_symbol(symbol)
    );
    println!("  Transaction: {}", txn.id);
    Ok(())
}

/// Handle the transfer command
pub fn handle_transfer<S: LedgerStore>(
    session: &mut Session<S>,
    from: &str,
    to: &str,
    amount: &str,
) -> LedgerResult<()> {
    let amount = parse_amount(amount)?;
    let from = parse_account_number(from)?;
    let to = parse_account_number(to)?;

    let result = TransferService::new(session.ledger_mut()).transfer(from, to, amount)?;
    session.save()?;

    let symbol = &session.settings().currency_symbol;
    println!("Transfer completed:");
    println!(
        "  From: {} (new balance {})",
        from,
        result.from_transaction.balance_after.format_with_symbol(symbol)
    );
    println!(
        "  To:   {} (new balance {})",
        to,
        result.to_transaction.balance_after.format_with_symbol(symbol)
    );
    println!(
        "  Amount: {}",
        result.from_transaction.amount.format_with_symbol(symbol)
    );
    Ok(())
}

/// Handle the receipt command
pub fn handle_receipt<S: LedgerStore>(
    session: &mut Session<S>,
    number: &str,
    limit: Option<usize>,
) -> LedgerResult<()> {
    let number = parse_account_number(number)?;
    let settings = session.settings().clone();
    let limit = limit.unwrap_or(settings.receipt_limit);

    let service = AccountService::new(session.ledger_mut());
    let account = service.get(number)?;
    let recent = service.recent_history(number, limit)?;
    print!(
        "{}",
        format_receipt(account, recent, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the history command
pub fn handle_history<S: LedgerStore>(session: &mut Session<S>, number: &str) -> LedgerResult<()> {
    let number = parse_account_number(number)?;
    let currency = session.settings().currency_symbol.clone();

    let service = AccountService::new(session.ledger_mut());
    let account = service.get(number)?;
    let history = service.get_history(number)?;

    println!("Account: {} ({})", account.number, account.holder_name);
    println!("Transactions: {}\n", history.len());
    print!("{}", format_transaction_register(history, &currency));
    Ok(())
}

/// Handle the export command
///
/// Writes to `output` when given, otherwise to stdout.
pub fn handle_export<S: LedgerStore>(
    session: &mut Session<S>,
    number: &str,
    format: ExportFormat,
    output: Option<&Path>,
) -> LedgerResult<()> {
    let number = parse_account_number(number)?;
    let service = AccountService::new(session.ledger_mut());
    let account = service.get(number)?;

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_statement(account, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;

            eprintln!(
                "Exported {} transactions to {}",
                account.transactions.len(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export_statement(account, format, &mut handle)?;
        }
    }

    Ok(())
}
