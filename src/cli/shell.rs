//! Interactive menu shell
//!
//! A [`Session`] owns the in-memory ledger together with the storage it was
//! loaded from. The shell drives a session from line-based input, saving
//! after every successful change.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::format_receipt;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountNumber, Ledger, Money};
use crate::services::{AccountService, TransferService};
use crate::storage::{EncryptedFileStore, LedgerStore, Storage};

use super::{parse_account_number, parse_amount};

const MENU: &str = "\n--- Welcome to BankVault ---
1. Create Account
2. Deposit Money
3. Withdraw Money
4. Transfer Money
5. View Receipt
6. Exit
";

/// The ledger of one run, bound to where it is persisted
pub struct Session<S: LedgerStore = EncryptedFileStore> {
    ledger: Ledger,
    storage: Storage<S>,
    settings: Settings,
}

impl<S: LedgerStore> Session<S> {
    /// Load the ledger from storage
    ///
    /// # Errors
    ///
    /// Any load failure is returned as is; a damaged or undecryptable ledger
    /// is never replaced by an empty one.
    pub fn open(storage: Storage<S>, settings: Settings) -> LedgerResult<Self> {
        let ledger = storage.load()?;
        Ok(Self {
            ledger,
            storage,
            settings,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Persist the current ledger
    pub fn save(&self) -> LedgerResult<()> {
        self.storage.save(&self.ledger)
    }
}

/// Run the interactive menu until the user exits or input ends
///
/// Ledger errors are reported and the loop continues; only failures to read
/// input or write output end the shell with an error.
pub fn run_shell<S, R, W>(session: &mut Session<S>, mut input: R, output: &mut W) -> LedgerResult<()>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", MENU)?;
        let Some(choice) = prompt(&mut input, output, "Choose an option: ")? else {
            writeln!(output, "\nGoodbye!")?;
            return Ok(());
        };

        let result = match choice.as_str() {
            "1" => create_account(session, &mut input, output),
            "2" => deposit(session, &mut input, output),
            "3" => withdraw(session, &mut input, output),
            "4" => transfer(session, &mut input, output),
            "5" => receipt(session, &mut input, output),
            "6" => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(output, "Invalid choice. Please select a valid option.")?;
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(LedgerError::Io(e)) => return Err(LedgerError::Io(e)),
            Err(e) if e.is_not_found() => {
                writeln!(output, "Error: {}", e)?;
                writeln!(output, "Check the number, or choose 1 to create an account.")?;
            }
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> LedgerResult<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`prompt`], but running out of input mid-operation is an error
fn require<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> LedgerResult<String> {
    prompt(input, output, message)?
        .ok_or_else(|| LedgerError::Io("input ended unexpectedly".into()))
}

fn require_existing<S: LedgerStore, R: BufRead, W: Write>(
    session: &Session<S>,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> LedgerResult<AccountNumber> {
    let number = parse_account_number(&require(input, output, message)?)?;
    if !session.ledger().contains(number) {
        return Err(LedgerError::account_not_found(number));
    }
    Ok(number)
}

/// Save after a change; a failed save keeps the change in memory
fn commit<S: LedgerStore, W: Write>(session: &Session<S>, output: &mut W) -> LedgerResult<()> {
    if let Err(e) = session.save() {
        tracing::warn!(error = %e, "ledger not saved");
        writeln!(
            output,
            "Warning: {}. The change is kept for this session but is not saved yet.",
            e
        )?;
    }
    Ok(())
}

fn create_account<S: LedgerStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: &mut R,
    output: &mut W,
) -> LedgerResult<()> {
    let holder = require(input, output, "Enter the account holder's name: ")?;
    let number = AccountService::new(session.ledger_mut()).create_account(&holder, Money::zero())?;
    writeln!(
        output,
        "Account created successfully. Account Number: {}",
        number
    )?;
    commit(session, output)
}

fn deposit<S: LedgerStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: &mut R,
    output: &mut W,
) -> LedgerResult<()> {
    let number = require_existing(session, input, output, "Enter your account number: ")?;
    let amount = parse_amount(&require(input, output, "Enter amount to deposit: ")?)?;

    let txn = AccountService::new(session.ledger_mut()).deposit(number, amount)?;
    let symbol = &session.settings().currency_symbol;
    writeln!(
        output,
        "{} has been deposited. New balance: {}",
        txn.amount.format_with_symbol(symbol),
        txn.balance_after.format_with_symbol(symbol)
    )?;
    commit(session, output)
}

fn withdraw<S: LedgerStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: &mut R,
    output: &mut W,
) -> LedgerResult<()> {
    let number = require_existing(session, input, output, "Enter your account number: ")?;
    let amount = parse_amount(&require(input, output, "Enter amount to withdraw: ")?)?;

    let txn = AccountService::new(session.ledger_mut()).withdraw(number, amount)?;
    let symbol = &session.settings().currency_symbol;
    writeln!(
        output,
        "{} has been withdrawn. New balance: {}",
        txn.amount.format_with_symbol(symbol),
        txn.balance_after.format_with_symbol(symbol)
    )?;
    commit(session, output)
}

fn transfer<S: LedgerStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: &mut R,
    output: &mut W,
) -> LedgerResult<()> {
    let from = require_existing(session, input, output, "Enter your account number: ")?;
    let to = require_existing(session, input, output, "Enter target account number: ")?;
    let amount = parse_amount(&require(input, output, "Enter amount to transfer: ")?)?;

    let result = TransferService::new(session.ledger_mut()).transfer(from, to, amount)?;
    let symbol = &session.settings().currency_symbol;
    writeln!(
        output,
        "Transferred {} to account {}. New balance: {}",
        result.from_transaction.amount.format_with_symbol(symbol),
        to,
        result.from_transaction.balance_after.format_with_symbol(symbol)
    )?;
    commit(session, output)
}

fn receipt<S: LedgerStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    input: &mut R,
    output: &mut W,
) -> LedgerResult<()> {
    let number = parse_account_number(&require(input, output, "Enter your account number: ")?)?;
    let settings = session.settings().clone();

    let service = AccountService::new(session.ledger_mut());
    let account = service.get(number)?;
    let recent = service.recent_history(number, settings.receipt_limit)?;
    writeln!(output)?;
    write!(
        output,
        "{}",
        format_receipt(account, recent, &settings.currency_symbol)
    )?;
    Ok(())
}
