//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::display::account::{format_account_details, format_account_list};
use crate::error::LedgerResult;
use crate::services::AccountService;
use crate::storage::LedgerStore;

use super::{parse_account_number, parse_amount, Session};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Account holder's name
        holder: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account number
        number: String,
    },
}

/// Handle an account command
pub fn handle_account_command<S: LedgerStore>(
    session: &mut Session<S>,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    let currency = session.settings().currency_symbol.clone();

    match cmd {
        AccountCommands::Create { holder, balance } => {
            let opening_balance = parse_amount(&balance)?;
            let number =
                AccountService::new(session.ledger_mut()).create_account(&holder, opening_balance)?;
            session.save()?;

            let service = AccountService::new(session.ledger_mut());
            let account = service.get(number)?;
            println!("Created account: {}", account.number);
            println!("  Holder:          {}", account.holder_name);
            println!(
                "  Opening Balance: {}",
                account.balance.format_with_symbol(&currency)
            );
        }

        AccountCommands::List => {
            let service = AccountService::new(session.ledger_mut());
            print!(
                "{}",
                format_account_list(&service.list(), service.total_balance(), &currency)
            );
        }

        AccountCommands::Show { number } => {
            let number = parse_account_number(&number)?;
            let service = AccountService::new(session.ledger_mut());
            let account = service.get(number)?;
            print!("{}", format_account_details(account, &currency));
        }
    }

    Ok(())
}
