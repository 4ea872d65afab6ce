use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bankvault::cli::{
    handle_account_command, handle_deposit, handle_export, handle_history, handle_receipt,
    handle_transfer, handle_withdraw, run_shell, AccountCommands, Session,
};
use bankvault::config::{paths::BankPaths, paths::DATA_DIR_ENV, settings::Settings};
use bankvault::export::ExportFormat;
use bankvault::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bankvault",
    author = "Kaylee Beyene",
    version,
    about = "Personal bank ledger with an encrypted local store",
    long_about = "BankVault keeps a small set of bank accounts in a single encrypted \
                  file. Open accounts, deposit, withdraw and transfer funds, and print \
                  receipts from the command line or from the interactive menu."
)]
struct Cli {
    /// Directory holding the key, the ledger and config.json
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Deposit money into an account
    Deposit {
        /// Account number
        number: String,
        /// Amount (e.g., "100.00" or "100")
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account number
        number: String,
        /// Amount (e.g., "100.00" or "100")
        amount: String,
    },

    /// Transfer money between accounts
    Transfer {
        /// Source account number
        from: String,
        /// Destination account number
        to: String,
        /// Amount (e.g., "100.00" or "100")
        amount: String,
    },

    /// Print a receipt with the most recent transactions
    Receipt {
        /// Account number
        number: String,
        /// Number of transactions to show (defaults to receipt_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the full transaction history of an account
    History {
        /// Account number
        number: String,
    },

    /// Export an account statement (plaintext)
    Export {
        /// Account number
        number: String,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Statement format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Launch the interactive menu
    Shell,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => BankPaths::with_base_dir(dir),
        None => BankPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    if let Some(Commands::Config) = cli.command {
        println!("BankVault Configuration");
        println!("=======================");
        println!("Base directory: {}", paths.base_dir().display());
        println!("Settings file:  {}", paths.settings_file().display());
        println!("Key file:       {}", settings.key_file_path(&paths).display());
        println!("Ledger file:    {}", settings.ledger_file_path(&paths).display());
        println!();
        println!("Settings:");
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Receipt limit:   {}", settings.receipt_limit);
        return Ok(());
    }

    // Open storage and load the ledger; failures here end the run
    let storage = Storage::open(&paths, &settings).context("Could not open the key store")?;
    let ledger_path = storage.ledger_path();
    let mut session = Session::open(storage, settings).map_err(|e| {
        let context = if e.is_fatal_at_startup() {
            format!(
                "Could not load the ledger at {}; the file was left untouched",
                ledger_path.display()
            )
        } else {
            format!("Could not load the ledger at {}", ledger_path.display())
        };
        anyhow::Error::new(e).context(context)
    })?;

    match cli.command {
        Some(Commands::Account(cmd)) => handle_account_command(&mut session, cmd)?,
        Some(Commands::Deposit { number, amount }) => {
            handle_deposit(&mut session, &number, &amount)?
        }
        Some(Commands::Withdraw { number, amount }) => {
            handle_withdraw(&mut session, &number, &amount)?
        }
        Some(Commands::Transfer { from, to, amount }) => {
            handle_transfer(&mut session, &from, &to, &amount)?
        }
        Some(Commands::Receipt { number, limit }) => handle_receipt(&mut session, &number, limit)?,
        Some(Commands::History { number }) => handle_history(&mut session, &number)?,
        Some(Commands::Export {
            number,
            output,
            format,
        }) => handle_export(&mut session, &number, format, output.as_deref())?,
        Some(Commands::Shell) | None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            run_shell(&mut session, stdin.lock(), &mut stdout)?;
        }
        Some(Commands::Config) => {}
    }

    Ok(())
}
