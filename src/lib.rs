//! BankVault - Personal bank ledger with an encrypted local store
//!
//! This library provides the core functionality for the BankVault
//! application: a small in-memory ledger of bank accounts with deposits,
//! withdrawals and transfers, persisted as one AES-256-GCM encrypted file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `crypto`: Key store and authenticated encryption
//! - `error`: Custom error types
//! - `models`: Core data models (money, accounts, transactions, the ledger)
//! - `storage`: Encrypted ledger store behind the `LedgerStore` trait
//! - `services`: Business logic layer
//! - `display`: Terminal formatting for lists, registers and receipts
//! - `export`: CSV and JSON account statements
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use bankvault::config::{paths::BankPaths, settings::Settings};
//! use bankvault::storage::Storage;
//!
//! let paths = BankPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(&paths, &settings)?;
//! let ledger = storage.load()?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
