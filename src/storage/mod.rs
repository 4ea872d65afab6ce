//! Storage layer for BankVault
//!
//! The ledger is persisted through the [`LedgerStore`] trait. The default
//! store encrypts the whole ledger into a single file with atomic writes;
//! an in-memory store is available for tests.

pub mod encrypted;
pub mod file_io;
pub mod memory;

pub use encrypted::EncryptedFileStore;
pub use file_io::{read_bytes_optional, write_bytes_atomic};
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::config::{paths::BankPaths, settings::Settings};
use crate::crypto::{KeyStore, LedgerKey};
use crate::error::LedgerResult;
use crate::models::Ledger;

/// Loads and saves a whole ledger
pub trait LedgerStore {
    /// Load the ledger, or an empty one if nothing was saved yet
    ///
    /// # Errors
    ///
    /// `DecryptionFailed` if the key is wrong or the stored data was damaged,
    /// `CorruptData` if the decrypted data is not a valid ledger.
    fn load(&self, key: &LedgerKey) -> LedgerResult<Ledger>;

    /// Persist the ledger, replacing what was stored before
    ///
    /// # Errors
    ///
    /// `PersistenceFailed` if the data could not be written. The previously
    /// stored ledger is left intact.
    fn save(&self, ledger: &Ledger, key: &LedgerKey) -> LedgerResult<()>;
}

/// A ledger store paired with the key that encrypts it
pub struct Storage<S: LedgerStore = EncryptedFileStore> {
    store: S,
    key: LedgerKey,
}

impl Storage<EncryptedFileStore> {
    /// Open the on-disk storage described by the paths and settings
    ///
    /// Creates the key file on first use.
    pub fn open(paths: &BankPaths, settings: &Settings) -> LedgerResult<Self> {
        let key = KeyStore::new(settings.key_file_path(paths)).get_or_create_key()?;
        let store = EncryptedFileStore::new(settings.ledger_file_path(paths));
        Ok(Self::with_store(store, key))
    }

    /// Path of the encrypted ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }
}

impl<S: LedgerStore> Storage<S> {
    /// Wrap any store with a key
    pub fn with_store(store: S, key: LedgerKey) -> Self {
        Self { store, key }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the ledger
    pub fn load(&self) -> LedgerResult<Ledger> {
        self.store.load(&self.key)
    }

    /// Save the ledger
    pub fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        self.store.save(ledger, &self.key)
    }
}
