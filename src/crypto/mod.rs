//! Cryptographic functions for BankVault
//!
//! Provides AES-256-GCM encryption of the ledger with a randomly generated
//! key kept in a local key file.

pub mod encryption;
pub mod key_store;

pub use encryption::{decrypt, encrypt, EncryptedData};
pub use key_store::{KeyStore, LedgerKey, KEY_SIZE};
