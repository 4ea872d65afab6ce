//! Encrypted ledger file
//!
//! The whole ledger is serialized to JSON, encrypted as one blob, and written
//! atomically. Loading reverses each step and checks the result.

use std::path::{Path, PathBuf};

use crate::crypto::{decrypt, encrypt, EncryptedData, LedgerKey};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Ledger;

use super::file_io::{read_bytes_optional, write_bytes_atomic};
use super::LedgerStore;

/// Serialize and encrypt a ledger into the bytes of a data file
pub(crate) fn seal_ledger(ledger: &Ledger, key: &LedgerKey) -> LedgerResult<Vec<u8>> {
    let plaintext = serde_json::to_vec(ledger).map_err(|e| {
        LedgerError::PersistenceFailed(format!("Failed to serialize ledger: {}", e))
    })?;
    encrypt(&plaintext, key)?.to_bytes()
}

/// Decrypt and parse the bytes of a data file
pub(crate) fn open_ledger(bytes: &[u8], key: &LedgerKey) -> LedgerResult<Ledger> {
    let envelope = EncryptedData::from_bytes(bytes)?;
    let plaintext = decrypt(&envelope, key)?;

    let ledger: Ledger = serde_json::from_slice(&plaintext)
        .map_err(|e| LedgerError::CorruptData(format!("Failed to parse ledger: {}", e)))?;

    ledger.validate().map_err(LedgerError::CorruptData)?;
    Ok(ledger)
}

/// Ledger store backed by one encrypted file on disk
#[derive(Debug, Clone)]
pub struct EncryptedFileStore {
    path: PathBuf,
}

impl EncryptedFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for EncryptedFileStore {
    fn load(&self, key: &LedgerKey) -> LedgerResult<Ledger> {
        let Some(bytes) = read_bytes_optional(&self.path)? else {
            tracing::info!(path = %self.path.display(), "no ledger file, starting empty");
            return Ok(Ledger::new());
        };

        let ledger = open_ledger(&bytes, key)?;
        tracing::info!(
            path = %self.path.display(),
            accounts = ledger.len(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger, key: &LedgerKey) -> LedgerResult<()> {
        let bytes = seal_ledger(ledger, key)?;
        write_bytes_atomic(&self.path, &bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            accounts = ledger.len(),
            bytes = bytes.len(),
            "saved ledger"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::{AccountService, TransferService};
    use std::fs;
    use tempfile::TempDir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let a = AccountService::new(&mut ledger)
            .create_account("Alice", Money::from_cents(10000))
            .unwrap();
        let b = AccountService::new(&mut ledger)
            .create_account("Bob", Money::zero())
            .unwrap();
        AccountService::new(&mut ledger)
            .withdraw(a, Money::from_cents(2500))
            .unwrap();
        TransferService::new(&mut ledger)
            .transfer(a, b, Money::from_cents(1000))
            .unwrap();
        ledger
    }

    fn create_test_store() -> (TempDir, EncryptedFileStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = EncryptedFileStore::new(temp_dir.path().join("data").join("ledger.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (_temp_dir, store) = create_test_store();
        let ledger = store.load(&LedgerKey::generate()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let (_temp_dir, store) = create_test_store();
        let key = LedgerKey::generate();
        let ledger = sample_ledger();

        store.save(&ledger, &key).unwrap();
        let loaded = store.load(&key).unwrap();

        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_file_does_not_contain_plaintext() {
        let (_temp_dir, store) = create_test_store();
        let key = LedgerKey::generate();
        store.save(&sample_ledger(), &key).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(!contents.contains("Alice"));
        assert!(!contents.contains("10000000"));
        assert!(contents.contains("\"nonce\""));
    }

    #[test]
    fn test_wrong_key_fails() {
        let (_temp_dir, store) = create_test_store();
        store.save(&sample_ledger(), &LedgerKey::generate()).unwrap();

        let result = store.load(&LedgerKey::generate());
        assert!(matches!(result, Err(LedgerError::DecryptionFailed(_))));
    }

    #[test]
    fn test_any_flipped_byte_is_detected() {
        let (_temp_dir, store) = create_test_store();
        let key = LedgerKey::generate();
        let mut ledger = Ledger::new();
        AccountService::new(&mut ledger)
            .create_account("A", Money::from_cents(100))
            .unwrap();
        store.save(&ledger, &key).unwrap();

        let original = fs::read(store.path()).unwrap();
        for i in 0..original.len() {
            let mut tampered = original.clone();
            tampered[i] ^= 0x01;
            fs::write(store.path(), &tampered).unwrap();

            match store.load(&key) {
                Err(LedgerError::DecryptionFailed(_)) | Err(LedgerError::CorruptData(_)) => {}
                other => panic!("byte {} flip was not detected: {:?}", i, other),
            }
        }
    }

    #[test]
    fn test_valid_ciphertext_of_garbage_is_corrupt_data() {
        let (_temp_dir, store) = create_test_store();
        let key = LedgerKey::generate();

        let bytes = encrypt(b"{\"accounts\": 42}", &key).unwrap().to_bytes().unwrap();
        write_bytes_atomic(store.path(), &bytes).unwrap();

        let result = store.load(&key);
        assert!(matches!(result, Err(LedgerError::CorruptData(_))));
    }

    #[test]
    fn test_inconsistent_ledger_is_corrupt_data() {
        let (_temp_dir, store) = create_test_store();
        let key = LedgerKey::generate();

        let mut value = serde_json::to_value(sample_ledger()).unwrap();
        value["accounts"]["10000000"]["balance"] = serde_json::json!(-5);
        let bytes = encrypt(&serde_json::to_vec(&value).unwrap(), &key)
            .unwrap()
            .to_bytes()
            .unwrap();
        write_bytes_atomic(store.path(), &bytes).unwrap();

        let result = store.load(&key);
        assert!(matches!(result, Err(LedgerError::CorruptData(_))));
    }

    #[test]
    fn test_save_failure_is_persistence_failed() {
        let temp_dir = TempDir::new().unwrap();
        // The data path is an existing directory, so the rename cannot succeed
        let path = temp_dir.path().join("ledger.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        let store = EncryptedFileStore::new(&path);
        let ledger = sample_ledger();
        let result = store.save(&ledger, &LedgerKey::generate());

        assert!(matches!(result, Err(LedgerError::PersistenceFailed(_))));
        assert_eq!(ledger.len(), 2);
    }
}
