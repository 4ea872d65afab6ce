//! Key file management
//!
//! The ledger key is 32 random bytes kept in a local file next to the data.
//! It is created on first use with owner-only permissions and read back on
//! every later run.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{LedgerError, LedgerResult};

/// Length of the ledger key in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// The symmetric key that encrypts the ledger
///
/// The bytes are wiped when the key is dropped and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LedgerKey {
    key: [u8; KEY_SIZE],
}

impl LedgerKey {
    /// Generate a fresh key from the OS random number generator
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Build a key from raw bytes, which must be exactly 32 bytes long
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let key: [u8; KEY_SIZE] = bytes.try_into().ok()?;
        Some(Self { key })
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

// Don't print the key bytes in Debug output
impl std::fmt::Debug for LedgerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerKey").finish_non_exhaustive()
    }
}

/// Loads the ledger key from disk, creating it on first use
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the key file is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Return the stored key, generating and persisting one if none exists
    ///
    /// # Errors
    ///
    /// `KeyUnavailable` if the key file exists but cannot be read or does not
    /// hold exactly 32 bytes, or if a new key file cannot be written.
    pub fn get_or_create_key(&self) -> LedgerResult<LedgerKey> {
        match fs::read(&self.path) {
            Ok(mut bytes) => {
                let key = LedgerKey::from_slice(&bytes);
                let len = bytes.len();
                bytes.zeroize();
                key.ok_or_else(|| {
                    LedgerError::KeyUnavailable(format!(
                        "{} holds {} bytes, expected {}",
                        self.path.display(),
                        len,
                        KEY_SIZE
                    ))
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => self.create_key(),
            Err(e) => Err(LedgerError::KeyUnavailable(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn create_key(&self) -> LedgerResult<LedgerKey> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::KeyUnavailable(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let key = LedgerKey::generate();

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let write_result = options.open(&self.path).and_then(|mut file| {
            file.write_all(key.as_bytes())?;
            file.sync_all()
        });

        if let Err(e) = write_result {
            // Don't leave a truncated key behind for the next run to trip on.
            if e.kind() != ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&self.path);
            }
            return Err(LedgerError::KeyUnavailable(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            )));
        }

        tracing::info!(path = %self.path.display(), "generated new ledger key");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_key_on_first_use() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyStore::new(temp_dir.path().join("secret.key"));
        assert!(!store.exists());

        let key = store.get_or_create_key().unwrap();
        assert!(store.exists());

        let on_disk = fs::read(store.path()).unwrap();
        assert_eq!(on_disk.as_slice(), key.as_bytes());
    }

    #[test]
    fn test_returns_same_key_later() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyStore::new(temp_dir.path().join("secret.key"));

        let first = store.get_or_create_key().unwrap();
        let second = KeyStore::new(temp_dir.path().join("secret.key"))
            .get_or_create_key()
            .unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyStore::new(temp_dir.path().join("nested").join("secret.key"));
        store.get_or_create_key().unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_malformed_key_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.key");
        fs::write(&path, b"too short").unwrap();

        let result = KeyStore::new(&path).get_or_create_key();
        assert!(matches!(result, Err(LedgerError::KeyUnavailable(_))));

        // The malformed file is left for the user to inspect.
        assert_eq!(fs::read(&path).unwrap(), b"too short");
    }

    #[test]
    fn test_unreadable_key_path() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the key file should be
        let path = temp_dir.path().join("secret.key");
        fs::create_dir(&path).unwrap();

        let result = KeyStore::new(&path).get_or_create_key();
        assert!(matches!(result, Err(LedgerError::KeyUnavailable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = KeyStore::new(temp_dir.path().join("secret.key"));
        store.get_or_create_key().unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = LedgerKey::from_slice(&[7u8; KEY_SIZE]).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("LedgerKey"));
        assert!(!debug.contains('7'));
    }

    #[test]
    fn test_from_slice_length() {
        assert!(LedgerKey::from_slice(&[0u8; 31]).is_none());
        assert!(LedgerKey::from_slice(&[0u8; 33]).is_none());
        assert!(LedgerKey::from_slice(&[0u8; 32]).is_some());
    }
}
