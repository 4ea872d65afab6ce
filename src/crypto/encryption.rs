//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for the ledger at rest using AES-256-GCM.
//! Each encryption operation generates a unique nonce, stored next to the
//! ciphertext in a small versioned envelope.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::LedgerKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Envelope format version written by this build
const ENVELOPE_VERSION: u8 = 1;

/// Encrypted data with the nonce needed to decrypt it
///
/// Parsing is strict: any unknown or missing field rejects the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptedData {
    /// Version for future algorithm upgrades
    pub version: u8,
    /// The nonce used for this encryption (base64 encoded)
    pub nonce: String,
    /// The encrypted ciphertext with authentication tag (base64 encoded)
    pub ciphertext: String,
}

impl EncryptedData {
    fn new(nonce: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
        }
    }

    /// Serialize the envelope to the bytes stored on disk
    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            LedgerError::PersistenceFailed(format!("Failed to serialize envelope: {}", e))
        })
    }

    /// Parse an envelope from the bytes stored on disk
    ///
    /// An unparseable envelope means the file was damaged, so this fails
    /// with `DecryptionFailed` rather than `CorruptData`.
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            LedgerError::DecryptionFailed(format!("Malformed encrypted envelope: {}", e))
        })
    }

    fn decode_nonce(&self) -> LedgerResult<Vec<u8>> {
        STANDARD.decode(&self.nonce).map_err(|e| {
            LedgerError::DecryptionFailed(format!("Invalid nonce encoding: {}", e))
        })
    }

    fn decode_ciphertext(&self) -> LedgerResult<Vec<u8>> {
        STANDARD.decode(&self.ciphertext).map_err(|e| {
            LedgerError::DecryptionFailed(format!("Invalid ciphertext encoding: {}", e))
        })
    }
}

fn cipher_for(key: &LedgerKey) -> Aes256Gcm {
    // A 32-byte array always has the length AES-256 needs.
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypt plaintext data using AES-256-GCM
///
/// Generates a random nonce for each encryption operation.
pub fn encrypt(plaintext: &[u8], key: &LedgerKey) -> LedgerResult<EncryptedData> {
    let cipher = cipher_for(key);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LedgerError::PersistenceFailed(format!("Encryption failed: {}", e)))?;

    Ok(EncryptedData::new(&nonce_bytes, &ciphertext))
}

/// Decrypt ciphertext using AES-256-GCM
pub fn decrypt(encrypted: &EncryptedData, key: &LedgerKey) -> LedgerResult<Vec<u8>> {
    if encrypted.version != ENVELOPE_VERSION {
        return Err(LedgerError::DecryptionFailed(format!(
            "Unsupported encryption version: {}",
            encrypted.version
        )));
    }

    let nonce_bytes = encrypted.decode_nonce()?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(LedgerError::DecryptionFailed(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = encrypted.decode_ciphertext()?;

    cipher_for(key)
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| {
            LedgerError::DecryptionFailed("invalid key or corrupted data".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let key = LedgerKey::generate();
        let plaintext = b"{\"accounts\":{}}";

        let encrypted = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_different_nonces() {
        let key = LedgerKey::generate();
        let plaintext = b"same ledger";

        let encrypted1 = encrypt(plaintext, &key).unwrap();
        let encrypted2 = encrypt(plaintext, &key).unwrap();

        assert_ne!(encrypted1.nonce, encrypted2.nonce);
        assert_ne!(encrypted1.ciphertext, encrypted2.ciphertext);
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = encrypt(b"secret", &LedgerKey::generate()).unwrap();

        let result = decrypt(&encrypted, &LedgerKey::generate());
        assert!(matches!(result, Err(LedgerError::DecryptionFailed(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = LedgerKey::generate();
        let mut encrypted = encrypt(b"Hello, World!", &key).unwrap();

        let mut ciphertext = STANDARD.decode(&encrypted.ciphertext).unwrap();
        ciphertext[0] ^= 0xFF;
        encrypted.ciphertext = STANDARD.encode(&ciphertext);

        let result = decrypt(&encrypted, &key);
        assert!(matches!(result, Err(LedgerError::DecryptionFailed(_))));
    }

    #[test]
    fn test_bad_nonce_fails() {
        let key = LedgerKey::generate();
        let mut encrypted = encrypt(b"data", &key).unwrap();
        encrypted.nonce = STANDARD.encode([0u8; 4]);

        let result = decrypt(&encrypted, &key);
        assert!(matches!(result, Err(LedgerError::DecryptionFailed(_))));
    }

    #[test]
    fn test_unsupported_version_fails() {
        let key = LedgerKey::generate();
        let mut encrypted = encrypt(b"data", &key).unwrap();
        encrypted.version = 2;

        assert!(matches!(
            decrypt(&encrypted, &key),
            Err(LedgerError::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_envelope_bytes() {
        let key = LedgerKey::generate();
        let encrypted = encrypt(b"data", &key).unwrap();

        let bytes = encrypted.to_bytes().unwrap();
        let parsed = EncryptedData::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, encrypted);

        assert!(matches!(
            EncryptedData::from_bytes(b"not an envelope"),
            Err(LedgerError::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = LedgerKey::generate();
        let encrypted = encrypt(b"", &key).unwrap();
        assert!(decrypt(&encrypted, &key).unwrap().is_empty());
    }
}
