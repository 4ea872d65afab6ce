//! User settings for BankVault
//!
//! Manages display preferences and optional overrides for where the key
//! and the encrypted ledger live.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::BankPaths;
use crate::error::LedgerError;

/// User settings for BankVault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used on receipts and listings
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of recent transactions shown on a receipt
    #[serde(default = "default_receipt_limit")]
    pub receipt_limit: usize,

    /// Key file location; relative paths are resolved against the base dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    /// Encrypted ledger location; relative paths are resolved against the base dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_receipt_limit() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            receipt_limit: default_receipt_limit(),
            key_file: None,
            data_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or use default settings if the file doesn't exist
    pub fn load_or_create(paths: &BankPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.receipt_limit == 0 {
            return Err(LedgerError::Config(
                "receipt_limit must be at least 1".into(),
            ));
        }

        Ok(settings)
    }

    /// Where the key file lives
    pub fn key_file_path(&self, paths: &BankPaths) -> PathBuf {
        match &self.key_file {
            Some(path) => paths.resolve(path),
            None => paths.key_file(),
        }
    }

    /// Where the encrypted ledger lives
    pub fn ledger_file_path(&self, paths: &BankPaths) -> PathBuf {
        match &self.data_file {
            Some(path) => paths.resolve(path),
            None => paths.ledger_file(),
        }
    }
}
