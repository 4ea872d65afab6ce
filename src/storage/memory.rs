//! In-memory ledger store
//!
//! Keeps the last saved (encrypted) ledger in memory instead of on disk.
//! Useful for tests and for callers that manage persistence themselves.

use std::cell::RefCell;

use crate::crypto::LedgerKey;
use crate::error::LedgerResult;
use crate::models::Ledger;

use super::encrypted::{open_ledger, seal_ledger};
use super::LedgerStore;

/// Ledger store holding the sealed ledger bytes in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    sealed: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes a file store would have written, if anything was saved
    pub fn sealed_bytes(&self) -> Option<Vec<u8>> {
        self.sealed.borrow().clone()
    }

    /// Replace the stored bytes, e.g. to simulate a damaged file
    pub fn set_sealed_bytes(&self, bytes: Vec<u8>) {
        *self.sealed.borrow_mut() = Some(bytes);
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self, key: &LedgerKey) -> LedgerResult<Ledger> {
        match self.sealed.borrow().as_deref() {
            Some(bytes) => open_ledger(bytes, key),
            None => Ok(Ledger::new()),
        }
    }

    fn save(&self, ledger: &Ledger, key: &LedgerKey) -> LedgerResult<()> {
        let bytes = seal_ledger(ledger, key)?;
        *self.sealed.borrow_mut() = Some(bytes);
        Ok(())
    }
}
