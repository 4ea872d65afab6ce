//! Configuration module for BankVault
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Key and ledger file location overrides

pub mod paths;
pub mod settings;

pub use paths::BankPaths;
pub use settings::Settings;
