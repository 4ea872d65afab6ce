//! Service layer for BankVault
//!
//! The service layer provides business logic on top of the in-memory
//! ledger, handling validation and the bookkeeping of transaction history.

pub mod account;
pub mod transfer;

pub use account::AccountService;
pub use transfer::{TransferResult, TransferService};
