//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `transaction`: History entries and ledger operations
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountNumber};
pub use error::LedgerError;
pub use transaction::{
    Counterpart, EntryKind, HistoryEntry, Operation, OperationType, TransferDirection,
};
