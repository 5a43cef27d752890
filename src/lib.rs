//! Bank Ledger Library
//! # Overview
//!
//! An in-memory banking ledger: a fixed set of clients, each owning named
//! accounts, with deposits, withdrawals, transfers, account deletion and
//! history reporting. Operation scripts can be applied with a sync or an async
//! strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, HistoryEntry, Operation, LedgerError)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account storage and balance-mutating operations
//!   - [`core::engine`] - Sequential operation processing
//!   - [`core::shared`] - Lock-protected handle for concurrent callers
//!   - [`core::batch`] - Batched processing over the shared handle
//! - [`io`] - Script readers and CSV output
//! - [`report`] - Text rendering of accounts, histories and totals
//! - [`strategy`] - Complete processing pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`telemetry`] - Log subscriber setup
//!
//! # Operations
//!
//! - **Create**: open an account, optionally with an initial deposit
//! - **Deposit**: credit an account
//! - **Withdraw**: debit an account (requires a sufficient balance)
//! - **Transfer**: debit one account and credit another, atomically
//! - **Delete**: remove an account whose balance is exactly zero
//!
//! # Example
//!
//! ```
//! use bank_ledger::{Ledger, LedgerConfig, LedgerView};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::seeded(LedgerConfig::default());
//! ledger
//!     .transfer("Diana", "Compte courant", "Eve", "Compte commun", Decimal::new(1000, 0))
//!     .unwrap();
//!
//! assert_eq!(ledger.total_balance(), Decimal::new(27000, 0));
//! ```

pub mod cli;
pub mod core;
pub mod io;
pub mod report;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use crate::core::{Ledger, LedgerConfig, LedgerEngine, LedgerView, SharedLedger};
pub use io::{write_accounts_csv, write_output, OutputFormat};
pub use types::{
    Account, AccountNumber, Counterpart, EntryKind, HistoryEntry, LedgerError, Operation,
    OperationType,
};
