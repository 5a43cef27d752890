//! Core business logic module
//!
//! This module contains the ledger and the components that drive it:
//! - `ledger` - Account storage and the balance-mutating operations
//! - `registry` - The fixed set of known clients
//! - `config` - Duplicate-name and amount policies
//! - `seed` - Demo clients and accounts
//! - `traits` - Read-only view used by reports and writers
//! - `engine` - Sequential operation processing
//! - `shared` - Lock-protected ledger handle for concurrent callers
//! - `batch` - Parallel batch processing over the shared handle

pub mod batch;
pub mod config;
pub mod engine;
pub mod ledger;
pub mod registry;
pub mod seed;
pub mod shared;
pub mod traits;

pub use batch::{BatchProcessor, ProcessingResult};
pub use config::{AmountPolicy, DuplicateNamePolicy, LedgerConfig};
pub use engine::{apply, LedgerEngine, ProcessingStats};
pub use ledger::{Ledger, TransferReceipt};
pub use registry::ClientRegistry;
pub use seed::SEED_ACCOUNTS;
pub use shared::SharedLedger;
pub use traits::LedgerView;
