//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating
//! between the SyncReader (for CSV input) and LedgerEngine (for ledger updates).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Operation dispatch to `LedgerEngine`
//! - Output to `io::write_output` (CSV or text report)

use crate::core::{Ledger, LedgerEngine};
use crate::io::sync_reader::SyncReader;
use crate::io::write_output;
use crate::strategy::{ProcessingStrategy, RunConfig};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// Streams the script row by row and applies each operation before reading
/// the next one.
///
/// # Examples
///
/// ```no_run
/// use bank_ledger::strategy::{ProcessingStrategy, RunConfig, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(RunConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("script.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    config: RunConfig,
}

impl SyncProcessingStrategy {
    /// Create a sync strategy with the given run settings
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let reader = SyncReader::new(input_path)?;
        let mut engine = LedgerEngine::new(Ledger::seeded(self.config.ledger));
        let mut malformed = 0usize;

        for result in reader {
            match result {
                // Refusals are already reported by the ledger.
                Ok(operation) => {
                    let _ = engine.process(&operation);
                }
                Err(e) => {
                    malformed += 1;
                    warn!(error = %e, "skipping malformed row");
                }
            }
        }

        let stats = engine.stats();
        info!(
            applied = stats.applied,
            refused = stats.refused,
            malformed,
            "script processed"
        );

        write_output(engine.ledger(), self.config.output, output)
    }
}
