//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete script processing
//! pipelines, encompassing script parsing, ledger updates and output. This
//! allows different processing implementations (synchronous, asynchronous
//! batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerConfig;
use crate::io::OutputFormat;
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Settings shared by every strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Policies of the ledger the script runs against
    pub ledger: LedgerConfig,
    /// Format of the final output
    pub output: OutputFormat,
}

/// Processing strategy trait for complete script pipelines
///
/// Each strategy seeds a ledger, applies the operations of a script file in
/// order and writes the final ledger state to an output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from `input_path` and write the result to `output`
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the operation script
    /// * `output` - Writer receiving the final ledger state
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the script was processed (refused operations included)
    /// * `Err(LedgerError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (`FileNotFound`, `IoError`)
    /// - The output cannot be written
    ///
    /// Malformed rows and refused operations are reported through `tracing`
    /// and do not stop processing.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `run` - Ledger policies and output format
/// * `batch` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    run: RunConfig,
    batch: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(run)),
        StrategyType::Async => {
            Box::new(AsyncProcessingStrategy::new(run, batch.unwrap_or_default()))
        }
    }
}
