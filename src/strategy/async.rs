//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It reads the script in batches and applies each
//! batch through a [`BatchProcessor`] over a [`SharedLedger`].
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (client-group partitioning + tokio tasks)
//!         └── SharedLedger (Arc<Mutex<Ledger>>)
//! ```
//!
//! Batches are processed one after another; within a batch, operations on
//! unrelated clients run concurrently. The final ledger is identical to the
//! one the sync strategy produces for the same script.

use crate::core::batch::summarize;
use crate::core::{BatchProcessor, Ledger, ProcessingStats, SharedLedger};
use crate::io::async_reader::AsyncReader;
use crate::io::write_output;
use crate::strategy::{ProcessingStrategy, RunConfig};
use crate::types::LedgerError;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration for batch processing
///
/// Controls how many operations are read per batch and the number of worker
/// threads of the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of tokio worker threads
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                worker_threads,
                default = default.worker_threads,
                "invalid worker thread count, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone, Copy)]
pub struct AsyncProcessingStrategy {
    run: RunConfig,
    batch: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `run` - Ledger policies and output format
    /// * `batch` - Batch size and worker threads
    pub fn new(run: RunConfig, batch: BatchConfig) -> Self {
        Self { run, batch }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.batch.worker_threads)
            .build()?;

        let ledger = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => LedgerError::FileNotFound {
                        path: input_path.display().to_string(),
                    },
                    _ => LedgerError::from(e),
                })?;

            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let shared = SharedLedger::new(Ledger::seeded(self.run.ledger));
            let processor = BatchProcessor::new(shared.clone());
            let mut stats = ProcessingStats::default();

            loop {
                let batch = reader.read_batch(self.batch.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!(size = batch.len(), "processing batch");
                let results = processor.process_batch(batch).await;
                stats.merge(summarize(&results));
            }

            info!(
                applied = stats.applied,
                refused = stats.refused,
                malformed = reader.malformed(),
                "script processed"
            );

            Ok::<_, LedgerError>(shared.snapshot().await)
        })?;

        write_output(&ledger, self.run.output, output)
    }
}
