use crate::core::{AmountPolicy, DuplicateNamePolicy, LedgerConfig};
use crate::io::OutputFormat;
use crate::strategy::{BatchConfig, RunConfig};
use crate::telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply an operation script to the demo bank ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Apply an operation script to the demo bank ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger operations
    #[arg(value_name = "INPUT", help = "Path to the operation script")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for batched"
    )]
    pub strategy: StrategyType,

    /// Output format
    #[arg(long = "output", value_name = "FORMAT", default_value = "csv")]
    pub output: OutputFormat,

    /// What to do when an account name is reused for the same client
    #[arg(long = "duplicate-names", value_name = "POLICY", default_value = "allow")]
    pub duplicate_names: DuplicateNamePolicy,

    /// Whether negative amounts are applied or refused
    #[arg(long = "negative-amounts", value_name = "POLICY", default_value = "permissive")]
    pub negative_amounts: AmountPolicy,

    /// Number of operations per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Log line format on stderr
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Ledger policies and output format selected on the command line
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            ledger: LedgerConfig::new(self.duplicate_names, self.negative_amounts),
            output: self.output,
        }
    }

    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.worker_threads.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.worker_threads.unwrap_or(default.worker_threads),
            )
        } else {
            BatchConfig::default()
        }
    }
}
