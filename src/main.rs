//! Bank Ledger CLI
//!
//! Seeds the demo ledger, applies an operation script to it and prints the
//! final state.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > accounts.csv
//! cargo run -- --strategy sync --output text script.csv
//! cargo run -- --duplicate-names reject --negative-amounts reject-negative script.csv
//! cargo run -- --strategy async --batch-size 2000 --worker-threads 8 script.csv
//! RUST_LOG=warn cargo run -- --log-format json script.csv
//! ```
//!
//! Ledger notifications go to stderr; stdout only carries the output.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, output not writable)

use bank_ledger::{cli, strategy, telemetry};
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();
    telemetry::init(args.log_format);

    let strategy = {
        let batch = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.to_run_config(), batch)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!(error = %e, "processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
