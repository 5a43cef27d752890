//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the sync and async processing strategies using the
//! divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Scripts are generated into temporary files before timing starts. Each one
//! mixes deposits, withdrawals and transfers over the seeded accounts, with an
//! occasional account creation.

use bank_ledger::cli::StrategyType;
use bank_ledger::strategy::{create_strategy, BatchConfig, RunConfig};
use divan::Bencher;
use std::io::Write;
use tempfile::NamedTempFile;

const ACCOUNTS: [(&str, &str); 5] = [
    ("Alice", "Compte courant"),
    ("Bob", "Compte courant"),
    ("Charlie", "LDDS"),
    ("Diana", "Compte courant"),
    ("Eve", "Compte commun"),
];

const SIZES: &[usize] = &[100, 1_000, 100_000];

fn main() {
    divan::main();
}

fn generate_script(operations: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create script file");
    writeln!(file, "op,client,account,amount,to_client,to_account").expect("Failed to write header");

    for i in 0..operations {
        let (client, account) = ACCOUNTS[i % ACCOUNTS.len()];
        let (to_client, to_account) = ACCOUNTS[(i * 3 + 1) % ACCOUNTS.len()];
        let amount = (i % 97) + 1;

        let row = match i % 10 {
            0..=3 => format!("deposit,{client},{account},{amount}"),
            4..=6 => format!("withdraw,{client},{account},{amount}"),
            7 | 8 => format!("transfer,{client},{account},{amount},{to_client},{to_account}"),
            _ => format!("create,{client},Account {i},{amount}"),
        };
        writeln!(file, "{row}").expect("Failed to write row");
    }

    file.flush().expect("Failed to flush script file");
    file
}

/// Benchmark the sync strategy
#[divan::bench(args = SIZES)]
fn sync_strategy(bencher: Bencher, operations: usize) {
    let script = generate_script(operations);
    let strategy = create_strategy(StrategyType::Sync, RunConfig::default(), None);

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(script.path(), &mut output)
            .expect("Processing failed");
    });
}

/// Benchmark the async strategy
#[divan::bench(args = SIZES)]
fn async_strategy(bencher: Bencher, operations: usize) {
    let script = generate_script(operations);
    let strategy = create_strategy(
        StrategyType::Async,
        RunConfig::default(),
        Some(BatchConfig::default()),
    );

    bencher.bench_local(|| {
        let mut output = Vec::new();
        strategy
            .process(script.path(), &mut output)
            .expect("Processing failed");
    });
}
