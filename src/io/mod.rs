//! I/O module
//!
//! Handles operation script parsing and ledger output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_accounts_csv, CsvRecord};
pub use sync_reader::SyncReader;

use crate::core::traits::LedgerView;
use crate::report::write_report;
use crate::types::LedgerError;
use clap::ValueEnum;
use std::io::Write;

/// Final output of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One CSV row per account
    #[default]
    Csv,
    /// Accounts, histories and grand total as text
    Text,
}

/// Write the ledger in the requested format
pub fn write_output<V>(
    view: &V,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), LedgerError>
where
    V: LedgerView + ?Sized,
{
    match format {
        OutputFormat::Csv => write_accounts_csv(view, output),
        OutputFormat::Text => write_report(view, output),
    }
}
