//! Asynchronous CSV reader with batch interface
//!
//! Reads operation scripts with csv-async and hands them out in batches to
//! the async processing strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Operations
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::Operation;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Batch reader of operation scripts
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    malformed: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Wrap an async byte source
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            malformed: 0,
        }
    }

    /// Number of rows skipped as malformed so far
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Read up to `batch_size` well-formed operations
    ///
    /// Malformed rows are reported and skipped; they do not count towards the
    /// batch size. An empty batch means the script is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Operation> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let Some(row) = records.next().await else {
                break;
            };
            self.line_num += 1;

            let parsed = row
                .map_err(|e| e.to_string())
                .and_then(|csv_record| convert_csv_record(csv_record).map_err(|e| e.to_string()));

            match parsed {
                Ok(operation) => batch.push(operation),
                Err(e) => {
                    self.malformed += 1;
                    warn!(line = self.line_num, error = %e, "skipping malformed row");
                }
            }
        }

        batch
    }
}
