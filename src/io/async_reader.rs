//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading over the rows of one backup table, so both backups
//! can be loaded concurrently.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures `AsyncRead` so it works over tokio files (via tokio-util compat)
//!   and in-memory cursors alike
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of typed rows
//!                  ↓
//!           csv_format module
//!           (CsvTable, validate_headers)
//! ```

use crate::io::csv_format::{validate_headers, CsvTable};
use crate::types::RecoveryError;
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::io::AsyncRead;
use std::marker::PhantomData;

/// Asynchronous CSV reader for the table `T`
pub struct AsyncReader<R: AsyncRead + Unpin, T> {
    csv_reader: csv_async::AsyncReader<R>,
    headers: StringRecord,
    _table: PhantomData<T>,
}

impl<R, T> AsyncReader<R, T>
where
    R: AsyncRead + Unpin + Send,
    T: CsvTable,
{
    /// Create a new AsyncReader from an async reader
    ///
    /// Reads the header row and validates it against `T`'s required columns.
    pub async fn new(reader: R) -> Result<Self, RecoveryError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .create_reader(reader);

        let headers = csv_reader.headers().await?.clone();
        validate_headers::<T, _>(headers.iter())?;

        Ok(Self {
            csv_reader,
            headers,
            _table: PhantomData,
        })
    }

    /// Read a batch of rows
    ///
    /// Reads up to `batch_size` records and converts them. The first bad
    /// record ends the read with an error.
    ///
    /// # Returns
    ///
    /// The converted rows; an empty vector once the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<T>, RecoveryError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut record = StringRecord::new();

        while batch.len() < batch_size {
            if !self.csv_reader.read_record(&mut record).await? {
                break;
            }

            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            let raw = record
                .deserialize::<T::Raw>(Some(&self.headers))
                .map_err(|e| RecoveryError::ParseError {
                    line: Some(line),
                    message: e.to_string(),
                })?;
            batch.push(T::convert(raw, line)?);
        }

        Ok(batch)
    }

    /// Read every remaining row, `batch_size` records at a time
    pub async fn read_all(&mut self, batch_size: usize) -> Result<Vec<T>, RecoveryError> {
        let mut rows = Vec::new();
        loop {
            let batch = self.read_batch(batch_size).await?;
            if batch.is_empty() {
                break;
            }
            rows.extend(batch);
        }
        Ok(rows)
    }
}
