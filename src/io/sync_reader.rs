//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over the rows of one backup table.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read raw records sequentially, then
//! deserializes each one against the header row and converts it through the
//! table's [`CsvTable`] implementation. Records are processed one at a time
//! without loading the entire file into memory.
//!
//! ```no_run
//! use client_recovery_sql::io::sync_reader::SyncReader;
//! use client_recovery_sql::types::JobAssignment;
//! use std::path::Path;
//!
//! let reader = SyncReader::<JobAssignment>::new(Path::new("jobs_rows.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(job) => println!("Job {} belongs to {:?}", job.job_id, job.client_id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors, missing columns) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator
//! - Line numbers are included in errors for debugging

use crate::io::csv_format::{validate_headers, CsvTable};
use crate::types::RecoveryError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

/// Synchronous CSV reader for the table `T`
#[derive(Debug)]
pub struct SyncReader<T> {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
    _table: PhantomData<T>,
}

impl<T: CsvTable> SyncReader<T> {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file, reads its header row and checks that all of the
    /// table's required columns are present. The CSV reader is configured to:
    /// - Trim whitespace from header names only (values are kept verbatim)
    /// - Accept short rows; missing trailing fields read as empty
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened and its header is complete
    /// * `Err(RecoveryError)` otherwise
    pub fn new(path: &Path) -> Result<Self, RecoveryError> {
        let file = File::open(path).map_err(|e| RecoveryError::open_failed(path, e))?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        validate_headers::<T, _>(headers.iter())?;

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            _table: PhantomData,
        })
    }
}

impl<T: CsvTable> Iterator for SyncReader<T> {
    type Item = Result<T, RecoveryError>;

    /// Get the next row of the table
    ///
    /// # Returns
    ///
    /// * `Some(Ok(T))` - Successfully converted row
    /// * `Some(Err(RecoveryError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|pos| pos.line()).unwrap_or(0);
                let result = self
                    .record
                    .deserialize::<T::Raw>(Some(&self.headers))
                    .map_err(|e| RecoveryError::ParseError {
                        line: Some(line),
                        message: e.to_string(),
                    })
                    .and_then(|raw| T::convert(raw, line));
                Some(result)
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
