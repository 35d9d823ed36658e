//! I/O module
//!
//! Handles reading the CSV backups.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (table definitions, header validation, row conversion)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{validate_headers, ClientCsvRecord, CsvTable, JobCsvRecord};
pub use sync_reader::SyncReader;
