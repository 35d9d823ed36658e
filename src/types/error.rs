//! Error types for the client recovery tool
//!
//! This module defines all error types that can occur while turning the CSV
//! backups into a recovery script. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Errors**: Malformed CSV, missing columns
//! - **Value Errors**: Required values left empty, unparseable numerics or booleans
//!
//! Every error is fatal: a recovery script is only written when both backups
//! convert cleanly.

use thiserror::Error;

/// Main error type for the recovery tool
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecoveryError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A required column is absent from the CSV header
    #[error("Missing column '{column}' in {table} CSV")]
    MissingColumn {
        /// Table the CSV file backs up
        table: String,
        /// The missing column name
        column: String,
    },

    /// A column that identifies a row was left empty
    #[error("Empty '{column}' in {table} CSV at line {line}")]
    MissingValue {
        /// Table the CSV file backs up
        table: String,
        /// Column that must not be empty
        column: String,
        /// Line number of the offending row
        line: u64,
    },

    /// A numeric column could not be parsed as a decimal
    #[error("Invalid numeric value '{value}' for '{column}' at line {line}")]
    InvalidNumeric {
        /// Column name
        column: String,
        /// The raw value
        value: String,
        /// Line number of the offending row
        line: u64,
    },

    /// A boolean column held something other than a recognised boolean
    #[error("Invalid boolean value '{value}' for '{column}' at line {line}")]
    InvalidBoolean {
        /// Column name
        column: String,
        /// The raw value
        value: String,
        /// Line number of the offending row
        line: u64,
    },

    /// The async runtime could not be started or a task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },
}

// Conversion from io::Error to RecoveryError
impl From<std::io::Error> for RecoveryError {
    fn from(error: std::io::Error) -> Self {
        RecoveryError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to RecoveryError
impl From<csv::Error> for RecoveryError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        RecoveryError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for RecoveryError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        RecoveryError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl RecoveryError {
    /// Create a FileNotFound or IoError depending on the failure kind
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            RecoveryError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            RecoveryError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }

    /// Create a MissingColumn error
    pub fn missing_column(table: &str, column: &str) -> Self {
        RecoveryError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// Create a MissingValue error
    pub fn missing_value(table: &str, column: &str, line: u64) -> Self {
        RecoveryError::MissingValue {
            table: table.to_string(),
            column: column.to_string(),
            line,
        }
    }

    /// Create an InvalidNumeric error
    pub fn invalid_numeric(column: &str, value: &str, line: u64) -> Self {
        RecoveryError::InvalidNumeric {
            column: column.to_string(),
            value: value.to_string(),
            line,
        }
    }

    /// Create an InvalidBoolean error
    pub fn invalid_boolean(column: &str, value: &str, line: u64) -> Self {
        RecoveryError::InvalidBoolean {
            column: column.to_string(),
            value: value.to_string(),
            line,
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl std::fmt::Display) -> Self {
        RecoveryError::Runtime {
            message: message.to_string(),
        }
    }
}
