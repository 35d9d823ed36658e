//! Client Recovery SQL Library
//! # Overview
//!
//! This library turns CSV backups of the `clients` and `jobs` tables into a
//! SQL script that restores the clients and repairs `jobs.client_id`.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (ClientRecord, JobAssignment, RecoveryError)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - SQL generation:
//!   - [`core::escape`] - SQL literal escaping
//!   - [`core::statements`] - Per-row and migration statements
//!   - [`core::script`] - Assembly of the full recovery script
//! - [`io`] - CSV reading with sync and async readers
//! - [`strategy`] - End-to-end pipelines selectable at runtime
//!
//! # Script Layout
//!
//! 1. Drop the unique constraint on `clients.user_id`
//! 2. Upsert every client from the backup (`ON CONFLICT (id) DO UPDATE`)
//! 3. Point every job back at its client
//! 4. Recreate uniqueness as a partial index that allows `NULL` user ids
//!
//! followed by row-count comments.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use self::core::{escape_literal, write_recovery_script, RecoveryReport, ScriptConfig};
pub use types::{ClientId, ClientRecord, JobAssignment, JobId, RecoveryError};
