//! Processing strategy module for recovery script generation
//!
//! This module defines the Strategy pattern for the complete pipeline: load
//! both CSV backups, then render the recovery script. Strategies differ only
//! in how the backups are loaded; the script they write is identical.

use crate::cli::StrategyType;
use crate::core::script::{write_recovery_script, RecoveryReport, ScriptConfig};
use crate::types::{ClientRecord, JobAssignment, RecoveryError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncConfig, AsyncProcessingStrategy};
pub use sync::SyncProcessingStrategy;

/// Default location of the clients backup
pub const DEFAULT_CLIENTS_CSV: &str = "clients_rows.csv";

/// Default location of the jobs backup
pub const DEFAULT_JOBS_CSV: &str = "jobs_rows.csv";

/// Paths of the two CSV backups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryInputs {
    pub clients: PathBuf,
    pub jobs: PathBuf,
}

impl Default for RecoveryInputs {
    fn default() -> Self {
        Self {
            clients: PathBuf::from(DEFAULT_CLIENTS_CSV),
            jobs: PathBuf::from(DEFAULT_JOBS_CSV),
        }
    }
}

/// Fully loaded backups
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackupTables {
    pub clients: Vec<ClientRecord>,
    pub jobs: Vec<JobAssignment>,
}

/// Where the script goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScriptTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl ScriptTarget {
    /// Open the target for writing, creating or truncating a file target
    pub fn open(&self) -> Result<Box<dyn Write>, RecoveryError> {
        Ok(match self {
            ScriptTarget::Stdout => Box::new(BufWriter::new(io::stdout().lock())),
            ScriptTarget::File(path) => Box::new(BufWriter::new(File::create(path)?)),
        })
    }
}

fn write_tables(
    tables: &BackupTables,
    config: &ScriptConfig,
    output: &mut dyn Write,
) -> Result<RecoveryReport, RecoveryError> {
    let report = write_recovery_script(config, &tables.clients, &tables.jobs, output)?;

    info!(
        clients = report.clients_restored,
        jobs = report.jobs_reassigned,
        "recovery script written"
    );

    Ok(report)
}

/// Processing strategy trait for complete recovery pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Load both backups completely
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened, lacks a required
    /// column, or contains a row that does not convert.
    fn load(&self, inputs: &RecoveryInputs) -> Result<BackupTables, RecoveryError>;

    /// Load both backups and write the recovery script to `output`
    ///
    /// Nothing is written unless both backups load cleanly.
    fn generate(
        &self,
        inputs: &RecoveryInputs,
        config: &ScriptConfig,
        output: &mut dyn Write,
    ) -> Result<RecoveryReport, RecoveryError> {
        let tables = self.load(inputs)?;
        write_tables(&tables, config, output)
    }

    /// Load both backups, then open `target` and write the script to it
    ///
    /// A file target is only created once both backups have loaded.
    fn generate_to(
        &self,
        inputs: &RecoveryInputs,
        config: &ScriptConfig,
        target: &ScriptTarget,
    ) -> Result<RecoveryReport, RecoveryError> {
        let tables = self.load(inputs)?;
        let mut output = target.open()?;
        write_tables(&tables, config, &mut output)
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async loading (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<AsyncConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
