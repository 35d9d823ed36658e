//! Asynchronous processing strategy
//!
//! Loads the two backups concurrently on a tokio multi-threaded runtime, one
//! task per file, each reading through an [`AsyncReader`] in batches.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── AsyncConfig (batch_size, worker_threads)
//!     ├── task: AsyncReader<ClientRecord>  ─┐
//!     └── task: AsyncReader<JobAssignment> ─┴─ try_join → BackupTables
//! ```
//!
//! Rendering happens after both tasks finish, so output is identical to the
//! sync strategy.

use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::CsvTable;
use crate::strategy::{BackupTables, ProcessingStrategy, RecoveryInputs};
use crate::types::{ClientRecord, JobAssignment, RecoveryError};
use std::path::PathBuf;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

/// Configuration for async loading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncConfig {
    /// Number of rows read per batch
    pub batch_size: usize,
    /// Number of tokio worker threads
    pub worker_threads: usize,
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl AsyncConfig {
    /// Create a new AsyncConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                worker_threads,
                default = default.worker_threads,
                "invalid worker thread count, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }
}

/// Asynchronous processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: AsyncConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: AsyncConfig) -> Self {
        Self { config }
    }
}

/// Read every row of one backup on the current runtime
async fn load_table<T>(path: PathBuf, batch_size: usize) -> Result<Vec<T>, RecoveryError>
where
    T: CsvTable + Send + 'static,
{
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| RecoveryError::open_failed(&path, e))?;

    let mut reader = AsyncReader::<_, T>::new(file.compat()).await?;
    let rows = reader.read_all(batch_size).await?;

    debug!(table = T::TABLE, rows = rows.len(), path = %path.display(), "loaded backup");
    Ok(rows)
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn load(&self, inputs: &RecoveryInputs) -> Result<BackupTables, RecoveryError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .build()
            .map_err(|e| RecoveryError::runtime(format!("Failed to create tokio runtime: {e}")))?;

        let batch_size = self.config.batch_size;

        runtime.block_on(async {
            let clients = tokio::spawn(load_table::<ClientRecord>(
                inputs.clients.clone(),
                batch_size,
            ));
            let jobs = tokio::spawn(load_table::<JobAssignment>(inputs.jobs.clone(), batch_size));

            let (clients, jobs) =
                tokio::try_join!(clients, jobs).map_err(|e| RecoveryError::runtime(e))?;

            Ok(BackupTables {
                clients: clients?,
                jobs: jobs?,
            })
        })
    }
}
