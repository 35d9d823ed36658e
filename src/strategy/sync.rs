//! Synchronous processing strategy
//!
//! Loads the clients backup, then the jobs backup, each through a
//! [`SyncReader`]. Single-threaded.

use crate::io::csv_format::CsvTable;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{BackupTables, ProcessingStrategy, RecoveryInputs};
use crate::types::{ClientRecord, JobAssignment, RecoveryError};
use std::path::Path;
use tracing::debug;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use client_recovery_sql::core::ScriptConfig;
/// use client_recovery_sql::strategy::{ProcessingStrategy, RecoveryInputs, SyncProcessingStrategy};
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .generate(&RecoveryInputs::default(), &ScriptConfig::default(), &mut output)
///     .expect("Generation failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

/// Read every row of one backup, stopping at the first error
fn load_table<T: CsvTable>(path: &Path) -> Result<Vec<T>, RecoveryError> {
    let rows = SyncReader::<T>::new(path)?.collect::<Result<Vec<_>, _>>()?;
    debug!(table = T::TABLE, rows = rows.len(), path = %path.display(), "loaded backup");
    Ok(rows)
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn load(&self, inputs: &RecoveryInputs) -> Result<BackupTables, RecoveryError> {
        Ok(BackupTables {
            clients: load_table::<ClientRecord>(&inputs.clients)?,
            jobs: load_table::<JobAssignment>(&inputs.jobs)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CLIENT_HEADER: &str = "id,user_id,name,email,phone,date_of_birth,address,city,postal_code,notes,total_spent,created_at,updated_at,date_added,client_type,company_id,company_legal_name,reliable_person,client_source,contact_preference";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn inputs(clients: &NamedTempFile, jobs: &NamedTempFile) -> RecoveryInputs {
        RecoveryInputs {
            clients: clients.path().to_path_buf(),
            jobs: jobs.path().to_path_buf(),
        }
    }

    #[test]
    fn test_sync_strategy_loads_both_tables() {
        let clients = create_temp_csv(&format!("{CLIENT_HEADER}\nc-1,,Ann,,,,,,,,,,,,,,,,,\n"));
        let jobs = create_temp_csv("id,client_id\nj-1,c-1\nj-2,c-1\n");

        let tables = SyncProcessingStrategy
            .load(&inputs(&clients, &jobs))
            .unwrap();

        assert_eq!(tables.clients.len(), 1);
        assert_eq!(tables.jobs.len(), 2);
    }

    #[test]
    fn test_sync_strategy_generates_script() {
        let clients = create_temp_csv(&format!("{CLIENT_HEADER}\nc-1,,Ann,,,,,,,,,,,,,,,,,\n"));
        let jobs = create_temp_csv("id,client_id\nj-1,c-1\n");
        let mut output = Vec::new();

        let report = SyncProcessingStrategy
            .generate(&inputs(&clients, &jobs), &ScriptConfig::default(), &mut output)
            .unwrap();

        assert_eq!(report.clients_restored, 1);
        assert_eq!(report.jobs_reassigned, 1);

        let script = String::from_utf8(output).unwrap();
        assert!(script.contains("    'Ann',\n"));
        assert!(script.contains("UPDATE public.jobs SET client_id = 'c-1' WHERE id = 'j-1';"));
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let jobs = create_temp_csv("id,client_id\n");
        let inputs = RecoveryInputs {
            clients: "nonexistent.csv".into(),
            jobs: jobs.path().to_path_buf(),
        };
        let mut output = Vec::new();

        let result =
            SyncProcessingStrategy.generate(&inputs, &ScriptConfig::default(), &mut output);

        assert!(matches!(result, Err(RecoveryError::FileNotFound { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_writes_nothing_when_jobs_fail() {
        let clients = create_temp_csv(&format!("{CLIENT_HEADER}\nc-1,,Ann,,,,,,,,,,,,,,,,,\n"));
        let jobs = create_temp_csv("id\nj-1\n");
        let mut output = Vec::new();

        let result = SyncProcessingStrategy.generate(
            &inputs(&clients, &jobs),
            &ScriptConfig::default(),
            &mut output,
        );

        assert_eq!(
            result,
            Err(RecoveryError::missing_column("jobs", "client_id"))
        );
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
