//! Recovery script assembly
//!
//! Writes the four labeled steps of the script:
//!
//! 1. Drop the unique constraint on `user_id`
//! 2. Insert/restore all clients from the backup
//! 3. Reassign jobs to their clients
//! 4. Recreate uniqueness as a partial index that allows `NULL`
//!
//! followed by row-count comments.

use crate::core::statements::{ClientInsert, JobReassignment, Migration};
use crate::core::traits::SqlStatement;
use crate::types::{ClientRecord, JobAssignment, RecoveryError};
use std::io::Write;

const BANNER: &str = "-- =====================================================";

/// Schema every statement is qualified with unless configured otherwise
pub const DEFAULT_SCHEMA: &str = "public";

/// Settings for script rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Schema the `clients` and `jobs` tables live in
    pub schema: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl ScriptConfig {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }
}

/// Row counts of a written script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecoveryReport {
    pub clients_restored: usize,
    pub jobs_reassigned: usize,
}

fn write_step(output: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(output, "{BANNER}")?;
    writeln!(output, "-- {title}")?;
    writeln!(output, "{BANNER}")
}

/// Write the complete recovery script
///
/// Statements appear in input order, one per row.
///
/// # Returns
///
/// * `Ok(RecoveryReport)` with the number of client and job statements written
/// * `Err(RecoveryError)` if writing to `output` failed
pub fn write_recovery_script(
    config: &ScriptConfig,
    clients: &[ClientRecord],
    jobs: &[JobAssignment],
    output: &mut dyn Write,
) -> Result<RecoveryReport, RecoveryError> {
    let schema = config.schema.as_str();

    write_step(output, "STEP 1: Drop the unique constraint on user_id")?;
    writeln!(output, "{}", Migration::DropUserIdConstraint { schema }.to_sql())?;
    writeln!(output)?;

    write_step(output, "STEP 2: Insert/restore all clients from backup")?;
    for client in clients {
        writeln!(output, "{}", ClientInsert::new(schema, client).to_sql())?;
        writeln!(output)?;
    }

    write_step(output, "STEP 3: Reassign jobs to their correct clients")?;
    for job in jobs {
        writeln!(output, "{}", JobReassignment::new(schema, job).to_sql())?;
    }
    writeln!(output)?;

    write_step(output, "STEP 4: Add partial unique index (allows NULL user_id)")?;
    writeln!(output, "{}", Migration::DropUserIdIndex { schema }.to_sql())?;
    writeln!(output, "{}", Migration::CreateUserIdIndex { schema }.to_sql())?;
    writeln!(output)?;

    let report = RecoveryReport {
        clients_restored: clients.len(),
        jobs_reassigned: jobs.len(),
    };
    writeln!(output, "-- Total clients to restore: {}", report.clients_restored)?;
    writeln!(output, "-- Total jobs to reassign: {}", report.jobs_reassigned)?;
    output.flush()?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SCRIPT: &str = "\
-- =====================================================
-- STEP 1: Drop the unique constraint on user_id
-- =====================================================
ALTER TABLE public.clients DROP CONSTRAINT IF EXISTS clients_user_id_unique;

-- =====================================================
-- STEP 2: Insert/restore all clients from backup
-- =====================================================
-- =====================================================
-- STEP 3: Reassign jobs to their correct clients
-- =====================================================

-- =====================================================
-- STEP 4: Add partial unique index (allows NULL user_id)
-- =====================================================
DROP INDEX IF EXISTS idx_clients_user_id_unique;
CREATE UNIQUE INDEX idx_clients_user_id_unique ON public.clients (user_id) WHERE user_id IS NOT NULL;

-- Total clients to restore: 0
-- Total jobs to reassign: 0
";

    fn render(clients: &[ClientRecord], jobs: &[JobAssignment]) -> (String, RecoveryReport) {
        let mut output = Vec::new();
        let report =
            write_recovery_script(&ScriptConfig::default(), clients, jobs, &mut output).unwrap();
        (String::from_utf8(output).unwrap(), report)
    }

    #[test]
    fn test_empty_backups_still_migrate() {
        let (script, report) = render(&[], &[]);
        assert_eq!(script, EMPTY_SCRIPT);
        assert_eq!(report, RecoveryReport::default());
    }

    #[test]
    fn test_statements_keep_input_order() {
        let clients = vec![ClientRecord::new("c-b"), ClientRecord::new("c-a")];
        let jobs = vec![
            JobAssignment {
                job_id: "j-2".to_string(),
                client_id: Some("c-a".to_string()),
            },
            JobAssignment {
                job_id: "j-1".to_string(),
                client_id: Some("c-b".to_string()),
            },
        ];

        let (script, report) = render(&clients, &jobs);

        assert_eq!(report.clients_restored, 2);
        assert_eq!(report.jobs_reassigned, 2);

        let b = script.find("    'c-b',").unwrap();
        let a = script.find("    'c-a',").unwrap();
        assert!(b < a);

        let j2 = script.find("WHERE id = 'j-2';").unwrap();
        let j1 = script.find("WHERE id = 'j-1';").unwrap();
        assert!(j2 < j1);

        assert!(script.contains(
            "UPDATE public.jobs SET client_id = 'c-a' WHERE id = 'j-2';\n\
             UPDATE public.jobs SET client_id = 'c-b' WHERE id = 'j-1';\n\n"
        ));
        assert!(script.ends_with(
            "-- Total clients to restore: 2\n-- Total jobs to reassign: 2\n"
        ));
    }

    #[test]
    fn test_each_client_insert_is_followed_by_blank_line() {
        let (script, _) = render(&[ClientRecord::new("c-1")], &[]);
        assert!(script.contains(
            "    postal_code = EXCLUDED.postal_code;\n\n-- =====================================================\n-- STEP 3"
        ));
    }

    #[test]
    fn test_schema_is_applied_everywhere() {
        let jobs = vec![JobAssignment {
            job_id: "j-1".to_string(),
            client_id: None,
        }];
        let mut output = Vec::new();
        write_recovery_script(
            &ScriptConfig::new("archive"),
            &[ClientRecord::new("c-1")],
            &jobs,
            &mut output,
        )
        .unwrap();
        let script = String::from_utf8(output).unwrap();

        assert!(script.contains("ALTER TABLE archive.clients"));
        assert!(script.contains("INSERT INTO archive.clients"));
        assert!(script.contains("UPDATE archive.jobs"));
        assert!(script.contains("DROP INDEX IF EXISTS archive.idx_clients_user_id_unique;\n"));
        assert!(script.contains("ON archive.clients (user_id)"));
        assert!(!script.contains("public."));
        assert!(!script.contains("DROP INDEX IF EXISTS idx_clients_user_id_unique;"));
    }
}
