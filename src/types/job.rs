//! Job-related types for the recovery tool

use super::client::ClientId;

/// Job identifier (a UUID string)
pub type JobId = String;

/// A job row from the backup, reduced to the foreign key being repaired
#[derive(Debug, Clone, PartialEq)]
pub struct JobAssignment {
    /// Primary key of the job, never empty
    pub job_id: JobId,

    /// Client the job belongs to; `None` detaches the job
    pub client_id: Option<ClientId>,
}
