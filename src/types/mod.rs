//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `client`: Restored client rows
//! - `job`: Job to client assignments
//! - `error`: Error types for the recovery tool

pub mod client;
pub mod error;
pub mod job;

pub use client::{ClientId, ClientRecord};
pub use error::RecoveryError;
pub use job::{JobAssignment, JobId};
