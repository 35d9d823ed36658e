//! Core rendering module
//!
//! This module contains the SQL generation components:
//! - `traits` - The statement rendering seam
//! - `escape` - SQL literal escaping
//! - `statements` - Per-row and migration statements
//! - `script` - Assembly of the full recovery script

pub mod escape;
pub mod script;
pub mod statements;
pub mod traits;

pub use escape::escape_literal;
pub use script::{write_recovery_script, RecoveryReport, ScriptConfig};
pub use statements::{ClientInsert, JobReassignment, Migration};
pub use traits::SqlStatement;
