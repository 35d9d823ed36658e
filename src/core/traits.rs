//! Core traits for statement rendering
//!
//! Every piece of SQL the script emits implements [`SqlStatement`], so the
//! script writer can treat per-row statements and migration statements alike.

/// A renderable SQL statement
pub trait SqlStatement {
    /// Render the statement, including its terminating semicolon
    fn to_sql(&self) -> String;
}
