//! SQL literal rendering
//!
//! Values from the backups are spliced into the script as literals, so every
//! text value goes through [`escape_literal`]. Empty and absent values both
//! become `NULL`.

use rust_decimal::Decimal;

/// SQL `NULL` keyword
pub const NULL: &str = "NULL";

/// Literal used when a client has no recorded spend
pub const ZERO_AMOUNT: &str = "0.00";

/// Render a value as a single-quoted SQL string literal
///
/// `None` and `""` render as `NULL`. Internal single quotes are doubled.
///
/// # Examples
///
/// ```
/// use client_recovery_sql::core::escape::escape_literal;
///
/// assert_eq!(escape_literal(Some("O'Brien")), "'O''Brien'");
/// assert_eq!(escape_literal(Some("")), "NULL");
/// assert_eq!(escape_literal(None), "NULL");
/// ```
pub fn escape_literal(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('\'');
            for c in s.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
            out.push('\'');
            out
        }
        _ => NULL.to_string(),
    }
}

/// Render a boolean as a SQL boolean literal
pub fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Render a decimal as an unquoted numeric literal, `0.00` when absent
pub fn numeric_literal(value: Option<Decimal>) -> String {
    match value {
        Some(d) => d.to_string(),
        None => ZERO_AMOUNT.to_string(),
    }
}
