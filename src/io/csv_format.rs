//! CSV format handling for the client and job backups
//!
//! This module centralizes all CSV format concerns, providing:
//! - The [`CsvTable`] trait tying a backup table to its raw serde record
//! - Raw record structures for deserialization
//! - Header validation
//! - Conversion from raw records to domain types
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{ClientRecord, JobAssignment, RecoveryError};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;

/// A table backed up as CSV
///
/// Readers use this to validate headers and convert each deserialized row.
pub trait CsvTable: Sized {
    /// Table name, used in error messages
    const TABLE: &'static str;

    /// Columns the header must contain
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Row shape as deserialized from the CSV
    type Raw: DeserializeOwned;

    /// Convert a raw row found at `line` (1-based, header is line 1)
    fn convert(raw: Self::Raw, line: u64) -> Result<Self, RecoveryError>;
}

/// Check that every required column of `T` appears in `headers`
pub fn validate_headers<'a, T, I>(headers: I) -> Result<(), RecoveryError>
where
    T: CsvTable,
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();

    match T::REQUIRED_COLUMNS
        .iter()
        .find(|column| !present.contains(*column))
    {
        Some(column) => Err(RecoveryError::missing_column(T::TABLE, column)),
        None => Ok(()),
    }
}

/// Raw client row
///
/// Matches the `clients` export. The trailing household columns were added
/// later and may be absent from older backups.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ClientCsvRecord {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
    pub total_spent: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub date_added: Option<String>,
    pub client_type: Option<String>,
    pub company_id: Option<String>,
    pub company_legal_name: Option<String>,
    pub reliable_person: Option<String>,
    pub client_source: Option<String>,
    pub contact_preference: Option<String>,
    #[serde(default)]
    pub has_children: Option<String>,
    #[serde(default)]
    pub has_pets: Option<String>,
    #[serde(default)]
    pub has_allergies: Option<String>,
    #[serde(default)]
    pub allergies_notes: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// Raw job row; only the key and the foreign key are read
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct JobCsvRecord {
    pub id: Option<String>,
    pub client_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(
    table: &str,
    column: &str,
    value: Option<String>,
    line: u64,
) -> Result<String, RecoveryError> {
    non_empty(value).ok_or_else(|| RecoveryError::missing_value(table, column, line))
}

/// Parse a numeric column; empty means absent
pub fn parse_amount(
    column: &str,
    value: Option<String>,
    line: u64,
) -> Result<Option<Decimal>, RecoveryError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Decimal::from_str(raw.trim())
            .map(Some)
            .map_err(|_| RecoveryError::invalid_numeric(column, &raw, line)),
        _ => Ok(None),
    }
}

/// Parse a boolean column; empty means `false`
pub fn parse_flag(column: &str, value: Option<String>, line: u64) -> Result<bool, RecoveryError> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_lowercase().as_str() {
        "" => Ok(false),
        "true" | "t" | "1" | "yes" => Ok(true),
        "false" | "f" | "0" | "no" => Ok(false),
        _ => Err(RecoveryError::invalid_boolean(column, &raw, line)),
    }
}

impl CsvTable for ClientRecord {
    const TABLE: &'static str = "clients";

    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "name",
        "email",
        "phone",
        "date_of_birth",
        "address",
        "city",
        "postal_code",
        "notes",
        "total_spent",
        "created_at",
        "updated_at",
        "date_added",
        "client_type",
        "company_id",
        "company_legal_name",
        "reliable_person",
        "client_source",
        "contact_preference",
    ];

    type Raw = ClientCsvRecord;

    fn convert(raw: ClientCsvRecord, line: u64) -> Result<Self, RecoveryError> {
        Ok(ClientRecord {
            id: required(Self::TABLE, "id", raw.id, line)?,
            user_id: non_empty(raw.user_id),
            name: non_empty(raw.name),
            email: non_empty(raw.email),
            phone: non_empty(raw.phone),
            date_of_birth: non_empty(raw.date_of_birth),
            address: non_empty(raw.address),
            city: non_empty(raw.city),
            postal_code: non_empty(raw.postal_code),
            notes: non_empty(raw.notes),
            total_spent: parse_amount("total_spent", raw.total_spent, line)?,
            created_at: non_empty(raw.created_at),
            updated_at: non_empty(raw.updated_at),
            date_added: non_empty(raw.date_added),
            client_type: non_empty(raw.client_type),
            company_id: non_empty(raw.company_id),
            company_legal_name: non_empty(raw.company_legal_name),
            reliable_person: non_empty(raw.reliable_person),
            client_source: non_empty(raw.client_source),
            contact_preference: non_empty(raw.contact_preference),
            has_children: parse_flag("has_children", raw.has_children, line)?,
            has_pets: parse_flag("has_pets", raw.has_pets, line)?,
            has_allergies: parse_flag("has_allergies", raw.has_allergies, line)?,
            allergies_notes: non_empty(raw.allergies_notes),
            special_instructions: non_empty(raw.special_instructions),
        })
    }
}

impl CsvTable for JobAssignment {
    const TABLE: &'static str = "jobs";

    const REQUIRED_COLUMNS: &'static [&'static str] = &["id", "client_id"];

    type Raw = JobCsvRecord;

    fn convert(raw: JobCsvRecord, line: u64) -> Result<Self, RecoveryError> {
        Ok(JobAssignment {
            job_id: required(Self::TABLE, "id", raw.id, line)?,
            client_id: non_empty(raw.client_id),
        })
    }
}
