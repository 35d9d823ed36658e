//! Client-related types for the recovery tool
//!
//! This module defines the typed client row restored from the `clients`
//! backup.

use rust_decimal::Decimal;

/// Client identifier as stored in the database (a UUID string)
pub type ClientId = String;

/// A single client row from the backup
///
/// Text columns left empty in the CSV are `None` and render as SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientRecord {
    /// Primary key, never empty
    pub id: ClientId,

    /// Auth user the client registered with, `None` for manually added clients
    pub user_id: Option<String>,

    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,

    /// Lifetime spend; `None` restores as `0.00`
    pub total_spent: Option<Decimal>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub date_added: Option<String>,
    pub client_type: Option<String>,
    pub company_id: Option<String>,
    pub company_legal_name: Option<String>,
    pub reliable_person: Option<String>,
    pub client_source: Option<String>,
    pub contact_preference: Option<String>,

    pub has_children: bool,
    pub has_pets: bool,
    pub has_allergies: bool,

    pub allergies_notes: Option<String>,
    pub special_instructions: Option<String>,
}

impl ClientRecord {
    /// Create a client with only its primary key set
    pub fn new(id: impl Into<ClientId>) -> Self {
        ClientRecord {
            id: id.into(),
            ..Default::default()
        }
    }
}
