//! Statement rendering
//!
//! Turns typed rows into the literal SQL of the recovery script:
//! - [`ClientInsert`] - upsert of one client row
//! - [`JobReassignment`] - foreign key repair of one job row
//! - [`Migration`] - the constraint and index changes around the data steps

use crate::core::escape::{bool_literal, escape_literal, numeric_literal};
use crate::core::script::DEFAULT_SCHEMA;
use crate::core::traits::SqlStatement;
use crate::types::{ClientRecord, JobAssignment};

/// Unique constraint on `clients.user_id` that blocks restoring manual clients
pub const USER_ID_CONSTRAINT: &str = "clients_user_id_unique";

/// Partial unique index that replaces [`USER_ID_CONSTRAINT`]
pub const USER_ID_INDEX: &str = "idx_clients_user_id_unique";

/// Column list of the client insert, in value order
const CLIENT_COLUMNS: &str = "    id, user_id, name, email, phone, date_of_birth, address, city, postal_code,
    notes, total_spent, created_at, updated_at, date_added, client_type,
    company_id, company_legal_name, reliable_person, client_source,
    contact_preference, has_children, has_pets, has_allergies, allergies_notes, special_instructions";

/// Columns overwritten when the client already exists
const CONFLICT_UPDATES: [&str; 6] = ["name", "email", "phone", "address", "city", "postal_code"];

/// Upsert of a single client row
#[derive(Debug, Clone, Copy)]
pub struct ClientInsert<'a> {
    schema: &'a str,
    client: &'a ClientRecord,
}

impl<'a> ClientInsert<'a> {
    pub fn new(schema: &'a str, client: &'a ClientRecord) -> Self {
        Self { schema, client }
    }

    fn values(&self) -> Vec<String> {
        let c = self.client;
        let text = |v: &Option<String>| escape_literal(v.as_deref());

        vec![
            escape_literal(Some(&c.id)),
            text(&c.user_id),
            text(&c.name),
            text(&c.email),
            text(&c.phone),
            text(&c.date_of_birth),
            text(&c.address),
            text(&c.city),
            text(&c.postal_code),
            text(&c.notes),
            numeric_literal(c.total_spent),
            text(&c.created_at),
            text(&c.updated_at),
            text(&c.date_added),
            text(&c.client_type),
            text(&c.company_id),
            text(&c.company_legal_name),
            text(&c.reliable_person),
            text(&c.client_source),
            text(&c.contact_preference),
            bool_literal(c.has_children).to_string(),
            bool_literal(c.has_pets).to_string(),
            bool_literal(c.has_allergies).to_string(),
            text(&c.allergies_notes),
            text(&c.special_instructions),
        ]
    }
}

impl SqlStatement for ClientInsert<'_> {
    fn to_sql(&self) -> String {
        let values = self.values().join(",\n    ");
        let updates = CONFLICT_UPDATES
            .iter()
            .map(|col| format!("    {col} = EXCLUDED.{col}"))
            .collect::<Vec<_>>()
            .join(",\n");

        format!(
            "INSERT INTO {schema}.clients (\n{CLIENT_COLUMNS}\n) VALUES (\n    {values}\n) ON CONFLICT (id) DO UPDATE SET\n{updates};",
            schema = self.schema,
        )
    }
}

/// Reassignment of a single job to its client
#[derive(Debug, Clone, Copy)]
pub struct JobReassignment<'a> {
    schema: &'a str,
    job: &'a JobAssignment,
}

impl<'a> JobReassignment<'a> {
    pub fn new(schema: &'a str, job: &'a JobAssignment) -> Self {
        Self { schema, job }
    }
}

impl SqlStatement for JobReassignment<'_> {
    fn to_sql(&self) -> String {
        format!(
            "UPDATE {}.jobs SET client_id = {} WHERE id = {};",
            self.schema,
            escape_literal(self.job.client_id.as_deref()),
            escape_literal(Some(&self.job.job_id)),
        )
    }
}

/// Schema changes surrounding the data steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration<'a> {
    /// Drop the table-wide unique constraint on `user_id`
    DropUserIdConstraint { schema: &'a str },
    /// Drop any previous version of the partial index
    ///
    /// Unqualified for the default schema.
    DropUserIdIndex { schema: &'a str },
    /// Unique on `user_id` only where it is set
    CreateUserIdIndex { schema: &'a str },
}

impl SqlStatement for Migration<'_> {
    fn to_sql(&self) -> String {
        match self {
            Migration::DropUserIdConstraint { schema } => format!(
                "ALTER TABLE {schema}.clients DROP CONSTRAINT IF EXISTS {USER_ID_CONSTRAINT};"
            ),
            Migration::DropUserIdIndex { schema } if *schema == DEFAULT_SCHEMA => {
                format!("DROP INDEX IF EXISTS {USER_ID_INDEX};")
            }
            Migration::DropUserIdIndex { schema } => {
                format!("DROP INDEX IF EXISTS {schema}.{USER_ID_INDEX};")
            }
            Migration::CreateUserIdIndex { schema } => format!(
                "CREATE UNIQUE INDEX {USER_ID_INDEX} ON {schema}.clients (user_id) WHERE user_id IS NOT NULL;"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[test]
    fn test_client_insert_minimal_row() {
        let client = ClientRecord::new("c-1");
        let sql = ClientInsert::new("public", &client).to_sql();

        let expected = "INSERT INTO public.clients (
    id, user_id, name, email, phone, date_of_birth, address, city, postal_code,
    notes, total_spent, created_at, updated_at, date_added, client_type,
    company_id, company_legal_name, reliable_person, client_source,
    contact_preference, has_children, has_pets, has_allergies, allergies_notes, special_instructions
) VALUES (
    'c-1',
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    0.00,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    NULL,
    false,
    false,
    false,
    NULL,
    NULL
) ON CONFLICT (id) DO UPDATE SET
    name = EXCLUDED.name,
    email = EXCLUDED.email,
    phone = EXCLUDED.phone,
    address = EXCLUDED.address,
    city = EXCLUDED.city,
    postal_code = EXCLUDED.postal_code;";

        assert_eq!(sql, expected);
    }

    #[test]
    fn test_client_insert_values_follow_column_order() {
        let client = ClientRecord {
            id: "c-2".to_string(),
            user_id: Some("u-2".to_string()),
            name: Some("Jana O'Neill".to_string()),
            total_spent: Some(Decimal::new(12550, 2)),
            has_pets: true,
            special_instructions: Some("Ring twice".to_string()),
            ..ClientRecord::new("c-2")
        };

        let values = ClientInsert::new("public", &client).values();

        assert_eq!(values.len(), 25);
        assert_eq!(values[0], "'c-2'");
        assert_eq!(values[1], "'u-2'");
        assert_eq!(values[2], "'Jana O''Neill'");
        assert_eq!(values[10], "125.50");
        assert_eq!(values[20], "false");
        assert_eq!(values[21], "true");
        assert_eq!(values[24], "'Ring twice'");
    }

    #[test]
    fn test_client_insert_uses_schema() {
        let client = ClientRecord::new("c-3");
        let sql = ClientInsert::new("restore", &client).to_sql();
        assert!(sql.starts_with("INSERT INTO restore.clients ("));
    }

    #[rstest]
    #[case::assigned(Some("c-9"), "UPDATE public.jobs SET client_id = 'c-9' WHERE id = 'j-1';")]
    #[case::detached(None, "UPDATE public.jobs SET client_id = NULL WHERE id = 'j-1';")]
    #[case::quoted(Some("c'9"), "UPDATE public.jobs SET client_id = 'c''9' WHERE id = 'j-1';")]
    fn test_job_reassignment(#[case] client_id: Option<&str>, #[case] expected: &str) {
        let job = JobAssignment {
            job_id: "j-1".to_string(),
            client_id: client_id.map(str::to_string),
        };
        assert_eq!(JobReassignment::new("public", &job).to_sql(), expected);
    }

    #[rstest]
    #[case::drop_constraint(
        Migration::DropUserIdConstraint { schema: "public" },
        "ALTER TABLE public.clients DROP CONSTRAINT IF EXISTS clients_user_id_unique;"
    )]
    #[case::drop_index(
        Migration::DropUserIdIndex { schema: "public" },
        "DROP INDEX IF EXISTS idx_clients_user_id_unique;"
    )]
    #[case::drop_index_other_schema(
        Migration::DropUserIdIndex { schema: "archive" },
        "DROP INDEX IF EXISTS archive.idx_clients_user_id_unique;"
    )]
    #[case::create_index(
        Migration::CreateUserIdIndex { schema: "public" },
        "CREATE UNIQUE INDEX idx_clients_user_id_unique ON public.clients (user_id) WHERE user_id IS NOT NULL;"
    )]
    fn test_migrations(#[case] migration: Migration<'_>, #[case] expected: &str) {
        assert_eq!(migration.to_sql(), expected);
    }
}
