//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Staff members
-- =======================================================================
DEFINE TABLE staff SCHEMAFULL;
DEFINE FIELD first_name ON TABLE staff TYPE string;
DEFINE FIELD last_name ON TABLE staff TYPE string;
DEFINE FIELD email ON TABLE staff TYPE string;
DEFINE FIELD department ON TABLE staff TYPE string \
    ASSERT $value IN ['management', 'commercial', 'support'];
DEFINE FIELD password_hash ON TABLE staff TYPE string;
DEFINE FIELD created_at ON TABLE staff TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE staff TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_staff_email ON TABLE staff COLUMNS email UNIQUE;

-- =======================================================================
-- Clients
-- =======================================================================
DEFINE TABLE client SCHEMAFULL;
DEFINE FIELD first_name ON TABLE client TYPE string;
DEFINE FIELD last_name ON TABLE client TYPE string;
DEFINE FIELD email ON TABLE client TYPE string;
DEFINE FIELD phone ON TABLE client TYPE string;
DEFINE FIELD company ON TABLE client TYPE string;
DEFINE FIELD commercial_contact ON TABLE client TYPE option<string>;
DEFINE FIELD created_at ON TABLE client TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE client TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_client_email ON TABLE client COLUMNS email UNIQUE;

-- =======================================================================
-- Contracts
-- =======================================================================
DEFINE TABLE contract SCHEMAFULL;
DEFINE FIELD client_id ON TABLE contract TYPE string;
DEFINE FIELD total_amount ON TABLE contract TYPE number;
DEFINE FIELD amount_due ON TABLE contract TYPE number;
DEFINE FIELD status ON TABLE contract TYPE string \
    ASSERT $value IN ['ToSign', 'Signed', 'Cancelled'];
DEFINE FIELD commercial_contact ON TABLE contract TYPE string;
DEFINE FIELD created_at ON TABLE contract TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_contract_client ON TABLE contract COLUMNS client_id;
DEFINE INDEX idx_contract_commercial ON TABLE contract \
    COLUMNS commercial_contact;

-- =======================================================================
-- Events
-- =======================================================================
DEFINE TABLE event SCHEMAFULL;
DEFINE FIELD contract_id ON TABLE event TYPE string;
DEFINE FIELD start_date ON TABLE event TYPE datetime;
DEFINE FIELD end_date ON TABLE event TYPE datetime;
DEFINE FIELD support_contact ON TABLE event TYPE option<string>;
DEFINE FIELD location ON TABLE event TYPE string;
DEFINE FIELD attendees ON TABLE event TYPE int;
DEFINE FIELD notes ON TABLE event TYPE string;
DEFINE FIELD created_at ON TABLE event TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_event_contract ON TABLE event COLUMNS contract_id;
DEFINE INDEX idx_event_support ON TABLE event COLUMNS support_contact;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_every_table() {
        for table in ["staff", "client", "contract", "event"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition: {table}"
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
