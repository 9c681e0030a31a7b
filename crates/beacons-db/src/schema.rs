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
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Account holders
-- =======================================================================
DEFINE TABLE account_holder SCHEMAFULL;
DEFINE FIELD auth_id ON TABLE account_holder TYPE string;
DEFINE FIELD email ON TABLE account_holder TYPE string;
DEFINE FIELD full_name ON TABLE account_holder TYPE string;
DEFINE FIELD telephone_number ON TABLE account_holder \
    TYPE option<string>;
DEFINE FIELD alternative_telephone_number ON TABLE account_holder \
    TYPE option<string>;
DEFINE FIELD address ON TABLE account_holder TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE account_holder TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE account_holder TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_account_holder_auth_id ON TABLE account_holder \
    COLUMNS auth_id UNIQUE;

-- =======================================================================
-- Beacons (one row per registration; owner, uses and emergency
-- contacts are kept in the nested details object)
-- =======================================================================
DEFINE TABLE beacon SCHEMAFULL;
DEFINE FIELD account_holder_id ON TABLE beacon TYPE string;
DEFINE FIELD hex_id ON TABLE beacon TYPE string;
DEFINE FIELD status ON TABLE beacon TYPE string \
    ASSERT $value IN ['New', 'Deleted'];
DEFINE FIELD details ON TABLE beacon TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD deletion_reason ON TABLE beacon TYPE option<string>;
DEFINE FIELD created_at ON TABLE beacon TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE beacon TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_beacon_account_holder ON TABLE beacon \
    COLUMNS account_holder_id;
DEFINE INDEX idx_beacon_hex_id ON TABLE beacon COLUMNS hex_id;

-- =======================================================================
-- Legacy beacons (migrated from the predecessor registry)
-- =======================================================================
DEFINE TABLE legacy_beacon SCHEMAFULL;
DEFINE FIELD hex_id ON TABLE legacy_beacon TYPE string;
DEFINE FIELD owner_email ON TABLE legacy_beacon TYPE string;
DEFINE FIELD owner_name ON TABLE legacy_beacon TYPE option<string>;
DEFINE FIELD status ON TABLE legacy_beacon TYPE string \
    ASSERT $value IN ['Migrated', 'Claimed', 'Deleted'];
DEFINE FIELD data ON TABLE legacy_beacon TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD deletion_reason ON TABLE legacy_beacon TYPE option<string>;
DEFINE FIELD deleted_by ON TABLE legacy_beacon TYPE option<string>;
DEFINE FIELD created_at ON TABLE legacy_beacon TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE legacy_beacon TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_legacy_beacon_hex_email ON TABLE legacy_beacon \
    COLUMNS hex_id, owner_email;
";

/// Run all pending schema migrations.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

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

        db.query("CREATE _migration SET version = $version, name = $name")
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

        info!(version = migration.version, "Migration applied");
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_every_table() {
        for table in ["account_holder", "beacon", "legacy_beacon"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table {table}"
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
