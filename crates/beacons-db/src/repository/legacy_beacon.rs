//! SurrealDB implementation of [`LegacyBeaconRepository`].

use beacons_core::error::BeaconsResult;
use beacons_core::ids::LegacyBeaconId;
use beacons_core::models::beacon::normalize_hex_id;
use beacons_core::models::legacy_beacon::{CreateLegacyBeacon, LegacyBeacon, LegacyBeaconStatus};
use beacons_core::repository::LegacyBeaconRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use super::parse_uuid;
use crate::error::DbError;

const SELECT_BY_ID: &str = "SELECT record::id(id) AS record_id, * \
     FROM type::record('legacy_beacon', $id)";

/// DB-side row struct; the record id is projected via `record::id(id)`.
#[derive(Debug, SurrealValue)]
struct LegacyBeaconRow {
    record_id: String,
    hex_id: String,
    owner_email: String,
    owner_name: Option<String>,
    status: String,
    data: serde_json::Value,
    deletion_reason: Option<String>,
    deleted_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<LegacyBeaconStatus, DbError> {
    match s {
        "Migrated" => Ok(LegacyBeaconStatus::Migrated),
        "Claimed" => Ok(LegacyBeaconStatus::Claimed),
        "Deleted" => Ok(LegacyBeaconStatus::Deleted),
        other => Err(DbError::Decode(format!(
            "unknown legacy beacon status: {other}"
        ))),
    }
}

fn status_to_string(s: LegacyBeaconStatus) -> &'static str {
    match s {
        LegacyBeaconStatus::Migrated => "Migrated",
        LegacyBeaconStatus::Claimed => "Claimed",
        LegacyBeaconStatus::Deleted => "Deleted",
    }
}

impl LegacyBeaconRow {
    fn try_into_legacy_beacon(self) -> Result<LegacyBeacon, DbError> {
        Ok(LegacyBeacon {
            id: LegacyBeaconId::from_uuid(parse_uuid(&self.record_id, "legacy beacon")?),
            hex_id: self.hex_id,
            owner_email: self.owner_email,
            owner_name: self.owner_name,
            status: parse_status(&self.status)?,
            data: self.data,
            deletion_reason: self.deletion_reason,
            deleted_by: self.deleted_by,
            created_date: self.created_at,
            last_modified_date: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the legacy beacon repository.
#[derive(Clone)]
pub struct SurrealLegacyBeaconRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLegacyBeaconRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn set_status(
        &self,
        id: LegacyBeaconId,
        status: LegacyBeaconStatus,
        reason: Option<String>,
        deleted_by: Option<String>,
    ) -> Result<(), DbError> {
        self.db
            .query(
                "UPDATE type::record('legacy_beacon', $id) SET \
                 status = $status, \
                 deletion_reason = $reason, deleted_by = $deleted_by, \
                 updated_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .bind(("status", status_to_string(status)))
            .bind(("reason", reason))
            .bind(("deleted_by", deleted_by))
            .await?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}

impl<C: Connection> LegacyBeaconRepository for SurrealLegacyBeaconRepository<C> {
    async fn create(&self, input: CreateLegacyBeacon) -> BeaconsResult<LegacyBeacon> {
        let input = input.validate()?;
        let id_str = LegacyBeaconId::generate().to_string();
        let data = input
            .data
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let query = format!(
            "CREATE type::record('legacy_beacon', $id) SET \
             hex_id = $hex_id, owner_email = $owner_email, \
             owner_name = $owner_name, status = $status, data = $data; \
             {SELECT_BY_ID};"
        );

        let result = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("hex_id", input.hex_id))
            .bind(("owner_email", input.owner_email))
            .bind(("owner_name", input.owner_name))
            .bind(("status", status_to_string(LegacyBeaconStatus::Migrated)))
            .bind(("data", data))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<LegacyBeaconRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "legacy_beacon".into(),
            id: id_str,
        })?;

        Ok(row.try_into_legacy_beacon()?)
    }

    async fn get_by_id(&self, id: LegacyBeaconId) -> BeaconsResult<LegacyBeacon> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(SELECT_BY_ID)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LegacyBeaconRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "legacy_beacon".into(),
            id: id_str,
        })?;

        Ok(row.try_into_legacy_beacon()?)
    }

    async fn find_by_hex_id_and_owner_email(
        &self,
        hex_id: &str,
        owner_email: &str,
    ) -> BeaconsResult<Vec<LegacyBeacon>> {
        let hex_id = normalize_hex_id(hex_id)?;
        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id, * \
                 FROM legacy_beacon \
                 WHERE hex_id = $hex_id AND owner_email = $owner_email \
                 ORDER BY created_at ASC",
            )
            .bind(("hex_id", hex_id))
            .bind(("owner_email", owner_email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LegacyBeaconRow> = result.take(0).map_err(DbError::from)?;

        let beacons = rows
            .into_iter()
            .map(LegacyBeaconRow::try_into_legacy_beacon)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(beacons)
    }

    async fn mark_claimed(&self, id: LegacyBeaconId) -> BeaconsResult<()> {
        self.set_status(id, LegacyBeaconStatus::Claimed, None, None)
            .await?;
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: LegacyBeaconId,
        reason: String,
        deleted_by: Option<String>,
    ) -> BeaconsResult<()> {
        self.set_status(id, LegacyBeaconStatus::Deleted, Some(reason), deleted_by)
            .await?;
        Ok(())
    }
}
