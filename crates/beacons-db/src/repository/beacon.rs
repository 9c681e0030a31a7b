//! SurrealDB implementation of [`BeaconRepository`], plus the `beacon`
//! row mapping shared with the registration repository.

use beacons_core::error::BeaconsResult;
use beacons_core::ids::{AccountHolderId, BeaconId};
use beacons_core::models::beacon::{Beacon, BeaconDetails, BeaconStatus};
use beacons_core::models::registration::{
    BeaconOwner, BeaconUse, CreateRegistration, EmergencyContact, Registration,
};
use beacons_core::repository::BeaconRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use super::{from_json, parse_uuid, to_json};
use crate::error::DbError;

pub(super) const SELECT_BY_ID: &str = "SELECT record::id(id) AS record_id, * \
     FROM type::record('beacon', $id)";

/// Shape of the nested `details` object on a `beacon` row.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct StoredDetails {
    pub beacon: BeaconDetails,
    pub owner: BeaconOwner,
    pub uses: Vec<BeaconUse>,
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl StoredDetails {
    pub(super) fn encode(input: &CreateRegistration) -> Result<serde_json::Value, DbError> {
        to_json(&StoredDetails {
            beacon: input.details.clone(),
            owner: input.owner.clone(),
            uses: input.uses.clone(),
            emergency_contacts: input.emergency_contacts.clone(),
        })
    }
}

/// DB-side row struct; the record id is projected via `record::id(id)`.
#[derive(Debug, SurrealValue)]
pub(super) struct BeaconRow {
    record_id: String,
    account_holder_id: String,
    hex_id: String,
    status: String,
    details: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<BeaconStatus, DbError> {
    match s {
        "New" => Ok(BeaconStatus::New),
        "Deleted" => Ok(BeaconStatus::Deleted),
        other => Err(DbError::Decode(format!("unknown beacon status: {other}"))),
    }
}

pub(super) fn status_to_string(s: BeaconStatus) -> &'static str {
    match s {
        BeaconStatus::New => "New",
        BeaconStatus::Deleted => "Deleted",
    }
}

impl BeaconRow {
    fn split(self) -> Result<(Beacon, StoredDetails), DbError> {
        let mut stored: StoredDetails = from_json(self.details, "beacon details")?;
        let beacon = Beacon {
            id: BeaconId::from_uuid(parse_uuid(&self.record_id, "beacon")?),
            account_holder_id: AccountHolderId::from_uuid(parse_uuid(
                &self.account_holder_id,
                "account holder",
            )?),
            hex_id: self.hex_id,
            status: parse_status(&self.status)?,
            details: std::mem::take(&mut stored.beacon),
            created_date: self.created_at,
            last_modified_date: self.updated_at,
        };
        Ok((beacon, stored))
    }

    pub(super) fn try_into_beacon(self) -> Result<Beacon, DbError> {
        self.split().map(|(beacon, _)| beacon)
    }

    pub(super) fn try_into_registration(self) -> Result<Registration, DbError> {
        let (beacon, stored) = self.split()?;
        Ok(Registration {
            beacon,
            owner: stored.owner,
            uses: stored.uses,
            emergency_contacts: stored.emergency_contacts,
        })
    }
}

/// SurrealDB implementation of the beacon repository.
#[derive(Clone)]
pub struct SurrealBeaconRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBeaconRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BeaconRepository for SurrealBeaconRepository<C> {
    async fn get_by_id(&self, id: BeaconId) -> BeaconsResult<Beacon> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(SELECT_BY_ID)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BeaconRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "beacon".into(),
            id: id_str,
        })?;

        Ok(row.try_into_beacon()?)
    }

    async fn list_by_account_holder(
        &self,
        account_holder_id: AccountHolderId,
        status: BeaconStatus,
    ) -> BeaconsResult<Vec<Beacon>> {
        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id, * \
                 FROM beacon \
                 WHERE account_holder_id = $account_holder_id AND status = $status \
                 ORDER BY created_at ASC",
            )
            .bind(("account_holder_id", account_holder_id.to_string()))
            .bind(("status", status_to_string(status)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BeaconRow> = result.take(0).map_err(DbError::from)?;

        let beacons = rows
            .into_iter()
            .map(BeaconRow::try_into_beacon)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(beacons)
    }
}
