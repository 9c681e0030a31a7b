//! SurrealDB implementation of [`RegistrationRepository`].
//!
//! A registration is stored as a single `beacon` row; see
//! [`StoredDetails`] for the nested layout.

use beacons_core::error::BeaconsResult;
use beacons_core::ids::{AccountHolderId, BeaconId};
use beacons_core::models::beacon::BeaconStatus;
use beacons_core::models::registration::{CreateRegistration, Registration};
use beacons_core::repository::RegistrationRepository;
use surrealdb::{Connection, Surreal};

use super::beacon::{BeaconRow, SELECT_BY_ID, StoredDetails, status_to_string};
use crate::error::DbError;

fn first_registration(rows: Vec<BeaconRow>, id: String) -> BeaconsResult<Registration> {
    let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
        entity: "registration".into(),
        id,
    })?;
    Ok(row.try_into_registration()?)
}

/// SurrealDB implementation of the registration repository.
#[derive(Clone)]
pub struct SurrealRegistrationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRegistrationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RegistrationRepository for SurrealRegistrationRepository<C> {
    async fn create(&self, input: CreateRegistration) -> BeaconsResult<Registration> {
        let id_str = BeaconId::generate().to_string();
        let details = StoredDetails::encode(&input)?;

        let query = format!(
            "CREATE type::record('beacon', $id) SET \
             account_holder_id = $account_holder_id, \
             hex_id = $hex_id, status = $status, \
             details = $details; \
             {SELECT_BY_ID};"
        );

        let result = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("account_holder_id", input.account_holder_id.to_string()))
            .bind(("hex_id", input.hex_id))
            .bind(("status", status_to_string(BeaconStatus::New)))
            .bind(("details", details))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<BeaconRow> = result.take(1).map_err(DbError::from)?;
        first_registration(rows, id_str)
    }

    async fn get_by_beacon_id(&self, beacon_id: BeaconId) -> BeaconsResult<Registration> {
        let id_str = beacon_id.to_string();

        let mut result = self
            .db
            .query(SELECT_BY_ID)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BeaconRow> = result.take(0).map_err(DbError::from)?;
        first_registration(rows, id_str)
    }

    async fn update(
        &self,
        beacon_id: BeaconId,
        input: CreateRegistration,
    ) -> BeaconsResult<Registration> {
        let id_str = beacon_id.to_string();
        let details = StoredDetails::encode(&input)?;

        let query = format!(
            "UPDATE type::record('beacon', $id) SET \
             hex_id = $hex_id, details = $details, \
             updated_at = time::now(); \
             {SELECT_BY_ID};"
        );

        let result = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("hex_id", input.hex_id))
            .bind(("details", details))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<BeaconRow> = result.take(1).map_err(DbError::from)?;
        first_registration(rows, id_str)
    }

    async fn list_by_account_holder(
        &self,
        account_holder_id: AccountHolderId,
    ) -> BeaconsResult<Vec<Registration>> {
        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id, * \
                 FROM beacon \
                 WHERE account_holder_id = $account_holder_id AND status = $status \
                 ORDER BY created_at ASC",
            )
            .bind(("account_holder_id", account_holder_id.to_string()))
            .bind(("status", status_to_string(BeaconStatus::New)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BeaconRow> = result.take(0).map_err(DbError::from)?;

        let registrations = rows
            .into_iter()
            .map(BeaconRow::try_into_registration)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(registrations)
    }

    async fn soft_delete(&self, beacon_id: BeaconId, reason: String) -> BeaconsResult<()> {
        self.db
            .query(
                "UPDATE type::record('beacon', $id) SET \
                 status = $status, deletion_reason = $reason, \
                 updated_at = time::now()",
            )
            .bind(("id", beacon_id.to_string()))
            .bind(("status", status_to_string(BeaconStatus::Deleted)))
            .bind(("reason", reason))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn permanent_delete(&self, beacon_id: BeaconId) -> BeaconsResult<()> {
        self.db
            .query("DELETE type::record('beacon', $id)")
            .bind(("id", beacon_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
