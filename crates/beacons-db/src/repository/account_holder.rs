//! SurrealDB implementation of [`AccountHolderRepository`].

use beacons_core::error::{BeaconsError, BeaconsResult};
use beacons_core::ids::AccountHolderId;
use beacons_core::models::account_holder::{
    AccountHolder, CreateAccountHolder, UpdateAccountHolder,
};
use beacons_core::repository::AccountHolderRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use super::{from_json, parse_uuid, to_json};
use crate::error::DbError;

const SELECT_BY_ID: &str = "SELECT record::id(id) AS record_id, * \
     FROM type::record('account_holder', $id)";

/// DB-side row struct; the record id is projected via `record::id(id)`.
#[derive(Debug, SurrealValue)]
struct AccountHolderRow {
    record_id: String,
    auth_id: String,
    email: String,
    full_name: String,
    telephone_number: Option<String>,
    alternative_telephone_number: Option<String>,
    address: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountHolderRow {
    fn try_into_account_holder(self) -> Result<AccountHolder, DbError> {
        Ok(AccountHolder {
            id: parse_uuid(&self.record_id, "account holder")?.into(),
            auth_id: self.auth_id,
            email: self.email,
            full_name: self.full_name,
            telephone_number: self.telephone_number,
            alternative_telephone_number: self.alternative_telephone_number,
            address: from_json(self.address, "account holder address")?,
            created_date: self.created_at,
            last_modified_date: self.updated_at,
        })
    }
}

fn first_row(rows: Vec<AccountHolderRow>, id: String) -> BeaconsResult<AccountHolder> {
    let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
        entity: "account_holder".into(),
        id,
    })?;
    Ok(row.try_into_account_holder()?)
}

const AUTH_ID_INDEX: &str = "idx_account_holder_auth_id";

/// Two concurrent creates can both pass the service's lookup; the unique
/// index on `auth_id` catches the second one.
fn unique_auth_id_violation(err: impl std::fmt::Display) -> DbError {
    let message = err.to_string();
    if message.contains(AUTH_ID_INDEX) {
        DbError::Duplicate {
            entity: "account_holder".into(),
        }
    } else {
        DbError::Query(message)
    }
}

/// SurrealDB implementation of the account holder repository.
#[derive(Clone)]
pub struct SurrealAccountHolderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAccountHolderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AccountHolderRepository for SurrealAccountHolderRepository<C> {
    async fn create(&self, input: CreateAccountHolder) -> BeaconsResult<AccountHolder> {
        let id_str = AccountHolderId::generate().to_string();
        let address = to_json(&input.address)?;

        // Statement 0 is the CREATE, statement 1 reads the row back with
        // its id projected.
        let query = format!(
            "CREATE type::record('account_holder', $id) SET \
             auth_id = $auth_id, email = $email, full_name = $full_name, \
             telephone_number = $telephone_number, \
             alternative_telephone_number = $alternative_telephone_number, \
             address = $address; \
             {SELECT_BY_ID};"
        );

        let result = self
            .db
            .query(query)
            .bind(("id", id_str.clone()))
            .bind(("auth_id", input.auth_id))
            .bind(("email", input.email))
            .bind(("full_name", input.full_name))
            .bind(("telephone_number", input.telephone_number))
            .bind((
                "alternative_telephone_number",
                input.alternative_telephone_number,
            ))
            .bind(("address", address))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(unique_auth_id_violation)?;

        let rows: Vec<AccountHolderRow> = result.take(1).map_err(DbError::from)?;
        first_row(rows, id_str)
    }

    async fn get_by_id(&self, id: AccountHolderId) -> BeaconsResult<AccountHolder> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(SELECT_BY_ID)
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountHolderRow> = result.take(0).map_err(DbError::from)?;
        first_row(rows, id_str)
    }

    async fn get_by_auth_id(&self, auth_id: &str) -> BeaconsResult<AccountHolder> {
        let mut result = self
            .db
            .query(
                "SELECT record::id(id) AS record_id, * \
                 FROM account_holder WHERE auth_id = $auth_id LIMIT 1",
            )
            .bind(("auth_id", auth_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountHolderRow> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BeaconsError::not_found("account_holder", format!("authId={auth_id}")))?
            .try_into_account_holder()
            .map_err(Into::into)
    }

    async fn update(
        &self,
        id: AccountHolderId,
        input: UpdateAccountHolder,
    ) -> BeaconsResult<AccountHolder> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.full_name.is_some() {
            sets.push("full_name = $full_name");
        }
        if input.telephone_number.is_some() {
            sets.push("telephone_number = $telephone_number");
        }
        if input.alternative_telephone_number.is_some() {
            sets.push("alternative_telephone_number = $alternative_telephone_number");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        sets.push("updated_at = time::now()");

        // UPDATE on a missing record id is a no-op, so the read-back
        // statement doubles as the existence check.
        let query = format!(
            "UPDATE type::record('account_holder', $id) SET {}; {SELECT_BY_ID};",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(full_name) = input.full_name {
            builder = builder.bind(("full_name", full_name));
        }
        if let Some(telephone_number) = input.telephone_number {
            builder = builder.bind(("telephone_number", telephone_number));
        }
        if let Some(alternative) = input.alternative_telephone_number {
            builder = builder.bind(("alternative_telephone_number", alternative));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", to_json(&address)?));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AccountHolderRow> = result.take(1).map_err(DbError::from)?;
        first_row(rows, id_str)
    }
}
