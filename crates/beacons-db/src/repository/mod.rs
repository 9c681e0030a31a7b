//! SurrealDB repository implementations.

mod account_holder;
mod beacon;
mod legacy_beacon;
mod registration;

pub use account_holder::SurrealAccountHolderRepository;
pub use beacon::SurrealBeaconRepository;
pub use legacy_beacon::SurrealLegacyBeaconRepository;
pub use registration::SurrealRegistrationRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DbError> {
    serde_json::to_value(value).map_err(|e| DbError::Encode(e.to_string()))
}

fn from_json<T: DeserializeOwned>(value: serde_json::Value, what: &str) -> Result<T, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::Decode(format!("{what}: {e}")))
}
