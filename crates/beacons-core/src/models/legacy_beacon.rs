//! Legacy beacon domain model.
//!
//! Legacy beacons were migrated from the predecessor registry. They are
//! read-only apart from two transitions: being claimed by a new
//! registration with the same hex id and owner email, and being deleted
//! by back-office staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BeaconsResult;
use crate::ids::LegacyBeaconId;
use crate::models::beacon::normalize_hex_id;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyBeaconStatus {
    Migrated,
    Claimed,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyBeacon {
    pub id: LegacyBeaconId,
    pub hex_id: String,
    pub owner_email: String,
    pub owner_name: Option<String>,
    pub status: LegacyBeaconStatus,
    /// The record exactly as exported from the predecessor system.
    pub data: serde_json::Value,
    pub deletion_reason: Option<String>,
    pub deleted_by: Option<String>,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Fields required to import a legacy beacon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLegacyBeacon {
    pub hex_id: String,
    pub owner_email: String,
    pub owner_name: Option<String>,
    pub data: Option<serde_json::Value>,
}

impl CreateLegacyBeacon {
    /// Hex ids are stored uppercase, the same as registered beacons, so
    /// claiming can match on them exactly.
    pub fn validate(mut self) -> BeaconsResult<Self> {
        self.hex_id = normalize_hex_id(&self.hex_id)?;
        Ok(self)
    }
}

/// Back-office request to delete a legacy beacon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLegacyBeacon {
    pub beacon_id: LegacyBeaconId,
    pub reason: String,
    /// Back-office user performing the deletion.
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_uppercases_hex_id() {
        let input = CreateLegacyBeacon {
            hex_id: " 1d0ea08c52ffbff".into(),
            owner_email: "old@example.com".into(),
            owner_name: None,
            data: None,
        };
        assert_eq!(input.validate().unwrap().hex_id, "1D0EA08C52FFBFF");
    }

    #[test]
    fn import_rejects_non_hex_id() {
        let input = CreateLegacyBeacon {
            hex_id: "not-hex".into(),
            owner_email: "old@example.com".into(),
            owner_name: None,
            data: None,
        };
        assert!(input.validate().is_err());
    }
}
