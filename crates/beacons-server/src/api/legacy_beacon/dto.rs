//! Legacy beacon wire DTOs.

use beacons_core::ids::LegacyBeaconId;
use beacons_core::models::legacy_beacon::{DeleteLegacyBeacon, LegacyBeacon, LegacyBeaconStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::envelope::Wrapper;

pub const LEGACY_BEACON_TYPE: &str = "legacyBeacon";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBeaconDto {
    pub hex_id: String,
    pub owner_email: String,
    pub owner_name: Option<String>,
    pub status: LegacyBeaconStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    /// The record as exported from the predecessor registry.
    pub data: serde_json::Value,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl LegacyBeaconDto {
    pub fn wrap(legacy: LegacyBeacon) -> Wrapper<Self> {
        let id = legacy.id.as_uuid();
        let dto = Self {
            hex_id: legacy.hex_id,
            owner_email: legacy.owner_email,
            owner_name: legacy.owner_name,
            status: legacy.status,
            deletion_reason: legacy.deletion_reason,
            deleted_by: legacy.deleted_by,
            data: legacy.data,
            created_date: legacy.created_date,
            last_modified_date: legacy.last_modified_date,
        };
        Wrapper::new(id, LEGACY_BEACON_TYPE, dto)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLegacyBeaconDto {
    pub beacon_id: LegacyBeaconId,
    pub reason: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl From<DeleteLegacyBeaconDto> for DeleteLegacyBeacon {
    fn from(dto: DeleteLegacyBeaconDto) -> Self {
        Self {
            beacon_id: dto.beacon_id,
            reason: dto.reason,
            user_id: dto.user_id,
        }
    }
}
