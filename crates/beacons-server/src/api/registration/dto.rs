//! Registration wire DTOs.

use beacons_core::ids::{AccountHolderId, BeaconId};
use beacons_core::models::beacon::{Beacon, BeaconDetails, BeaconStatus};
use beacons_core::models::registration::{
    BeaconOwner, BeaconUse, CreateRegistration, DeleteRegistration, EmergencyContact, Registration,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::account_holder::dto::EmbeddedAccountHolderDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeaconDto {
    pub id: Uuid,
    pub account_holder_id: Uuid,
    pub hex_id: String,
    pub status: BeaconStatus,
    #[serde(flatten)]
    pub details: BeaconDetails,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl From<Beacon> for BeaconDto {
    fn from(beacon: Beacon) -> Self {
        Self {
            id: beacon.id.as_uuid(),
            account_holder_id: beacon.account_holder_id.as_uuid(),
            hex_id: beacon.hex_id,
            status: beacon.status,
            details: beacon.details,
            created_date: beacon.created_date,
            last_modified_date: beacon.last_modified_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    #[serde(flatten)]
    pub beacon: BeaconDto,
    pub owner: BeaconOwner,
    pub uses: Vec<BeaconUse>,
    pub emergency_contacts: Vec<EmergencyContact>,
    /// Only filled in when a single registration is fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<EmbeddedAccountHolderDto>,
}

impl From<Registration> for RegistrationDto {
    fn from(registration: Registration) -> Self {
        Self {
            beacon: registration.beacon.into(),
            owner: registration.owner,
            uses: registration.uses,
            emergency_contacts: registration.emergency_contacts,
            account_holder: None,
        }
    }
}

/// Body of register and update requests.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationDto {
    pub account_holder_id: AccountHolderId,
    #[serde(default)]
    pub hex_id: String,
    #[serde(flatten)]
    pub details: BeaconDetails,
    #[serde(default)]
    pub owner: BeaconOwner,
    #[serde(default)]
    pub uses: Vec<BeaconUse>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl From<CreateRegistrationDto> for CreateRegistration {
    fn from(dto: CreateRegistrationDto) -> Self {
        Self {
            account_holder_id: dto.account_holder_id,
            hex_id: dto.hex_id,
            details: dto.details,
            owner: dto.owner,
            uses: dto.uses,
            emergency_contacts: dto.emergency_contacts,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRegistrationDto {
    pub beacon_id: BeaconId,
    pub account_holder_id: AccountHolderId,
    pub reason: String,
}

impl From<DeleteRegistrationDto> for DeleteRegistration {
    fn from(dto: DeleteRegistrationDto) -> Self {
        Self {
            beacon_id: dto.beacon_id,
            account_holder_id: dto.account_holder_id,
            reason: dto.reason,
        }
    }
}
