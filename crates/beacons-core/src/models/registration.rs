//! Registration domain model.
//!
//! A registration is the aggregate of a [`Beacon`] and the details the
//! account holder supplied about it: the owner, how it is used, and who
//! to call in an emergency. It is keyed by the beacon's id.

use serde::{Deserialize, Serialize};

use crate::error::BeaconsResult;
use crate::ids::{AccountHolderId, BeaconId};
use crate::models::address::Address;
use crate::models::beacon::{Beacon, BeaconDetails, normalize_hex_id};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BeaconOwner {
    pub full_name: String,
    pub email: Option<String>,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    #[serde(flatten)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BeaconUse {
    /// `MARITIME`, `AVIATION` or `LAND`.
    pub environment: String,
    pub purpose: Option<String>,
    pub activity: String,
    pub other_activity: Option<String>,
    pub more_details: Option<String>,
    pub main_use: bool,
    pub vessel_name: Option<String>,
    pub call_sign: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    pub full_name: String,
    pub telephone_number: String,
    pub alternative_telephone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub beacon: Beacon,
    pub owner: BeaconOwner,
    pub uses: Vec<BeaconUse>,
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl Registration {
    pub fn id(&self) -> BeaconId {
        self.beacon.id
    }

    pub fn is_owned_by(&self, account_holder_id: AccountHolderId) -> bool {
        self.beacon.account_holder_id == account_holder_id
    }
}

/// Everything needed to register a beacon, also used to replace the
/// details of an existing registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistration {
    pub account_holder_id: AccountHolderId,
    pub hex_id: String,
    pub details: BeaconDetails,
    pub owner: BeaconOwner,
    pub uses: Vec<BeaconUse>,
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl CreateRegistration {
    /// Validate the input and normalise the hex id in place.
    pub fn validate(mut self) -> BeaconsResult<Self> {
        self.hex_id = normalize_hex_id(&self.hex_id)?;
        Ok(self)
    }
}

/// Soft-delete request issued by an account holder for one of their
/// registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRegistration {
    pub beacon_id: BeaconId,
    pub account_holder_id: AccountHolderId,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_normalises_hex_id() {
        let input = CreateRegistration {
            account_holder_id: AccountHolderId::generate(),
            hex_id: "abc123".into(),
            details: BeaconDetails::default(),
            owner: BeaconOwner::default(),
            uses: vec![],
            emergency_contacts: vec![],
        };
        let validated = input.validate().unwrap();
        assert_eq!(validated.hex_id, "ABC123");
    }

    #[test]
    fn owner_address_is_flattened() {
        let owner = BeaconOwner {
            full_name: "Steve Stevington".into(),
            address: Address {
                postcode: Some("BS8 7NW".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&owner).unwrap();
        assert_eq!(json["fullName"], "Steve Stevington");
        assert_eq!(json["postcode"], "BS8 7NW");
    }
}
