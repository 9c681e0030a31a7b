//! Account holder wire DTOs, carried inside the response envelope.

use beacons_core::models::account_holder::{
    AccountHolder, CreateAccountHolder, UpdateAccountHolder,
};
use beacons_core::models::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::envelope::Wrapper;

pub const ACCOUNT_HOLDER_TYPE: &str = "accountHolder";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountHolderDto {
    pub auth_id: String,
    pub email: String,
    pub full_name: String,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    #[serde(flatten)]
    pub address: Address,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl From<AccountHolder> for AccountHolderDto {
    fn from(holder: AccountHolder) -> Self {
        Self {
            auth_id: holder.auth_id,
            email: holder.email,
            full_name: holder.full_name,
            telephone_number: holder.telephone_number,
            alternative_telephone_number: holder.alternative_telephone_number,
            address: holder.address,
            created_date: holder.created_date,
            last_modified_date: holder.last_modified_date,
        }
    }
}

impl AccountHolderDto {
    pub fn wrap(holder: AccountHolder) -> Wrapper<Self> {
        let id = holder.id.as_uuid();
        Wrapper::new(id, ACCOUNT_HOLDER_TYPE, holder.into())
    }
}

/// Account holder embedded in a registration, outside the envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmbeddedAccountHolderDto {
    pub id: Uuid,
    #[serde(flatten)]
    pub holder: AccountHolderDto,
}

impl From<AccountHolder> for EmbeddedAccountHolderDto {
    fn from(holder: AccountHolder) -> Self {
        Self {
            id: holder.id.as_uuid(),
            holder: holder.into(),
        }
    }
}

/// Attributes of a create request. Missing strings deserialize as blank
/// and are rejected by validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAccountHolderDto {
    pub auth_id: String,
    pub email: String,
    pub full_name: String,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    #[serde(flatten)]
    pub address: Address,
}

impl From<CreateAccountHolderDto> for CreateAccountHolder {
    fn from(dto: CreateAccountHolderDto) -> Self {
        Self {
            auth_id: dto.auth_id,
            email: dto.email,
            full_name: dto.full_name,
            telephone_number: dto.telephone_number,
            alternative_telephone_number: dto.alternative_telephone_number,
            address: dto.address,
        }
    }
}

/// Attributes of an update request. Absent fields are left unchanged;
/// any address field replaces the whole stored address.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAccountHolderDto {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    #[serde(flatten)]
    pub address: Address,
}

impl From<UpdateAccountHolderDto> for UpdateAccountHolder {
    fn from(dto: UpdateAccountHolderDto) -> Self {
        let address = (dto.address != Address::default()).then_some(dto.address);
        Self {
            email: dto.email,
            full_name: dto.full_name,
            telephone_number: dto.telephone_number,
            alternative_telephone_number: dto.alternative_telephone_number,
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_holder_carries_its_id_beside_the_attributes() {
        let now = Utc::now();
        let holder = AccountHolder {
            id: beacons_core::ids::AccountHolderId::generate(),
            auth_id: "auth-1".into(),
            email: "steve@example.com".into(),
            full_name: "Steve".into(),
            telephone_number: None,
            alternative_telephone_number: None,
            address: Address {
                postcode: Some("BS8 7NW".into()),
                ..Default::default()
            },
            created_date: now,
            last_modified_date: now,
        };
        let id = holder.id;

        let value = serde_json::to_value(EmbeddedAccountHolderDto::from(holder)).unwrap();
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["authId"], "auth-1");
        assert_eq!(value["postcode"], "BS8 7NW");
    }

    #[test]
    fn update_without_address_fields_keeps_address() {
        let dto: UpdateAccountHolderDto =
            serde_json::from_value(json!({ "fullName": "Steven" })).unwrap();
        let update = UpdateAccountHolder::from(dto);
        assert_eq!(update.full_name.as_deref(), Some("Steven"));
        assert!(update.address.is_none());
    }

    #[test]
    fn update_with_address_fields_replaces_address() {
        let dto: UpdateAccountHolderDto =
            serde_json::from_value(json!({ "postcode": "BS8 7NW" })).unwrap();
        let update = UpdateAccountHolder::from(dto);
        assert_eq!(
            update.address.and_then(|a| a.postcode).as_deref(),
            Some("BS8 7NW")
        );
    }
}
