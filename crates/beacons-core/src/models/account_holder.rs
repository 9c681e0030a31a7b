//! Account holder domain model.
//!
//! An account holder is the person who signs in to the public service
//! and owns zero or more beacon registrations. `auth_id` is the subject
//! issued by the external identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BeaconsError, BeaconsResult};
use crate::ids::AccountHolderId;
use crate::models::address::Address;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountHolder {
    pub id: AccountHolderId,
    pub auth_id: String,
    pub email: String,
    pub full_name: String,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    pub address: Address,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Fields required to create a new account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountHolder {
    pub auth_id: String,
    pub email: String,
    pub full_name: String,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    pub address: Address,
}

impl CreateAccountHolder {
    pub fn validate(&self) -> BeaconsResult<()> {
        require_non_blank("authId", &self.auth_id)?;
        require_non_blank("email", &self.email)?;
        require_non_blank("fullName", &self.full_name)
    }
}

/// Fields that can be updated on an existing account holder.
///
/// `None` leaves the stored value untouched. A supplied `address`
/// replaces the stored address as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateAccountHolder {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub telephone_number: Option<String>,
    pub alternative_telephone_number: Option<String>,
    pub address: Option<Address>,
}

impl UpdateAccountHolder {
    pub fn validate(&self) -> BeaconsResult<()> {
        if let Some(email) = &self.email {
            require_non_blank("email", email)?;
        }
        if let Some(full_name) = &self.full_name {
            require_non_blank("fullName", full_name)?;
        }
        Ok(())
    }
}

fn require_non_blank(field: &str, value: &str) -> BeaconsResult<()> {
    if value.trim().is_empty() {
        return Err(BeaconsError::validation(format!("{field} must not be blank")));
    }
    Ok(())
}
