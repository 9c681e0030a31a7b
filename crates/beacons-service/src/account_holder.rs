//! Account holder service.

use beacons_core::error::{BeaconsError, BeaconsResult};
use beacons_core::ids::AccountHolderId;
use beacons_core::models::account_holder::{
    AccountHolder, CreateAccountHolder, UpdateAccountHolder,
};
use beacons_core::models::beacon::{Beacon, BeaconStatus};
use beacons_core::repository::{AccountHolderRepository, BeaconRepository};
use tracing::info;

/// Account holder service.
///
/// Generic over repository implementations so that the service layer
/// has no dependency on the database crate.
pub struct AccountHolderService<A: AccountHolderRepository, B: BeaconRepository> {
    account_holders: A,
    beacons: B,
}

impl<A: AccountHolderRepository, B: BeaconRepository> AccountHolderService<A, B> {
    pub fn new(account_holders: A, beacons: B) -> Self {
        Self {
            account_holders,
            beacons,
        }
    }

    /// Create an account holder. The external auth id must not already be
    /// linked to another account holder.
    pub async fn create(&self, input: CreateAccountHolder) -> BeaconsResult<AccountHolder> {
        input.validate()?;

        match self.account_holders.get_by_auth_id(&input.auth_id).await {
            Ok(_) => {
                return Err(BeaconsError::AlreadyExists {
                    entity: "account_holder".into(),
                });
            }
            Err(BeaconsError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let created = self.account_holders.create(input).await?;
        info!(account_holder_id = %created.id, "Created account holder");
        Ok(created)
    }

    pub async fn get_account_holder(&self, id: AccountHolderId) -> BeaconsResult<AccountHolder> {
        self.account_holders.get_by_id(id).await
    }

    pub async fn get_account_holder_by_auth_id(
        &self,
        auth_id: &str,
    ) -> BeaconsResult<AccountHolder> {
        self.account_holders.get_by_auth_id(auth_id).await
    }

    /// Beacons the account holder currently has registered. Soft-deleted
    /// beacons are not included; an unknown account holder has none.
    pub async fn get_beacons_by_account_holder_id(
        &self,
        id: AccountHolderId,
    ) -> BeaconsResult<Vec<Beacon>> {
        self.beacons
            .list_by_account_holder(id, BeaconStatus::New)
            .await
    }

    pub async fn update_account_holder(
        &self,
        id: AccountHolderId,
        update: UpdateAccountHolder,
    ) -> BeaconsResult<AccountHolder> {
        update.validate()?;
        let updated = self.account_holders.update(id, update).await?;
        info!(account_holder_id = %id, "Updated account holder");
        Ok(updated)
    }
}
