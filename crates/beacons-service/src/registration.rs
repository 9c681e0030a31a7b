//! Registration service: registering, updating and deleting beacons on
//! behalf of account holders.
//!
//! Registering a beacon claims any legacy beacon records carrying the
//! same hex id and the account holder's email, so the migrated record is
//! no longer offered for claiming. Back-office deletion of legacy beacons
//! is also handled here; see [`LegacyBeaconDeletion`].

use beacons_core::error::{BeaconsError, BeaconsResult};
use beacons_core::ids::{AccountHolderId, BeaconId, ensure_matching_ids};
use beacons_core::models::legacy_beacon::{DeleteLegacyBeacon, LegacyBeaconStatus};
use beacons_core::models::registration::{CreateRegistration, DeleteRegistration, Registration};
use beacons_core::repository::{
    AccountHolderRepository, LegacyBeaconRepository, RegistrationRepository,
};
use tracing::info;

use crate::legacy_beacon::LegacyBeaconDeletion;

pub struct RegistrationService<R, A, L>
where
    R: RegistrationRepository,
    A: AccountHolderRepository,
    L: LegacyBeaconRepository,
{
    registrations: R,
    account_holders: A,
    legacy_beacons: L,
}

impl<R, A, L> RegistrationService<R, A, L>
where
    R: RegistrationRepository,
    A: AccountHolderRepository,
    L: LegacyBeaconRepository,
{
    pub fn new(registrations: R, account_holders: A, legacy_beacons: L) -> Self {
        Self {
            registrations,
            account_holders,
            legacy_beacons,
        }
    }

    pub async fn register(&self, input: CreateRegistration) -> BeaconsResult<Registration> {
        let input = input.validate()?;
        let account_holder = self
            .account_holders
            .get_by_id(input.account_holder_id)
            .await?;

        let registration = self.registrations.create(input).await?;
        info!(
            beacon_id = %registration.id(),
            account_holder_id = %account_holder.id,
            "Registered beacon"
        );

        self.claim_legacy_beacons(&registration.beacon.hex_id, &account_holder.email)
            .await?;

        Ok(registration)
    }

    async fn claim_legacy_beacons(&self, hex_id: &str, email: &str) -> BeaconsResult<()> {
        let matches = self
            .legacy_beacons
            .find_by_hex_id_and_owner_email(hex_id, email)
            .await?;

        for legacy in matches
            .into_iter()
            .filter(|l| l.status == LegacyBeaconStatus::Migrated)
        {
            self.legacy_beacons.mark_claimed(legacy.id).await?;
            info!(legacy_beacon_id = %legacy.id, "Claimed legacy beacon");
        }

        Ok(())
    }

    /// Replace the details of an existing registration.
    pub async fn update(
        &self,
        beacon_id: BeaconId,
        input: CreateRegistration,
    ) -> BeaconsResult<Registration> {
        let input = input.validate()?;
        self.registrations.get_by_beacon_id(beacon_id).await?;

        let updated = self.registrations.update(beacon_id, input).await?;
        info!(beacon_id = %beacon_id, "Updated registration");
        Ok(updated)
    }

    pub async fn get_by_beacon_id(&self, beacon_id: BeaconId) -> BeaconsResult<Registration> {
        self.registrations.get_by_beacon_id(beacon_id).await
    }

    /// Look up a registration owned by `account_holder_id`. A registration
    /// owned by anyone else is reported as not found.
    pub async fn get_by_beacon_id_and_account_holder_id(
        &self,
        beacon_id: BeaconId,
        account_holder_id: AccountHolderId,
    ) -> BeaconsResult<Registration> {
        let registration = self.registrations.get_by_beacon_id(beacon_id).await?;
        if !registration.is_owned_by(account_holder_id) {
            return Err(BeaconsError::not_found("registration", beacon_id));
        }
        Ok(registration)
    }

    /// Registrations the account holder has not deleted.
    pub async fn get_by_account_holder_id(
        &self,
        account_holder_id: AccountHolderId,
    ) -> BeaconsResult<Vec<Registration>> {
        self.registrations
            .list_by_account_holder(account_holder_id)
            .await
    }

    /// Soft-delete a registration. `path_id` is the beacon id the request
    /// was addressed to and must match the body.
    pub async fn soft_delete(
        &self,
        path_id: BeaconId,
        input: DeleteRegistration,
    ) -> BeaconsResult<()> {
        ensure_matching_ids(path_id, input.beacon_id)?;

        self.get_by_beacon_id_and_account_holder_id(input.beacon_id, input.account_holder_id)
            .await?;

        self.registrations
            .soft_delete(input.beacon_id, input.reason)
            .await?;
        info!(beacon_id = %input.beacon_id, "Soft-deleted registration");
        Ok(())
    }

    pub async fn permanent_delete(&self, beacon_id: BeaconId) -> BeaconsResult<()> {
        self.registrations.permanent_delete(beacon_id).await?;
        info!(beacon_id = %beacon_id, "Permanently deleted registration");
        Ok(())
    }
}

impl<R, A, L> LegacyBeaconDeletion for RegistrationService<R, A, L>
where
    R: RegistrationRepository,
    A: AccountHolderRepository,
    L: LegacyBeaconRepository,
{
    async fn delete_legacy_beacon(&self, input: DeleteLegacyBeacon) -> BeaconsResult<()> {
        self.legacy_beacons.get_by_id(input.beacon_id).await?;
        self.legacy_beacons
            .soft_delete(input.beacon_id, input.reason, input.user_id)
            .await?;
        info!(legacy_beacon_id = %input.beacon_id, "Deleted legacy beacon");
        Ok(())
    }
}
