//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Point lookups fail with
//! [`BeaconsError::NotFound`](crate::error::BeaconsError::NotFound);
//! list queries return a possibly empty vector.

use crate::error::BeaconsResult;
use crate::ids::{AccountHolderId, BeaconId, LegacyBeaconId};
use crate::models::{
    account_holder::{AccountHolder, CreateAccountHolder, UpdateAccountHolder},
    beacon::{Beacon, BeaconStatus},
    legacy_beacon::{CreateLegacyBeacon, LegacyBeacon},
    registration::{CreateRegistration, Registration},
};

// ---------------------------------------------------------------------------
// Account holders
// ---------------------------------------------------------------------------

pub trait AccountHolderRepository: Send + Sync {
    fn create(
        &self,
        input: CreateAccountHolder,
    ) -> impl Future<Output = BeaconsResult<AccountHolder>> + Send;
    fn get_by_id(
        &self,
        id: AccountHolderId,
    ) -> impl Future<Output = BeaconsResult<AccountHolder>> + Send;
    fn get_by_auth_id(
        &self,
        auth_id: &str,
    ) -> impl Future<Output = BeaconsResult<AccountHolder>> + Send;
    fn update(
        &self,
        id: AccountHolderId,
        input: UpdateAccountHolder,
    ) -> impl Future<Output = BeaconsResult<AccountHolder>> + Send;
}

// ---------------------------------------------------------------------------
// Beacons & registrations
// ---------------------------------------------------------------------------

pub trait BeaconRepository: Send + Sync {
    fn get_by_id(&self, id: BeaconId) -> impl Future<Output = BeaconsResult<Beacon>> + Send;
    /// Beacons owned by an account holder in the given status, oldest first.
    fn list_by_account_holder(
        &self,
        account_holder_id: AccountHolderId,
        status: BeaconStatus,
    ) -> impl Future<Output = BeaconsResult<Vec<Beacon>>> + Send;
}

pub trait RegistrationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateRegistration,
    ) -> impl Future<Output = BeaconsResult<Registration>> + Send;
    fn get_by_beacon_id(
        &self,
        beacon_id: BeaconId,
    ) -> impl Future<Output = BeaconsResult<Registration>> + Send;
    /// Replace the beacon details, owner, uses and emergency contacts.
    /// Ownership and status are left untouched.
    fn update(
        &self,
        beacon_id: BeaconId,
        input: CreateRegistration,
    ) -> impl Future<Output = BeaconsResult<Registration>> + Send;
    /// Registrations that have not been soft-deleted, oldest first.
    fn list_by_account_holder(
        &self,
        account_holder_id: AccountHolderId,
    ) -> impl Future<Output = BeaconsResult<Vec<Registration>>> + Send;
    /// Soft-delete: sets status to `Deleted` and records the reason.
    fn soft_delete(
        &self,
        beacon_id: BeaconId,
        reason: String,
    ) -> impl Future<Output = BeaconsResult<()>> + Send;
    /// Remove the stored row. Deleting an absent registration is a no-op.
    fn permanent_delete(&self, beacon_id: BeaconId)
    -> impl Future<Output = BeaconsResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Legacy beacons
// ---------------------------------------------------------------------------

pub trait LegacyBeaconRepository: Send + Sync {
    fn create(
        &self,
        input: CreateLegacyBeacon,
    ) -> impl Future<Output = BeaconsResult<LegacyBeacon>> + Send;
    fn get_by_id(
        &self,
        id: LegacyBeaconId,
    ) -> impl Future<Output = BeaconsResult<LegacyBeacon>> + Send;
    /// Zero, one or many matches; uniqueness is not enforced.
    fn find_by_hex_id_and_owner_email(
        &self,
        hex_id: &str,
        owner_email: &str,
    ) -> impl Future<Output = BeaconsResult<Vec<LegacyBeacon>>> + Send;
    fn mark_claimed(&self, id: LegacyBeaconId) -> impl Future<Output = BeaconsResult<()>> + Send;
    /// Soft-delete: sets status to `Deleted` and records who and why.
    fn soft_delete(
        &self,
        id: LegacyBeaconId,
        reason: String,
        deleted_by: Option<String>,
    ) -> impl Future<Output = BeaconsResult<()>> + Send;
}
