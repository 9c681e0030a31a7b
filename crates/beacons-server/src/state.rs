//! Shared application state handed to every handler.

use std::sync::Arc;

use beacons_db::repository::{
    SurrealAccountHolderRepository, SurrealBeaconRepository, SurrealLegacyBeaconRepository,
    SurrealRegistrationRepository,
};
use beacons_service::{AccountHolderService, AuthConfig, LegacyBeaconService, RegistrationService};
use surrealdb::{Connection, Surreal};

pub type AccountHolders<C> =
    AccountHolderService<SurrealAccountHolderRepository<C>, SurrealBeaconRepository<C>>;

pub type Registrations<C> = RegistrationService<
    SurrealRegistrationRepository<C>,
    SurrealAccountHolderRepository<C>,
    SurrealLegacyBeaconRepository<C>,
>;

pub type LegacyBeacons<C> =
    LegacyBeaconService<SurrealLegacyBeaconRepository<C>, Arc<Registrations<C>>>;

pub struct AppState<C: Connection> {
    pub account_holders: Arc<AccountHolders<C>>,
    pub registrations: Arc<Registrations<C>>,
    pub legacy_beacons: Arc<LegacyBeacons<C>>,
    pub auth: Arc<AuthConfig>,
}

impl<C: Connection> AppState<C> {
    /// Wire the services over a connected, migrated database.
    pub fn new(db: Surreal<C>, auth: AuthConfig) -> Self {
        let registrations = Arc::new(RegistrationService::new(
            SurrealRegistrationRepository::new(db.clone()),
            SurrealAccountHolderRepository::new(db.clone()),
            SurrealLegacyBeaconRepository::new(db.clone()),
        ));

        let legacy_beacons = Arc::new(LegacyBeaconService::new(
            SurrealLegacyBeaconRepository::new(db.clone()),
            registrations.clone(),
        ));

        let account_holders = Arc::new(AccountHolderService::new(
            SurrealAccountHolderRepository::new(db.clone()),
            SurrealBeaconRepository::new(db),
        ));

        Self {
            account_holders,
            registrations,
            legacy_beacons,
            auth: Arc::new(auth),
        }
    }
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            account_holders: self.account_holders.clone(),
            registrations: self.registrations.clone(),
            legacy_beacons: self.legacy_beacons.clone(),
            auth: self.auth.clone(),
        }
    }
}
