//! Beacon registry application services: account holders, registrations
//! and legacy beacons, plus bearer-token (JWT) authentication.

pub mod account_holder;
pub mod config;
pub mod error;
pub mod legacy_beacon;
pub mod registration;
pub mod token;

pub use account_holder::AccountHolderService;
pub use config::AuthConfig;
pub use error::AuthError;
pub use legacy_beacon::{LegacyBeaconDeletion, LegacyBeaconService};
pub use registration::RegistrationService;
pub use token::{AccessTokenClaims, ValidatedClaims};
