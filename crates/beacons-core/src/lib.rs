//! Beacon registry core: typed identities, domain models, the shared error
//! taxonomy and the repository traits implemented by the storage layer.

pub mod error;
pub mod ids;
pub mod models;
pub mod repository;

pub use error::{BeaconsError, BeaconsResult};
pub use ids::{AccountHolderId, BeaconId, LegacyBeaconId, ensure_matching_ids};
