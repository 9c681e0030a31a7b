//! Legacy beacon service.

use std::sync::Arc;

use beacons_core::error::BeaconsResult;
use beacons_core::ids::{LegacyBeaconId, ensure_matching_ids};
use beacons_core::models::legacy_beacon::{DeleteLegacyBeacon, LegacyBeacon};
use beacons_core::repository::LegacyBeaconRepository;

/// Performs the deletion of a legacy beacon on behalf of
/// [`LegacyBeaconService`]. Implemented by the registration service,
/// which owns every beacon lifecycle transition.
pub trait LegacyBeaconDeletion: Send + Sync {
    fn delete_legacy_beacon(
        &self,
        input: DeleteLegacyBeacon,
    ) -> impl Future<Output = BeaconsResult<()>> + Send;
}

impl<T: LegacyBeaconDeletion> LegacyBeaconDeletion for Arc<T> {
    fn delete_legacy_beacon(
        &self,
        input: DeleteLegacyBeacon,
    ) -> impl Future<Output = BeaconsResult<()>> + Send {
        (**self).delete_legacy_beacon(input)
    }
}

pub struct LegacyBeaconService<L: LegacyBeaconRepository, D: LegacyBeaconDeletion> {
    legacy_beacons: L,
    deletion: D,
}

impl<L: LegacyBeaconRepository, D: LegacyBeaconDeletion> LegacyBeaconService<L, D> {
    pub fn new(legacy_beacons: L, deletion: D) -> Self {
        Self {
            legacy_beacons,
            deletion,
        }
    }

    pub async fn find_by_id(&self, id: LegacyBeaconId) -> BeaconsResult<LegacyBeacon> {
        self.legacy_beacons.get_by_id(id).await
    }

    /// Delete a legacy beacon. `path_id` is the id the request was
    /// addressed to and must match the body.
    pub async fn delete(
        &self,
        path_id: LegacyBeaconId,
        input: DeleteLegacyBeacon,
    ) -> BeaconsResult<()> {
        ensure_matching_ids(path_id, input.beacon_id)?;
        self.deletion.delete_legacy_beacon(input).await
    }
}
