//! Typed entity identities.
//!
//! Each identity is a distinct newtype over a UUID so that an
//! [`AccountHolderId`] can never be passed where a [`BeaconId`] is
//! expected. On the wire they serialize as the bare UUID string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BeaconsError, BeaconsResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random (v4) identity.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identity of a registered account holder.
    AccountHolderId
);

entity_id!(
    /// Identity of a beacon; registrations are keyed by it as well.
    BeaconId
);

entity_id!(
    /// Identity of a beacon record migrated from the predecessor system.
    LegacyBeaconId
);

/// Reject a delete request whose path identity differs from the identity
/// carried in its body. Both sides must be the same identity type.
pub fn ensure_matching_ids<T>(path_id: T, body_id: T) -> BeaconsResult<()>
where
    T: PartialEq + fmt::Display,
{
    if path_id == body_id {
        Ok(())
    } else {
        Err(BeaconsError::InvalidDelete {
            path_id: path_id.to_string(),
            body_id: body_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_uuid() {
        let raw = Uuid::new_v4();
        let id = BeaconId::from_uuid(raw);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{raw}\""));

        let back: BeaconId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<AccountHolderId>().is_err());
        let raw = Uuid::new_v4();
        let parsed: LegacyBeaconId = raw.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), raw);
    }

    #[test]
    fn matching_ids_pass() {
        let id = BeaconId::generate();
        assert!(ensure_matching_ids(id, id).is_ok());
    }

    #[test]
    fn mismatched_ids_are_invalid_delete() {
        let path = BeaconId::generate();
        let body = BeaconId::generate();
        let err = ensure_matching_ids(path, body).unwrap_err();
        match err {
            BeaconsError::InvalidDelete { path_id, body_id } => {
                assert_eq!(path_id, path.to_string());
                assert_eq!(body_id, body.to_string());
            }
            other => panic!("expected InvalidDelete, got {other:?}"),
        }
    }
}
