//! Beacon domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BeaconsError, BeaconsResult};
use crate::ids::{AccountHolderId, BeaconId};

/// Lifecycle of a registered beacon. `Deleted` is the soft-deleted state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeaconStatus {
    New,
    Deleted,
}

/// Descriptive, optional attributes of a physical beacon.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BeaconDetails {
    /// e.g. `EPIRB`, `PLB`, `ELT`.
    pub beacon_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub manufacturer_serial_number: Option<String>,
    pub reference_number: Option<String>,
    pub chk_code: Option<String>,
    pub battery_expiry_date: Option<NaiveDate>,
    pub last_serviced_date: Option<NaiveDate>,
    /// Manufacturer type identifier.
    pub mti: Option<String>,
    /// Whether the beacon is fitted to a simplified voyage data recorder.
    pub svdr: Option<bool>,
    /// Cospas-Sarsat type approval certificate number.
    pub csta: Option<String>,
    pub protocol: Option<String>,
    pub coding: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beacon {
    pub id: BeaconId,
    pub account_holder_id: AccountHolderId,
    /// Uppercase hexadecimal identifier programmed into the beacon.
    pub hex_id: String,
    pub status: BeaconStatus,
    pub details: BeaconDetails,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// Validate a beacon hex id and normalise it to uppercase.
pub fn normalize_hex_id(raw: &str) -> BeaconsResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BeaconsError::validation("hexId must not be blank"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BeaconsError::validation(format!(
            "hexId must be hexadecimal, got {trimmed}"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_id_is_uppercased_and_trimmed() {
        assert_eq!(
            normalize_hex_id(" 1d0ea08c52ffbff ").unwrap(),
            "1D0EA08C52FFBFF"
        );
    }

    #[test]
    fn hex_id_rejects_non_hex() {
        assert!(normalize_hex_id("XYZ").is_err());
        assert!(normalize_hex_id("").is_err());
    }

    #[test]
    fn status_uses_upper_case_on_the_wire() {
        let json = serde_json::to_string(&BeaconStatus::Deleted).unwrap();
        assert_eq!(json, "\"DELETED\"");
    }
}
