//! Descriptive town metadata carried into the run output.

use et_core::GeoPoint;

/// Where the town was cut from and in which projection its distances were
/// computed.  Not used by the engine itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TownMetadata {
    /// Centre point the town was built around.
    pub origin:    GeoPoint,
    /// Radius of the extracted area in metres.
    pub radius_m:  f64,
    /// EPSG code of the projected CRS used for distances.
    pub epsg_code: u32,
}

impl Default for TownMetadata {
    fn default() -> Self {
        Self { origin: GeoPoint::new(0.0, 0.0), radius_m: 0.0, epsg_code: 4326 }
    }
}
