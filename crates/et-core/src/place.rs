//! Place-type tag shared by the town, the step events, and the models.
//!
//! The vocabulary matches the classification produced by the town
//! construction pipeline.  Anything it could not classify is `Other`.

use std::str::FromStr;

use crate::ConfigError;

/// What kind of place a town node is.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaceType {
    /// Homes.  Every folk's home node has this type.
    Accommodation,
    HealthcareFacility,
    Commercial,
    Workplace,
    Education,
    Religious,
    Other,
}

impl PlaceType {
    pub const ALL: [PlaceType; 7] = [
        PlaceType::Accommodation,
        PlaceType::HealthcareFacility,
        PlaceType::Commercial,
        PlaceType::Workplace,
        PlaceType::Education,
        PlaceType::Religious,
        PlaceType::Other,
    ];

    /// Label used in metadata, CSV schedules, and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceType::Accommodation      => "accommodation",
            PlaceType::HealthcareFacility => "healthcare_facility",
            PlaceType::Commercial         => "commercial",
            PlaceType::Workplace          => "workplace",
            PlaceType::Education          => "education",
            PlaceType::Religious          => "religious",
            PlaceType::Other              => "other",
        }
    }
}

impl FromStr for PlaceType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PlaceType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPlaceType(s.to_owned()))
    }
}

impl std::fmt::Display for PlaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
