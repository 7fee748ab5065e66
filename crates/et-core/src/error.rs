//! Configuration error taxonomy shared by every `et-*` crate.
//!
//! Everything here is fatal and raised at construction time, before the
//! first simulated event.  Crate-specific error enums wrap `ConfigError`
//! via `#[from]`.

use thiserror::Error;

use crate::PlaceType;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required place types: {}", join_place_types(.0))]
    MissingPlaceTypes(Vec<PlaceType>),

    #[error("unknown place type `{0}`")]
    UnknownPlaceType(String),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("step event `{event}`: a destination probability function is only allowed on DISPERSE events")]
    MobilityOnSendHome { event: String },

    #[error("step event name `{name}` is longer than 32 bytes")]
    EventNameTooLong { name: String },

    #[error("step event `{name}` appears more than once in the day schedule")]
    DuplicateEvent { name: String },

    #[error("`end_day` is reserved for the implicit terminal event")]
    ReservedEventName,

    #[error("invalid population setup: {0}")]
    Population(String),
}

impl ConfigError {
    /// Shorthand for `InvalidParameter`.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter { name, reason: reason.into() }
    }
}

fn join_place_types(types: &[PlaceType]) -> String {
    types.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
}

pub type ConfigResult<T> = Result<T, ConfigError>;
