//! `et-core`: foundational types for the `epitown` simulation engine.
//!
//! This crate is a dependency of every other `et-*` crate.  It has no `et-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `NodeId`, `EdgeId`                             |
//! | [`place`]   | `PlaceType` tag carried by every town node                |
//! | [`geo`]     | `GeoPoint`, haversine distance                            |
//! | [`config`]  | `SimConfig` (timesteps, seed)                             |
//! | [`rng`]     | `SimRng`, the single generator threaded through a run     |
//! | [`error`]   | `ConfigError`, `ConfigResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod place;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, DEFAULT_SEED};
pub use error::{ConfigError, ConfigResult};
pub use geo::GeoPoint;
pub use ids::{AgentId, EdgeId, NodeId};
pub use place::PlaceType;
pub use rng::SimRng;
