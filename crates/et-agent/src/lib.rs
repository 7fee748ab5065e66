//! `et-agent`: the folk population of an epitown run.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`status`]     | `Status` trait, `compartments!` vocabulary macro            |
//! | [`tally`]      | `StatusTally` (per-status counts at one timestep/event)     |
//! | [`folk`]       | `Folk` record, `FolkView` read-only trait                   |
//! | [`population`] | `Population` (folk collection + household nodes)            |
//! | [`builder`]    | `PopulationBuilder`, `PopulationConfig`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `PopulationConfig`.    |

pub mod builder;
pub mod folk;
pub mod population;
pub mod status;
pub mod tally;

#[cfg(test)]
mod tests;

pub use builder::{PopulationBuilder, PopulationConfig};
pub use folk::{Folk, FolkView};
pub use population::Population;
pub use status::Status;
pub use tally::StatusTally;
