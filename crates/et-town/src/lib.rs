//! `et-town`: the spatial network the population lives on.
//!
//! Building a town from geographic data (geocoding, classification, path
//! precomputation) happens upstream; this crate holds the finished graph and
//! answers the questions the engine asks of it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`network`]   | `Town` (CSR + R-tree + place types), `TownBuilder`        |
//! | [`occupancy`] | `Occupancy`, the per-node resident lists rebuilt per event|
//! | [`metadata`]  | `TownMetadata` (origin, radius, projection code)          |
//! | [`router`]    | `Router` trait, `DijkstraRouter`                          |
//! | [`error`]     | `TownError`, `TownResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod metadata;
pub mod network;
pub mod occupancy;
pub mod router;


pub use error::{TownError, TownResult};
pub use metadata::TownMetadata;
pub use network::{Town, TownBuilder};
pub use occupancy::Occupancy;
pub use router::{DijkstraRouter, Router};
