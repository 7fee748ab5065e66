//! `et-mobility`: where folks go during a dispersal event.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`engine`] | `Dispersal<R>`: priority routing, normal routing, selection     |
//! | [`cache`]  | `DistanceCache`: shortest-distance rows keyed by source node    |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | `DistanceCache::warm` computes rows with Rayon.              |
//! | `fx-hash`  | FxHash instead of SipHash for the cache map.                 |
//!
//! # Dispersal (one DISPERSE event)
//!
//! Folks are visited in id order.  A folk that is dead, out of energy, or
//! movement-restricted stays put.  Everyone else:
//!
//! 1. **Priority routing**: with a queued priority place type, the nearest
//!    node of a queued type by shortest path (ignoring the event's distance
//!    cap) is the only candidate, and its type is dequeued.
//! 2. **Normal routing**: otherwise, direct neighbors within the event's
//!    `max_distance` whose place type the event allows.
//! 3. **Selection**: one candidate is taken as is; several are drawn with
//!    the event's mobility function, or uniformly without one.
//!
//! No candidate means no move.  Every draw comes from the run generator, so
//! the outcome depends only on the seed and the visiting order.

pub mod cache;
pub mod engine;
pub mod error;

#[cfg(test)]
mod tests;

pub use cache::DistanceCache;
pub use engine::{send_home, Dispersal};
pub use error::{MobilityError, MobilityResult};
