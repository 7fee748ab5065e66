//! `et-sim`: day/event loop orchestrator for the epitown engine.
//!
//! # One simulated day
//!
//! ```text
//! for day in 1..=config.timesteps:
//!   for event in model.schedule():          (user events, then end_day)
//!     ① Tag         copy the running tally, label it (day, event.name)
//!     ② Move        DISPERSE: priority / normal routing per movable folk
//!                   SEND_HOME: every living folk returns home
//!     ③ Occupancy   rebuild the per-node resident lists
//!     ④ Dispatch    Interact: every active node, ascending id, one call
//!                             per energetic occupant (shared snapshot)
//!                   Sleep:    every living folk, id order
//!     ⑤ end_day     model.update_population (deaths, migration)
//!     ⑥ Record      tally + one log row per folk to the observer
//!   stop early if the model's infected statuses sum to zero
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`builder`]  | `SimBuilder`, the construction-time validation gate        |
//! | [`sim`]      | `Simulation`, `RunPhase`                                   |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                        |
//! | [`output`]   | `SimOutputObserver` bridging hooks to an `OutputWriter`    |
//! | [`error`]    | `SimError`, `SimResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Warms the distance cache on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the distance cache.                          |
//! | `sqlite`   | Re-enables `et-output`'s SQLite writer.                 |
//! | `parquet`  | Re-enables `et-output`'s Parquet writer.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use et_agent::PopulationConfig;
//! use et_core::SimConfig;
//! use et_model::{SeirModel, SeirParams};
//! use et_sim::SimBuilder;
//!
//! let model = SeirModel::new(params, schedule)?;
//! let mut sim = SimBuilder::new(SimConfig::new(60), model, town, PopulationConfig::new(1_000, 10))
//!     .build()?;
//! sim.run("./seir-run", false);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod output;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use output::SimOutputObserver;
pub use sim::{RunPhase, Simulation};
