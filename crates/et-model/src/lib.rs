//! `et-model`: compartmental models: the rules that change a folk's status.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`model`]       | `CompartmentalModel` trait                                     |
//! | [`context`]     | `InteractionContext`, `SleepContext` passed to transitions     |
//! | [`transition`]  | `inverse_bernoulli`, `first_firing` tie-break                  |
//! | [`params`]      | range checks shared by parameter structs                       |
//! | [`models`]      | `SeirModel`, `SeiqrdvModel`, `SeisirrModel`                    |
//! | [`mean_field`]  | `MeanField` trait, `integrate_rk4`                             |
//! | [`error`]       | `ModelError`, `ModelResult<T>`                                 |
//!
//! # Design notes
//!
//! The simulation drives two transitions per model:
//!
//! 1. **interact**: after a dispersal, once per energetic folk at every
//!    occupied node, with the node's resident snapshot.  Conversions are
//!    written straight into the shared folk slice and tally, so a folk
//!    converted earlier in the pass already counts as its new status for
//!    everyone evaluated after it.
//!
//! 2. **sleep**: at `end_day` (and any other sleep event), once per living
//!    folk, after the shared rest bookkeeping (streak + 1, fresh energy).
//!
//! Models never draw their own dice: each call gets one uniform draw in
//! `[0, 1)` from the run generator.

pub mod context;
pub mod error;
pub mod mean_field;
pub mod model;
pub mod models;
pub mod params;
pub mod transition;

#[cfg(test)]
mod tests;

pub use context::{InteractionContext, SleepContext};
pub use error::{ModelError, ModelResult};
pub use mean_field::{integrate_rk4, MeanField};
pub use model::CompartmentalModel;
pub use models::seiqrdv::{SeiqrdvModel, SeiqrdvParams, SeiqrdvStatus, SeiqrdvTraits};
pub use models::seir::{SeirModel, SeirParams, SeirStatus};
pub use models::seisirr::{SeisirrModel, SeisirrParams, SeisirrStatus};
pub use transition::{first_firing, inverse_bernoulli};
