//! The `CompartmentalModel` trait, the main extension point for user code.

use std::fmt::Debug;

use et_agent::{Population, PopulationConfig, Status, StatusTally};
use et_core::{PlaceType, SimRng};
use et_schedule::DaySchedule;
use et_town::Town;

use crate::{InteractionContext, ModelResult, SleepContext};

/// A pluggable set of transition rules.
///
/// The simulation depends only on this trait.  A model supplies its status
/// vocabulary, the day schedule, how to seed the population, and the two
/// transitions.  Parameter validation happens when the model is built, so a
/// model value that exists is runnable.
///
/// # Required methods
///
/// Everything except [`update_population`](Self::update_population),
/// [`uncounted_statuses`](Self::uncounted_statuses), and
/// [`required_place_types`](Self::required_place_types), which default to
/// "no change", "count everything", and "no requirement".
pub trait CompartmentalModel: Send + Sync + 'static {
    type Status: Status;
    /// Model-specific per-folk extras.
    type Traits: Clone + Debug + Default + Send + Sync + 'static;

    /// Short model label for metadata and logs.
    fn name(&self) -> &'static str;

    /// Statuses whose combined count keeps the run going.  The run stops
    /// early the first day this sum is zero.
    fn infected_statuses(&self) -> &'static [Self::Status];

    /// Statuses left out of the living population total (e.g. the dead).
    fn uncounted_statuses(&self) -> &'static [Self::Status] {
        &[]
    }

    /// Place types the town must contain for this model to make sense.
    fn required_place_types(&self) -> &'static [PlaceType] {
        &[]
    }

    fn schedule(&self) -> &DaySchedule;

    fn max_energy(&self) -> u32;

    /// Parameter dump for run metadata.
    fn parameters(&self) -> serde_json::Value;

    /// Create the initial population.  The returned population's tally and
    /// household set are the run's starting state.
    fn initialize_population(
        &self,
        town:   &Town,
        config: &PopulationConfig,
        rng:    &mut SimRng,
    ) -> ModelResult<Population<Self::Status, Self::Traits>>;

    /// Contact-driven transition for one folk at one node.
    fn interact(&self, ctx: &mut InteractionContext<'_, Self::Status, Self::Traits>);

    /// Duration-driven transition for one folk at night.
    fn sleep(&self, ctx: &mut SleepContext<'_, Self::Status, Self::Traits>);

    /// Births, deaths, and migration, run once after `end_day`.  Returns
    /// the new population size.
    fn update_population(
        &self,
        population: &mut Population<Self::Status, Self::Traits>,
        _town:      &Town,
        _tally:     &mut StatusTally<Self::Status>,
        _rng:       &mut SimRng,
    ) -> usize {
        population.len()
    }

    /// Living population as counted by this model.
    fn living_total(&self, tally: &StatusTally<Self::Status>) -> u32 {
        tally.total_excluding(self.uncounted_statuses())
    }

    /// Combined count of the infected statuses.
    fn infected_total(&self, tally: &StatusTally<Self::Status>) -> u32 {
        tally.sum_of(self.infected_statuses())
    }
}
