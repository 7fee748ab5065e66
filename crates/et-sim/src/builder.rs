//! Fluent builder for constructing a [`Simulation`].

use et_agent::PopulationConfig;
use et_core::{ConfigError, SimConfig, SimRng};
use et_mobility::Dispersal;
use et_model::CompartmentalModel;
use et_town::{DijkstraRouter, Occupancy, Router, Town};

use crate::sim::{refill_occupancy, RunPhase};
use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation<M, R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: timesteps and seed
/// - `M: CompartmentalModel`: the transition rules and day schedule
/// - [`Town`]: the place network folks move over
/// - [`PopulationConfig`]: population size and initial spreaders
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default             |
/// |---------------------|---------------------|
/// | `.with_router(r)`   | `DijkstraRouter`    |
/// | `.silent(b)`        | `false`             |
///
/// # Example
///
/// ```rust,ignore
/// let model = SeirModel::new(params, schedule)?;
/// let mut sim = SimBuilder::new(SimConfig::new(50), model, town, PopulationConfig::new(500, 5))
///     .build()?;
/// sim.run("./out", false);
/// ```
pub struct SimBuilder<M: CompartmentalModel, R: Router = DijkstraRouter> {
    config:     SimConfig,
    model:      M,
    town:       Town,
    population: PopulationConfig,
    router:     R,
    silent:     bool,
}

impl<M: CompartmentalModel> SimBuilder<M, DijkstraRouter> {
    pub fn new(config: SimConfig, model: M, town: Town, population: PopulationConfig) -> Self {
        Self { config, model, town, population, router: DijkstraRouter, silent: false }
    }
}

impl<M: CompartmentalModel, R: Router> SimBuilder<M, R> {
    /// Replace the shortest-path router used for priority routing.
    pub fn with_router<R2: Router>(self, router: R2) -> SimBuilder<M, R2> {
        SimBuilder {
            config:     self.config,
            model:      self.model,
            town:       self.town,
            population: self.population,
            router,
            silent:     self.silent,
        }
    }

    /// Demote per-day progress logging from `info` to `debug`.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Check the town against the model, seed the generator, create the
    /// population, and place every folk at home.  Homes of folks that start
    /// with a priority destination get their distance rows computed up front.
    ///
    /// Nothing is simulated here; a returned `Simulation` sits at timestep 0.
    pub fn build(self) -> SimResult<Simulation<M, R>> {
        // ── Validation gate ───────────────────────────────────────────────
        let missing = self.town.missing_place_types(self.model.required_place_types());
        if !missing.is_empty() {
            return Err(ConfigError::MissingPlaceTypes(missing).into());
        }

        // ── Population ────────────────────────────────────────────────────
        let mut rng = SimRng::from_seed(self.config.seed);
        let population = self.model.initialize_population(&self.town, &self.population, &mut rng)?;

        let mut occupancy = Occupancy::new(self.town.node_count());
        refill_occupancy(&mut occupancy, population.folks());

        let tally = population.tally();

        let mut dispersal = Dispersal::new(self.router);
        let warmed = dispersal.warm_priority_sources(population.folks(), &self.town)?;

        tracing::debug!(
            model      = self.model.name(),
            population = population.len(),
            nodes      = self.town.node_count(),
            seeded     = self.config.is_seeded(),
            warmed,
            "simulation built"
        );

        Ok(Simulation {
            config:     self.config,
            model:      self.model,
            town:       self.town,
            population,
            occupancy,
            dispersal,
            rng,
            tallies:    Vec::new(),
            tally,
            phase:      RunPhase::Idle,
            silent:     self.silent,
        })
    }
}
