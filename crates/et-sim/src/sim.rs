//! The `Simulation` struct and its day loop.

use std::path::Path;

use et_agent::{Folk, Population, Status, StatusTally};
use et_core::{AgentId, PlaceType, SimConfig, SimRng};
use et_mobility::{send_home, Dispersal};
use et_model::{CompartmentalModel, InteractionContext, SleepContext};
use et_output::{
    CsvWriter, OutputWriter, RunMetadata, SimulationMetadata, StepEventMetadata, TownSection,
};
use et_schedule::{EventType, FolkAction, StepEvent};
use et_town::{DijkstraRouter, Occupancy, Router, Town};
use tracing::{debug, error, info};

use crate::{SimError, SimObserver, SimOutputObserver, SimResult};

// ── RunPhase ──────────────────────────────────────────────────────────────────

/// Where the day loop currently stands.
///
/// ```text
/// Idle ─► RunningEvent(1, 0) ─► … ─► DayComplete(1) ─► RunningEvent(2, 0) ─► …
///                                          │
///                                          └─► Terminated { early }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Built, nothing recorded yet.
    Idle,
    RunningEvent { timestep: u32, event_index: usize },
    DayComplete { timestep: u32 },
    /// No further days will run.  `early` means the infected statuses died
    /// out before the configured horizon.
    Terminated { timestep: u32, early: bool },
}

impl RunPhase {
    /// Last fully completed day.
    pub fn timestep(self) -> u32 {
        match self {
            RunPhase::Idle => 0,
            RunPhase::RunningEvent { timestep, .. } => timestep.saturating_sub(1),
            RunPhase::DayComplete { timestep } | RunPhase::Terminated { timestep, .. } => timestep,
        }
    }

    pub fn is_terminated(self) -> bool {
        matches!(self, RunPhase::Terminated { .. })
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Simulation<M, R>` owns the town, the population, and the single run
/// generator, and walks the model's day schedule once per timestep:
///
/// 1. **Tag**: the running tally is copied and labelled `(day, event)`.
/// 2. **Move**: DISPERSE events run dispersal, SEND_HOME events return every
///    living folk home.  Occupancy is rebuilt afterwards.
/// 3. **Dispatch**: `Interact` events visit every active node in ascending
///    id order; `Sleep` events visit every living folk in id order.
/// 4. **Record**: the tally and one log row per folk go to the observer.
///
/// After `end_day` the model's population update runs before the day's last
/// row is recorded.  The run stops early the first day the model's infected
/// statuses sum to zero.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<M: CompartmentalModel, R: Router = DijkstraRouter> {
    pub(crate) config:     SimConfig,
    pub(crate) model:      M,
    pub(crate) town:       Town,
    pub(crate) population: Population<M::Status, M::Traits>,
    pub(crate) occupancy:  Occupancy,
    pub(crate) dispersal:  Dispersal<R>,
    pub(crate) rng:        SimRng,
    /// Every recorded tally, the initial state first.
    pub(crate) tallies:    Vec<StatusTally<M::Status>>,
    /// The running tally, mutated by conversions.
    pub(crate) tally:      StatusTally<M::Status>,
    pub(crate) phase:      RunPhase,
    pub(crate) silent:     bool,
}

impl<M: CompartmentalModel, R: Router> Simulation<M, R> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn town(&self) -> &Town {
        &self.town
    }

    pub fn population(&self) -> &Population<M::Status, M::Traits> {
        &self.population
    }

    /// Mutable access between days, e.g. to pin energies in a scenario.
    /// Occupancy is rebuilt at the start of every event, so moving folks
    /// here is safe.
    pub fn population_mut(&mut self) -> &mut Population<M::Status, M::Traits> {
        &mut self.population
    }

    /// Every recorded tally in order; the first is the initial state.
    pub fn tallies(&self) -> &[StatusTally<M::Status>] {
        &self.tallies
    }

    /// The current running tally.
    pub fn tally(&self) -> &StatusTally<M::Status> {
        &self.tally
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    /// Describe this run for the output metadata.
    pub fn metadata(&self) -> RunMetadata {
        let step_events = self.model.schedule().iter().map(event_metadata).collect();
        let town = self.town.metadata();
        RunMetadata {
            simulation: SimulationMetadata {
                seeded:           self.config.is_seeded(),
                seed:             self.config.seed,
                model:            self.model.name().to_owned(),
                all_statuses:     <M::Status as Status>::ALL.iter().map(|s| s.name().to_owned()).collect(),
                model_parameters: self.model.parameters(),
                num_locations:    self.town.node_count(),
                max_timesteps:    self.config.timesteps,
                population:       self.population.len(),
                step_events,
            },
            town: TownSection {
                origin_point:        town.origin.to_array(),
                dist:                town.radius_m,
                epsg_code:           town.epsg_code,
                accommodation_nodes: self.town.accommodation_nodes().iter().map(|n| n.0).collect(),
            },
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run to completion and write CSV output under `output_dir`.
    ///
    /// Never fails: a write or run error is logged and the in-memory state
    /// reflects however far the run got.
    pub fn run(&mut self, output_dir: impl AsRef<Path>, silent: bool) {
        let dir = output_dir.as_ref();
        self.silent = silent;
        let result = CsvWriter::new(dir)
            .map_err(SimError::from)
            .and_then(|writer| self.run_with_writer(writer).map(|_| ()));
        if let Err(e) = result {
            error!(dir = %dir.display(), error = %e, "simulation output failed");
        }
    }

    /// Run to completion, streaming rows to `writer`.  Returns the writer
    /// after `finish` so callers can inspect it.
    pub fn run_with_writer<W: OutputWriter>(&mut self, writer: W) -> SimResult<W> {
        let mut observer = SimOutputObserver::new(writer);
        self.run_with(&mut observer)?;
        match observer.take_error() {
            Some(e) => Err(e.into()),
            None => Ok(observer.into_writer()),
        }
    }

    /// Run every remaining day, calling `observer` hooks along the way.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run_with<O: SimObserver<M::Status, M::Traits>>(&mut self, observer: &mut O) -> SimResult<()> {
        if let RunPhase::Terminated { timestep, .. } = self.phase {
            return Err(SimError::Finished(timestep));
        }
        while !self.phase.is_terminated() {
            self.step_day(observer)?;
        }
        Ok(())
    }

    /// Run exactly one day (recording the initial state first if nothing has
    /// run yet).  Returns the phase reached.
    pub fn step_day<O: SimObserver<M::Status, M::Traits>>(&mut self, observer: &mut O) -> SimResult<RunPhase> {
        match self.phase {
            RunPhase::Terminated { timestep, .. } => return Err(SimError::Finished(timestep)),
            RunPhase::Idle => {
                self.start(observer);
                if self.config.timesteps == 0 {
                    self.finish(0, false, observer);
                    return Ok(self.phase);
                }
            }
            _ => {}
        }

        let day = self.phase.timestep() + 1;
        for index in 0..self.model.schedule().len() {
            self.phase = RunPhase::RunningEvent { timestep: day, event_index: index };
            self.execute_event(day, index)?;
            self.record(observer);
        }
        observer.on_day_end(day, &self.tally);
        self.phase = RunPhase::DayComplete { timestep: day };

        self.log_progress(day);

        let infected = self.model.infected_total(&self.tally);
        if infected == 0 && day < self.config.timesteps {
            info!(timestep = day, "no infected folks left; stopping early");
            self.finish(day, true, observer);
        } else if day >= self.config.timesteps {
            self.finish(day, false, observer);
        }
        Ok(self.phase)
    }

    // ── Day loop internals ────────────────────────────────────────────────

    fn start<O: SimObserver<M::Status, M::Traits>>(&mut self, observer: &mut O) {
        observer.on_run_start(&self.metadata());
        self.record(observer);
    }

    fn finish<O: SimObserver<M::Status, M::Traits>>(&mut self, day: u32, early: bool, observer: &mut O) {
        self.phase = RunPhase::Terminated { timestep: day, early };
        observer.on_run_end(day, early);
    }

    fn record<O: SimObserver<M::Status, M::Traits>>(&mut self, observer: &mut O) {
        self.tallies.push(self.tally.clone());
        observer.on_event_end(&self.tally, self.population.folks());
    }

    fn log_progress(&self, day: u32) {
        let living = self.model.living_total(&self.tally);
        if self.silent {
            debug!(timestep = day, living, counts = %self.tally, "step has been run");
        } else {
            info!(timestep = day, living, counts = %self.tally, "step has been run");
        }
    }

    /// Move, refill occupancy, and dispatch for one event.
    fn execute_event(&mut self, day: u32, index: usize) -> SimResult<()> {
        let Self { model, town, population, occupancy, dispersal, rng, tally, .. } = self;
        let event: &StepEvent = &model.schedule().events()[index];

        *tally = tally.next_event(day, event.name());

        match event.event_type() {
            EventType::Disperse => {
                let moved = dispersal.disperse(event, population.folks_mut(), town, rng)?;
                debug!(timestep = day, event = event.name(), moved, "dispersal done");
            }
            EventType::SendHome => send_home(population.folks_mut()),
        }
        refill_occupancy(occupancy, population.folks());

        match event.action() {
            FolkAction::Interact => {
                interaction_pass(&*model, &*town, &*occupancy, population.folks_mut(), tally, rng);
            }
            FolkAction::Sleep => sleep_pass(&*model, population.folks_mut(), tally, rng),
        }

        if event.is_end_day() {
            let before = population.len();
            let after = model.update_population(population, town, tally, rng);
            if after != before {
                debug!(timestep = day, before, after, "population updated");
            }
            refill_occupancy(occupancy, population.folks());
        }
        Ok(())
    }
}

// ── Pass helpers ──────────────────────────────────────────────────────────────

/// Clear every node list and place each living folk at its location.
pub(crate) fn refill_occupancy<S: Status, T>(occupancy: &mut Occupancy, folks: &[Folk<S, T>]) {
    occupancy.clear();
    for folk in folks.iter().filter(|f| f.alive) {
        occupancy.place(folk.location, folk.id);
    }
}

/// One `interact` call per energetic occupant, node by node.
///
/// The snapshot for a node is taken once; statuses are read live, so a
/// conversion made earlier in the pass is seen by later folks.
fn interaction_pass<M: CompartmentalModel>(
    model:     &M,
    town:      &Town,
    occupancy: &Occupancy,
    folks:     &mut [Folk<M::Status, M::Traits>],
    tally:     &mut StatusTally<M::Status>,
    rng:       &mut SimRng,
) {
    let mut here: Vec<AgentId> = Vec::new();
    for node in occupancy.active_nodes() {
        here.clear();
        here.extend(occupancy.occupants(node).iter().copied().filter(|id| folks[id.index()].can_act()));
        let place: PlaceType = town.place_type(node);

        for &agent in &here {
            if !folks[agent.index()].can_act() {
                continue;
            }
            let dice = rng.dice();
            let mut ctx = InteractionContext { agent, here: &here, place, folks: &mut *folks, tally: &mut *tally, dice };
            model.interact(&mut ctx);
            folks[agent.index()].spend_energy();
        }
    }
}

/// Rest bookkeeping then one `sleep` call per living folk, in id order.
fn sleep_pass<M: CompartmentalModel>(
    model: &M,
    folks: &mut [Folk<M::Status, M::Traits>],
    tally: &mut StatusTally<M::Status>,
    rng:   &mut SimRng,
) {
    for folk in folks.iter_mut().filter(|f| f.alive) {
        let dice = rng.dice();
        folk.rest(rng);
        let mut ctx = SleepContext { folk, tally: &mut *tally, dice };
        model.sleep(&mut ctx);
    }
}

fn event_metadata(event: &StepEvent) -> StepEventMetadata {
    StepEventMetadata {
        name:                 event.name().to_owned(),
        max_distance:         event.max_distance(),
        place_types:          event.place_types().iter().map(|p| p.as_str().to_owned()).collect(),
        event_type:           event.event_type().as_str().to_owned(),
        action:               event.action().as_str().to_owned(),
        probability_function: event.mobility_name().map(str::to_owned),
    }
}
