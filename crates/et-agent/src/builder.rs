//! Population setup: the seeding configuration and a fluent builder models
//! use to place their initial folks.
//!
//! # Usage
//!
//! ```rust
//! use et_agent::{PopulationBuilder, PopulationConfig};
//! use et_core::{NodeId, SimRng};
//!
//! et_agent::compartments! {
//!     pub enum Sir { S => "S", I => "I", R => "R" }
//! }
//!
//! let homes = [NodeId(0), NodeId(3)];
//! let cfg = PopulationConfig::new(10, 2);
//! cfg.validate(&homes).unwrap();
//!
//! let mut rng = SimRng::new(1);
//! let pop = PopulationBuilder::<Sir>::new(5, &mut rng)
//!     .random_homes(Sir::I, cfg.random_spreaders(), &homes)
//!     .random_homes(Sir::S, cfg.num_pop - cfg.num_init_spreader, &homes)
//!     .at_nodes(Sir::I, &cfg.spreader_initial_nodes)
//!     .build();
//! assert_eq!(pop.len(), 10);
//! ```

use et_core::{ConfigError, ConfigResult, NodeId, SimRng};

use crate::{Folk, Population, Status};

// ── PopulationConfig ──────────────────────────────────────────────────────────

/// How many folks to create and where the initial spreaders live.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationConfig {
    pub num_pop:                usize,
    pub num_init_spreader:      usize,
    /// Homes of spreaders placed explicitly.  The remaining
    /// `num_init_spreader - len()` spreaders get random homes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spreader_initial_nodes: Vec<NodeId>,
}

impl PopulationConfig {
    pub fn new(num_pop: usize, num_init_spreader: usize) -> Self {
        Self { num_pop, num_init_spreader, spreader_initial_nodes: Vec::new() }
    }

    pub fn with_spreader_nodes(mut self, nodes: Vec<NodeId>) -> Self {
        self.spreader_initial_nodes = nodes;
        self
    }

    /// Spreaders that still need a randomly drawn home.
    pub fn random_spreaders(&self) -> usize {
        self.num_init_spreader.saturating_sub(self.spreader_initial_nodes.len())
    }

    /// Check the configuration against the town's accommodation nodes.
    pub fn validate(&self, accommodation: &[NodeId]) -> ConfigResult<()> {
        if self.num_pop == 0 {
            return Err(ConfigError::Population("num_pop must be at least 1".into()));
        }
        if self.num_init_spreader > self.num_pop {
            return Err(ConfigError::Population(format!(
                "num_init_spreader ({}) exceeds num_pop ({})",
                self.num_init_spreader, self.num_pop
            )));
        }
        if self.spreader_initial_nodes.len() > self.num_init_spreader {
            return Err(ConfigError::Population(format!(
                "{} spreader nodes given but only {} initial spreaders",
                self.spreader_initial_nodes.len(),
                self.num_init_spreader
            )));
        }
        if accommodation.is_empty() {
            return Err(ConfigError::Population("town has no accommodation nodes".into()));
        }
        if let Some(n) = self.spreader_initial_nodes.iter().find(|n| !accommodation.contains(n)) {
            return Err(ConfigError::Population(format!(
                "spreader node {n} is not an accommodation node"
            )));
        }
        Ok(())
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

type InitHook<'r, S, T> = Box<dyn FnMut(&mut Folk<S, T>, &mut SimRng) + 'r>;

/// Fluent construction of a [`Population`].
///
/// Folks are created in call order, so ids follow the order of the calls.
/// Every draw (home choice, initial energy, the init hook) comes from the
/// one run generator.
pub struct PopulationBuilder<'r, S, T = ()> {
    rng:        &'r mut SimRng,
    population: Population<S, T>,
    init:       Option<InitHook<'r, S, T>>,
}

impl<'r, S: Status, T: Default> PopulationBuilder<'r, S, T> {
    pub fn new(max_energy: u32, rng: &'r mut SimRng) -> Self {
        Self { rng, population: Population::new(max_energy), init: None }
    }

    /// Run `hook` on every folk right after it is created.  Set it before
    /// placing folks.
    pub fn on_spawn(mut self, hook: impl FnMut(&mut Folk<S, T>, &mut SimRng) + 'r) -> Self {
        self.init = Some(Box::new(hook));
        self
    }

    /// `count` folks with `status`, each at a uniformly drawn node of
    /// `homes`.  Does nothing if `homes` is empty.
    pub fn random_homes(mut self, status: S, count: usize, homes: &[NodeId]) -> Self {
        for _ in 0..count {
            let Some(&home) = self.rng.choose(homes) else { break };
            self.spawn(home, status);
        }
        self
    }

    /// One folk with `status` at each of `nodes`.
    pub fn at_nodes(mut self, status: S, nodes: &[NodeId]) -> Self {
        for &home in nodes {
            self.spawn(home, status);
        }
        self
    }

    fn spawn(&mut self, home: NodeId, status: S) {
        let id = self.population.spawn(home, status, T::default(), self.rng);
        if let Some(hook) = self.init.as_mut() {
            hook(self.population.get_mut(id), self.rng);
        }
    }

    pub fn build(self) -> Population<S, T> {
        self.population
    }
}
