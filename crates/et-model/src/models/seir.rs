//! SEIR with waning immunity.
//!
//! Susceptible folks are exposed through contact with infectious ones;
//! exposed become infectious after `sigma` nights, infectious recover after
//! `gamma` nights, and recovered become susceptible again after `xi`.

use serde::{Deserialize, Serialize};

use et_agent::{compartments, Population, PopulationBuilder, PopulationConfig};
use et_core::{ConfigResult, PlaceType, SimRng};
use et_schedule::DaySchedule;
use et_town::Town;

use crate::mean_field::MeanField;
use crate::params;
use crate::{CompartmentalModel, InteractionContext, ModelResult, SleepContext};

compartments! {
    pub enum SeirStatus {
        S => "S",
        E => "E",
        I => "I",
        R => "R",
    }
}

use SeirStatus::{E, I, R, S};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeirParams {
    pub max_energy: u32,
    /// Per-contact transmission probability, split across everyone present.
    pub beta:       f64,
    /// Nights from exposure to infectiousness.
    pub sigma:      u32,
    /// Nights from infectiousness to recovery.
    pub gamma:      u32,
    /// Nights of immunity.
    pub xi:         u32,
}

impl SeirParams {
    pub fn validate(&self) -> ConfigResult<()> {
        params::positive("max_energy", self.max_energy)?;
        params::open_unit("beta", self.beta)?;
        params::positive("sigma", self.sigma)?;
        params::positive("gamma", self.gamma)?;
        params::positive("xi", self.xi)?;
        Ok(())
    }
}

pub struct SeirModel {
    params:   SeirParams,
    schedule: DaySchedule,
}

impl SeirModel {
    pub fn new(params: SeirParams, schedule: DaySchedule) -> ModelResult<Self> {
        params.validate()?;
        Ok(Self { params, schedule })
    }

    pub fn params(&self) -> &SeirParams {
        &self.params
    }
}

impl CompartmentalModel for SeirModel {
    type Status = SeirStatus;
    type Traits = ();

    fn name(&self) -> &'static str {
        "SEIR"
    }

    fn infected_statuses(&self) -> &'static [SeirStatus] {
        &[I, E]
    }

    fn required_place_types(&self) -> &'static [PlaceType] {
        &[PlaceType::Workplace, PlaceType::Education, PlaceType::Religious]
    }

    fn schedule(&self) -> &DaySchedule {
        &self.schedule
    }

    fn max_energy(&self) -> u32 {
        self.params.max_energy
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::to_value(&self.params).unwrap_or_default()
    }

    fn initialize_population(
        &self,
        town:   &Town,
        config: &PopulationConfig,
        rng:    &mut SimRng,
    ) -> ModelResult<Population<SeirStatus>> {
        let homes = town.accommodation_nodes();
        config.validate(homes)?;
        Ok(PopulationBuilder::new(self.params.max_energy, rng)
            .random_homes(I, config.random_spreaders(), homes)
            .random_homes(S, config.num_pop - config.num_init_spreader, homes)
            .at_nodes(I, &config.spreader_initial_nodes)
            .build())
    }

    fn interact(&self, ctx: &mut InteractionContext<'_, SeirStatus, ()>) {
        if ctx.status() != S {
            return;
        }
        let p = self.params.beta / ctx.here_len() as f64;
        if ctx.contact_probability(ctx.contacts(&[I]), p) > ctx.dice {
            ctx.convert(E);
        }
    }

    fn sleep(&self, ctx: &mut SleepContext<'_, SeirStatus, ()>) {
        let streak = ctx.streak();
        match ctx.status() {
            E if streak == self.params.sigma => ctx.convert(I),
            I if streak == self.params.gamma => ctx.convert(R),
            R if streak == self.params.xi => ctx.convert(S),
            _ => {}
        }
    }
}

/// Densities `[S, E, I, R]`.
impl MeanField for SeirParams {
    fn labels(&self) -> &'static [&'static str] {
        &["S", "E", "I", "R"]
    }

    fn derivatives(&self, y: &[f64]) -> Vec<f64> {
        let (s, e, i, r) = (y[0], y[1], y[2], y[3]);
        let n = s + e + i + r;
        let infection = if n > 0.0 { self.beta * s * i / n } else { 0.0 };
        let sigma = 1.0 / self.sigma as f64;
        let gamma = 1.0 / self.gamma as f64;
        let xi = 1.0 / self.xi as f64;
        vec![
            -infection + xi * r,
            infection - sigma * e,
            sigma * e - gamma * i,
            gamma * i - xi * r,
        ]
    }
}
