//! SEIsIrR rumor spreading.
//!
//! Ignorant folks come in two personalities: `Is` (susceptible to the
//! rumor) and `Ir` (rational).  Either can be turned into a spreader `S` by
//! meeting spreaders; `Is` folks may instead become `E`, aware but not
//! spreading.  Spreaders stop (`R`) through contact with folks who already
//! know the rumor, or by forgetting it overnight.
//!
//! Every contact probability is scaled by the folk's remaining energy
//! fraction.  Spreaders are the "infected" status: a run stops once nobody
//! spreads anymore.

use serde::{Deserialize, Serialize};

use et_agent::{compartments, Population, PopulationBuilder, PopulationConfig};
use et_core::{ConfigResult, SimRng};
use et_schedule::DaySchedule;
use et_town::Town;

use crate::mean_field::MeanField;
use crate::params;
use crate::transition::first_firing;
use crate::{CompartmentalModel, InteractionContext, ModelResult, SleepContext};

compartments! {
    pub enum SeisirrStatus {
        S  => "S",
        E  => "E",
        Ir => "Ir",
        Is => "Is",
        R  => "R",
    }
}

use SeisirrStatus::{Ir, Is, E, R, S};

pub const DEFAULT_MEM_SPAN: u32 = 10;

fn default_mem_span() -> u32 {
    DEFAULT_MEM_SPAN
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeisirrParams {
    pub max_energy: u32,
    /// Share of the non-spreading population that starts as `Is`.
    pub literacy:   f64,
    /// Credibility of the rumor.
    pub gamma:      f64,
    /// Relevance of the rumor to daily life.
    pub alpha:      f64,
    /// Spreading probability.
    pub lam:        f64,
    /// `E -> R` stifling probability.
    pub phi:        f64,
    /// `E -> S` probability.
    pub theta:      f64,
    /// Spreading desire of `Is` relative to `Ir`.
    pub mu:         f64,
    /// `S -> R` probability on contact.
    pub eta1:       f64,
    /// Nightly forgetting probability.
    pub eta2:       f64,
    /// Nights after which a spreader forgets for sure.
    #[serde(default = "default_mem_span")]
    pub mem_span:   u32,
}

impl SeisirrParams {
    pub fn validate(&self) -> ConfigResult<()> {
        params::positive("max_energy", self.max_energy)?;
        for (name, v) in [
            ("literacy", self.literacy),
            ("gamma", self.gamma),
            ("alpha", self.alpha),
            ("lam", self.lam),
            ("phi", self.phi),
            ("theta", self.theta),
            ("mu", self.mu),
            ("eta1", self.eta1),
            ("eta2", self.eta2),
        ] {
            params::unit(name, v)?;
        }
        params::greater_than("mem_span", self.mem_span, 1)?;
        Ok(())
    }

    #[inline]
    fn gamma_alpha_lam(&self) -> f64 {
        self.gamma * self.alpha * self.lam
    }

    pub fn is_to_e(&self) -> f64 {
        (1.0 - self.gamma) * self.gamma_alpha_lam()
    }

    pub fn is_to_s(&self) -> f64 {
        self.gamma_alpha_lam() * self.mu
    }

    pub fn ir_to_s(&self) -> f64 {
        self.gamma_alpha_lam()
    }
}

pub struct SeisirrModel {
    params:   SeisirrParams,
    schedule: DaySchedule,
}

impl SeisirrModel {
    pub fn new(params: SeisirrParams, schedule: DaySchedule) -> ModelResult<Self> {
        params.validate()?;
        Ok(Self { params, schedule })
    }

    pub fn params(&self) -> &SeisirrParams {
        &self.params
    }

    /// Contact probability with `p` scaled by the folk's energy fraction.
    fn tired_probability(
        &self,
        ctx:      &InteractionContext<'_, SeisirrStatus, ()>,
        statuses: &[SeisirrStatus],
        p:        f64,
    ) -> f64 {
        let scale = ctx.me().energy as f64 / self.params.max_energy as f64;
        ctx.contact_probability(ctx.contacts(statuses), p * scale)
    }
}

impl CompartmentalModel for SeisirrModel {
    type Status = SeisirrStatus;
    type Traits = ();

    fn name(&self) -> &'static str {
        "SEIsIrR"
    }

    fn infected_statuses(&self) -> &'static [SeisirrStatus] {
        &[S]
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
    ) -> ModelResult<Population<SeisirrStatus>> {
        let homes = town.accommodation_nodes();
        config.validate(homes)?;
        let ignorant = config.num_pop - config.num_init_spreader;
        let num_is = (self.params.literacy * ignorant as f64).round() as usize;
        let num_is = num_is.min(ignorant);
        Ok(PopulationBuilder::new(self.params.max_energy, rng)
            .random_homes(S, config.random_spreaders(), homes)
            .random_homes(Is, num_is, homes)
            .random_homes(Ir, ignorant - num_is, homes)
            .at_nodes(S, &config.spreader_initial_nodes)
            .build())
    }

    fn interact(&self, ctx: &mut InteractionContext<'_, SeisirrStatus, ()>) {
        let p = &self.params;
        let dice = ctx.dice;
        let next = match ctx.status() {
            Ir => (self.tired_probability(ctx, &[S], p.ir_to_s()) > dice).then_some(S),
            Is => first_firing(dice, &[
                (S, self.tired_probability(ctx, &[S], p.is_to_s())),
                (E, self.tired_probability(ctx, &[S], p.is_to_e())),
            ]),
            E => first_firing(dice, &[
                (S, self.tired_probability(ctx, &[S], p.theta)),
                (R, self.tired_probability(ctx, &[R], p.phi)),
            ]),
            S => (self.tired_probability(ctx, &[S, E, R], p.eta1) > dice).then_some(R),
            R => None,
        };
        if let Some(to) = next {
            ctx.convert(to);
        }
    }

    fn sleep(&self, ctx: &mut SleepContext<'_, SeisirrStatus, ()>) {
        if ctx.status() == S && (ctx.streak() >= self.params.mem_span || ctx.dice < self.params.eta2) {
            ctx.convert(R);
        }
    }
}

/// Densities `[S, E, Ir, Is, R]`.  The total is conserved.
impl MeanField for SeisirrParams {
    fn labels(&self) -> &'static [&'static str] {
        &["S", "E", "Ir", "Is", "R"]
    }

    fn derivatives(&self, y: &[f64]) -> Vec<f64> {
        let (s, e, ir, is, r) = (y[0], y[1], y[2], y[3], y[4]);
        let gal = self.gamma_alpha_lam();
        let recruited = s * (self.mu * is + ir) * gal;
        let exposed = is * s * (1.0 - self.gamma) * gal;
        let e_to_s = s * e * self.theta;
        let e_to_r = r * e * self.phi;
        let stifled = s * (r + s + e) * self.eta1;
        let forgot = s * self.eta2;
        vec![
            recruited + e_to_s - stifled - forgot,
            exposed - e_to_s - e_to_r,
            -ir * s * gal,
            -is * s * (gal * self.mu + (1.0 - self.gamma) * gal),
            stifled + forgot + e_to_r,
        ]
    }
}
