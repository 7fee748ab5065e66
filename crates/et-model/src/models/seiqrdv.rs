//! SEIQRDV: SEIR extended with quarantine, death, vaccination, and an open
//! population.
//!
//! - Infectious folks are quarantined after `delta` nights; quarantine
//!   pins them at home.  A share `kappa` of them die after `rho` nights in
//!   quarantine, the rest recover after `lam`.
//! - Susceptible folks decide to get vaccinated with nightly probability
//!   `alpha`, head for the nearest healthcare facility on the next dispersal,
//!   and are vaccinated there while the facility has capacity left.  Those
//!   turned away keep the wish and head back the day after.
//! - Each night every living folk dies of natural causes with probability
//!   `mu`, and `lam_cap` times the living population arrives as migrants.
//!
//! `D` is left out of the living total.

use serde::{Deserialize, Serialize};

use et_agent::{compartments, Population, PopulationBuilder, PopulationConfig, StatusTally};
use et_core::{ConfigError, ConfigResult, PlaceType, SimRng};
use et_schedule::DaySchedule;
use et_town::Town;

use crate::mean_field::MeanField;
use crate::params;
use crate::{CompartmentalModel, InteractionContext, ModelResult, SleepContext};

compartments! {
    pub enum SeiqrdvStatus {
        S => "S",
        E => "E",
        I => "I",
        Q => "Q",
        R => "R",
        D => "D",
        V => "V",
    }
}

use SeiqrdvStatus::{D, E, I, Q, R, S, V};

/// Statuses a migrant may arrive with.
const MIGRANT_STATUSES: [SeiqrdvStatus; 5] = [S, E, I, R, V];

/// Per-folk extras.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeiqrdvTraits {
    pub will_die:     bool,
    pub want_vaccine: bool,
}

type Folk = et_agent::Folk<SeiqrdvStatus, SeiqrdvTraits>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeiqrdvParams {
    pub max_energy:        u32,
    /// Nightly migrants per living folk.
    pub lam_cap:           f64,
    pub beta:              f64,
    /// Nightly probability a susceptible folk wants a vaccine.
    pub alpha:             f64,
    /// Nights from exposure to infectiousness.
    pub gamma:             u32,
    /// Nights from infectiousness to quarantine.
    pub delta:             u32,
    /// Nights of quarantine before recovery.
    pub lam:               u32,
    /// Nights of quarantine before death.
    pub rho:               u32,
    /// Share of quarantined folks who die.
    pub kappa:             f64,
    /// Nightly natural death probability.
    pub mu:                f64,
    /// Vaccinations per facility per event.  `None` is unlimited.
    #[serde(default)]
    pub hospital_capacity: Option<u32>,
}

impl SeiqrdvParams {
    pub fn validate(&self) -> ConfigResult<()> {
        params::positive("max_energy", self.max_energy)?;
        params::unit("lam_cap", self.lam_cap)?;
        params::unit("beta", self.beta)?;
        params::unit("alpha", self.alpha)?;
        params::positive("gamma", self.gamma)?;
        params::positive("delta", self.delta)?;
        params::positive("lam", self.lam)?;
        params::positive("rho", self.rho)?;
        params::unit("kappa", self.kappa)?;
        params::unit("mu", self.mu)?;
        if self.hospital_capacity == Some(0) {
            return Err(ConfigError::invalid(
                "hospital_capacity",
                "must be a positive integer or unlimited",
            ));
        }
        Ok(())
    }
}

pub struct SeiqrdvModel {
    params:   SeiqrdvParams,
    schedule: DaySchedule,
}

impl SeiqrdvModel {
    pub fn new(params: SeiqrdvParams, schedule: DaySchedule) -> ModelResult<Self> {
        params.validate()?;
        Ok(Self { params, schedule })
    }

    pub fn params(&self) -> &SeiqrdvParams {
        &self.params
    }

    fn has_capacity(&self, rank: usize) -> bool {
        self.params.hospital_capacity.is_none_or(|c| rank < c as usize)
    }
}

fn want_vaccine(folk: &mut Folk) {
    folk.traits.want_vaccine = true;
    folk.queue_priority(PlaceType::HealthcareFacility);
}

fn drop_vaccine_wish(folk: &mut Folk) {
    folk.traits.want_vaccine = false;
    folk.take_priority(PlaceType::HealthcareFacility);
}

impl CompartmentalModel for SeiqrdvModel {
    type Status = SeiqrdvStatus;
    type Traits = SeiqrdvTraits;

    fn name(&self) -> &'static str {
        "SEIQRDV"
    }

    fn infected_statuses(&self) -> &'static [SeiqrdvStatus] {
        &[I, E, Q]
    }

    fn uncounted_statuses(&self) -> &'static [SeiqrdvStatus] {
        &[D]
    }

    fn required_place_types(&self) -> &'static [PlaceType] {
        &[PlaceType::HealthcareFacility]
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
    ) -> ModelResult<Population<SeiqrdvStatus, SeiqrdvTraits>> {
        let homes = town.accommodation_nodes();
        config.validate(homes)?;
        let alpha = self.params.alpha;
        Ok(PopulationBuilder::new(self.params.max_energy, rng)
            .on_spawn(move |folk: &mut Folk, rng: &mut SimRng| {
                if folk.status == S && rng.dice() < alpha {
                    want_vaccine(folk);
                }
            })
            .random_homes(I, config.random_spreaders(), homes)
            .random_homes(S, config.num_pop - config.num_init_spreader, homes)
            .at_nodes(I, &config.spreader_initial_nodes)
            .build())
    }

    fn interact(&self, ctx: &mut InteractionContext<'_, SeiqrdvStatus, SeiqrdvTraits>) {
        if ctx.status() == S {
            let p = self.params.beta / ctx.here_len() as f64;
            if ctx.contact_probability(ctx.contacts(&[I]), p) > ctx.dice {
                ctx.convert(E);
            }
        }

        if ctx.place == PlaceType::HealthcareFacility
            && ctx.status() == S
            && ctx.me().traits.want_vaccine
        {
            // Queue position among everyone here who wants a shot, converted
            // or not, so capacity is shared across the whole pass.
            let me = ctx.agent;
            let rank = ctx
                .here_matching(|f| f.traits.want_vaccine)
                .position(|id| id == me);
            if rank.is_some_and(|r| self.has_capacity(r)) {
                ctx.convert(V);
            }
        }
    }

    fn sleep(&self, ctx: &mut SleepContext<'_, SeiqrdvStatus, SeiqrdvTraits>) {
        let p = &self.params;
        let streak = ctx.streak();
        match ctx.status() {
            Q if ctx.folk.traits.will_die => {
                if streak == p.rho {
                    ctx.convert(D);
                    ctx.folk.alive = false;
                    drop_vaccine_wish(ctx.folk);
                }
            }
            Q => {
                if streak == p.lam {
                    ctx.convert(R);
                    ctx.folk.movement_restricted = false;
                }
            }
            E if streak == p.gamma => ctx.convert(I),
            I if streak == p.delta => {
                ctx.convert(Q);
                ctx.folk.movement_restricted = true;
                drop_vaccine_wish(ctx.folk);
                if ctx.dice < p.kappa {
                    ctx.folk.traits.will_die = true;
                }
            }
            S if ctx.dice < p.alpha => want_vaccine(ctx.folk),
            V => drop_vaccine_wish(ctx.folk),
            _ => {}
        }
        // A folk turned away at the clinic tries again tomorrow.
        if ctx.folk.traits.want_vaccine {
            ctx.folk.queue_priority(PlaceType::HealthcareFacility);
        }
    }

    fn update_population(
        &self,
        population: &mut Population<SeiqrdvStatus, SeiqrdvTraits>,
        town:       &Town,
        tally:      &mut StatusTally<SeiqrdvStatus>,
        rng:        &mut SimRng,
    ) -> usize {
        let living_before = population.living_count();

        for folk in population.iter_mut().filter(|f| f.alive) {
            if rng.dice() < self.params.mu {
                folk.convert(D, tally);
                folk.alive = false;
                drop_vaccine_wish(folk);
            }
        }

        let arrivals = living_before as f64 * self.params.lam_cap;
        if arrivals > 1.0 {
            let homes = town.accommodation_nodes();
            for _ in 0..arrivals.round() as usize {
                let (Some(&home), Some(&status)) = (rng.choose(homes), rng.choose(&MIGRANT_STATUSES))
                else {
                    break;
                };
                population.spawn(home, status, SeiqrdvTraits::default(), rng);
                tally.increment(status);
            }
        }

        population.len()
    }
}

/// Densities `[S, E, I, Q, R, D, V]`.
///
/// Migrants arrive at `lam_cap` times the living density, split evenly over
/// the five statuses a migrant can hold.  Natural deaths feed `D` from every
/// living compartment.  The hospital capacity has no counterpart here.
impl MeanField for SeiqrdvParams {
    fn labels(&self) -> &'static [&'static str] {
        &["S", "E", "I", "Q", "R", "D", "V"]
    }

    fn derivatives(&self, y: &[f64]) -> Vec<f64> {
        let (s, e, i, q, r, v) = (y[0], y[1], y[2], y[3], y[4], y[6]);
        let living = s + e + i + q + r + v;
        let influx = self.lam_cap * living / MIGRANT_STATUSES.len() as f64;
        let infection = if living > 0.0 { self.beta * s * i / living } else { 0.0 };
        let incubated = e / self.gamma as f64;
        let isolated = i / self.delta as f64;
        let recovered = (1.0 - self.kappa) * q / self.lam as f64;
        let died = self.kappa * q / self.rho as f64;
        let vaccinated = self.alpha * s;
        let mu = self.mu;
        vec![
            influx - infection - vaccinated - mu * s,
            influx + infection - incubated - mu * e,
            influx + incubated - isolated - mu * i,
            isolated - recovered - died - mu * q,
            influx + recovered - mu * r,
            died + mu * living,
            influx + vaccinated - mu * v,
        ]
    }
}
