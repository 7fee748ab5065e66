//! Unit tests for et-model.
//!
//! Transitions are driven directly through hand-built contexts, so every
//! test controls the dice and each folk's energy.

#[cfg(test)]
mod helpers {
    use et_agent::{Folk, StatusTally};
    use et_core::{AgentId, GeoPoint, NodeId, PlaceType, SimRng};
    use et_schedule::{DaySchedule, StepEvent};
    use et_town::{Town, TownBuilder};

    use crate::{CompartmentalModel, InteractionContext, SleepContext};

    pub fn schedule() -> DaySchedule {
        let go = StepEvent::disperse("go", 5_000.0, PlaceType::ALL).unwrap();
        DaySchedule::new(vec![go]).unwrap()
    }

    /// Two homes and one of each other place type on a line.
    pub fn town() -> Town {
        let mut b = TownBuilder::new();
        let mut prev = None;
        for (i, &place) in PlaceType::ALL.iter().chain([PlaceType::Accommodation].iter()).enumerate() {
            let n = b.add_node(GeoPoint::new(0.0, i as f32 * 0.01), place);
            if let Some(p) = prev {
                b.add_road(p, n, 100.0);
            }
            prev = Some(n);
        }
        b.build().unwrap()
    }

    /// Folks with the given statuses, all at node 0 with `energy`.
    pub fn folks<M: CompartmentalModel>(
        model:    &M,
        statuses: &[M::Status],
        energy:   u32,
    ) -> Vec<Folk<M::Status, M::Traits>> {
        let mut rng = SimRng::new(1);
        statuses
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let mut f = Folk::new(
                    AgentId(i as u32),
                    NodeId(0),
                    s,
                    model.max_energy(),
                    M::Traits::default(),
                    &mut rng,
                );
                f.energy = energy;
                f
            })
            .collect()
    }

    /// Run `interact` for `agent` with everybody in the snapshot.
    pub fn interact<M: CompartmentalModel>(
        model: &M,
        folks: &mut [Folk<M::Status, M::Traits>],
        agent: usize,
        place: PlaceType,
        dice:  f64,
    ) -> StatusTally<M::Status> {
        let here: Vec<AgentId> = folks.iter().map(|f| f.id).collect();
        let mut tally = StatusTally::from_statuses(folks.iter().map(|f| f.status));
        let mut ctx = InteractionContext {
            agent: AgentId(agent as u32),
            here: &here,
            place,
            folks,
            tally: &mut tally,
            dice,
        };
        model.interact(&mut ctx);
        tally
    }

    /// Run `sleep` for one folk after `streak` nights in its status.
    pub fn sleep<M: CompartmentalModel>(
        model:  &M,
        folk:   &mut Folk<M::Status, M::Traits>,
        streak: u32,
        dice:   f64,
    ) -> StatusTally<M::Status> {
        folk.status_step_streak = streak;
        let mut tally = StatusTally::from_statuses([folk.status]);
        let mut ctx = SleepContext { folk, tally: &mut tally, dice };
        model.sleep(&mut ctx);
        tally
    }
}

// ── Transition primitives ─────────────────────────────────────────────────────

#[cfg(test)]
mod transition {
    use crate::{first_firing, inverse_bernoulli};

    #[test]
    fn no_contacts_is_exactly_zero() {
        assert_eq!(inverse_bernoulli(0, 0.9), 0.0);
    }

    #[test]
    fn at_least_one_success() {
        assert!((inverse_bernoulli(1, 0.3) - 0.3).abs() < 1e-12);
        assert!((inverse_bernoulli(2, 0.5) - 0.75).abs() < 1e-12);
        assert_eq!(inverse_bernoulli(5, 1.0), 1.0);
    }

    #[test]
    fn higher_probability_is_tried_first() {
        // Both fire at 0.1; the larger one wins regardless of list order.
        assert_eq!(first_firing(0.1, &[("a", 0.25), ("b", 0.5)]), Some("b"));
        assert_eq!(first_firing(0.1, &[("b", 0.5), ("a", 0.25)]), Some("b"));
    }

    #[test]
    fn falls_through_to_lower_probability() {
        assert_eq!(first_firing(0.3, &[("a", 0.2), ("b", 0.4)]), Some("b"));
        assert_eq!(first_firing(0.3, &[("a", 0.4), ("b", 0.2)]), Some("a"));
        assert_eq!(first_firing(0.6, &[("a", 0.4), ("b", 0.2)]), None);
    }

    #[test]
    fn ties_keep_given_order() {
        assert_eq!(first_firing(0.0, &[("a", 0.5), ("b", 0.5)]), Some("a"));
        assert_eq!(first_firing(0.0, &[("b", 0.5), ("a", 0.5)]), Some("b"));
    }
}

// ── InteractionContext ────────────────────────────────────────────────────────

#[cfg(test)]
mod context {
    use et_agent::StatusTally;
    use et_core::{AgentId, PlaceType};

    use super::helpers::{folks, schedule};
    use crate::{InteractionContext, SeirModel, SeirParams, SeirStatus::*};

    fn model() -> SeirModel {
        let params = SeirParams { max_energy: 5, beta: 0.5, sigma: 2, gamma: 3, xi: 4 };
        SeirModel::new(params, schedule()).unwrap()
    }

    #[test]
    fn contacts_leave_out_the_acting_folk() {
        let m = model();
        let mut fs = folks(&m, &[I, I, S, I], 5);
        let here: Vec<AgentId> = fs.iter().map(|f| f.id).collect();
        let mut tally = StatusTally::from_statuses(fs.iter().map(|f| f.status));
        let ctx = InteractionContext {
            agent: AgentId(0),
            here: &here,
            place: PlaceType::Workplace,
            folks: &mut fs,
            tally: &mut tally,
            dice: 0.5,
        };
        assert_eq!(ctx.here_len(), 4);
        assert_eq!(ctx.contacts(&[I]), 2);
        assert_eq!(ctx.contacts(&[S]), 1);
        assert_eq!(ctx.here_matching(|f| f.status == I).count(), 3);
    }

    #[test]
    fn contact_count_saturates_at_energy() {
        let m = model();
        let mut fs = folks(&m, &[S, I, I, I], 1);
        let here: Vec<AgentId> = fs.iter().map(|f| f.id).collect();
        let mut tally = StatusTally::from_statuses(fs.iter().map(|f| f.status));
        let ctx = InteractionContext {
            agent: AgentId(0),
            here: &here,
            place: PlaceType::Workplace,
            folks: &mut fs,
            tally: &mut tally,
            dice: 0.5,
        };
        // Three infectious contacts, but energy 1 allows only one.
        assert!((ctx.contact_probability(ctx.contacts(&[I]), 0.5) - 0.5).abs() < 1e-12);
    }
}

// ── SEIR ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seir {
    use et_agent::PopulationConfig;
    use et_core::{ConfigError, PlaceType, SimRng};

    use super::helpers::{folks, interact, schedule, sleep, town};
    use crate::{CompartmentalModel, ModelError, SeirModel, SeirParams, SeirStatus::*};

    fn params() -> SeirParams {
        SeirParams { max_energy: 5, beta: 0.5, sigma: 2, gamma: 3, xi: 4 }
    }

    #[test]
    fn beta_must_be_strictly_inside_unit_interval() {
        for beta in [0.0, 1.0, -0.1] {
            let p = SeirParams { beta, ..params() };
            let err = SeirModel::new(p, schedule()).err().unwrap();
            assert!(matches!(
                err,
                ModelError::Config(ConfigError::InvalidParameter { name: "beta", .. })
            ));
        }
    }

    #[test]
    fn durations_must_be_positive() {
        let p = SeirParams { sigma: 0, ..params() };
        assert!(SeirModel::new(p, schedule()).is_err());
    }

    #[test]
    fn exposure_threshold() {
        let m = SeirModel::new(params(), schedule()).unwrap();
        // p = 0.5 / 2 present, one infectious contact: 0.25.
        let mut fs = folks(&m, &[S, I], 5);
        let t = interact(&m, &mut fs, 0, PlaceType::Workplace, 0.2);
        assert_eq!(fs[0].status, E);
        assert_eq!(t.count(E), 1);
        assert_eq!(t.count(S), 0);

        let mut fs = folks(&m, &[S, I], 5);
        interact(&m, &mut fs, 0, PlaceType::Workplace, 0.3);
        assert_eq!(fs[0].status, S);
    }

    #[test]
    fn only_susceptible_folks_are_exposed() {
        let m = SeirModel::new(params(), schedule()).unwrap();
        let mut fs = folks(&m, &[R, I], 5);
        interact(&m, &mut fs, 0, PlaceType::Workplace, 0.0);
        assert_eq!(fs[0].status, R);
    }

    #[test]
    fn nightly_progression_follows_durations() {
        let m = SeirModel::new(params(), schedule()).unwrap();
        let mut fs = folks(&m, &[E, I, R], 5);

        sleep(&m, &mut fs[0], 1, 0.0);
        assert_eq!(fs[0].status, E);
        sleep(&m, &mut fs[0], 2, 0.0);
        assert_eq!(fs[0].status, I);

        sleep(&m, &mut fs[1], 3, 0.0);
        assert_eq!(fs[1].status, R);

        sleep(&m, &mut fs[2], 4, 0.0);
        assert_eq!(fs[2].status, S);
    }

    #[test]
    fn initial_population_layout() {
        let m = SeirModel::new(params(), schedule()).unwrap();
        let town = town();
        let home = town.accommodation_nodes()[1];
        let cfg = PopulationConfig::new(20, 3).with_spreader_nodes(vec![home]);
        let mut rng = SimRng::new(7);
        let pop = m.initialize_population(&town, &cfg, &mut rng).unwrap();

        assert_eq!(pop.len(), 20);
        let tally = pop.tally();
        assert_eq!(tally.count(I), 3);
        assert_eq!(tally.count(S), 17);
        // The explicitly placed spreader comes last.
        let last = pop.folks().last().unwrap();
        assert_eq!((last.home, last.status), (home, I));
        assert!(pop.iter().all(|f| town.accommodation_nodes().contains(&f.home)));
    }

    #[test]
    fn spreader_node_must_be_accommodation() {
        let m = SeirModel::new(params(), schedule()).unwrap();
        let town = town();
        let cfg = PopulationConfig::new(5, 1).with_spreader_nodes(vec![et_core::NodeId(1)]);
        let err = m.initialize_population(&town, &cfg, &mut SimRng::new(1)).err().unwrap();
        assert!(matches!(err, ModelError::Config(ConfigError::Population(_))));
    }

    #[test]
    fn requires_destination_place_types() {
        let m = SeirModel::new(params(), schedule()).unwrap();
        assert_eq!(
            m.required_place_types(),
            &[PlaceType::Workplace, PlaceType::Education, PlaceType::Religious]
        );
        assert_eq!(m.parameters()["beta"], 0.5);
    }
}

// ── SEIQRDV ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seiqrdv {
    use et_agent::{Population, PopulationConfig};
    use et_core::{NodeId, PlaceType, SimRng};

    use super::helpers::{folks, interact, schedule, sleep, town};
    use crate::{CompartmentalModel, SeiqrdvModel, SeiqrdvParams, SeiqrdvStatus::*, SeiqrdvTraits};

    fn params() -> SeiqrdvParams {
        SeiqrdvParams {
            max_energy:        5,
            lam_cap:           0.0,
            beta:              0.5,
            alpha:             0.0,
            gamma:             2,
            delta:             3,
            lam:               4,
            rho:               5,
            kappa:             0.5,
            mu:                0.0,
            hospital_capacity: Some(2),
        }
    }

    fn model(p: SeiqrdvParams) -> SeiqrdvModel {
        SeiqrdvModel::new(p, schedule()).unwrap()
    }

    fn wanting(m: &SeiqrdvModel, n: usize) -> Vec<et_agent::Folk<crate::SeiqrdvStatus, SeiqrdvTraits>> {
        let mut fs = folks(m, &vec![S; n], 5);
        for f in &mut fs {
            f.traits.want_vaccine = true;
        }
        fs
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let p = SeiqrdvParams { hospital_capacity: Some(0), ..params() };
        assert!(SeiqrdvModel::new(p, schedule()).is_err());
    }

    #[test]
    fn vaccination_respects_capacity() {
        let m = model(params());
        let mut fs = wanting(&m, 3);
        for agent in 0..3 {
            interact(&m, &mut fs, agent, PlaceType::HealthcareFacility, 0.99);
        }
        let statuses: Vec<_> = fs.iter().map(|f| f.status).collect();
        assert_eq!(statuses, [V, V, S]);
    }

    #[test]
    fn unlimited_capacity_vaccinates_everyone() {
        let m = model(SeiqrdvParams { hospital_capacity: None, ..params() });
        let mut fs = wanting(&m, 4);
        for agent in 0..4 {
            interact(&m, &mut fs, agent, PlaceType::HealthcareFacility, 0.99);
        }
        assert!(fs.iter().all(|f| f.status == V));
    }

    #[test]
    fn no_vaccination_away_from_healthcare() {
        let m = model(params());
        let mut fs = wanting(&m, 2);
        interact(&m, &mut fs, 0, PlaceType::Commercial, 0.99);
        assert_eq!(fs[0].status, S);
    }

    #[test]
    fn infectious_folk_is_quarantined_and_may_be_doomed() {
        let m = model(params());
        let mut fs = folks(&m, &[I, I], 5);
        fs[0].queue_priority(PlaceType::HealthcareFacility);

        sleep(&m, &mut fs[0], 3, 0.1);
        assert_eq!(fs[0].status, Q);
        assert!(fs[0].movement_restricted);
        assert!(fs[0].traits.will_die);
        assert!(fs[0].priority_places.is_empty());

        sleep(&m, &mut fs[1], 3, 0.9);
        assert_eq!(fs[1].status, Q);
        assert!(!fs[1].traits.will_die);
    }

    #[test]
    fn quarantine_ends_in_death_or_recovery() {
        let m = model(params());
        let mut fs = folks(&m, &[Q, Q], 5);
        fs[0].traits.will_die = true;
        fs[0].movement_restricted = true;
        fs[1].movement_restricted = true;

        sleep(&m, &mut fs[0], 4, 0.0);
        assert_eq!(fs[0].status, Q);
        sleep(&m, &mut fs[0], 5, 0.0);
        assert_eq!(fs[0].status, D);
        assert!(!fs[0].alive);

        sleep(&m, &mut fs[1], 4, 0.0);
        assert_eq!(fs[1].status, R);
        assert!(!fs[1].movement_restricted);
    }

    #[test]
    fn susceptible_folk_plans_a_vaccination() {
        let m = model(SeiqrdvParams { alpha: 0.5, ..params() });
        let mut fs = folks(&m, &[S, V], 5);
        sleep(&m, &mut fs[0], 1, 0.2);
        assert!(fs[0].traits.want_vaccine);
        assert_eq!(fs[0].priority_places.front(), Some(&PlaceType::HealthcareFacility));

        fs[1].traits.want_vaccine = true;
        sleep(&m, &mut fs[1], 1, 0.0);
        assert!(!fs[1].traits.want_vaccine);
    }

    #[test]
    fn turned_away_folk_heads_back_to_the_clinic() {
        let m = model(SeiqrdvParams { alpha: 0.3, ..params() });
        let mut fs = wanting(&m, 1);
        assert!(fs[0].priority_places.is_empty());

        // No fresh wish tonight: the standing one still queues the clinic.
        sleep(&m, &mut fs[0], 1, 0.9);
        assert!(fs[0].traits.want_vaccine);
        assert_eq!(fs[0].priority_places.len(), 1);
        assert_eq!(fs[0].priority_places.front(), Some(&PlaceType::HealthcareFacility));

        sleep(&m, &mut fs[0], 2, 0.1);
        assert_eq!(fs[0].priority_places.len(), 1);
    }

    #[test]
    fn vaccinated_folk_is_not_requeued() {
        let m = model(SeiqrdvParams { alpha: 0.3, ..params() });
        let mut fs = folks(&m, &[V], 5);
        fs[0].traits.want_vaccine = true;
        sleep(&m, &mut fs[0], 1, 0.9);
        assert!(!fs[0].traits.want_vaccine);
        assert!(fs[0].priority_places.is_empty());
    }

    #[test]
    fn initial_wish_for_vaccine() {
        let m = model(SeiqrdvParams { alpha: 1.0, ..params() });
        let town = town();
        let cfg = PopulationConfig::new(10, 2);
        let pop = m.initialize_population(&town, &cfg, &mut SimRng::new(3)).unwrap();
        for f in pop.iter() {
            assert_eq!(f.traits.want_vaccine, f.status == S);
            assert_eq!(f.priority_places.len(), usize::from(f.status == S));
        }
    }

    fn population(m: &SeiqrdvModel, n: usize) -> Population<crate::SeiqrdvStatus, SeiqrdvTraits> {
        let mut rng = SimRng::new(9);
        let mut pop = Population::new(m.max_energy());
        for _ in 0..n {
            pop.spawn(NodeId(0), S, SeiqrdvTraits::default(), &mut rng);
        }
        pop
    }

    #[test]
    fn certain_natural_death_kills_everyone() {
        let m = model(SeiqrdvParams { mu: 1.0, ..params() });
        let town = town();
        let mut pop = population(&m, 6);
        let mut tally = pop.tally();
        let len = m.update_population(&mut pop, &town, &mut tally, &mut SimRng::new(1));
        assert_eq!(len, 6);
        assert!(pop.iter().all(|f| !f.alive && f.status == D));
        assert_eq!(tally.count(D), 6);
        assert_eq!(m.living_total(&tally), 0);
    }

    #[test]
    fn migration_is_proportional_to_the_living() {
        let m = model(SeiqrdvParams { lam_cap: 0.5, ..params() });
        let town = town();
        let mut pop = population(&m, 10);
        let mut tally = pop.tally();
        let len = m.update_population(&mut pop, &town, &mut tally, &mut SimRng::new(1));
        assert_eq!(len, 15);
        assert_eq!(tally.total(), 15);
        for f in &pop.folks()[10..] {
            assert!(town.accommodation_nodes().contains(&f.home));
            assert!(f.status != D && f.status != Q);
        }
    }

    #[test]
    fn single_migrant_threshold() {
        // 10 * 0.1 = 1.0 is not above one: nobody arrives.
        let m = model(SeiqrdvParams { lam_cap: 0.1, ..params() });
        let town = town();
        let mut pop = population(&m, 10);
        let mut tally = pop.tally();
        assert_eq!(m.update_population(&mut pop, &town, &mut tally, &mut SimRng::new(1)), 10);
    }

    #[test]
    fn dead_are_not_counted_as_living() {
        let m = model(params());
        let tally = et_agent::StatusTally::from_statuses([S, I, D, D, Q]);
        assert_eq!(m.living_total(&tally), 3);
        assert_eq!(m.infected_total(&tally), 2);
    }
}

// ── SEIsIrR ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seisirr {
    use et_agent::PopulationConfig;
    use et_core::{PlaceType, SimRng};

    use super::helpers::{folks, interact, schedule, sleep, town};
    use crate::{CompartmentalModel, SeisirrModel, SeisirrParams, SeisirrStatus::*};

    fn params() -> SeisirrParams {
        SeisirrParams {
            max_energy: 4,
            literacy:   0.5,
            gamma:      0.5,
            alpha:      1.0,
            lam:        1.0,
            phi:        0.5,
            theta:      0.5,
            mu:         1.0,
            eta1:       1.0,
            eta2:       0.0,
            mem_span:   3,
        }
    }

    fn model() -> SeisirrModel {
        SeisirrModel::new(params(), schedule()).unwrap()
    }

    #[test]
    fn derived_rates() {
        let p = params();
        assert!((p.ir_to_s() - 0.5).abs() < 1e-12);
        assert!((p.is_to_s() - 0.5).abs() < 1e-12);
        assert!((p.is_to_e() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn mem_span_must_exceed_one() {
        let p = SeisirrParams { mem_span: 1, ..params() };
        assert!(SeisirrModel::new(p, schedule()).is_err());
    }

    #[test]
    fn is_prefers_the_likelier_transition() {
        let m = model();
        // Full energy: Is->S 0.5, Is->E 0.25.
        for (dice, expected) in [(0.1, S), (0.3, S), (0.6, Is)] {
            let mut fs = folks(&m, &[Is, S], 4);
            interact(&m, &mut fs, 0, PlaceType::Commercial, dice);
            assert_eq!(fs[0].status, expected, "dice {dice}");
        }
    }

    #[test]
    fn tired_folks_are_less_persuadable() {
        let m = model();
        // Half energy halves Ir->S: 0.25.
        let mut fs = folks(&m, &[Ir, S], 2);
        interact(&m, &mut fs, 0, PlaceType::Commercial, 0.3);
        assert_eq!(fs[0].status, Ir);

        let mut fs = folks(&m, &[Ir, S], 4);
        interact(&m, &mut fs, 0, PlaceType::Commercial, 0.3);
        assert_eq!(fs[0].status, S);
    }

    #[test]
    fn spreader_alone_does_not_stop() {
        let m = model();
        let mut fs = folks(&m, &[S, Ir], 4);
        interact(&m, &mut fs, 0, PlaceType::Commercial, 0.0);
        assert_eq!(fs[0].status, S);

        let mut fs = folks(&m, &[S, R], 4);
        interact(&m, &mut fs, 0, PlaceType::Commercial, 0.5);
        assert_eq!(fs[0].status, R);
    }

    #[test]
    fn spreader_forgets_after_mem_span() {
        let m = model();
        let mut fs = folks(&m, &[S, S], 4);
        sleep(&m, &mut fs[0], 2, 0.5);
        assert_eq!(fs[0].status, S);
        sleep(&m, &mut fs[0], 3, 0.5);
        assert_eq!(fs[0].status, R);

        let m = SeisirrModel::new(SeisirrParams { eta2: 0.4, ..params() }, schedule()).unwrap();
        sleep(&m, &mut fs[1], 0, 0.3);
        assert_eq!(fs[1].status, R);
    }

    #[test]
    fn literacy_splits_the_ignorant() {
        let m = model();
        let cfg = PopulationConfig::new(12, 2);
        let pop = m.initialize_population(&town(), &cfg, &mut SimRng::new(4)).unwrap();
        let t = pop.tally();
        assert_eq!((t.count(S), t.count(Is), t.count(Ir)), (2, 5, 5));
        assert_eq!(m.infected_total(&t), 2);
    }
}

// ── Mean field ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mean_field {
    use crate::{integrate_rk4, MeanField, SeiqrdvParams, SeirParams, SeisirrParams};

    struct Decay;

    impl MeanField for Decay {
        fn labels(&self) -> &'static [&'static str] {
            &["y"]
        }

        fn derivatives(&self, y: &[f64]) -> Vec<f64> {
            vec![-y[0]]
        }
    }

    #[test]
    fn rk4_matches_exponential_decay() {
        let out = integrate_rk4(&Decay, &[1.0], 3, 20);
        assert_eq!(out.len(), 4);
        for (day, y) in out.iter().enumerate() {
            assert!((y[0] - (-(day as f64)).exp()).abs() < 1e-7, "day {day}");
        }
    }

    #[test]
    fn seir_conserves_population() {
        let p = SeirParams { max_energy: 5, beta: 0.4, sigma: 3, gamma: 5, xi: 30 };
        let out = integrate_rk4(&p, &[990.0, 0.0, 10.0, 0.0], 60, 10);
        for y in &out {
            assert!((y.iter().sum::<f64>() - 1000.0).abs() < 1e-6);
        }
        // The epidemic takes off.
        assert!(out.iter().any(|y| y[2] > 10.0));
    }

    #[test]
    fn seisirr_conserves_population() {
        let p = SeisirrParams {
            max_energy: 5,
            literacy:   0.3,
            gamma:      0.6,
            alpha:      0.8,
            lam:        0.9,
            phi:        0.1,
            theta:      0.2,
            mu:         0.5,
            eta1:       0.1,
            eta2:       0.05,
            mem_span:   10,
        };
        assert_eq!(p.labels(), &["S", "E", "Ir", "Is", "R"]);
        let out = integrate_rk4(&p, &[0.01, 0.0, 0.69, 0.3, 0.0], 50, 20);
        for y in &out {
            assert!((y.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(y.iter().all(|v| *v > -1e-9));
        }
    }

    fn seiqrdv() -> SeiqrdvParams {
        SeiqrdvParams {
            max_energy:        2,
            lam_cap:           0.0,
            beta:              0.7,
            alpha:             0.1,
            gamma:             4,
            delta:             5,
            lam:               7,
            rho:               7,
            kappa:             0.2,
            mu:                0.002,
            hospital_capacity: None,
        }
    }

    #[test]
    fn closed_seiqrdv_conserves_population() {
        let p = seiqrdv();
        assert_eq!(p.labels(), &["S", "E", "I", "Q", "R", "D", "V"]);
        let out = integrate_rk4(&p, &[0.99, 0.0, 0.01, 0.0, 0.0, 0.0, 0.0], 100, 20);
        for y in &out {
            assert!((y.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(y.iter().all(|v| *v > -1e-9));
        }
        let last = out.last().unwrap();
        assert!(last[5] > 0.0);
        assert!(last[6] > last[0]);
    }

    #[test]
    fn seiqrdv_vaccination_drains_susceptibles() {
        let p = SeiqrdvParams { beta: 0.0, mu: 0.0, alpha: 0.2, ..seiqrdv() };
        let out = integrate_rk4(&p, &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 10, 20);
        for (day, y) in out.iter().enumerate() {
            let expected = (-0.2 * day as f64).exp();
            assert!((y[0] - expected).abs() < 1e-7, "day {day}");
            assert!((y[6] - (1.0 - expected)).abs() < 1e-7, "day {day}");
        }
    }

    #[test]
    fn seiqrdv_migration_grows_the_living() {
        let p = SeiqrdvParams { beta: 0.0, alpha: 0.0, mu: 0.0, kappa: 0.0, lam_cap: 0.05, ..seiqrdv() };
        let out = integrate_rk4(&p, &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 10, 20);
        let living: f64 = out[10].iter().sum();
        assert!((living - 0.5_f64.exp()).abs() < 1e-6);
        assert!(out[10][0] > 1.0);
        assert!(out[10][4] > 0.0 && out[10][6] > 0.0);
        assert_eq!(out[10][5], 0.0);
    }
}
