//! Unit tests for et-agent.

#[cfg(test)]
mod helpers {
    crate::compartments! {
        pub enum Seir {
            S => "S",
            E => "E",
            I => "I",
            R => "R",
        }
    }
}

#[cfg(test)]
mod status {
    use super::helpers::Seir;
    use crate::Status;

    #[test]
    fn vocabulary_order_matches_index() {
        for (i, s) in Seir::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn names_and_lookup() {
        assert_eq!(Seir::E.name(), "E");
        assert_eq!(Seir::from_name("R"), Some(Seir::R));
        assert_eq!(Seir::from_name("X"), None);
        assert_eq!(Seir::I.to_string(), "I");
    }
}

#[cfg(test)]
mod tally {
    use super::helpers::Seir;
    use crate::StatusTally;

    #[test]
    fn counts_from_statuses() {
        let t = StatusTally::from_statuses([Seir::S, Seir::S, Seir::I]);
        assert_eq!(t.count(Seir::S), 2);
        assert_eq!(t.count(Seir::I), 1);
        assert_eq!(t.total(), 3);
        assert_eq!(t.sum_of(&[Seir::I, Seir::E]), 1);
        assert_eq!(t.total_excluding(&[Seir::S]), 1);
    }

    #[test]
    fn next_event_copies_counts_and_retags() {
        let t0 = StatusTally::from_statuses([Seir::S, Seir::I]);
        let mut t1 = t0.next_event(1, "greet");
        assert_eq!(t1.timestep, 1);
        assert_eq!(t1.event_label(), "greet");
        t1.increment(Seir::R);
        assert_eq!(t0.count(Seir::R), 0);
        assert_eq!(t0.event_label(), "");
    }

    #[test]
    fn display_lists_every_status() {
        let t = StatusTally::from_statuses([Seir::S, Seir::S, Seir::R]);
        assert_eq!(t.to_string(), "S=2 E=0 I=0 R=1");
    }
}

#[cfg(test)]
mod folk {
    use et_core::{AgentId, NodeId, PlaceType, SimRng};

    use super::helpers::Seir;
    use crate::{Folk, FolkView, StatusTally};

    fn folk(status: Seir) -> Folk<Seir> {
        let mut rng = SimRng::new(1);
        Folk::new(AgentId(0), NodeId(4), status, 5, (), &mut rng)
    }

    #[test]
    fn starts_at_home_with_bounded_energy() {
        let f = folk(Seir::S);
        assert_eq!(f.location, NodeId(4));
        assert!(f.is_home());
        assert!(f.energy <= 5);
        assert!(f.alive);
        assert!(!f.movement_restricted);
        assert_eq!(f.status_step_streak, 0);
    }

    #[test]
    fn convert_moves_tally_and_resets_streak() {
        let mut f = folk(Seir::S);
        f.status_step_streak = 3;
        let mut tally = StatusTally::from_statuses([Seir::S]);
        f.convert(Seir::E, &mut tally);
        assert_eq!(f.status, Seir::E);
        assert_eq!(f.status_step_streak, 0);
        assert_eq!(tally.count(Seir::S), 0);
        assert_eq!(tally.count(Seir::E), 1);
    }

    #[test]
    fn convert_to_self_panics_for_every_status() {
        for &s in <Seir as crate::Status>::ALL {
            let result = std::panic::catch_unwind(|| {
                let mut f = folk(s);
                let mut tally = StatusTally::from_statuses([s]);
                f.convert(s, &mut tally);
            });
            assert!(result.is_err(), "convert({s:?}, {s:?}) must fail");
        }
    }

    #[test]
    fn rest_counts_nights_and_refills_energy() {
        let mut f = folk(Seir::E);
        let mut rng = SimRng::new(2);
        for night in 1..=20 {
            f.energy = 0;
            f.rest(&mut rng);
            assert_eq!(f.status_step_streak, night);
            assert!(f.energy <= f.max_energy);
        }
    }

    #[test]
    fn spend_energy_saturates() {
        let mut f = folk(Seir::S);
        f.energy = 1;
        f.spend_energy();
        f.spend_energy();
        assert_eq!(f.energy, 0);
        assert!(!f.can_act());
        assert!(!f.can_move());
    }

    #[test]
    fn restricted_folk_acts_but_does_not_move() {
        let mut f = folk(Seir::S);
        f.energy = 2;
        f.movement_restricted = true;
        assert!(f.can_act());
        assert!(!f.can_move());
    }

    #[test]
    fn priority_queue_dedupes_and_takes_first() {
        let mut f = folk(Seir::S);
        assert!(f.queue_priority(PlaceType::HealthcareFacility));
        assert!(!f.queue_priority(PlaceType::HealthcareFacility));
        assert!(f.queue_priority(PlaceType::Commercial));
        assert!(f.take_priority(PlaceType::HealthcareFacility));
        assert!(!f.take_priority(PlaceType::HealthcareFacility));
        assert_eq!(f.priority_places.len(), 1);
    }

    #[test]
    fn view_energy_fraction() {
        let mut f = folk(Seir::S);
        f.energy = 2;
        f.max_energy = 4;
        assert_eq!(f.energy_fraction(), 0.5);
        f.max_energy = 0;
        f.energy = 0;
        assert_eq!(f.energy_fraction(), 0.0);
        assert_eq!(f.status_name(), "S");
    }
}

#[cfg(test)]
mod population {
    use et_core::{ConfigError, NodeId, SimRng};

    use super::helpers::Seir;
    use crate::{PopulationBuilder, PopulationConfig};

    const HOMES: [NodeId; 3] = [NodeId(0), NodeId(2), NodeId(5)];

    #[test]
    fn builder_places_folks_in_call_order() {
        let mut rng = SimRng::new(7);
        let pop = PopulationBuilder::<Seir>::new(4, &mut rng)
            .random_homes(Seir::I, 2, &HOMES)
            .random_homes(Seir::S, 5, &HOMES)
            .at_nodes(Seir::I, &[NodeId(5)])
            .build();

        assert_eq!(pop.len(), 8);
        assert_eq!(pop.folks()[0].status, Seir::I);
        assert_eq!(pop.folks()[6].status, Seir::S);
        assert_eq!(pop.folks()[7].home, NodeId(5));
        assert!(pop.iter().all(|f| HOMES.contains(&f.home)));
        for (i, id) in pop.ids().enumerate() {
            assert_eq!(pop.get(id).id.index(), i);
        }

        let tally = pop.tally();
        assert_eq!(tally.count(Seir::I), 3);
        assert_eq!(tally.count(Seir::S), 5);
        assert!(pop.households().contains(&NodeId(5)));
    }

    #[test]
    fn on_spawn_hook_sees_every_folk() {
        let mut rng = SimRng::new(7);
        let pop = PopulationBuilder::<Seir>::new(4, &mut rng)
            .on_spawn(|f, _| f.movement_restricted = true)
            .random_homes(Seir::S, 3, &HOMES)
            .build();
        assert!(pop.iter().all(|f| f.movement_restricted));
    }

    #[test]
    fn same_seed_same_population() {
        let build = |seed| {
            let mut rng = SimRng::new(seed);
            PopulationBuilder::<Seir>::new(9, &mut rng)
                .random_homes(Seir::S, 20, &HOMES)
                .build()
                .iter()
                .map(|f| (f.home, f.energy))
                .collect::<Vec<_>>()
        };
        assert_eq!(build(11), build(11));
    }

    #[test]
    fn config_random_spreaders() {
        let cfg = PopulationConfig::new(10, 3).with_spreader_nodes(vec![NodeId(0)]);
        assert_eq!(cfg.random_spreaders(), 2);
        assert!(cfg.validate(&HOMES).is_ok());
    }

    #[test]
    fn config_rejects_too_many_spreader_nodes() {
        let cfg = PopulationConfig::new(10, 1).with_spreader_nodes(vec![NodeId(0), NodeId(2)]);
        assert!(matches!(cfg.validate(&HOMES), Err(ConfigError::Population(_))));
    }

    #[test]
    fn config_rejects_spreader_outside_homes() {
        let cfg = PopulationConfig::new(10, 1).with_spreader_nodes(vec![NodeId(1)]);
        assert!(matches!(cfg.validate(&HOMES), Err(ConfigError::Population(_))));
    }

    #[test]
    fn config_rejects_more_spreaders_than_people() {
        let cfg = PopulationConfig::new(2, 3);
        assert!(cfg.validate(&HOMES).is_err());
    }

    #[test]
    fn config_rejects_town_without_homes() {
        let cfg = PopulationConfig::new(2, 1);
        assert!(cfg.validate(&[]).is_err());
    }
}
