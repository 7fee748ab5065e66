//! Unit tests for et-mobility.

#[cfg(test)]
mod helpers {
    use et_agent::Folk;
    use et_core::{AgentId, GeoPoint, NodeId, PlaceType, SimRng};
    use et_town::{Town, TownBuilder};

    et_agent::compartments! {
        pub enum Sir {
            S => "S",
            I => "I",
            R => "R",
        }
    }

    /// ```text
    ///   0 home ──100── 1 work ──100── 2 shop
    ///   │                              │
    ///  500                            100
    ///   │                              │
    ///   3 home ─────────100─────────── 4 clinic
    /// ```
    pub fn small_town() -> Town {
        let mut b = TownBuilder::new();
        let n0 = b.add_node(GeoPoint::new(0.0, 0.0), PlaceType::Accommodation);
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0), PlaceType::Workplace);
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0), PlaceType::Commercial);
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0), PlaceType::Accommodation);
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0), PlaceType::HealthcareFacility);
        b.add_road(n0, n1, 100.0);
        b.add_road(n1, n2, 100.0);
        b.add_road(n2, n4, 100.0);
        b.add_road(n0, n3, 500.0);
        b.add_road(n3, n4, 100.0);
        b.build().unwrap()
    }

    /// A susceptible folk at `home` with full energy.
    pub fn folk(id: u32, home: u32) -> Folk<Sir> {
        let mut f = Folk::new(AgentId(id), NodeId(home), Sir::S, 4, (), &mut SimRng::new(id as u64));
        f.energy = 4;
        f
    }
}

// ── Normal routing ────────────────────────────────────────────────────────────

#[cfg(test)]
mod normal {
    use std::collections::BTreeSet;

    use et_core::{NodeId, PlaceType, SimRng};
    use et_schedule::StepEvent;
    use et_town::DijkstraRouter;

    use super::helpers::{folk, small_town};
    use crate::Dispersal;

    #[test]
    fn distance_cap_limits_candidates() {
        let town = small_town();
        let event = StepEvent::disperse("out", 200.0, [PlaceType::Workplace, PlaceType::Accommodation]).unwrap();
        let mut folks = vec![folk(0, 0)];
        let mut engine = Dispersal::new(DijkstraRouter);
        let moved = engine.disperse(&event, &mut folks, &town, &mut SimRng::new(1)).unwrap();
        assert_eq!(moved, 1);
        assert_eq!(folks[0].location, NodeId(1));
    }

    #[test]
    fn place_type_filter() {
        let town = small_town();
        let event = StepEvent::disperse("shop", 10_000.0, [PlaceType::Commercial]).unwrap();
        let mut folks = vec![folk(0, 0)];
        Dispersal::new(DijkstraRouter).disperse(&event, &mut folks, &town, &mut SimRng::new(1)).unwrap();
        // Node 2 is a shop but not a direct neighbor of node 0.
        assert_eq!(folks[0].location, NodeId(0));
    }

    #[test]
    fn uniform_choice_reaches_every_candidate() {
        let town = small_town();
        let event = StepEvent::disperse("out", 1_000.0, [PlaceType::Workplace, PlaceType::Accommodation]).unwrap();
        let mut seen = BTreeSet::new();
        let mut rng = SimRng::new(3);
        let mut engine = Dispersal::new(DijkstraRouter);
        for _ in 0..50 {
            let mut folks = vec![folk(0, 0)];
            engine.disperse(&event, &mut folks, &town, &mut rng).unwrap();
            seen.insert(folks[0].location);
        }
        assert_eq!(seen, BTreeSet::from([NodeId(1), NodeId(3)]));
    }

    #[test]
    fn same_seed_same_destinations() {
        let town = small_town();
        let event = StepEvent::disperse("out", 1_000.0, PlaceType::ALL).unwrap();
        let run = |seed| {
            let mut folks: Vec<_> = (0..20).map(|i| folk(i, if i % 2 == 0 { 0 } else { 3 })).collect();
            Dispersal::new(DijkstraRouter).disperse(&event, &mut folks, &town, &mut SimRng::new(seed)).unwrap();
            folks.iter().map(|f| f.location).collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }
}

// ── Who moves ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod eligibility {
    use et_core::{NodeId, PlaceType, SimRng};
    use et_schedule::StepEvent;
    use et_town::DijkstraRouter;

    use super::helpers::{folk, small_town};
    use crate::{send_home, Dispersal};

    #[test]
    fn restricted_tired_and_dead_folks_stay() {
        let town = small_town();
        let event = StepEvent::disperse("work", 1_000.0, [PlaceType::Workplace]).unwrap();
        let mut folks = vec![folk(0, 0), folk(1, 0), folk(2, 0), folk(3, 0)];
        folks[0].movement_restricted = true;
        folks[1].energy = 0;
        folks[2].alive = false;

        let moved = Dispersal::new(DijkstraRouter).disperse(&event, &mut folks, &town, &mut SimRng::new(1)).unwrap();
        assert_eq!(moved, 1);
        let locations: Vec<_> = folks.iter().map(|f| f.location).collect();
        assert_eq!(locations, [NodeId(0), NodeId(0), NodeId(0), NodeId(1)]);
    }

    #[test]
    fn send_home_skips_the_dead() {
        let mut folks = vec![folk(0, 0), folk(1, 3)];
        folks[0].location = NodeId(2);
        folks[1].location = NodeId(4);
        folks[1].alive = false;
        send_home(&mut folks);
        assert!(folks[0].is_home());
        assert_eq!(folks[1].location, NodeId(4));
    }
}

// ── Priority routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod priority {
    use et_core::{NodeId, PlaceType, SimRng};
    use et_schedule::StepEvent;
    use et_town::DijkstraRouter;

    use super::helpers::{folk, small_town};
    use crate::Dispersal;

    #[test]
    fn ignores_distance_cap_and_place_filter() {
        let town = small_town();
        let event = StepEvent::disperse("stroll", 0.0, [PlaceType::Workplace]).unwrap();
        let mut folks = vec![folk(0, 0)];
        folks[0].queue_priority(PlaceType::HealthcareFacility);

        Dispersal::new(DijkstraRouter).disperse(&event, &mut folks, &town, &mut SimRng::new(1)).unwrap();
        // 0-1-2-4 (300 m) beats going through node 3.
        assert_eq!(folks[0].location, NodeId(4));
        assert!(folks[0].priority_places.is_empty());
    }

    #[test]
    fn nearest_queued_type_is_dequeued_first() {
        let town = small_town();
        let event = StepEvent::disperse("errands", 1_000.0, PlaceType::ALL).unwrap();
        let mut folks = vec![folk(0, 0)];
        folks[0].queue_priority(PlaceType::HealthcareFacility);
        folks[0].queue_priority(PlaceType::Commercial);

        let mut engine = Dispersal::new(DijkstraRouter);
        let mut rng = SimRng::new(1);
        engine.disperse(&event, &mut folks, &town, &mut rng).unwrap();
        assert_eq!(folks[0].location, NodeId(2));
        assert_eq!(folks[0].priority_places, [PlaceType::HealthcareFacility]);

        engine.disperse(&event, &mut folks, &town, &mut rng).unwrap();
        assert_eq!(folks[0].location, NodeId(4));
        assert!(folks[0].priority_places.is_empty());
    }

    #[test]
    fn current_node_is_not_a_destination() {
        let town = small_town();
        let event = StepEvent::disperse("errands", 1_000.0, [PlaceType::Accommodation]).unwrap();
        let mut folks = vec![folk(0, 0)];
        folks[0].queue_priority(PlaceType::Accommodation);
        Dispersal::new(DijkstraRouter).disperse(&event, &mut folks, &town, &mut SimRng::new(1)).unwrap();
        assert_eq!(folks[0].location, NodeId(3));
    }

    #[test]
    fn unreachable_priority_falls_back_to_normal_routing() {
        let town = small_town();
        let event = StepEvent::disperse("work", 1_000.0, [PlaceType::Workplace]).unwrap();
        let mut folks = vec![folk(0, 0)];
        folks[0].queue_priority(PlaceType::Religious);
        Dispersal::new(DijkstraRouter).disperse(&event, &mut folks, &town, &mut SimRng::new(1)).unwrap();
        assert_eq!(folks[0].location, NodeId(1));
        assert_eq!(folks[0].priority_places, [PlaceType::Religious]);
    }
}

// ── Weighted selection ────────────────────────────────────────────────────────

#[cfg(test)]
mod weighted {
    use std::collections::BTreeSet;

    use et_agent::FolkView;
    use et_core::{NodeId, PlaceType, SimRng};
    use et_schedule::{CustomMobility, StepEvent};
    use et_town::DijkstraRouter;

    use super::helpers::{folk, small_town};
    use crate::Dispersal;

    fn farthest_only(d: &[f64], _folk: &dyn FolkView) -> Vec<f64> {
        let max = d.iter().cloned().fold(f64::MIN, f64::max);
        d.iter().map(|&x| if x == max { 1.0 } else { 0.0 }).collect()
    }

    #[test]
    fn weights_steer_the_draw() {
        let town = small_town();
        let event = StepEvent::disperse("far", 1_000.0, [PlaceType::Workplace, PlaceType::Accommodation])
            .unwrap()
            .with_mobility(CustomMobility::new("farthest", farthest_only))
            .unwrap();
        let mut rng = SimRng::new(5);
        let mut engine = Dispersal::new(DijkstraRouter);
        for _ in 0..20 {
            let mut folks = vec![folk(0, 0)];
            engine.disperse(&event, &mut folks, &town, &mut rng).unwrap();
            assert_eq!(folks[0].location, NodeId(3));
        }
    }

    #[test]
    fn broken_weights_fall_back_to_uniform() {
        let town = small_town();
        let event = StepEvent::disperse("broken", 1_000.0, [PlaceType::Workplace, PlaceType::Accommodation])
            .unwrap()
            .with_mobility(CustomMobility::new("zeros", |d: &[f64], _: &dyn FolkView| vec![0.0; d.len()]))
            .unwrap();
        let mut seen = BTreeSet::new();
        let mut rng = SimRng::new(5);
        let mut engine = Dispersal::new(DijkstraRouter);
        for _ in 0..50 {
            let mut folks = vec![folk(0, 0)];
            engine.disperse(&event, &mut folks, &town, &mut rng).unwrap();
            seen.insert(folks[0].location);
        }
        assert_eq!(seen, BTreeSet::from([NodeId(1), NodeId(3)]));
    }
}

// ── DistanceCache ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use et_core::{NodeId, PlaceType};
    use et_town::DijkstraRouter;

    use super::helpers::{folk, small_town};
    use crate::{Dispersal, DistanceCache};

    #[test]
    fn rows_are_computed_once_per_source() {
        let town = small_town();
        let mut cache = DistanceCache::new();
        assert!(cache.is_empty());

        let row = cache.distances_from(&DijkstraRouter, &town, NodeId(0)).unwrap().to_vec();
        assert_eq!(row[4], 300.0);
        assert_eq!(row[3], 400.0);
        cache.distances_from(&DijkstraRouter, &town, NodeId(0)).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn warm_fills_missing_rows() {
        let town = small_town();
        let mut cache = DistanceCache::new();
        cache.warm(&DijkstraRouter, &town, town.accommodation_nodes()).unwrap();
        assert!(cache.contains(NodeId(0)) && cache.contains(NodeId(3)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn only_priority_routers_are_warmed() {
        let town = small_town();
        let mut folks = vec![folk(0, 0), folk(1, 3), folk(2, 3)];
        folks[1].queue_priority(PlaceType::HealthcareFacility);
        folks[2].queue_priority(PlaceType::Commercial);

        let mut engine = Dispersal::new(DijkstraRouter);
        assert_eq!(engine.warm_priority_sources(&folks, &town).unwrap(), 1);
        assert!(engine.cache.contains(NodeId(3)));
        assert!(!engine.cache.contains(NodeId(0)));

        folks[1].alive = false;
        folks[2].priority_places.clear();
        let mut engine = Dispersal::new(DijkstraRouter);
        assert_eq!(engine.warm_priority_sources(&folks, &town).unwrap(), 0);
        assert!(engine.cache.is_empty());
    }

    #[test]
    fn unknown_source_is_an_error() {
        let town = small_town();
        let mut cache = DistanceCache::new();
        assert!(cache.distances_from(&DijkstraRouter, &town, NodeId(99)).is_err());
        assert!(cache.is_empty());
    }
}
