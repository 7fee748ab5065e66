//! The dispersal engine: moves folks for one DISPERSE event.

use std::collections::BTreeSet;

use et_agent::{Folk, FolkView, Status};
use et_core::{NodeId, PlaceType, SimRng};
use et_schedule::{MobilityFn, StepEvent};
use et_town::{DijkstraRouter, Router, Town};

use crate::{DistanceCache, MobilityResult};

/// Wraps a [`Router`] and a [`DistanceCache`] to move folks over the town.
///
/// # Type parameter
///
/// `R` answers shortest-distance queries for priority routing.  It defaults
/// to [`DijkstraRouter`]; swap it at compile time for a precomputed matrix.
pub struct Dispersal<R: Router = DijkstraRouter> {
    pub router: R,
    pub cache:  DistanceCache,
}

impl Default for Dispersal<DijkstraRouter> {
    fn default() -> Self {
        Self::new(DijkstraRouter)
    }
}

impl<R: Router> Dispersal<R> {
    pub fn new(router: R) -> Self {
        Self { router, cache: DistanceCache::new() }
    }

    /// Precompute distance rows for every location a folk will route from by
    /// priority on its next dispersal.  Returns how many sources were warmed.
    ///
    /// With the `parallel` feature the rows are computed on the Rayon pool.
    pub fn warm_priority_sources<S: Status, T>(
        &mut self,
        folks: &[Folk<S, T>],
        town:  &Town,
    ) -> MobilityResult<usize> {
        let sources: BTreeSet<NodeId> = folks
            .iter()
            .filter(|f| f.alive && !f.priority_places.is_empty())
            .map(|f| f.location)
            .collect();
        let sources: Vec<NodeId> = sources.into_iter().collect();
        self.cache.warm(&self.router, town, &sources)?;
        Ok(sources.len())
    }

    /// Move every folk that can move, in id order.  Returns how many changed
    /// location.
    pub fn disperse<S: Status, T>(
        &mut self,
        event: &StepEvent,
        folks: &mut [Folk<S, T>],
        town:  &Town,
        rng:   &mut SimRng,
    ) -> MobilityResult<usize> {
        let mut moved = 0;
        for folk in folks.iter_mut().filter(|f| f.can_move()) {
            if let Some(to) = self.destination(folk, event, town, rng)? {
                if to != folk.location {
                    moved += 1;
                }
                folk.location = to;
            }
        }
        Ok(moved)
    }

    /// Where `folk` goes this event, if anywhere.  Dequeues the matched
    /// priority place type when priority routing succeeds.
    pub fn destination<S: Status, T>(
        &mut self,
        folk:  &mut Folk<S, T>,
        event: &StepEvent,
        town:  &Town,
        rng:   &mut SimRng,
    ) -> MobilityResult<Option<NodeId>> {
        if !folk.priority_places.is_empty() {
            if let Some((node, place)) = self.nearest_priority(folk, town)? {
                folk.take_priority(place);
                return Ok(Some(node));
            }
        }
        let candidates = normal_candidates(folk.location, event, town);
        Ok(select(&candidates, event.mobility(), &*folk, rng))
    }

    /// Nearest reachable node, other than the current one, whose place type
    /// is queued.  Ties go to the lower node id.
    fn nearest_priority<S: Status, T>(
        &mut self,
        folk: &Folk<S, T>,
        town: &Town,
    ) -> MobilityResult<Option<(NodeId, PlaceType)>> {
        let dist = self.cache.distances_from(&self.router, town, folk.location)?;
        let mut best: Option<(NodeId, PlaceType, f64)> = None;
        for (i, &d) in dist.iter().enumerate() {
            let node = NodeId(i as u32);
            if node == folk.location || !d.is_finite() {
                continue;
            }
            let place = town.place_type(node);
            if !folk.priority_places.contains(&place) {
                continue;
            }
            if best.is_none_or(|(_, _, bd)| d < bd) {
                best = Some((node, place, d));
            }
        }
        Ok(best.map(|(node, place, _)| (node, place)))
    }
}

/// Direct neighbors of `from` within the event's distance cap whose place
/// type the event allows, with their edge lengths.  Parallel roads count
/// once, at their first listed length.
fn normal_candidates(from: NodeId, event: &StepEvent, town: &Town) -> Vec<(NodeId, f64)> {
    let mut out: Vec<(NodeId, f64)> = Vec::new();
    for (node, len) in town.neighbors(from) {
        if len <= event.max_distance()
            && event.allows(town.place_type(node))
            && !out.iter().any(|&(n, _)| n == node)
        {
            out.push((node, len));
        }
    }
    out
}

/// Pick one of `candidates`.  A lone candidate needs no draw.
fn select(
    candidates: &[(NodeId, f64)],
    mobility:   Option<&dyn MobilityFn>,
    folk:       &dyn FolkView,
    rng:        &mut SimRng,
) -> Option<NodeId> {
    match candidates {
        [] => return None,
        [(only, _)] => return Some(*only),
        _ => {}
    }
    if let Some(f) = mobility {
        let distances: Vec<f64> = candidates.iter().map(|&(_, d)| d).collect();
        let weights = f.weights(&distances, folk);
        if weights.len() == candidates.len() {
            if let Some(i) = rng.choose_weighted(&weights) {
                return Some(candidates[i].0);
            }
        }
        tracing::warn!(
            mobility = f.name(),
            folk = %folk.id(),
            candidates = candidates.len(),
            "destination weights are not a distribution; choosing uniformly"
        );
    }
    rng.choose(candidates).map(|&(node, _)| node)
}

/// Return every living folk to its home.
pub fn send_home<S: Status, T>(folks: &mut [Folk<S, T>]) {
    for folk in folks.iter_mut().filter(|f| f.alive) {
        folk.return_home();
    }
}
