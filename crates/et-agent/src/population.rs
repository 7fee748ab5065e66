//! The folk collection owned by a running simulation.

use std::collections::BTreeSet;

use et_core::{AgentId, NodeId, SimRng};

use crate::{Folk, Status, StatusTally};

/// All folks of a run plus the set of nodes somebody calls home.
///
/// Folks are never removed: a dead folk keeps its slot (and id) so that
/// individual logs stay aligned.  `AgentId(i)` is always `folks[i]`.
#[derive(Clone, Debug)]
pub struct Population<S, T = ()> {
    folks:      Vec<Folk<S, T>>,
    households: BTreeSet<NodeId>,
    max_energy: u32,
}

impl<S: Status, T> Population<S, T> {
    pub fn new(max_energy: u32) -> Self {
        Self { folks: Vec::new(), households: BTreeSet::new(), max_energy }
    }

    /// Add a folk living at `home` and return its id.
    pub fn spawn(&mut self, home: NodeId, status: S, traits: T, rng: &mut SimRng) -> AgentId {
        let id = AgentId(self.folks.len() as u32);
        self.folks.push(Folk::new(id, home, status, self.max_energy, traits, rng));
        self.households.insert(home);
        id
    }

    pub fn len(&self) -> usize {
        self.folks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folks.is_empty()
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> &Folk<S, T> {
        &self.folks[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> &mut Folk<S, T> {
        &mut self.folks[id.index()]
    }

    pub fn folks(&self) -> &[Folk<S, T>] {
        &self.folks
    }

    pub fn folks_mut(&mut self) -> &mut [Folk<S, T>] {
        &mut self.folks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Folk<S, T>> {
        self.folks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Folk<S, T>> {
        self.folks.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + use<S, T> {
        (0..self.folks.len() as u32).map(AgentId)
    }

    /// Nodes that are home to at least one folk, ascending.
    pub fn households(&self) -> &BTreeSet<NodeId> {
        &self.households
    }

    pub fn living_count(&self) -> usize {
        self.folks.iter().filter(|f| f.alive).count()
    }

    /// Fresh tally counting every folk's current status.
    pub fn tally(&self) -> StatusTally<S> {
        StatusTally::from_statuses(self.folks.iter().map(|f| f.status))
    }
}
