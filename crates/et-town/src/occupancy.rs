//! Per-node resident lists.
//!
//! The simulation clears every list before each event and re-inserts each
//! living folk at its current node once movement is done.  Nodes holding at
//! least one folk are "active"; only those are scanned for interactions.

use std::collections::BTreeSet;

use et_core::{AgentId, NodeId};

#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    lists:  Vec<Vec<AgentId>>,
    active: BTreeSet<NodeId>,
}

impl Occupancy {
    pub fn new(node_count: usize) -> Self {
        Self { lists: vec![Vec::new(); node_count], active: BTreeSet::new() }
    }

    /// Empty every list, keeping allocations for the next event.
    pub fn clear(&mut self) {
        for node in std::mem::take(&mut self.active) {
            self.lists[node.index()].clear();
        }
    }

    /// Append `agent` to `node`'s list.
    #[inline]
    pub fn place(&mut self, node: NodeId, agent: AgentId) {
        self.lists[node.index()].push(agent);
        self.active.insert(node);
    }

    /// Residents of `node` in insertion order.
    #[inline]
    pub fn occupants(&self, node: NodeId) -> &[AgentId] {
        &self.lists[node.index()]
    }

    /// Non-empty nodes in ascending id order.
    pub fn active_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.active.iter().copied()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Total residents across all nodes.
    pub fn total(&self) -> usize {
        self.active.iter().map(|n| self.lists[n.index()].len()).sum()
    }
}
