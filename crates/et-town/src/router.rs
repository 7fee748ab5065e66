//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The dispersal engine asks for shortest distances through the [`Router`]
//! trait, so applications can swap in a precomputed distance matrix or a
//! different metric without touching the engine.
//!
//! # Units
//!
//! Distances are metres (`f64`).  Unreachable nodes report `f64::INFINITY`.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use et_core::NodeId;

use crate::{Town, TownError, TownResult};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-distance engine.
pub trait Router: Send + Sync {
    /// Shortest travel distance from `from` to every node, indexed by
    /// `NodeId`.  `from` itself is `0.0`; unreachable nodes are infinite.
    fn distances_from(&self, town: &Town, from: NodeId) -> TownResult<Vec<f64>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Single-source Dijkstra over the CSR town graph using `edge_length_m` as
/// cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn distances_from(&self, town: &Town, from: NodeId) -> TownResult<Vec<f64>> {
        if !town.contains(from) {
            return Err(TownError::NodeNotFound(from));
        }
        Ok(dijkstra(town, from))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total order over non-negative distances for the heap.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(town: &Town, from: NodeId) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; town.node_count()];
    dist[from.index()] = 0.0;

    // Min-heap: (cost, node).  Secondary key NodeId keeps tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for (neighbor, length) in town.neighbors(node) {
            let new_cost = cost + length;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    dist
}
