//! Sparse cache of shortest-distance rows.

use std::collections::hash_map::Entry;

use et_core::NodeId;
use et_town::{Router, Town, TownResult};

#[cfg(feature = "fx-hash")]
type RowMap = rustc_hash::FxHashMap<NodeId, Vec<f64>>;
#[cfg(not(feature = "fx-hash"))]
type RowMap = std::collections::HashMap<NodeId, Vec<f64>>;

/// Shortest distances from a source node to every node, computed on first
/// request and kept for the rest of the run.
///
/// The town never changes during a run, so a row never goes stale.  Only
/// nodes that folks actually route from get a row: with priority routing
/// that is mostly homes and a handful of destinations.
#[derive(Default)]
pub struct DistanceCache {
    rows: RowMap,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The row for `from`, computing it with `router` on a miss.
    pub fn distances_from<R: Router + ?Sized>(
        &mut self,
        router: &R,
        town:   &Town,
        from:   NodeId,
    ) -> TownResult<&[f64]> {
        match self.rows.entry(from) {
            Entry::Occupied(e) => Ok(e.into_mut().as_slice()),
            Entry::Vacant(e) => Ok(e.insert(router.distances_from(town, from)?).as_slice()),
        }
    }

    /// Compute rows for every node in `sources` that has none yet.
    pub fn warm<R: Router + ?Sized>(
        &mut self,
        router:  &R,
        town:    &Town,
        sources: &[NodeId],
    ) -> TownResult<()> {
        let missing: Vec<NodeId> = sources
            .iter()
            .copied()
            .filter(|n| !self.rows.contains_key(n))
            .collect();

        #[cfg(feature = "parallel")]
        let rows: Vec<(NodeId, Vec<f64>)> = {
            use rayon::prelude::*;
            missing
                .into_par_iter()
                .map(|n| router.distances_from(town, n).map(|row| (n, row)))
                .collect::<TownResult<_>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<(NodeId, Vec<f64>)> = missing
            .into_iter()
            .map(|n| router.distances_from(town, n).map(|row| (n, row)))
            .collect::<TownResult<_>>()?;

        self.rows.extend(rows);
        Ok(())
    }

    #[inline]
    pub fn contains(&self, from: NodeId) -> bool {
        self.rows.contains_key(&from)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
