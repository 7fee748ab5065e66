//! Town network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Roads are undirected, so every road is stored as two directed edges.
//! Edge arrays are sorted by source node and indexed by `EdgeId`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Used
//! to place spreaders or facilities given only a coordinate.

use std::collections::BTreeSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use et_core::{EdgeId, GeoPoint, NodeId, PlaceType};

use crate::{TownError, TownMetadata, TownResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough for
    /// nearest-node queries inside one town.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Town ──────────────────────────────────────────────────────────────────────

/// Undirected weighted town graph in CSR format, with a place type on every
/// node.
///
/// The topology never changes during a run.  Do not construct directly; use
/// [`TownBuilder`].
pub struct Town {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Place type of each node.  Indexed by `NodeId`.
    pub node_place: Vec<PlaceType>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from: Vec<NodeId>,
    pub edge_to:   Vec<NodeId>,

    /// Travel distance of each edge in metres.
    pub edge_length_m: Vec<f64>,

    // ── Derived lookups ───────────────────────────────────────────────────
    accommodation: Vec<NodeId>,
    place_types:   BTreeSet<PlaceType>,
    metadata:      TownMetadata,
    spatial_idx:   RTree<NodeEntry>,
}

impl Town {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Node attributes ───────────────────────────────────────────────────

    #[inline]
    pub fn place_type(&self, node: NodeId) -> PlaceType {
        self.node_place[node.index()]
    }

    /// Every node tagged `Accommodation`, in ascending id order.  These are
    /// the only valid homes.
    pub fn accommodation_nodes(&self) -> &[NodeId] {
        &self.accommodation
    }

    /// The set of place types present on at least one node.
    pub fn found_place_types(&self) -> &BTreeSet<PlaceType> {
        &self.place_types
    }

    /// Required types that no node carries, in the order given.
    pub fn missing_place_types(&self, required: &[PlaceType]) -> Vec<PlaceType> {
        required
            .iter()
            .copied()
            .filter(|p| !self.place_types.contains(p))
            .collect()
    }

    pub fn metadata(&self) -> &TownMetadata {
        &self.metadata
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// `(neighbor, distance_m)` for every road leaving `node`.
    ///
    /// Neighbors appear in the order their roads were added, which keeps
    /// candidate lists (and therefore the random draws over them) stable.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length_m[e.index()]))
    }

    /// Distance of the shortest direct road from `a` to `b`, if one exists.
    pub fn edge_length(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbors(a)
            .filter(|&(n, _)| n == b)
            .map(|(_, d)| d)
            .min_by(f64::total_cmp)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the town has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── TownBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Town`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use et_core::{GeoPoint, PlaceType};
/// use et_town::TownBuilder;
///
/// let mut b = TownBuilder::new();
/// let home = b.add_node(GeoPoint::new(50.77, 6.08), PlaceType::Accommodation);
/// let work = b.add_node(GeoPoint::new(50.78, 6.09), PlaceType::Workplace);
/// b.add_road(home, work, 1_200.0);
/// let town = b.build().unwrap();
/// assert_eq!(town.node_count(), 2);
/// assert_eq!(town.edge_count(), 2); // bidirectional
/// ```
pub struct TownBuilder {
    nodes:     Vec<(GeoPoint, PlaceType)>,
    raw_edges: Vec<RawEdge>,
    metadata:  TownMetadata,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl TownBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new(), metadata: TownMetadata::default() }
    }

    pub fn with_capacity(nodes: usize, roads: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(roads * 2),
            metadata:  TownMetadata::default(),
        }
    }

    pub fn metadata(mut self, metadata: TownMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint, place: PlaceType) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push((pos, place));
        id
    }

    /// Add an undirected road of `length_m` metres between `a` and `b`.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.raw_edges.push(RawEdge { from: a, to: b, length_m });
        self.raw_edges.push(RawEdge { from: b, to: a, length_m });
    }

    /// Add a road whose length is the great-circle distance between the two
    /// node positions.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        let length_m = match (self.nodes.get(a.index()), self.nodes.get(b.index())) {
            (Some((pa, _)), Some((pb, _))) => pa.distance_m(*pb) as f64,
            // Left for `build` to reject.
            _ => f64::NAN,
        };
        self.add_road(a, b, length_m);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`Town`].
    ///
    /// Fails if a road references an unknown node or has a negative or
    /// non-finite length.  Self-loops are rejected too: a folk never travels
    /// to the node it is already on.
    pub fn build(self) -> TownResult<Town> {
        let node_count = self.nodes.len();

        for e in &self.raw_edges {
            for n in [e.from, e.to] {
                if n.index() >= node_count {
                    return Err(TownError::NodeNotFound(n));
                }
            }
            if e.from == e.to {
                return Err(TownError::InvalidEdge { from: e.from, to: e.to, reason: "self-loop" });
            }
            if !e.length_m.is_finite() || e.length_m < 0.0 {
                return Err(TownError::InvalidEdge {
                    from: e.from,
                    to: e.to,
                    reason: "length must be finite and non-negative",
                });
            }
        }

        // Stable sort keeps insertion order within a node's edge slice.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let node_pos:   Vec<GeoPoint>  = self.nodes.iter().map(|&(p, _)| p).collect();
        let node_place: Vec<PlaceType> = self.nodes.iter().map(|&(_, t)| t).collect();

        let accommodation = node_place
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == PlaceType::Accommodation)
            .map(|(i, _)| NodeId(i as u32))
            .collect();
        let place_types = node_place.iter().copied().collect();

        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { point: [pos.lat, pos.lon], id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(Town {
            node_pos,
            node_place,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            accommodation,
            place_types,
            metadata: self.metadata,
            spatial_idx,
        })
    }
}

impl Default for TownBuilder {
    fn default() -> Self {
        Self::new()
    }
}
