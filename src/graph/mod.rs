//! Weighted graph representation and the engines that build and mutate it

pub mod generator;
pub mod merge;
pub mod update;

pub use merge::MergedGraph;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Weight an edge carries when nothing else has been assigned
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Identifies one of the two clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterId {
    One,
    Two,
}

impl ClusterId {
    pub const ALL: [ClusterId; 2] = [ClusterId::One, ClusterId::Two];

    pub fn as_u8(self) -> u8 {
        match self {
            ClusterId::One => 1,
            ClusterId::Two => 2,
        }
    }
}

impl TryFrom<u8> for ClusterId {
    type Error = SimError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(ClusterId::One),
            2 => Ok(ClusterId::Two),
            other => Err(SimError::UnknownCluster(other)),
        }
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cluster {}", self.as_u8())
    }
}

/// Undirected weighted graph over a fixed, contiguous node set `[0, n)`.
///
/// Nodes are created once; only edges and their weights change afterwards.
/// At most one edge exists per unordered pair, self-loops allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedGraph {
    graph: UnGraph<(), f64>,
}

/// A single cluster's graph
pub type ClusterGraph = WeightedGraph;

impl WeightedGraph {
    /// Create a graph with `node_count` isolated nodes
    pub fn with_nodes(node_count: usize) -> Self {
        let mut graph = UnGraph::<(), f64>::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node ids in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.graph.node_indices().map(|n| n.index())
    }

    /// Largest node id, `None` for an empty graph
    pub fn max_node_id(&self) -> Option<usize> {
        self.nodes().max()
    }

    pub fn contains_node(&self, node: usize) -> bool {
        node < self.node_count()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.weight(u, v).is_some()
    }

    /// Weight of the edge between `u` and `v`, if present
    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        if !self.contains_node(u) || !self.contains_node(v) {
            return None;
        }
        self.graph
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))
            .and_then(|e| self.graph.edge_weight(e).copied())
    }

    /// Insert an edge with the given weight. An existing edge is overwritten, never duplicated.
    ///
    /// Panics if either endpoint is not a node of this graph.
    pub fn set_edge(&mut self, u: usize, v: usize, weight: f64) {
        self.graph.update_edge(NodeIndex::new(u), NodeIndex::new(v), weight);
    }

    /// Increment the weight of `(u, v)` by `delta`, creating the edge with weight `delta`
    /// if it is absent. Returns the resulting weight.
    ///
    /// Panics if either endpoint is not a node of this graph.
    pub fn add_weight(&mut self, u: usize, v: usize, delta: f64) -> f64 {
        let (a, b) = (NodeIndex::new(u), NodeIndex::new(v));
        match self.graph.find_edge(a, b) {
            Some(edge) => {
                let weight = &mut self.graph[edge];
                *weight += delta;
                *weight
            }
            None => {
                self.graph.add_edge(a, b, delta);
                delta
            }
        }
    }

    /// Edges as `(u, v, weight)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Mutable edge weights in insertion order
    pub(crate) fn edge_weights_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.graph.edge_weights_mut()
    }

    /// Sum of all edge weights, each edge counted once
    pub fn total_edge_weight(&self) -> f64 {
        self.edges().map(|(_, _, w)| w).sum()
    }

    /// The underlying petgraph structure
    pub fn as_petgraph(&self) -> &UnGraph<(), f64> {
        &self.graph
    }
}
