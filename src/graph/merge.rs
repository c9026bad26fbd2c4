//! Disjoint union of the two clusters

use serde::{Deserialize, Serialize};

use crate::graph::{ClusterGraph, ClusterId, WeightedGraph};

/// Disjoint union of cluster 1 and cluster 2.
///
/// Cluster-1 node `i` is merged node `i`; cluster-2 node `i` is merged node `i + offset`.
/// The offset is fixed when the union is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedGraph {
    graph: WeightedGraph,
    offset: usize,
    cluster1_nodes: usize,
    cluster2_nodes: usize,
}

impl MergedGraph {
    /// Node offset applied to cluster-2 ids
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut WeightedGraph {
        &mut self.graph
    }

    pub fn cluster_nodes(&self, cluster: ClusterId) -> usize {
        match cluster {
            ClusterId::One => self.cluster1_nodes,
            ClusterId::Two => self.cluster2_nodes,
        }
    }

    /// Merged-graph id of a cluster-local node
    pub fn to_merged(&self, cluster: ClusterId, node: usize) -> usize {
        match cluster {
            ClusterId::One => node,
            ClusterId::Two => node + self.offset,
        }
    }

    /// True when the merged edge set and weights are exactly those of `g1` and `g2`
    /// under the offset mapping
    pub fn is_consistent_with(&self, g1: &ClusterGraph, g2: &ClusterGraph) -> bool {
        if self.graph.edge_count() != g1.edge_count() + g2.edge_count() {
            return false;
        }
        let maps = |cluster: ClusterId, g: &ClusterGraph| {
            g.edges().all(|(u, v, w)| {
                let (mu, mv) = (self.to_merged(cluster, u), self.to_merged(cluster, v));
                self.graph.weight(mu, mv) == Some(w)
            })
        };
        maps(ClusterId::One, g1) && maps(ClusterId::Two, g2)
    }

    /// Cluster and cluster-local id of a merged node, `None` if it belongs to neither
    pub fn to_cluster(&self, node: usize) -> Option<(ClusterId, usize)> {
        if node < self.cluster1_nodes {
            Some((ClusterId::One, node))
        } else if node >= self.offset && node < self.offset + self.cluster2_nodes {
            Some((ClusterId::Two, node - self.offset))
        } else {
            None
        }
    }
}

/// Build the disjoint union of `g1` and `g2`, copying edges and weights unchanged.
///
/// The offset is `max(g1 node ids) + 1`, which equals `g1.node_count()` for the
/// contiguous node sets the generator produces.
pub fn merge(g1: &ClusterGraph, g2: &ClusterGraph) -> MergedGraph {
    let offset = g1.max_node_id().map_or(0, |max| max + 1);
    let mut graph = WeightedGraph::with_nodes(offset + g2.node_count());

    for (u, v, w) in g1.edges() {
        graph.set_edge(u, v, w);
    }
    for (u, v, w) in g2.edges() {
        graph.set_edge(u + offset, v + offset, w);
    }

    MergedGraph {
        graph,
        offset,
        cluster1_nodes: g1.node_count(),
        cluster2_nodes: g2.node_count(),
    }
}
