//! Weight-update engine: keeps a cluster graph and the merged graph in step

use crate::error::{Result, SimError};
use crate::graph::{ClusterGraph, ClusterId, MergedGraph};

/// Mutable view over the three graphs a weight update touches
pub struct GraphSet<'a> {
    pub cluster1: &'a mut ClusterGraph,
    pub cluster2: &'a mut ClusterGraph,
    pub merged: &'a mut MergedGraph,
}

impl GraphSet<'_> {
    fn cluster_mut(&mut self, cluster: ClusterId) -> &mut ClusterGraph {
        match cluster {
            ClusterId::One => &mut *self.cluster1,
            ClusterId::Two => &mut *self.cluster2,
        }
    }
}

/// Add `delta` to edge `(u, v)` of cluster `cluster_id` and to the mapped edge of the
/// merged graph, creating either edge if it does not exist yet.
///
/// `u` and `v` are cluster-local ids and may be equal.
pub fn apply_update(graphs: &mut GraphSet<'_>, cluster_id: u8, u: usize, v: usize, delta: f64) -> Result<()> {
    let cluster = ClusterId::try_from(cluster_id)?;
    let size = graphs.cluster_mut(cluster).node_count();
    for node in [u, v] {
        if node >= size {
            return Err(SimError::NodeOutOfRange { cluster: cluster_id, node, size });
        }
    }

    let cluster_weight = graphs.cluster_mut(cluster).add_weight(u, v, delta);

    let (mu, mv) = (graphs.merged.to_merged(cluster, u), graphs.merged.to_merged(cluster, v));
    let merged_weight = graphs.merged.graph_mut().add_weight(mu, mv, delta);

    log::debug!(
        "{} edge ({}, {}) += {:.4} -> {:.4} (merged ({}, {}) -> {:.4})",
        cluster, u, v, delta, cluster_weight, mu, mv, merged_weight
    );

    Ok(())
}
