//! Eigenvector centrality by power iteration

use clap::ValueEnum;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::config::CentralityConfig;
use crate::error::{ConvergenceFailure, Result, SimError};
use crate::graph::{ClusterGraph, ClusterId, MergedGraph, WeightedGraph};

/// Centrality value per node id
pub type CentralityVector = Vec<f64>;

/// Which graph(s) centrality is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EcScope {
    /// One global centrality over the merged graph
    Together,
    /// Two local centralities, one per cluster graph
    Separate,
}

/// Dense `A + I`, where `A[u][v]` is the edge weight (or 1 when `use_weight` is false).
/// A self-loop adds its weight once to the diagonal.
fn shifted_adjacency(graph: &WeightedGraph, use_weight: bool) -> Array2<f64> {
    let n = graph.node_count();
    let mut matrix = Array2::<f64>::eye(n);
    for (u, v, w) in graph.edges() {
        let entry = if use_weight { w } else { 1.0 };
        matrix[[u, v]] += entry;
        if u != v {
            matrix[[v, u]] += entry;
        }
    }
    matrix
}

/// Dominant eigenvector of the (optionally weighted) adjacency matrix.
///
/// Starts from the uniform vector and iterates with the identity-shifted matrix so that
/// bipartite structure does not oscillate. The result has unit Euclidean norm and
/// non-negative entries. Stops once the L1 change between iterates drops below
/// `n * config.tol`; fails after `config.max_iter` iterations, or immediately when the
/// graph has no edges.
pub fn eigenvector_centrality(
    graph: &WeightedGraph,
    use_weight: bool,
    config: &CentralityConfig,
) -> Result<CentralityVector> {
    let n = graph.node_count();
    if graph.edge_count() == 0 {
        return Err(SimError::Convergence(ConvergenceFailure::NoEdges { nodes: n }));
    }

    let matrix = shifted_adjacency(graph, use_weight);
    let threshold = n as f64 * config.tol;
    let mut x = Array1::<f64>::from_elem(n, 1.0 / n as f64);
    let mut residual = f64::INFINITY;

    for iteration in 1..=config.max_iter {
        let mut next = matrix.dot(&x);
        let norm = next.dot(&next).sqrt();
        if norm > 0.0 {
            next /= norm;
        }

        residual = (&next - &x).mapv(f64::abs).sum();
        x = next;

        if residual < threshold {
            log::trace!("Power iteration converged after {} iterations", iteration);
            return Ok(sign_normalize(x.to_vec()));
        }
    }

    log::warn!(
        "Power iteration did not converge on {} nodes after {} iterations",
        n, config.max_iter
    );
    Err(SimError::Convergence(ConvergenceFailure::IterationLimit {
        iterations: config.max_iter,
        residual,
    }))
}

/// Flip the vector if its mass is negative so every component is non-negative
fn sign_normalize(mut x: Vec<f64>) -> Vec<f64> {
    if x.iter().sum::<f64>() < 0.0 {
        x.iter_mut().for_each(|v| *v = -*v);
    }
    // Clamp rounding noise around zero
    x.iter_mut().for_each(|v| *v = v.max(0.0));
    x
}

/// Centrality of every cluster node under the chosen scope, returned per cluster in
/// cluster-local node order.
///
/// `Together` computes once over the merged graph and splits the vector by the merge
/// offset; `Separate` computes on each cluster graph independently.
pub fn cluster_centralities(
    scope: EcScope,
    cluster1: &ClusterGraph,
    cluster2: &ClusterGraph,
    merged: &MergedGraph,
    use_weight: bool,
    config: &CentralityConfig,
) -> Result<(CentralityVector, CentralityVector)> {
    match scope {
        EcScope::Together => {
            let global = eigenvector_centrality(merged.graph(), use_weight, config)?;
            let split = |cluster: ClusterId| -> CentralityVector {
                (0..merged.cluster_nodes(cluster))
                    .map(|node| global[merged.to_merged(cluster, node)])
                    .collect()
            };
            Ok((split(ClusterId::One), split(ClusterId::Two)))
        }
        EcScope::Separate => {
            let c1 = eigenvector_centrality(cluster1, use_weight, config)?;
            let c2 = eigenvector_centrality(cluster2, use_weight, config)?;
            Ok((c1, c2))
        }
    }
}
