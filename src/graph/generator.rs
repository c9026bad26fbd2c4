//! Random cluster construction

use clap::ValueEnum;
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::graph::{ClusterGraph, DEFAULT_WEIGHT};

/// Distribution edge weights and per-step deltas are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    /// Uniform on `[0, 1)`
    Uniform01,
    /// Always `1`
    Constant1,
}

/// Draw one weight. Consumes randomness only in `Uniform01` mode.
pub fn sample_weight<R: Rng>(mode: WeightMode, rng: &mut R) -> f64 {
    match mode {
        WeightMode::Uniform01 => rng.gen::<f64>(),
        WeightMode::Constant1 => 1.0,
    }
}

/// Erdős–Rényi graph on nodes `[0, n)`: each unordered pair `(i, j)`, `i < j`, is
/// visited in lexicographic order and kept with probability `p`.
///
/// Every edge starts with the default weight; see [`assign_weights`].
pub fn generate(n: usize, p: f64, seed: u64) -> Result<ClusterGraph> {
    if n < 1 {
        return Err(SimError::invalid("n", "a cluster needs at least one node"));
    }
    if !(p > 0.0 && p <= 1.0) {
        return Err(SimError::invalid("p", format!("edge probability must be in (0, 1], got {}", p)));
    }

    let mut graph = ClusterGraph::with_nodes(n);

    if p >= 1.0 {
        for (i, j) in (0..n).tuple_combinations() {
            graph.set_edge(i, j, DEFAULT_WEIGHT);
        }
        return Ok(graph);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for (i, j) in (0..n).tuple_combinations() {
        if rng.gen::<f64>() < p {
            graph.set_edge(i, j, DEFAULT_WEIGHT);
        }
    }

    log::debug!(
        "Generated G({}, {}) with seed {}: {} edges",
        n, p, seed, graph.edge_count()
    );

    Ok(graph)
}

/// Overwrite every edge weight with a fresh sample, in edge insertion order
pub fn assign_weights<R: Rng>(graph: &mut ClusterGraph, mode: WeightMode, rng: &mut R) {
    for weight in graph.edge_weights_mut() {
        *weight = sample_weight(mode, rng);
    }
}
