//! Per-node weight sums, per-cluster totals and the step history

use serde::{Deserialize, Serialize};

use crate::centrality::CentralityVector;
use crate::graph::WeightedGraph;

/// Sum of incident edge weights per node id. Isolated nodes map to 0; a self-loop
/// is incident at both ends and counts twice.
pub fn node_weight_sums(graph: &WeightedGraph) -> Vec<f64> {
    let mut sums = vec![0.0; graph.node_count()];
    for (u, v, w) in graph.edges() {
        sums[u] += w;
        sums[v] += w;
    }
    sums
}

/// Cluster-1 sum, cluster-2 sum and their total at one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SumRow {
    pub step: usize,
    pub cluster1: f64,
    pub cluster2: f64,
    pub total: f64,
}

impl SumRow {
    pub fn new(step: usize, cluster1: &[f64], cluster2: &[f64]) -> Self {
        let cluster1: f64 = cluster1.iter().sum();
        let cluster2: f64 = cluster2.iter().sum();
        Self {
            step,
            cluster1,
            cluster2,
            total: cluster1 + cluster2,
        }
    }
}

/// Everything recorded for a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub centrality_cluster1: CentralityVector,
    pub centrality_cluster2: CentralityVector,
    pub centrality_sums: SumRow,
    pub weight_sum_cluster1: Vec<f64>,
    pub weight_sum_cluster2: Vec<f64>,
    pub weight_sums: SumRow,
}

/// Combine per-cluster centrality and the clusters' current weights into one record
pub fn aggregate_step(
    step: usize,
    centrality_cluster1: CentralityVector,
    centrality_cluster2: CentralityVector,
    cluster1: &WeightedGraph,
    cluster2: &WeightedGraph,
) -> StepRecord {
    let weight_sum_cluster1 = node_weight_sums(cluster1);
    let weight_sum_cluster2 = node_weight_sums(cluster2);

    StepRecord {
        step,
        centrality_sums: SumRow::new(step, &centrality_cluster1, &centrality_cluster2),
        weight_sums: SumRow::new(step, &weight_sum_cluster1, &weight_sum_cluster2),
        centrality_cluster1,
        centrality_cluster2,
        weight_sum_cluster1,
        weight_sum_cluster2,
    }
}

/// Append-only history, one entry per step in every sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepHistory {
    centrality_cluster1: Vec<CentralityVector>,
    centrality_cluster2: Vec<CentralityVector>,
    centrality_sums: Vec<SumRow>,
    weight_sum_cluster1: Vec<Vec<f64>>,
    weight_sum_cluster2: Vec<Vec<f64>>,
    weight_sums: Vec<SumRow>,
}

impl StepHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StepRecord) {
        debug_assert_eq!(record.step, self.len(), "steps are recorded in order from 0");
        self.centrality_cluster1.push(record.centrality_cluster1);
        self.centrality_cluster2.push(record.centrality_cluster2);
        self.centrality_sums.push(record.centrality_sums);
        self.weight_sum_cluster1.push(record.weight_sum_cluster1);
        self.weight_sum_cluster2.push(record.weight_sum_cluster2);
        self.weight_sums.push(record.weight_sums);
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.centrality_sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn centrality_cluster1(&self) -> &[CentralityVector] {
        &self.centrality_cluster1
    }

    pub fn centrality_cluster2(&self) -> &[CentralityVector] {
        &self.centrality_cluster2
    }

    pub fn centrality_sums(&self) -> &[SumRow] {
        &self.centrality_sums
    }

    pub fn weight_sum_cluster1(&self) -> &[Vec<f64>] {
        &self.weight_sum_cluster1
    }

    pub fn weight_sum_cluster2(&self) -> &[Vec<f64>] {
        &self.weight_sum_cluster2
    }

    pub fn weight_sums(&self) -> &[SumRow] {
        &self.weight_sums
    }

    /// Reassemble the record for `step`
    pub fn record(&self, step: usize) -> Option<StepRecord> {
        Some(StepRecord {
            step,
            centrality_cluster1: self.centrality_cluster1.get(step)?.clone(),
            centrality_cluster2: self.centrality_cluster2.get(step)?.clone(),
            centrality_sums: *self.centrality_sums.get(step)?,
            weight_sum_cluster1: self.weight_sum_cluster1.get(step)?.clone(),
            weight_sum_cluster2: self.weight_sum_cluster2.get(step)?.clone(),
            weight_sums: *self.weight_sums.get(step)?,
        })
    }

    pub fn latest(&self) -> Option<StepRecord> {
        self.len().checked_sub(1).and_then(|step| self.record(step))
    }
}
