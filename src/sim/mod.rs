//! Simulation driver: reset, advance and read access to the evolving state

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_step, StepHistory, StepRecord};
use crate::centrality::cluster_centralities;
use crate::config::SimConfig;
use crate::error::Result;
use crate::graph::generator::{assign_weights, generate, sample_weight};
use crate::graph::merge::merge;
use crate::graph::update::{self, GraphSet};
use crate::graph::{ClusterGraph, ClusterId, MergedGraph};

/// Node pairs that transact in each cluster per step
pub const TRANSACTIONS_PER_CLUSTER: usize = 2;

/// Graphs plus the random source, the part of the state a step mutates
#[derive(Debug, Clone, Serialize, Deserialize)]
struct World {
    cluster1: ClusterGraph,
    cluster2: ClusterGraph,
    merged: MergedGraph,
    rng: ChaCha8Rng,
}

impl World {
    fn graphs(&mut self) -> GraphSet<'_> {
        GraphSet {
            cluster1: &mut self.cluster1,
            cluster2: &mut self.cluster2,
            merged: &mut self.merged,
        }
    }

    fn cluster(&self, cluster: ClusterId) -> &ClusterGraph {
        match cluster {
            ClusterId::One => &self.cluster1,
            ClusterId::Two => &self.cluster2,
        }
    }

    fn measure(&self, step: usize, config: &SimConfig) -> Result<StepRecord> {
        let (c1, c2) = cluster_centralities(
            config.ec_scope,
            &self.cluster1,
            &self.cluster2,
            &self.merged,
            config.use_weight_for_ec,
            &config.centrality,
        )?;
        Ok(aggregate_step(step, c1, c2, &self.cluster1, &self.cluster2))
    }
}

/// Complete simulation state, passed explicitly into and out of the driver.
///
/// The random source is owned by the state, so a state rebuilt from the same
/// base seed replays every step identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    config: SimConfig,
    base_seed: u64,
    step: usize,
    world: World,
    history: StepHistory,
}

impl SimulationState {
    /// Build both clusters, merge them and record step 0.
    ///
    /// Cluster structure is seeded with `base_seed + 1` and `base_seed + 2`; weights and
    /// every later step draw from a generator seeded with `base_seed`.
    pub fn reset(config: &SimConfig, base_seed: u64) -> Result<Self> {
        config.validate()?;

        let mut cluster1 = generate(config.n1, config.p1, base_seed.wrapping_add(1))?;
        let mut cluster2 = generate(config.n2, config.p2, base_seed.wrapping_add(2))?;

        let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
        assign_weights(&mut cluster1, config.weight_mode, &mut rng);
        assign_weights(&mut cluster2, config.weight_mode, &mut rng);

        let merged = merge(&cluster1, &cluster2);
        let world = World { cluster1, cluster2, merged, rng };

        let record = world.measure(0, config)?;
        let mut history = StepHistory::new();
        history.push(record);

        log::info!(
            "Reset with seed {}: cluster 1 has {} nodes / {} edges, cluster 2 has {} nodes / {} edges, offset {}",
            base_seed,
            world.cluster1.node_count(),
            world.cluster1.edge_count(),
            world.cluster2.node_count(),
            world.cluster2.edge_count(),
            world.merged.offset()
        );

        Ok(Self {
            config: config.clone(),
            base_seed,
            step: 0,
            world,
            history,
        })
    }

    /// Run one step: two random transactions per cluster, then recompute centrality
    /// and weight aggregates and append them to the history.
    ///
    /// On failure the state is left exactly as it was before the call.
    pub fn advance(&mut self) -> Result<()> {
        let mut next = self.world.clone();

        for _ in 0..TRANSACTIONS_PER_CLUSTER {
            for cluster in ClusterId::ALL {
                let n = next.cluster(cluster).node_count();
                let u = next.rng.gen_range(0..n);
                let v = next.rng.gen_range(0..n);
                let delta = sample_weight(self.config.weight_mode, &mut next.rng);
                update::apply_update(&mut next.graphs(), cluster.as_u8(), u, v, delta)?;
            }
        }
        debug_assert!(next.merged.is_consistent_with(&next.cluster1, &next.cluster2));

        let step = self.step + 1;
        let record = next.measure(step, &self.config)?;

        log::debug!(
            "Step {}: centrality sums {:.4} / {:.4}, weight sums {:.4} / {:.4}",
            step,
            record.centrality_sums.cluster1,
            record.centrality_sums.cluster2,
            record.weight_sums.cluster1,
            record.weight_sums.cluster2
        );

        self.world = next;
        self.history.push(record);
        self.step = step;
        Ok(())
    }

    /// Add `delta` to edge `(u, v)` of cluster `cluster_id` outside a step. The history
    /// is not touched; the change is measured by the next `advance`.
    pub fn apply_update(&mut self, cluster_id: u8, u: usize, v: usize, delta: f64) -> Result<()> {
        update::apply_update(&mut self.world.graphs(), cluster_id, u, v, delta)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Index of the most recently recorded step
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn cluster(&self, cluster: ClusterId) -> &ClusterGraph {
        self.world.cluster(cluster)
    }

    pub fn cluster1(&self) -> &ClusterGraph {
        &self.world.cluster1
    }

    pub fn cluster2(&self) -> &ClusterGraph {
        &self.world.cluster2
    }

    pub fn merged(&self) -> &MergedGraph {
        &self.world.merged
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    /// Record for the current step
    pub fn current(&self) -> Option<StepRecord> {
        self.history.record(self.step)
    }
}

/// Start a new simulation, discarding any previous one
pub fn reset(config: &SimConfig, base_seed: u64) -> Result<SimulationState> {
    SimulationState::reset(config, base_seed)
}

/// Advance `state` by one step
pub fn advance(state: &mut SimulationState) -> Result<()> {
    state.advance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::EcScope;
    use crate::config::CentralityConfig;
    use crate::error::SimError;
    use crate::graph::generator::WeightMode;

    fn complete_config(weight_mode: WeightMode, ec_scope: EcScope) -> SimConfig {
        SimConfig::new(4, 1.0, 6, 1.0, weight_mode, ec_scope, true)
    }

    #[test]
    fn reset_records_step_zero() {
        let state = reset(&complete_config(WeightMode::Constant1, EcScope::Separate), 5).unwrap();

        assert_eq!(state.step(), 0);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.cluster1().edge_count(), 6);
        assert_eq!(state.cluster2().edge_count(), 15);
        assert_eq!(state.merged().offset(), 4);

        // K4 with unit weights: each node has weight sum 3
        let record = state.current().unwrap();
        assert_eq!(record.weight_sum_cluster1, vec![3.0; 4]);
        assert_eq!(record.weight_sums.cluster1, 12.0);
        assert_eq!(record.weight_sums.cluster2, 30.0);
        assert_eq!(record.weight_sums.total, 42.0);
    }

    #[test]
    fn reset_rejects_invalid_parameters() {
        let config = SimConfig { p2: 0.0, ..SimConfig::default() };
        assert!(matches!(reset(&config, 1), Err(SimError::InvalidParameter { name: "p2", .. })));
    }

    #[test]
    fn advance_with_constant_weights_adds_eight() {
        // Four transactions of weight 1, each counted at both endpoints
        let mut state = reset(&complete_config(WeightMode::Constant1, EcScope::Together), 17).unwrap();
        let before = state.current().unwrap().weight_sums.total;
        state.advance().unwrap();
        let after = state.current().unwrap().weight_sums.total;

        assert_eq!(state.step(), 1);
        assert_eq!(after - before, 8.0);
        assert!(state.merged().is_consistent_with(state.cluster1(), state.cluster2()));
    }

    #[test]
    fn failed_step_leaves_state_untouched() {
        let mut config = complete_config(WeightMode::Uniform01, EcScope::Separate);
        config.centrality = CentralityConfig { max_iter: 1000, tol: 1e-2 };
        let mut state = reset(&config, 3).unwrap();

        // Force the next measurement to fail
        state.config.centrality = CentralityConfig { max_iter: 1, tol: 1e-300 };
        let snapshot = serde_json::to_string(&state).unwrap();

        assert!(state.advance().unwrap_err().is_convergence());
        assert_eq!(serde_json::to_string(&state).unwrap(), snapshot);
        assert_eq!(state.step(), 0);
    }

    #[test]
    fn manual_update_is_visible_to_both_graphs() {
        let mut state = reset(&complete_config(WeightMode::Constant1, EcScope::Separate), 8).unwrap();
        state.apply_update(2, 5, 5, 0.5).unwrap();

        assert_eq!(state.cluster2().weight(5, 5), Some(0.5));
        assert_eq!(state.merged().graph().weight(9, 9), Some(0.5));
        assert!(matches!(state.apply_update(0, 0, 0, 1.0), Err(SimError::UnknownCluster(0))));
    }
}
