//! Property-based tests using proptest
//!
//! Graph construction, merging and weight updates must keep the cluster graphs and
//! the merged graph derivable from one another after every mutation.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cluster_centrality_sim::aggregate::node_weight_sums;
use cluster_centrality_sim::centrality::EcScope;
use cluster_centrality_sim::graph::generator::{assign_weights, generate, WeightMode};
use cluster_centrality_sim::graph::merge::merge;
use cluster_centrality_sim::graph::update::{apply_update, GraphSet};
use cluster_centrality_sim::graph::{ClusterGraph, ClusterId, MergedGraph};
use cluster_centrality_sim::{reset, SimConfig};

// ============================================================================
// Strategies and helpers
// ============================================================================

fn weight_mode() -> impl Strategy<Value = WeightMode> {
    prop_oneof![Just(WeightMode::Uniform01), Just(WeightMode::Constant1)]
}

/// Weighted random cluster: `(n, p, structure seed, weight seed, mode)`
fn cluster() -> impl Strategy<Value = ClusterGraph> {
    (1usize..=20, 0.05f64..=1.0, any::<u64>(), any::<u64>(), weight_mode()).prop_map(
        |(n, p, seed, weight_seed, mode)| {
            let mut g = generate(n, p, seed).unwrap();
            assign_weights(&mut g, mode, &mut ChaCha8Rng::seed_from_u64(weight_seed));
            g
        },
    )
}

/// Cluster id, two raw endpoints (reduced modulo the cluster size) and a delta
fn update() -> impl Strategy<Value = (ClusterId, usize, usize, f64)> {
    (
        prop_oneof![Just(ClusterId::One), Just(ClusterId::Two)],
        0usize..1000,
        0usize..1000,
        0.0f64..1.0,
    )
}

/// Incident weight sum recomputed straight from the edge list
fn incident_weight(graph: &ClusterGraph, node: usize) -> f64 {
    graph
        .edges()
        .map(|(u, v, w)| {
            let ends = (u == node) as u8 + (v == node) as u8;
            w * ends as f64
        })
        .sum()
}

fn assert_bijection(merged: &MergedGraph, g1: &ClusterGraph, g2: &ClusterGraph) -> Result<(), TestCaseError> {
    prop_assert_eq!(merged.graph().edge_count(), g1.edge_count() + g2.edge_count());
    for (u, v, w) in merged.graph().edges() {
        let (cu, lu) = merged.to_cluster(u).ok_or_else(|| TestCaseError::fail("unmapped node"))?;
        let (cv, lv) = merged.to_cluster(v).ok_or_else(|| TestCaseError::fail("unmapped node"))?;
        prop_assert_eq!(cu, cv, "merged edge ({}, {}) crosses clusters", u, v);
        let source = if cu == ClusterId::One { g1 } else { g2 };
        prop_assert_eq!(source.weight(lu, lv), Some(w));
    }
    prop_assert!(merged.is_consistent_with(g1, g2));
    Ok(())
}

// ============================================================================
// Generator and merger
// ============================================================================

proptest! {
    // Property: same arguments, same graph
    #[test]
    fn generate_is_deterministic(n in 1usize..=20, p in 0.01f64..=1.0, seed in any::<u64>()) {
        let a: Vec<_> = generate(n, p, seed).unwrap().edges().collect();
        let b: Vec<_> = generate(n, p, seed).unwrap().edges().collect();
        prop_assert_eq!(a, b);
    }

    // Property: weighting with the same generator state gives the same weights
    #[test]
    fn weighting_is_deterministic(g in cluster(), mode in weight_mode(), seed in any::<u64>()) {
        let (mut a, mut b) = (g.clone(), g);
        assign_weights(&mut a, mode, &mut ChaCha8Rng::seed_from_u64(seed));
        assign_weights(&mut b, mode, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }

    // Property: generated edges are simple pairs within the node range
    #[test]
    fn generated_edges_are_in_range(n in 1usize..=20, p in 0.01f64..=1.0, seed in any::<u64>()) {
        let g = generate(n, p, seed).unwrap();
        prop_assert_eq!(g.node_count(), n);
        prop_assert!(g.edge_count() <= n * (n - 1) / 2);
        prop_assert!(g.edges().all(|(u, v, _)| u < v && v < n));
    }

    // Property: merged edges and cluster edges correspond one to one
    #[test]
    fn merge_is_a_bijection(g1 in cluster(), g2 in cluster()) {
        let merged = merge(&g1, &g2);
        prop_assert_eq!(merged.offset(), g1.node_count());
        prop_assert_eq!(merged.graph().node_count(), g1.node_count() + g2.node_count());
        assert_bijection(&merged, &g1, &g2)?;
    }
}

// ============================================================================
// Weight updates
// ============================================================================

proptest! {
    // Property: after every update the merged graph still mirrors both clusters and
    // per-node weight sums match an independent recomputation
    #[test]
    fn updates_keep_graphs_consistent(
        mut g1 in cluster(),
        mut g2 in cluster(),
        updates in prop::collection::vec(update(), 1..40),
    ) {
        let mut merged = merge(&g1, &g2);
        for (cluster, u, v, delta) in updates {
            let n = if cluster == ClusterId::One { g1.node_count() } else { g2.node_count() };
            {
                let mut graphs = GraphSet { cluster1: &mut g1, cluster2: &mut g2, merged: &mut merged };
                apply_update(&mut graphs, cluster.as_u8(), u % n, v % n, delta).unwrap();
            }

            assert_bijection(&merged, &g1, &g2)?;
            for g in [&g1, &g2] {
                let sums = node_weight_sums(g);
                for node in g.nodes() {
                    prop_assert!((sums[node] - incident_weight(g, node)).abs() < 1e-9);
                }
            }
        }
    }

    // Property: two identical updates add twice the delta
    #[test]
    fn updates_accumulate(
        mut g1 in cluster(),
        mut g2 in cluster(),
        (cluster, u, v, delta) in update(),
    ) {
        let mut merged = merge(&g1, &g2);
        let n = if cluster == ClusterId::One { g1.node_count() } else { g2.node_count() };
        let (u, v) = (u % n, v % n);
        let owner = |g1: &ClusterGraph, g2: &ClusterGraph| {
            if cluster == ClusterId::One { g1.weight(u, v) } else { g2.weight(u, v) }
        };
        let before = owner(&g1, &g2).unwrap_or(0.0);

        {
            let mut graphs = GraphSet { cluster1: &mut g1, cluster2: &mut g2, merged: &mut merged };
            apply_update(&mut graphs, cluster.as_u8(), u, v, delta).unwrap();
            apply_update(&mut graphs, cluster.as_u8(), u, v, delta).unwrap();
        }

        let after = owner(&g1, &g2).unwrap();
        prop_assert!((after - before - 2.0 * delta).abs() < 1e-12);

        let (mu, mv) = (merged.to_merged(cluster, u), merged.to_merged(cluster, v));
        prop_assert_eq!(merged.graph().weight(mu, mv), Some(after));
    }

    // Property: cluster ids other than 1 and 2 are rejected
    #[test]
    fn unknown_cluster_ids_fail(id in 3u8.., mut g1 in cluster(), mut g2 in cluster()) {
        let mut merged = merge(&g1, &g2);
        let mut graphs = GraphSet { cluster1: &mut g1, cluster2: &mut g2, merged: &mut merged };
        prop_assert!(apply_update(&mut graphs, id, 0, 0, 1.0).is_err());
        prop_assert!(apply_update(&mut graphs, 0, 0, 0, 1.0).is_err());
    }
}

// ============================================================================
// Driver replay
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Property: a base seed fully determines the run
    #[test]
    fn driver_replays_from_seed(
        n1 in 2usize..=10,
        n2 in 2usize..=10,
        mode in weight_mode(),
        seed in any::<u64>(),
        steps in 1usize..6,
    ) {
        let config = SimConfig::new(n1, 1.0, n2, 1.0, mode, EcScope::Together, true);
        let mut a = reset(&config, seed).unwrap();
        let mut b = reset(&config, seed).unwrap();
        for _ in 0..steps {
            a.advance().unwrap();
            b.advance().unwrap();
            prop_assert!(a.merged().is_consistent_with(a.cluster1(), a.cluster2()));
        }
        prop_assert_eq!(a.history(), b.history());
        prop_assert_eq!(a.step(), steps);
        prop_assert_eq!(a.history().len(), steps + 1);
    }
}
