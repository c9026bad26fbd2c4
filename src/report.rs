//! JSON summaries of a simulation state for front-ends

use std::io::Write;

use serde_json::{json, Value};

use crate::graph::{ClusterId, WeightedGraph};
use crate::sim::SimulationState;

fn graph_stats(graph: &WeightedGraph) -> Value {
    json!({
        "node_count": graph.node_count(),
        "edge_count": graph.edge_count(),
        "total_edge_weight": graph.total_edge_weight(),
    })
}

/// Summary of the current state plus the full sum history
pub fn summary(state: &SimulationState) -> Value {
    let history = state.history();
    let current = state.current();

    let clusters: Vec<Value> = ClusterId::ALL
        .iter()
        .map(|&cluster| {
            let (centrality, weight_sums) = match (&current, cluster) {
                (Some(r), ClusterId::One) => (r.centrality_cluster1.clone(), r.weight_sum_cluster1.clone()),
                (Some(r), ClusterId::Two) => (r.centrality_cluster2.clone(), r.weight_sum_cluster2.clone()),
                (None, _) => (Vec::new(), Vec::new()),
            };
            json!({
                "id": cluster.as_u8(),
                "graph": graph_stats(state.cluster(cluster)),
                "centrality": centrality,
                "weight_sums": weight_sums,
            })
        })
        .collect();

    json!({
        "config": state.config(),
        "base_seed": state.base_seed(),
        "step": state.step(),
        "merged": {
            "offset": state.merged().offset(),
            "graph": graph_stats(state.merged().graph()),
        },
        "clusters": clusters,
        "history": {
            "centrality_sums": history.centrality_sums(),
            "weight_sums": history.weight_sums(),
        },
    })
}

/// Write the pretty-printed summary to `writer`
pub fn write_summary<W: Write>(state: &SimulationState, mut writer: W) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&summary(state))?;
    writer.write_all(text.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
