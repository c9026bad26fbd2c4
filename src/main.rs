use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;

use cluster_centrality_sim::centrality::EcScope;
use cluster_centrality_sim::graph::generator::WeightMode;
use cluster_centrality_sim::report;
use cluster_centrality_sim::{CentralityConfig, SimConfig, SimulationState};

#[derive(Parser, Debug)]
#[clap(
    name = "cluster-centrality-sim",
    about = "Evolve two random weighted clusters and track eigenvector centrality"
)]
struct Cli {
    /// Number of nodes in cluster 1
    #[clap(long, default_value = "5", value_parser = clap::value_parser!(u8).range(1..=20))]
    n1: u8,

    /// Probability of edge creation in cluster 1
    #[clap(long, default_value = "0.25")]
    p1: f64,

    /// Number of nodes in cluster 2
    #[clap(long, default_value = "15", value_parser = clap::value_parser!(u8).range(1..=20))]
    n2: u8,

    /// Probability of edge creation in cluster 2
    #[clap(long, default_value = "0.75")]
    p2: f64,

    /// Distribution of initial weights and transaction deltas
    #[clap(long, value_enum, default_value = "uniform01")]
    weight_mode: WeightMode,

    /// Compute centrality over the merged graph or per cluster
    #[clap(long, value_enum, default_value = "separate")]
    ec_scope: EcScope,

    /// Use edge weights when computing centrality
    #[clap(long, default_value = "true", action = clap::ArgAction::Set)]
    use_weight: bool,

    /// Base random seed (drawn at random when omitted)
    #[clap(long)]
    seed: Option<u64>,

    /// Number of steps to advance after the reset
    #[clap(long, default_value = "10")]
    steps: usize,

    /// Maximum power iterations per centrality computation
    #[clap(long, default_value = "1000")]
    max_iter: usize,

    /// Power iteration tolerance
    #[clap(long, default_value = "0.01")]
    tol: f64,

    /// Write the JSON report to this file instead of stdout
    #[clap(long)]
    output: Option<String>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = SimConfig {
        n1: args.n1 as usize,
        p1: args.p1,
        n2: args.n2 as usize,
        p2: args.p2,
        weight_mode: args.weight_mode,
        ec_scope: args.ec_scope,
        use_weight_for_ec: args.use_weight,
        centrality: CentralityConfig {
            max_iter: args.max_iter,
            tol: args.tol,
        },
    };

    let seed = args
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(1..10_000));

    log::info!("Starting simulation with seed {}", seed);

    let mut state = SimulationState::reset(&config, seed).context("reset failed")?;

    for _ in 0..args.steps {
        state
            .advance()
            .with_context(|| format!("step {} failed", state.step() + 1))?;

        if let Some(row) = state.history().centrality_sums().last() {
            log::info!(
                "Step {}: centrality sums {:.4} + {:.4} = {:.4}",
                row.step, row.cluster1, row.cluster2, row.total
            );
        }
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path))?;
            report::write_summary(&state, BufWriter::new(file))?;
            log::info!("Report written to {}", path);
        }
        None => report::write_summary(&state, io::stdout().lock())?,
    }

    Ok(())
}
