//! Configuration management for the cluster centrality simulation

use serde::{Deserialize, Serialize};

use crate::centrality::EcScope;
use crate::error::{Result, SimError};
use crate::graph::generator::WeightMode;

/// Power-iteration bounds for the centrality engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    /// Maximum number of power iterations
    pub max_iter: usize,

    /// Per-node L1 tolerance; the iteration stops once the total change drops below `n * tol`
    pub tol: f64,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tol: 1e-2,
        }
    }
}

impl CentralityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(SimError::invalid("max_iter", "must be at least 1"));
        }
        if !(self.tol > 0.0) || !self.tol.is_finite() {
            return Err(SimError::invalid("tol", format!("must be a positive finite number, got {}", self.tol)));
        }
        Ok(())
    }
}

/// Parameters accepted by `reset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of nodes in cluster 1
    pub n1: usize,

    /// Edge probability in cluster 1
    pub p1: f64,

    /// Number of nodes in cluster 2
    pub n2: usize,

    /// Edge probability in cluster 2
    pub p2: f64,

    /// Distribution for initial edge weights and per-step deltas
    pub weight_mode: WeightMode,

    /// Compute centrality over the merged graph or per cluster
    pub ec_scope: EcScope,

    /// Use edge weights as adjacency entries when computing centrality
    pub use_weight_for_ec: bool,

    pub centrality: CentralityConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n1: 5,
            p1: 0.25,
            n2: 15,
            p2: 0.75,
            weight_mode: WeightMode::Uniform01,
            ec_scope: EcScope::Separate,
            use_weight_for_ec: true,
            centrality: CentralityConfig::default(),
        }
    }
}

impl SimConfig {
    /// Create a configuration with custom cluster parameters and default centrality bounds
    pub fn new(
        n1: usize,
        p1: f64,
        n2: usize,
        p2: f64,
        weight_mode: WeightMode,
        ec_scope: EcScope,
        use_weight_for_ec: bool,
    ) -> Self {
        Self {
            n1,
            p1,
            n2,
            p2,
            weight_mode,
            ec_scope,
            use_weight_for_ec,
            centrality: CentralityConfig::default(),
        }
    }

    /// Reject node counts below 1 and probabilities outside `(0, 1]`
    pub fn validate(&self) -> Result<()> {
        check_nodes("n1", self.n1)?;
        check_probability("p1", self.p1)?;
        check_nodes("n2", self.n2)?;
        check_probability("p2", self.p2)?;
        self.centrality.validate()
    }
}

fn check_nodes(name: &'static str, n: usize) -> Result<()> {
    if n < 1 {
        return Err(SimError::invalid(name, "a cluster needs at least one node"));
    }
    Ok(())
}

fn check_probability(name: &'static str, p: f64) -> Result<()> {
    // NaN fails both comparisons
    if !(p > 0.0 && p <= 1.0) {
        return Err(SimError::invalid(name, format!("edge probability must be in (0, 1], got {}", p)));
    }
    Ok(())
}
