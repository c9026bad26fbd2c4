//! Error types for the simulation core

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SimError>;

/// Why power iteration could not produce a centrality vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergenceFailure {
    /// The adjacency matrix has no entries, so there is no dominant eigenvector
    NoEdges { nodes: usize },

    /// The iteration bound was reached before the tolerance was met
    IterationLimit { iterations: usize, residual: f64 },
}

impl std::fmt::Display for ConvergenceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEdges { nodes } => write!(f, "graph with {} nodes has no edges", nodes),
            Self::IterationLimit { iterations, residual } => write!(
                f,
                "no convergence after {} iterations (residual {:.3e})",
                iterations, residual
            ),
        }
    }
}

/// Typed failures surfaced by `reset`, `advance` and the engines beneath them
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("eigenvector centrality failed: {0}")]
    Convergence(ConvergenceFailure),

    #[error("unknown cluster id {0}, expected 1 or 2")]
    UnknownCluster(u8),

    #[error("node {node} is outside cluster {cluster} (size {size})")]
    NodeOutOfRange { cluster: u8, node: usize, size: usize },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }

    /// True for either flavor of centrality failure
    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence(_))
    }
}
