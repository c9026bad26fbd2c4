//! Core library for the two-cluster eigenvector centrality simulation

pub mod aggregate;
pub mod centrality;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod sim;

pub use config::{CentralityConfig, SimConfig};
pub use error::{ConvergenceFailure, Result, SimError};
pub use sim::{advance, reset, SimulationState};
