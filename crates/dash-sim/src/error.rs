//! Error types for dash-sim.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value could not be parsed or is out of range
    #[error("invalid {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// Graph construction failed
    #[error("topology error: {0}")]
    Topology(#[from] dash_topology::TopologyError),

    /// A repair violated its contract
    #[error("healing error: {0}")]
    Heal(#[from] dash_heal::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
