//! Error types for dash-topology.

use thiserror::Error;

use crate::NodeId;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised by the topology store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// The node was never created or has already been removed.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// An edge from a node to itself was requested.
    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    /// Every `u32` node id has been handed out.
    #[error("node id space exhausted after {0} nodes")]
    IdSpaceExhausted(usize),

    /// Random graph edge probability outside `[0, 1]`.
    #[error("edge probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}
