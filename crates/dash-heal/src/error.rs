//! Error types for dash-heal.

use dash_topology::{NodeId, TopologyError};
use thiserror::Error;

/// Result type for healing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations detected while preparing or performing a repair.
///
/// None of these are recoverable in normal operation: they mean the caller
/// issued the deletion protocol out of order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The underlying topology rejected an access.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// `heal` was called before the deleted node was removed.
    #[error("node {0} must be removed from the topology before healing")]
    DeletedNodePresent(NodeId),

    /// A neighbour handed to `heal` is not in the topology.
    #[error("neighbour {0} is not present in the topology")]
    UnknownNeighbour(NodeId),
}
