//! Events and per-round statistics for the deletion timeline.

use dash_topology::{DashId, Edge, NodeId};
use serde::{Deserialize, Serialize};

/// Things that happen while nodes are deleted and healed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashEvent {
    /// A node was removed
    NodeDeleted {
        node: NodeId,
        neighbours: Vec<NodeId>,
        representatives: Vec<NodeId>,
        frame: u64,
    },

    /// A repair added an edge
    EdgeHealed {
        edge: Edge,
        frame: u64,
    },

    /// A repair spread a group identifier
    DashIdPropagated {
        dash_id: DashId,
        nodes: Vec<NodeId>,
        frame: u64,
    },
}

impl DashEvent {
    /// Get the frame number for this event.
    pub fn frame(&self) -> u64 {
        match self {
            DashEvent::NodeDeleted { frame, .. } => *frame,
            DashEvent::EdgeHealed { frame, .. } => *frame,
            DashEvent::DashIdPropagated { frame, .. } => *frame,
        }
    }
}

/// Graph health measured right after one deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub frame: u64,
    pub node_count: usize,
    pub edge_count: usize,
    pub healing_edge_count: usize,
    pub new_edges: usize,
    pub max_delta: i64,
    pub delta_bound: f64,
    pub components: usize,
}

impl RoundStats {
    /// Whether any node's counter exceeds `2 * ln(n)`.
    pub fn exceeds_bound(&self) -> bool {
        self.node_count > 1 && self.max_delta as f64 > self.delta_bound
    }
}

/// Aggregate over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub rounds: usize,
    pub healing_edges_created: usize,
    pub connected_rounds: usize,
    pub peak_delta: i64,
    pub bound_violations: usize,
}

impl Summary {
    /// Fold a sequence of rounds into a summary.
    pub fn from_rounds(rounds: &[RoundStats]) -> Self {
        rounds.iter().fold(Self::default(), |mut acc, round| {
            acc.rounds += 1;
            acc.healing_edges_created += round.new_edges;
            if round.components <= 1 {
                acc.connected_rounds += 1;
            }
            acc.peak_delta = acc.peak_delta.max(round.max_delta);
            if round.exceeds_bound() {
                acc.bound_violations += 1;
            }
            acc
        })
    }
}
