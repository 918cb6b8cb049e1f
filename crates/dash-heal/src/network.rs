//! A topology bundled with its healing-edge tags.
//!
//! [`SelfHealingGraph::delete_node`] runs the full deletion protocol in the
//! only order that keeps the counters meaningful:
//!
//! ```text
//! prepare_neighbours → remove_node → heal → tag new edges → prune stale tags
//! ```
//!
//! Deletions are strictly sequential; each one reads the `delta` and `dash_id`
//! values the previous one left behind.

use dash_topology::{delta_bound, HealingEdges, NodeId, Topology};
use tracing::debug;

use crate::error::Result;
use crate::heal::{heal, HealReport};
use crate::selector::prepare_neighbours;

/// Result of deleting one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    /// The removed node.
    pub node: NodeId,
    /// Its neighbours at the time of removal.
    pub neighbours: Vec<NodeId>,
    /// The subset chosen to take part in the repair, in tree insertion order.
    pub representatives: Vec<NodeId>,
    /// What the repair did.
    pub report: HealReport,
    /// Healing tags dropped because the deletion removed their edge.
    pub pruned: usize,
}

/// Owns a topology and the provenance of its healing edges.
#[derive(Debug, Clone, Default)]
pub struct SelfHealingGraph {
    topology: Topology,
    healing_edges: HealingEdges,
}

impl SelfHealingGraph {
    /// Wrap a topology whose edges are all original.
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            healing_edges: HealingEdges::new(),
        }
    }

    /// Delete `node` and repair around it.
    pub fn delete_node(&mut self, node: NodeId) -> Result<Deletion> {
        let representatives = prepare_neighbours(&mut self.topology, &self.healing_edges, node)?;
        let neighbours = self.topology.remove_node(node)?;
        let report = heal(&mut self.topology, node, &representatives)?;

        self.healing_edges.extend(report.edges.iter().copied());
        let pruned = self.healing_edges.prune(&self.topology);

        debug!(
            node = %node,
            nodes = self.topology.node_count(),
            healing_edges = self.healing_edges.len(),
            pruned,
            "deletion complete"
        );

        Ok(Deletion {
            node,
            neighbours,
            representatives,
            report,
            pruned,
        })
    }

    /// The underlying topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Edges currently tagged as healing-introduced.
    pub fn healing_edges(&self) -> &HealingEdges {
        &self.healing_edges
    }

    /// `2 * ln(n)` for the current node count.
    pub fn delta_bound(&self) -> f64 {
        delta_bound(self.topology.node_count())
    }

    /// Give back the parts.
    pub fn into_parts(self) -> (Topology, HealingEdges) {
        (self.topology, self.healing_edges)
    }
}

impl From<Topology> for SelfHealingGraph {
    fn from(topology: Topology) -> Self {
        Self::new(topology)
    }
}
