//! Graph construction helpers.
//!
//! All randomness comes from a caller-supplied generator, so seeding the
//! generator pins down both the edge set and every node's group identifier.

use rand::Rng;

use crate::error::{Result, TopologyError};
use crate::{DashId, NodeId, Topology};

/// Edge probability used by the interactive tool this workload comes from.
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.3;

/// Build a G(n, p) random graph.
///
/// Nodes are created first, each drawing its identifier from `rng`, then every
/// unordered pair is connected independently with probability `p`.
pub fn erdos_renyi<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<Topology> {
    if !(0.0..=1.0).contains(&p) {
        return Err(TopologyError::InvalidProbability(p));
    }

    let mut topology = Topology::new();
    let ids = (0..n)
        .map(|_| topology.add_node_with(rng))
        .collect::<Result<Vec<NodeId>>>()?;

    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if rng.gen_bool(p) {
                topology.add_edge(a, b)?;
            }
        }
    }

    Ok(topology)
}

/// Build a topology from explicit identifiers and an edge list.
///
/// Node `i` gets `dash_ids[i]`. Duplicate edges are ignored.
pub fn from_edges(dash_ids: &[f64], edges: &[(u32, u32)]) -> Result<Topology> {
    let mut topology = Topology::new();
    for &dash_id in dash_ids {
        topology.add_node(DashId(dash_id))?;
    }
    for &(a, b) in edges {
        topology.add_edge(NodeId(a), NodeId(b))?;
    }
    Ok(topology)
}

/// Diagnostic ceiling for `delta`: `2 * ln(n)`, or 0 for fewer than two nodes.
pub fn delta_bound(node_count: usize) -> f64 {
    if node_count < 2 {
        0.0
    } else {
        2.0 * (node_count as f64).ln()
    }
}
