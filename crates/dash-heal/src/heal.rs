//! The repair step run after a node has been removed.
//!
//! # Procedure
//!
//! 1. Deduplicate the supplied neighbours, keeping first occurrence order.
//!    Fewer than two means nothing can have been cut off: stop.
//! 2. Build a [`HealingTree`] over them keyed by current `delta`.
//! 3. Add every tree link not already in the topology. Existing links are
//!    skipped silently, so re-running a repair whose links all exist
//!    changes nothing.
//! 4. If anything was added: every endpoint of a new edge takes the minimum
//!    `dash_id` of the whole neighbour set and gains one `delta` per new edge
//!    it sits on.

use std::collections::HashSet;

use dash_topology::{DashId, Edge, NodeId, Topology};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::tree::HealingTree;

/// Outcome of a single repair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealReport {
    /// Edges added to the topology, in tree insertion order.
    pub edges: Vec<Edge>,
    /// Nodes touching at least one new edge, in first-touched order.
    pub altered: Vec<NodeId>,
    /// Identifier propagated to `altered`, if any edge was added.
    pub dash_id: Option<DashId>,
}

impl HealReport {
    /// Whether the repair left the topology untouched.
    pub fn is_noop(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Reconnect the neighbours of a node that has just been removed.
///
/// `neighbours` is normally the output of
/// [`prepare_neighbours`](crate::prepare_neighbours); its order determines the
/// tree shape.
///
/// # Errors
///
/// Fails without mutating anything if `deleted` is still in the topology or if
/// any of two or more distinct neighbours is missing from it.
pub fn heal(topology: &mut Topology, deleted: NodeId, neighbours: &[NodeId]) -> Result<HealReport> {
    if topology.contains_node(deleted) {
        warn!(node = %deleted, "heal called before node removal");
        return Err(Error::DeletedNodePresent(deleted));
    }

    let mut seen = HashSet::with_capacity(neighbours.len());
    let unique: Vec<NodeId> = neighbours
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    if unique.len() <= 1 {
        debug!(node = %deleted, neighbours = unique.len(), "nothing to heal");
        return Ok(HealReport::default());
    }

    if let Some(&missing) = unique.iter().find(|&&id| !topology.contains_node(id)) {
        warn!(node = %deleted, neighbour = %missing, "heal given unknown neighbour");
        return Err(Error::UnknownNeighbour(missing));
    }

    // Taken before any mutation so altered nodes don't influence it.
    let min_dash_id = unique
        .iter()
        .map(|&id| topology.dash_id(id))
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .min();

    let tree = HealingTree::build(&unique, |id| topology.delta(id).unwrap_or_default());

    let mut report = HealReport::default();
    for edge in tree.edges() {
        let (a, b) = edge.endpoints();
        if !topology.add_edge(a, b)? {
            debug!(edge = %edge, "tree link already present");
            continue;
        }
        debug!(edge = %edge, "added healing edge");
        report.edges.push(edge);
        for endpoint in [a, b] {
            topology.attrs_mut(endpoint)?.delta += 1;
            if !report.altered.contains(&endpoint) {
                report.altered.push(endpoint);
            }
        }
    }

    if report.edges.is_empty() {
        debug!(node = %deleted, "all tree links already present");
        return Ok(report);
    }

    if let Some(dash_id) = min_dash_id {
        for &id in &report.altered {
            topology.attrs_mut(id)?.dash_id = dash_id;
        }
        report.dash_id = Some(dash_id);
    }

    info!(
        node = %deleted,
        neighbours = unique.len(),
        new_edges = report.edges.len(),
        altered = report.altered.len(),
        dash_id = ?report.dash_id,
        "healed"
    );

    Ok(report)
}
