//! Representative selection for a node about to be deleted.
//!
//! Neighbours that already share a `dash_id` were reconciled by an earlier
//! repair, so reconnecting all of them again would only add redundant edges.
//! Each such group sends a single representative instead:
//!
//! ```text
//! natural neighbours  → group by dash_id → min initial_dash_id per group
//! healing neighbours  → delta -= 1, always included
//! ```
//!
//! Healing neighbours are those linked to the deleted node by an edge a
//! previous repair created. They lose that compensating link with the
//! deletion, which is why their counter is walked back here.

use std::collections::BTreeMap;

use dash_topology::{DashId, HealingEdges, NodeId, Topology};
use tracing::debug;

use crate::error::Result;

/// Pick the neighbours of `deleted` that take part in its repair.
///
/// Must be called while `deleted` is still in the topology. The result lists
/// one representative per `dash_id` group in ascending `dash_id` order,
/// followed by every healing neighbour in ascending id order. The `delta` of
/// each healing neighbour is decremented; nothing else is mutated.
pub fn prepare_neighbours(
    topology: &mut Topology,
    healing_edges: &HealingEdges,
    deleted: NodeId,
) -> Result<Vec<NodeId>> {
    let neighbours: Vec<NodeId> = topology.neighbours(deleted)?.collect();

    let mut representatives: BTreeMap<DashId, (DashId, NodeId)> = BTreeMap::new();
    let mut healed = Vec::new();

    for neighbour in neighbours {
        if healing_edges.contains(deleted, neighbour) {
            healed.push(neighbour);
            continue;
        }

        let attrs = topology.attrs(neighbour)?;
        let candidate = (attrs.initial_dash_id(), neighbour);
        representatives
            .entry(attrs.dash_id)
            .and_modify(|best| {
                if candidate < *best {
                    *best = candidate;
                }
            })
            .or_insert(candidate);
    }

    for &neighbour in &healed {
        topology.attrs_mut(neighbour)?.delta -= 1;
    }

    debug!(
        node = %deleted,
        groups = representatives.len(),
        healing = healed.len(),
        "prepared neighbours"
    );

    Ok(representatives
        .into_values()
        .map(|(_, id)| id)
        .chain(healed)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use dash_topology::{from_edges, Edge, TopologyError};

    #[test]
    fn isolated_node_yields_nothing() {
        let mut topo = from_edges(&[0.5], &[]).unwrap();
        let out = prepare_neighbours(&mut topo, &HealingEdges::new(), NodeId(0)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn one_group_yields_single_representative() {
        // Hub 0 connected to 1, 2, 3 which all share dash_id 0.7
        let mut topo = from_edges(&[0.9, 0.4, 0.2, 0.6], &[(0, 1), (0, 2), (0, 3)]).unwrap();
        for id in 1..=3 {
            topo.attrs_mut(NodeId(id)).unwrap().dash_id = DashId(0.7);
        }

        let out = prepare_neighbours(&mut topo, &HealingEdges::new(), NodeId(0)).unwrap();

        // Node 2 has the smallest initial_dash_id
        assert_eq!(out, vec![NodeId(2)]);
    }

    #[test]
    fn distinct_groups_ordered_by_dash_id() {
        let mut topo = from_edges(&[0.9, 0.4, 0.2, 0.6], &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let out = prepare_neighbours(&mut topo, &HealingEdges::new(), NodeId(0)).unwrap();
        assert_eq!(out, vec![NodeId(2), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn healing_neighbours_skip_grouping_and_lose_delta() {
        // 1 and 2 share a group; 3 shares it too but arrived via a healing edge
        let mut topo = from_edges(&[0.9, 0.4, 0.2, 0.1], &[(0, 1), (0, 2), (0, 3)]).unwrap();
        for id in 1..=3 {
            topo.attrs_mut(NodeId(id)).unwrap().dash_id = DashId(0.1);
        }
        topo.attrs_mut(NodeId(3)).unwrap().delta = 2;

        let mut tags = HealingEdges::new();
        tags.tag(Edge::new(NodeId(0), NodeId(3)));

        let out = prepare_neighbours(&mut topo, &tags, NodeId(0)).unwrap();

        assert_eq!(out, vec![NodeId(2), NodeId(3)]);
        assert_eq!(topo.delta(NodeId(3)).unwrap(), 1);
        assert_eq!(topo.delta(NodeId(1)).unwrap(), 0);
        assert_eq!(topo.delta(NodeId(2)).unwrap(), 0);
    }

    #[test]
    fn dash_ids_and_edges_untouched() {
        let mut topo = from_edges(&[0.9, 0.4, 0.2], &[(0, 1), (0, 2)]).unwrap();
        let before: Vec<_> = topo.edges().collect();

        prepare_neighbours(&mut topo, &HealingEdges::new(), NodeId(0)).unwrap();

        assert_eq!(topo.edges().collect::<Vec<_>>(), before);
        assert_eq!(topo.dash_id(NodeId(1)).unwrap(), DashId(0.4));
        assert_eq!(topo.dash_id(NodeId(2)).unwrap(), DashId(0.2));
    }

    #[test]
    fn deterministic_for_same_input() {
        let topo = from_edges(
            &[0.5, 0.3, 0.3, 0.8, 0.1, 0.6],
            &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)],
        )
        .unwrap();

        let first = prepare_neighbours(&mut topo.clone(), &HealingEdges::new(), NodeId(0)).unwrap();
        let second = prepare_neighbours(&mut topo.clone(), &HealingEdges::new(), NodeId(0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let mut topo = from_edges(&[0.5], &[]).unwrap();
        let err = prepare_neighbours(&mut topo, &HealingEdges::new(), NodeId(4)).unwrap_err();
        assert_eq!(err, Error::Topology(TopologyError::UnknownNode(NodeId(4))));
    }
}
