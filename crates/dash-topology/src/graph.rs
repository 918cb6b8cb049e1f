//! The topology store: an undirected simple graph over dense node ids.
//!
//! Node attributes and adjacency live in parallel slot vectors indexed by
//! [`NodeId`]. Removing a node tombstones its slot rather than compacting, so
//! every id stays valid as a key for the lifetime of the store.

use std::collections::{BTreeSet, VecDeque};

use rand::Rng;

use crate::error::{Result, TopologyError};
use crate::{DashId, Edge, NodeAttrs, NodeId};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    attrs: NodeAttrs,
    adjacency: BTreeSet<NodeId>,
}

/// Undirected graph with mutable per-node attributes.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    slots: Vec<Option<Slot>>,
    live: usize,
    edges: usize,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the given group identifier.
    ///
    /// The node starts with `delta = 0` and `initial_dash_id = dash_id`.
    /// Fails once all `u32` ids are taken; removed ids still count.
    pub fn add_node(&mut self, dash_id: DashId) -> Result<NodeId> {
        let id = next_id(self.slots.len())?;
        self.slots.push(Some(Slot {
            attrs: NodeAttrs::new(dash_id),
            adjacency: BTreeSet::new(),
        }));
        self.live += 1;
        Ok(id)
    }

    /// Add a node whose group identifier is drawn from `rng`.
    pub fn add_node_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<NodeId> {
        self.add_node(DashId(rng.gen::<f64>()))
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Returns the former neighbours in ascending id order.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let slot = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(TopologyError::UnknownNode(id))?;

        for neighbour in &slot.adjacency {
            if let Some(Some(other)) = self.slots.get_mut(neighbour.index()) {
                other.adjacency.remove(&id);
            }
        }

        self.live -= 1;
        self.edges -= slot.adjacency.len();
        Ok(slot.adjacency.into_iter().collect())
    }

    /// Add an undirected edge.
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        self.slot(a)?;
        self.slot(b)?;

        let inserted = self.slot_mut(a)?.adjacency.insert(b);
        if inserted {
            self.slot_mut(b)?.adjacency.insert(a);
            self.edges += 1;
        }
        Ok(inserted)
    }

    /// Whether the node exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slot(id).is_ok()
    }

    /// Whether an edge between `a` and `b` exists.
    ///
    /// Unknown endpoints simply yield `false`.
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.slot(a)
            .map(|slot| slot.adjacency.contains(&b))
            .unwrap_or(false)
    }

    /// Neighbours of a node, ascending by id.
    pub fn neighbours(&self, id: NodeId) -> Result<impl Iterator<Item = NodeId> + '_> {
        Ok(self.slot(id)?.adjacency.iter().copied())
    }

    /// Number of neighbours.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        Ok(self.slot(id)?.adjacency.len())
    }

    /// Read a node's attributes.
    pub fn attrs(&self, id: NodeId) -> Result<&NodeAttrs> {
        Ok(&self.slot(id)?.attrs)
    }

    /// Mutate a node's attributes.
    pub fn attrs_mut(&mut self, id: NodeId) -> Result<&mut NodeAttrs> {
        Ok(&mut self.slot_mut(id)?.attrs)
    }

    /// Shorthand for `attrs(id)?.delta`.
    pub fn delta(&self, id: NodeId) -> Result<i64> {
        Ok(self.attrs(id)?.delta)
    }

    /// Shorthand for `attrs(id)?.dash_id`.
    pub fn dash_id(&self, id: NodeId) -> Result<DashId> {
        Ok(self.attrs(id)?.dash_id)
    }

    /// Live node ids, ascending.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| NodeId(i as u32))
    }

    /// All edges, each reported once, ordered by their lower endpoint.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.slots.iter().enumerate().flat_map(|(i, slot)| {
            let id = NodeId(i as u32);
            slot.iter().flat_map(move |slot| {
                slot.adjacency
                    .range(NodeId(id.0.saturating_add(1))..)
                    .map(move |&other| Edge::new(id, other))
            })
        })
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Whether the topology has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Largest `delta` over live nodes.
    pub fn max_delta(&self) -> Option<i64> {
        self.slots.iter().flatten().map(|slot| slot.attrs.delta).max()
    }

    /// Number of connected components (0 for an empty graph).
    pub fn component_count(&self) -> usize {
        let mut seen = vec![false; self.slots.len()];
        let mut queue = VecDeque::new();
        let mut components = 0;

        for start in self.node_ids() {
            if seen[start.index()] {
                continue;
            }
            components += 1;
            seen[start.index()] = true;
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                if let Some(Some(slot)) = self.slots.get(current.index()) {
                    for &next in &slot.adjacency {
                        if !seen[next.index()] {
                            seen[next.index()] = true;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        components
    }

    /// Whether every live node can reach every other one.
    ///
    /// An empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(TopologyError::UnknownNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(TopologyError::UnknownNode(id))
    }
}

fn next_id(allocated: usize) -> Result<NodeId> {
    u32::try_from(allocated)
        .map(NodeId)
        .map_err(|_| TopologyError::IdSpaceExhausted(allocated))
}
