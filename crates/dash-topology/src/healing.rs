//! Healing-edge provenance.
//!
//! The [`Topology`] does not record where an edge came from. Edges created by
//! a repair are tagged here instead, and the tag set is pruned whenever node
//! removals make an entry stale.

use std::collections::BTreeSet;

use crate::{Edge, NodeId, Topology};

/// Set of edges introduced by self-healing rather than the original topology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealingEdges {
    edges: BTreeSet<Edge>,
}

impl HealingEdges {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a single edge. Returns `false` if it was already tagged.
    pub fn tag(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    /// Whether the link between `a` and `b` is a healing edge.
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains(&Edge::new(a, b))
    }

    /// Drop every tag whose edge no longer exists in `topology`.
    ///
    /// Returns the number of tags removed.
    pub fn prune(&mut self, topology: &Topology) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| {
            let (a, b) = edge.endpoints();
            topology.contains_edge(a, b)
        });
        before - self.edges.len()
    }

    /// Tagged edges, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of tagged edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no edge is tagged.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Extend<Edge> for HealingEdges {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, iter: I) {
        self.edges.extend(iter);
    }
}

impl FromIterator<Edge> for HealingEdges {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HealingEdges {
    type Item = &'a Edge;
    type IntoIter = std::collections::btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
