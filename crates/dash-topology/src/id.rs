//! Identifiers and per-node attributes.
//!
//! Nodes are addressed by a dense integer [`NodeId`] so attributes can live in
//! a flat array. Group membership is carried by a real-valued [`DashId`] which
//! is given a total order here, so it can be used as a map key and minimised
//! without special-casing NaN.

use std::cmp::Ordering;
use std::fmt;

/// Stable identifier of a node in a [`Topology`](crate::Topology).
///
/// Ids are handed out sequentially and never reused, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index into the dense attribute table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Real-valued group identifier.
///
/// Nodes sharing a `DashId` belong to the same reconciled group. Ordering and
/// equality follow [`f64::total_cmp`], so `-0.0 < 0.0` and NaN sorts last.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DashId(pub f64);

impl DashId {
    /// The raw value.
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for DashId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DashId {}

impl PartialOrd for DashId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DashId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for DashId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for DashId {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for DashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Mutable state attached to every live node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAttrs {
    /// Cumulative repair counter.
    pub delta: i64,
    /// Current group identifier.
    pub dash_id: DashId,
    /// Group identifier assigned at creation. Only read for tie-breaks.
    initial_dash_id: DashId,
}

impl NodeAttrs {
    /// Attributes for a freshly created node.
    pub const fn new(dash_id: DashId) -> Self {
        Self {
            delta: 0,
            dash_id,
            initial_dash_id: dash_id,
        }
    }

    /// The identifier the node was born with.
    pub const fn initial_dash_id(&self) -> DashId {
        self.initial_dash_id
    }
}

/// An undirected link between two nodes.
///
/// Endpoints are stored in ascending order, so `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    /// Create an edge between `a` and `b`.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, lowest id first.
    pub const fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.low == node || self.high == node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}
