//! DASH Overlay Topology
//!
//! The graph that degree-assisted self-healing operates on.
//!
//! # Model
//!
//! - Nodes are addressed by dense, never-reused [`NodeId`]s.
//! - Every node carries [`NodeAttrs`]: a repair counter `delta`, a mutable
//!   group identifier `dash_id`, and the immutable `initial_dash_id` it was
//!   born with.
//! - Edges are undirected and simple (no self-loops, no multi-edges).
//!
//! Edge provenance is not part of the graph. Edges created by repairs are
//! tracked in a separate [`HealingEdges`] set owned by the caller.
//!
//! # Randomness
//!
//! Nothing here touches a global RNG. Random identifiers and random graphs are
//! drawn from a generator passed in by the caller, see [`generate`].

mod error;
mod graph;
mod healing;
mod id;
pub mod generate;

pub use error::{Result, TopologyError};
pub use graph::Topology;
pub use healing::HealingEdges;
pub use id::{DashId, Edge, NodeAttrs, NodeId};
pub use generate::{delta_bound, erdos_renyi, from_edges, DEFAULT_EDGE_PROBABILITY};
