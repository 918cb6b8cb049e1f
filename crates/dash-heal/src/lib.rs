//! Degree-Assisted Self-Healing (DASH)
//!
//! Keeps an overlay graph connected as nodes disappear, using only the
//! neighbourhood of the departing node. No global view, no recomputation.
//!
//! # Repair in three steps
//!
//! 1. **Select** ([`prepare_neighbours`]): before removal, pick one
//!    representative per `dash_id` group among the natural neighbours, plus
//!    every neighbour attached through an earlier healing edge.
//! 2. **Order** ([`HealingTree`]): insert the selection into an unbalanced
//!    BST keyed by `delta` (strictly less goes left, otherwise right).
//! 3. **Reconnect** ([`heal`]): after removal, add every missing tree link,
//!    bump `delta` once per new edge endpoint, and spread the minimum
//!    `dash_id` over the touched nodes.
//!
//! Nodes that repaired often carry a high `delta` and sink to the right of
//! the tree, so new load lands on the ones that have absorbed the least. The
//! counters are expected to stay near `2 * ln(n)`.
//!
//! # Usage
//!
//! ```
//! use dash_heal::SelfHealingGraph;
//! use dash_topology::{from_edges, NodeId};
//!
//! // A star: deleting the hub would shatter it
//! let topology = from_edges(&[0.9, 0.1, 0.2, 0.3], &[(0, 1), (0, 2), (0, 3)]).unwrap();
//! let mut graph = SelfHealingGraph::new(topology);
//!
//! let deletion = graph.delete_node(NodeId(0)).unwrap();
//! assert_eq!(deletion.report.edges.len(), 2);
//! assert!(graph.topology().is_connected());
//! ```

mod error;
mod heal;
mod network;
mod selector;
mod tree;

pub use error::{Error, Result};
pub use heal::{heal, HealReport};
pub use network::{Deletion, SelfHealingGraph};
pub use selector::prepare_neighbours;
pub use tree::HealingTree;
