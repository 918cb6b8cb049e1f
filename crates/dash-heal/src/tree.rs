//! Delta-ordered healing tree.
//!
//! An unbalanced binary search tree keyed by each node's repair counter,
//! built fresh for every repair and thrown away afterwards. Its parent/child
//! links are exactly the pairs that get reconnected.
//!
//! # Insertion rule
//!
//! ```text
//! key(new) <  key(visited)  → go left
//! key(new) >= key(visited)  → go right
//! ```
//!
//! Equal keys go right. Shape depends only on insertion order and the keys at
//! insertion time; nothing is rebalanced or sorted.
//!
//! Nodes live in an arena of indices, so building a tree is one allocation
//! and dropping it is free of pointer chasing.

use dash_topology::{Edge, NodeId};
use tracing::trace;

#[derive(Debug, Clone)]
struct TreeNode {
    id: NodeId,
    key: i64,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbalanced BST over node ids, ordered by delta.
#[derive(Debug, Clone, Default)]
pub struct HealingTree {
    arena: Vec<TreeNode>,
}

impl HealingTree {
    /// Build a tree by inserting `nodes` in the given order.
    ///
    /// `delta_of` is queried once per node, at its insertion.
    pub fn build<F>(nodes: &[NodeId], mut delta_of: F) -> Self
    where
        F: FnMut(NodeId) -> i64,
    {
        let mut tree = Self {
            arena: Vec::with_capacity(nodes.len()),
        };
        for &id in nodes {
            tree.insert(id, delta_of(id));
        }
        tree
    }

    fn insert(&mut self, id: NodeId, key: i64) {
        let slot = self.arena.len();

        let Some(mut current) = self.root_index() else {
            trace!(node = %id, key, "healing tree root");
            self.arena.push(TreeNode {
                id,
                key,
                parent: None,
                left: None,
                right: None,
            });
            return;
        };

        loop {
            let visited = &self.arena[current];
            let go_left = key < visited.key;
            let next = if go_left { visited.left } else { visited.right };

            match next {
                Some(child) => current = child,
                None => {
                    let side = if go_left { "left" } else { "right" };
                    let parent = &mut self.arena[current];
                    if go_left {
                        parent.left = Some(slot);
                    } else {
                        parent.right = Some(slot);
                    }
                    trace!(
                        node = %id,
                        key,
                        parent = %parent.id,
                        side,
                        "healing tree insert"
                    );
                    break;
                }
            }
        }

        self.arena.push(TreeNode {
            id,
            key,
            parent: Some(current),
            left: None,
            right: None,
        });
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.arena.first().map(|n| n.id)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Parent of `id`, or `None` for the root and for ids not in the tree.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.parent)
            .map(|p| self.arena[p].id)
    }

    /// Number of levels (0 for an empty tree).
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.arena.len()];
        let mut deepest = 0;
        // Parents always precede children in the arena.
        for (i, node) in self.arena.iter().enumerate() {
            levels[i] = node.parent.map_or(1, |p| levels[p] + 1);
            deepest = deepest.max(levels[i]);
        }
        deepest
    }

    /// Every parent/child link, in the order children were inserted.
    pub fn edges(&self) -> Vec<Edge> {
        self.arena
            .iter()
            .filter_map(|n| n.parent.map(|p| Edge::new(self.arena[p].id, n.id)))
            .collect()
    }

    /// Ids in ascending key order (ties in insertion order).
    ///
    /// Diagnostic only: repairs connect parent/child links, not neighbours in
    /// this sequence.
    pub fn in_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut stack = Vec::new();
        let mut cursor = self.root_index();

        while cursor.is_some() || !stack.is_empty() {
            while let Some(i) = cursor {
                stack.push(i);
                cursor = self.arena[i].left;
            }
            if let Some(i) = stack.pop() {
                out.push(self.arena[i].id);
                cursor = self.arena[i].right;
            }
        }
        out
    }

    fn root_index(&self) -> Option<usize> {
        if self.arena.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}
