//! # Node arena
//!
//! Pre-sized bump allocator for search-tree nodes. Each worker owns one
//! arena, nodes are addressed by index handles, and nothing is freed
//! until the whole arena is dropped at the end of the decision, which
//! replaces per-node reference counting with a single lifetime.

use crate::game::{Color, Position, BOARD_CELLS};
use thiserror::Error;

/// Raised by [`NodeArena::alloc`] when the arena is full. The searcher
/// treats this as a soft stop and reports whatever statistics it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("node arena exhausted")]
pub struct ArenaExhausted;

/// Handle to a node inside one arena. Never valid across arenas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(u32);

/// One search-tree node.
///
/// `count`/`val` are the primary visit count and cumulative reward (each
/// playout contributes 0 or 1); `rave_count`/`rave_val` are the
/// all-moves-as-first statistics blended in during selection. `color` is
/// the player choosing among this node's children.
pub struct Node {
    pub child: [Option<NodeId>; BOARD_CELLS],
    pub count: u32,
    pub val: u32,
    pub rave_count: u32,
    pub rave_val: u32,
    pub color: Color,
}

impl Node {
    fn new(color: Color) -> Node {
        Node {
            child: [None; BOARD_CELLS],
            count: 0,
            val: 0,
            rave_count: 0,
            rave_val: 0,
            color,
        }
    }

    /// The child handle stored for `pos`, if that move has been expanded.
    #[inline]
    pub fn child_at(&self, pos: Position) -> Option<NodeId> {
        self.child[pos]
    }
}

/// Fixed-capacity node storage with bump allocation.
pub struct NodeArena {
    nodes: Vec<Node>,
    capacity: usize,
}

impl NodeArena {
    /// An empty arena that will hold at most `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Claim the next free slot, zero-initialised for `color` to move.
    pub fn alloc(&mut self, color: Color) -> Result<NodeId, ArenaExhausted> {
        if self.nodes.len() == self.capacity {
            return Err(ArenaExhausted);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(color));
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Nodes allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
