//! # The node
//!
//! Each node is immutable in its key and value once constructed; only its
//! child links and epoch are ever updated, and only by a single CAS that
//! publishes the node (child links never change after that). See
//! `SPEC_FULL.md` §3 and §4.B.

use angular_geo::Vec2;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicU64, Ordering};

/// Sentinel meaning "no reader ever hides this node" — writers search with
/// this epoch so they see the entire already-linked structure.
pub(crate) const MAX_EPOCH: u64 = u64::MAX;

/// Which child link a traversal step is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn other(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A node in the ordered index.
///
/// `parent` is set once, before the node is published by the link-CAS in
/// `Tree::insert`, and never mutated afterwards — it does not need to be
/// atomic, only visible-after-publish, which the CAS's release/acquire
/// pair already guarantees for every field written before it.
pub(crate) struct Node {
    pub(crate) key: f64,
    pub(crate) value: Vec2,
    pub(crate) parent: *const Node,
    pub(crate) left: AtomicPtr<Node>,
    pub(crate) right: AtomicPtr<Node>,
    pub(crate) epoch: AtomicU64,
}

// SAFETY: `parent` is written once, from the thread that owns the `Box`,
// strictly before the node is published via the link-CAS in `Tree::insert`.
// After publication it is read-only. `left`/`right`/`epoch` are atomics.
// The tree never frees a node while any reference to it could still be in
// use (append-only, §5), so sharing a `*const Node` across threads is sound.
unsafe impl Send for Node {}
unsafe impl Sync for Node {}

impl Node {
    /// Allocates a new, unlinked node with epoch `0` (not yet a real
    /// epoch — the epoch is overwritten with the tree's next epoch by
    /// `Tree::insert` right before the link-CAS).
    pub(crate) fn new_boxed(key: f64, value: Vec2, parent: *const Node) -> Box<Node> {
        Box::new(Node {
            key,
            value,
            parent,
            left: AtomicPtr::new(ptr::null_mut()),
            right: AtomicPtr::new(ptr::null_mut()),
            epoch: AtomicU64::new(0),
        })
    }

    /// Loads the child in direction `d`.
    pub(crate) fn child(&self, d: Direction) -> *mut Node {
        match d {
            Direction::Left => self.left.load(Ordering::Acquire),
            Direction::Right => self.right.load(Ordering::Acquire),
        }
    }

    /// Atomic slot for the child in direction `d`, for CAS-based linking.
    pub(crate) fn slot(&self, d: Direction) -> &AtomicPtr<Node> {
        match d {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

/// True iff `p` is null or was inserted after the reader's pinned epoch
/// `e` — i.e. not visible to a reader snapshotted at `e`.
///
/// # Safety
/// `p` must be either null or a pointer previously obtained from a live
/// `Tree`'s atomics (child or root links); the tree's append-only
/// discipline guarantees it stays valid for the lifetime of the tree.
pub(crate) unsafe fn is_null(p: *mut Node, e: u64) -> bool {
    p.is_null() || (*p).epoch.load(Ordering::Acquire) >= e
}
