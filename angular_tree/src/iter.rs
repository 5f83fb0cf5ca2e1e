//! # Snapshot iterator
//!
//! An in-order successor/predecessor walk over the tree, bounded by a
//! pinned epoch and treating the keyspace as cyclic (stepping past the
//! maximum wraps to the minimum and vice versa). See `SPEC_FULL.md` §4.D.
//!
//! Wait-free and stable under concurrent inserts: links are only ever
//! added, so the path an iterator already committed to stays intact; any
//! node linked after the iterator's epoch was pinned is filtered out by
//! [`is_null`].

use crate::errors::IterError;
use crate::node::{is_null, Direction, Node};
use angular_geo::Vec2;
use std::ptr;

/// A position in the tree, pinned to the epoch it was produced at.
#[derive(Clone, Copy)]
pub struct Iter {
    node: *mut Node,
    epoch: u64,
}

// SAFETY: `Iter` only ever dereferences `node` behind an `is_null` check
// against its pinned `epoch`, and the tree it points into never frees a
// reachable node while readers may be active.
unsafe impl Send for Iter {}
unsafe impl Sync for Iter {}

impl Iter {
    pub(crate) fn new(node: *mut Node, epoch: u64) -> Iter {
        Iter { node, epoch }
    }

    /// True iff this iterator does not point at a node — either the tree
    /// had no node visible at its epoch, or (for an insert-returned
    /// iterator, which is not epoch-bound) the tree was empty.
    pub fn is_empty(&self) -> bool {
        self.node.is_null()
    }

    /// The `(angle, vector)` pair at this position.
    pub fn pair(&self) -> Result<(f64, Vec2), IterError> {
        if self.node.is_null() {
            return Err(IterError::EmptyIterator);
        }
        // SAFETY: non-null, and nodes are never freed while reachable.
        let n = unsafe { &*self.node };
        Ok((n.key, n.value))
    }

    /// In-order successor, wrapping past the maximum key to the minimum.
    pub fn inc(&self) -> Result<Iter, IterError> {
        self.step(Direction::Right)
    }

    /// In-order predecessor, wrapping past the minimum key to the maximum.
    pub fn dec(&self) -> Result<Iter, IterError> {
        self.step(Direction::Left)
    }

    fn step(&self, d: Direction) -> Result<Iter, IterError> {
        if self.node.is_null() {
            return Err(IterError::EmptyIterator);
        }
        Ok(Iter::new(step_impl(self.node, self.epoch, d), self.epoch))
    }
}

/// Implementation modified from Pfaff's in-order BST successor/predecessor
/// walk. Comments describe the successor (`d = Right`) direction; `dec`
/// (`d = Left`) is the mirror image.
fn step_impl(start: *mut Node, epoch: u64, d: Direction) -> *mut Node {
    // SAFETY: every pointer dereferenced below was just confirmed visible
    // at `epoch` by `is_null`, and the tree never frees a reachable node.
    unsafe {
        let mut np = start;
        let mut chl = (*np).child(d);

        if !is_null(chl, epoch) {
            // Descend into the d-subtree, then take the other(d)-most node
            // in it (left-most of the right subtree, for the successor).
            loop {
                np = chl;
                chl = (*np).child(d.other());
                if is_null(chl, epoch) {
                    break;
                }
            }
        } else {
            // Ascend until we arrive from the other(d) side of some
            // ancestor — that ancestor is the answer — or run off the top,
            // in which case wrap around to the other(d)-most node overall.
            loop {
                let prev = np;
                let parent = (*prev).parent as *mut Node;
                np = parent;
                if np.is_null() {
                    let mut cursor = prev;
                    np = ptr::null_mut();
                    while !is_null(cursor, epoch) {
                        np = cursor;
                        cursor = (*cursor).child(d.other());
                    }
                    break;
                }
                if (*np).child(d) != prev {
                    break;
                }
            }
        }
        np
    }
}
