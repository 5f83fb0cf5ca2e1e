//! # The lock-free ordered index
//!
//! An insert-only binary search tree keyed by `f64` angle, with a wait-free
//! `find` and a lock-free `insert`. See `SPEC_FULL.md` §4.C.

use crate::errors::TreeError;
use crate::iter::Iter;
use crate::node::{is_null, Direction, Node, MAX_EPOCH};
use angular_geo::Vec2;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicU64, AtomicUsize, Ordering};

/// A lock-free, epoch-versioned ordered index over `f64` keys.
///
/// Reads (`find`) are wait-free and may run concurrently with any number of
/// `insert`s from other threads; `insert` itself is lock-free (some
/// contending insert always makes progress). The tree never removes or
/// rebalances a node once linked — see the module docs for why that makes
/// memory reclamation a non-issue on the read path.
pub struct Tree {
    root: AtomicPtr<Node>,
    epoch: AtomicU64,
    len: AtomicUsize,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// Builds an empty tree.
    pub fn new() -> Tree {
        Tree {
            root: AtomicPtr::new(ptr::null_mut()),
            epoch: AtomicU64::new(0),
            len: AtomicUsize::new(0),
        }
    }

    /// Number of nodes linked into the tree. Wait-free, but since it races
    /// concurrent inserts it is only a snapshot, not a guarantee about any
    /// particular reader's epoch.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// True iff no node has ever been linked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait-free. Snapshots the tree's current epoch and root, then
    /// descends comparing `target` against each visited node's key: left
    /// when the node's key is greater, right when it is smaller, stopping
    /// on an exact match or when the next child is null-or-invisible at the
    /// snapshot epoch.
    ///
    /// Returns an iterator pinned to the last node visited (possibly
    /// "empty", i.e. null, if the tree has no visible node at all) and to
    /// the snapshot epoch.
    pub fn find(&self, target: f64) -> Iter {
        let epoch = self.epoch.load(Ordering::Acquire);
        let root = self.root.load(Ordering::Acquire);
        Iter::new(find_impl(target, root, epoch), epoch)
    }

    /// Lock-free. Allocates a node for `(key, value)` and links it into the
    /// tree. Fails with [`TreeError::DuplicateKey`] if `key` is already
    /// present, without ever publishing the new node.
    pub fn insert(&self, key: f64, value: Vec2) -> Result<Iter, TreeError> {
        let mut node = Node::new_boxed(key, value, ptr::null());

        loop {
            let observed_root = self.root.load(Ordering::Acquire);
            let loc = find_impl(key, observed_root, MAX_EPOCH);

            let slot: &AtomicPtr<Node>;
            let mut observed_child = ptr::null_mut();

            if loc.is_null() {
                slot = &self.root;
            } else {
                // SAFETY: `loc` came from `find_impl`, which only ever
                // returns null or a pointer read from this tree's own
                // atomics; nodes are never freed while the tree is alive.
                let target = unsafe { &*loc };
                if target.key == key {
                    return Err(TreeError::DuplicateKey(value));
                }
                let dir = if key < target.key {
                    Direction::Left
                } else {
                    Direction::Right
                };
                slot = target.slot(dir);
                observed_child = slot.load(Ordering::Acquire);
            }

            node.parent = loc;
            // The epoch assigned is the counter's pre-increment value, so
            // that `is_null`'s `epoch >= E` test hides exactly the nodes
            // linked after a reader's `E = epoch.load()` snapshot.
            let assigned_epoch = self.epoch.fetch_add(1, Ordering::AcqRel);
            node.epoch.store(assigned_epoch, Ordering::Release);

            let raw = Box::into_raw(node);
            match slot.compare_exchange_weak(
                observed_child,
                raw,
                Ordering::Release,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    self.len.fetch_add(1, Ordering::Release);
                    log::trace!("linked node at epoch {}", assigned_epoch);
                    return Ok(Iter::new(loc, MAX_EPOCH));
                }
                Err(_) => {
                    // Reclaim the box, reset its epoch, and retry from the
                    // (possibly refreshed) root.
                    log::trace!("CAS contention on insert, retrying");
                    node = unsafe { Box::from_raw(raw) };
                    node.epoch.store(0, Ordering::Relaxed);
                }
            }
        }
    }
}

impl Drop for Tree {
    /// Recursively frees every node. Not thread-safe: must only run when no
    /// reader or writer is active, matching the append-only/no-reclaim
    /// discipline during the tree's lifetime (`SPEC_FULL.md` §5).
    fn drop(&mut self) {
        unsafe fn drop_subtree(p: *mut Node) {
            if p.is_null() {
                return;
            }
            let node = Box::from_raw(p);
            drop_subtree(node.left.load(Ordering::Relaxed));
            drop_subtree(node.right.load(Ordering::Relaxed));
        }
        unsafe {
            drop_subtree(self.root.load(Ordering::Relaxed));
        }
    }
}

/// Shared descent used by both `find` and `insert` (the latter with
/// `E = MAX_EPOCH`, treating every already-linked node as visible).
fn find_impl(target: f64, root: *mut Node, epoch: u64) -> *mut Node {
    let mut visited = ptr::null_mut();
    let mut cur = root;
    // SAFETY: every `cur` we dereference was just confirmed non-null and
    // visible by `is_null`, and nodes are never freed while reachable.
    while !unsafe { is_null(cur, epoch) } {
        let node = unsafe { &*cur };
        visited = cur;
        if node.key == target {
            break;
        }
        cur = if node.key > target {
            node.child(Direction::Left)
        } else {
            node.child(Direction::Right)
        };
    }
    visited
}
