#![allow(dead_code)]
#![deny(warnings)]

//! # angular-tree
//!
//! A lock-free, epoch-versioned, insert-only ordered index keyed by angle,
//! with a wait-free snapshot iterator and a k-nearest-neighbor query built
//! on top of it.
//!
//! Reads (`find`, `inc`/`dec`, `query`, `contains`, `nearest`) are
//! wait-free and may run concurrently with any number of lock-free
//! `insert`s. Deletion and rebalancing are not supported — see the
//! workspace root `SPEC_FULL.md` for the full design and `DESIGN.md` for
//! where each piece is grounded.

mod errors;
mod index;
mod iter;
mod knn;
mod node;
mod tree;

pub use errors::{IterError, KnnError, TreeError, TreeResult};
pub use index::AngularIndex;
pub use iter::Iter;
pub use tree::Tree;
