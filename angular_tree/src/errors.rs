//! Error types surfaced at the `angular_tree` API boundary.
//!
//! Mirrors the error-enum convention used throughout this workspace: one
//! `enum` per failure domain, hand-written `Display`/`Error` impls, no
//! panics on the public read/write paths.

use angular_geo::{GeoError, Vec2};
use std::fmt;

/// Helper alias for a call that could go wrong against the tree.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from [`crate::tree::Tree::insert`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeError {
    /// The vector's linearized angle collides with a key already present.
    /// Carries the rejected vector.
    DuplicateKey(Vec2),
    /// The query vector's direction is undefined (the zero vector).
    Geo(GeoError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeError::DuplicateKey(v) => {
                write!(f, "a vector with the same linearized angle as {} is already indexed", v)
            }
            TreeError::Geo(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TreeError {}

impl From<GeoError> for TreeError {
    fn from(e: GeoError) -> Self {
        TreeError::Geo(e)
    }
}

/// Errors from dereferencing a [`crate::iter::Iter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterError {
    /// The iterator's pointer is null — either the tree was empty at the
    /// reader's epoch, or a search terminated without visiting any node.
    EmptyIterator,
}

impl fmt::Display for IterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IterError::EmptyIterator => write!(f, "cannot dereference an empty iterator"),
        }
    }
}

impl std::error::Error for IterError {}

/// Errors from k-NN queries ([`crate::index::AngularIndex::query`] and
/// friends).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnnError {
    /// `nearest`/`query` was called against an index with no visible nodes.
    EmptyTree,
    /// More neighbors were requested than are present in the index.
    Underflow {
        /// Number of neighbors requested.
        requested: usize,
        /// Number of vectors actually indexed.
        available: usize,
    },
    /// The query vector's direction is undefined (the zero vector).
    Geo(GeoError),
}

impl fmt::Display for KnnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KnnError::EmptyTree => write!(f, "no vectors are indexed"),
            KnnError::Underflow { requested, available } => write!(
                f,
                "requested {} neighbors but only {} vectors are indexed",
                requested, available
            ),
            KnnError::Geo(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for KnnError {}

impl From<GeoError> for KnnError {
    fn from(e: GeoError) -> Self {
        KnnError::Geo(e)
    }
}

impl From<IterError> for KnnError {
    fn from(_: IterError) -> Self {
        // An iterator going empty mid-walk only happens against an empty
        // tree; k == 0 is handled before any iterator is touched.
        KnnError::EmptyTree
    }
}
