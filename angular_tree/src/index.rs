//! # The public index
//!
//! A thin, capability-shaped wrapper over [`Tree`] exposing the four
//! external operations from `SPEC_FULL.md` §6: `preprocess`, `query`,
//! `contains`, `nearest`, `insert`.

use crate::errors::{KnnError, TreeError};
use crate::knn;
use crate::tree::Tree;
use angular_geo::{linearize, Vec2};

/// A lock-free nearest-neighbor index over 2-D vectors, ranked by cosine
/// similarity via angular linearization.
///
/// `find`-family reads (`query`, `contains`, `nearest`) are wait-free and
/// may run concurrently with `insert`. `preprocess` is a bulk convenience
/// over `insert` and is not safe to call concurrently with other writers
/// (it is, however, safe to run concurrently with any number of readers).
#[derive(Default)]
pub struct AngularIndex {
    tree: Tree,
}

impl AngularIndex {
    /// Builds an empty index.
    pub fn new() -> AngularIndex {
        AngularIndex { tree: Tree::new() }
    }

    /// Number of vectors indexed so far.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True iff no vector has been indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts `vector` under its linearized angle.
    ///
    /// Lock-free: any number of these may run concurrently with each other
    /// and with readers; `Ok` is only returned once the vector is actually
    /// linked and visible to subsequent `find`s.
    pub fn insert(&self, vector: Vec2) -> Result<(), TreeError> {
        let key = linearize(vector)?;
        self.tree.insert(key, vector)?;
        Ok(())
    }

    /// Bulk-loads `vectors` via repeated [`AngularIndex::insert`].
    ///
    /// Not thread-safe with other writers (callers must serialize bulk
    /// loads against each other); safe to run concurrently with readers.
    pub fn preprocess(&self, vectors: &[Vec2]) -> Result<(), TreeError> {
        for v in vectors {
            self.insert(*v)?;
        }
        Ok(())
    }

    /// The `k` vectors closest to `query` by cosine similarity, nearest
    /// first, as `(angular-rank score, vector)` pairs.
    pub fn query(&self, query: Vec2, k: usize) -> Result<Vec<(f64, Vec2)>, KnnError> {
        knn::knn(&self.tree, query, k)
    }

    /// True iff `query` itself (bitwise-equal coordinates) is indexed.
    ///
    /// An empty tree, or a search that terminates on a node with a
    /// different value than `query`, both count as "not contained" — the
    /// source's `contains` dereferences its search iterator unchecked,
    /// which is undefined behavior on an empty tree; this implementation
    /// treats both cases uniformly instead.
    pub fn contains(&self, query: Vec2) -> Result<bool, KnnError> {
        let lq = linearize(query)?;
        let it = self.tree.find(lq);
        match it.pair() {
            Ok((_, value)) => Ok(value == query),
            Err(_) => Ok(false),
        }
    }

    /// The single vector closest to `query` by cosine similarity.
    pub fn nearest(&self, query: Vec2) -> Result<Vec2, KnnError> {
        let mut results = self.query(query, 1)?;
        results.pop().map(|(_, v)| v).ok_or(KnnError::EmptyTree)
    }
}
