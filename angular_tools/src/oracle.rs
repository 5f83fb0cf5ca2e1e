//! # Brute-force reference oracle
//!
//! `ReferenceIndex` holds every indexed vector in a plain `Vec` and answers
//! `query` by sorting the whole collection by `cosine_normed` against the
//! normalized query vector, descending, and taking the first `k`. It exists
//! only so tests can check the lock-free index's result *set* against a
//! trivially-correct implementation — see `SPEC_FULL.md` §6 and the P5/S6
//! properties in §8. It is never a production query path.

use angular_geo::Vec2;
use angular_tree::KnnError;

/// A brute-force nearest-neighbor index: an unordered `Vec<Vec2>`, scanned
/// in full on every query.
#[derive(Default)]
pub struct ReferenceIndex {
    vectors: Vec<Vec2>,
}

impl ReferenceIndex {
    /// Builds an empty oracle.
    pub fn new() -> ReferenceIndex {
        ReferenceIndex { vectors: Vec::new() }
    }

    /// Number of vectors held.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True iff no vector has been added.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Appends `vectors` to the oracle's backing store. The oracle has no
    /// notion of a duplicate angular key (it never linearizes anything);
    /// unlike the lock-free index, two vectors with the same angle are
    /// simply two entries.
    pub fn preprocess(&mut self, vectors: &[Vec2]) {
        self.vectors.extend_from_slice(vectors);
    }

    /// The `k` vectors closest to `query` by cosine similarity, nearest
    /// first, as `(cosine-similarity score, vector)` pairs. `k == 0` or an
    /// empty oracle yields an empty result; `k` greater than the number of
    /// held vectors is [`KnnError::Underflow`], matching the source
    /// `ReferenceIndex`'s assumption that callers never ask for more
    /// neighbors than exist.
    pub fn query(&self, query: Vec2, k: usize) -> Result<Vec<(f64, Vec2)>, KnnError> {
        if k == 0 || self.vectors.is_empty() {
            return Ok(Vec::new());
        }
        let n = self.vectors.len();
        if k > n {
            return Err(KnnError::Underflow {
                requested: k,
                available: n,
            });
        }
        let unit_query = query.normalized()?;
        let mut scored: Vec<(f64, Vec2)> = self
            .vectors
            .iter()
            .map(|&v| (unit_query.cosine_normed(v), v))
            .collect();
        // Descending by score; ties keep their original relative order
        // (`sort_by` is stable), which is as good a tie-break as any given
        // the source does not specify one (see `SPEC_FULL.md` §9).
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).expect("cosine score is never NaN"));
        scored.truncate(k);
        Ok(scored)
    }

    /// True iff `query` itself (bitwise-equal coordinates) is held.
    pub fn contains(&self, query: Vec2) -> bool {
        self.vectors.iter().any(|&v| v == query)
    }

    /// The single vector closest to `query` by cosine similarity.
    pub fn nearest(&self, query: Vec2) -> Result<Vec2, KnnError> {
        if self.vectors.is_empty() {
            return Err(KnnError::EmptyTree);
        }
        let mut results = self.query(query, 1)?;
        Ok(results.pop().expect("k=1 against a nonempty oracle always yields one result").1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_oracle_scenarios() {
        let oracle = ReferenceIndex::new();
        assert!(oracle.query(Vec2::new(1.0, 0.0), 0).unwrap().is_empty());
        assert!(oracle.query(Vec2::new(1.0, 0.0), 5).unwrap().is_empty());
        assert_eq!(oracle.nearest(Vec2::new(1.0, 0.0)), Err(KnnError::EmptyTree));
    }

    #[test]
    fn ranks_by_cosine_similarity_descending() {
        let mut oracle = ReferenceIndex::new();
        oracle.preprocess(&[
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
        ]);
        let res = oracle.query(Vec2::new(1.0, 0.1), 1).unwrap();
        assert_eq!(res[0].1, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn underflow_when_k_exceeds_population() {
        let mut oracle = ReferenceIndex::new();
        oracle.preprocess(&[Vec2::new(1.0, 0.0)]);
        let err = oracle.query(Vec2::new(1.0, 0.0), 2).unwrap_err();
        assert_eq!(
            err,
            KnnError::Underflow {
                requested: 2,
                available: 1
            }
        );
    }

    #[test]
    fn contains_checks_bitwise_equality() {
        let mut oracle = ReferenceIndex::new();
        oracle.preprocess(&[Vec2::new(1.0, 0.0)]);
        assert!(oracle.contains(Vec2::new(1.0, 0.0)));
        assert!(!oracle.contains(Vec2::new(1.0, 0.0001)));
    }
}
