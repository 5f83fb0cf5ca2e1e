//! # k-nearest-neighbor query
//!
//! Built entirely on [`crate::iter::Iter`]: an angular seed corrected to the
//! globally closest visible node, then a symmetric expansion that merges
//! the successor and predecessor walks by circular distance. See
//! `SPEC_FULL.md` §4.E.
//!
//! Wait-free after the initial `find`: only atomic loads and pointer
//! chases, one allocation for the result vector.

use crate::errors::KnnError;
use crate::tree::Tree;
use angular_geo::{circular_distance, linearize, Vec2};

/// Returns the `k` vectors in `tree` angularly closest to `q`, nearest
/// first. `k == 0` or an empty tree yields an empty result; `k` greater
/// than the number of indexed vectors is [`KnnError::Underflow`].
pub(crate) fn knn(tree: &Tree, q: Vec2, k: usize) -> Result<Vec<(f64, Vec2)>, KnnError> {
    if k == 0 || tree.is_empty() {
        return Ok(Vec::new());
    }
    let n = tree.len();
    if k > n {
        return Err(KnnError::Underflow {
            requested: k,
            available: n,
        });
    }

    let lq = linearize(q)?;
    let seed = tree.find(lq);
    if seed.is_empty() {
        return Ok(Vec::new());
    }

    // Seed correction: `find` stops on a search-path node, one of the
    // three candidates {seed, succ(seed), pred(seed)} that minimize
    // circular distance to `lq`. Walk to whichever of those three is
    // actually closest.
    let mut best = seed;
    let next = seed.inc()?;
    if circular_distance(lq, next.pair()?.0) < circular_distance(lq, best.pair()?.0) {
        best = next;
    }
    let prev = seed.dec()?;
    if circular_distance(lq, prev.pair()?.0) < circular_distance(lq, best.pair()?.0) {
        best = prev;
    }

    let mut results = Vec::with_capacity(k);
    results.push(best.pair()?);

    let mut left = best.inc()?;
    let mut right = best.dec()?;

    while results.len() < k {
        let l_pair = left.pair()?;
        let r_pair = right.pair()?;
        // Ties go to the predecessor walker.
        if circular_distance(l_pair.0, lq) < circular_distance(r_pair.0, lq) {
            results.push(l_pair);
            left = left.inc()?;
        } else {
            results.push(r_pair);
            right = right.dec()?;
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;
    use std::f64::consts::PI;

    fn tree_of(vectors: &[Vec2]) -> Tree {
        let tree = Tree::new();
        for v in vectors {
            let a = linearize(*v).unwrap();
            tree.insert(a, *v).unwrap();
        }
        tree
    }

    #[test]
    fn k_zero_is_empty() {
        let tree = tree_of(&[Vec2::new(1.0, 0.0)]);
        assert!(knn(&tree, Vec2::new(1.0, 0.0), 0).unwrap().is_empty());
    }

    #[test]
    fn empty_tree_is_empty_result() {
        let tree = Tree::new();
        assert!(knn(&tree, Vec2::new(1.0, 0.0), 5).unwrap().is_empty());
    }

    #[test]
    fn underflow_when_k_exceeds_population() {
        let tree = tree_of(&[Vec2::new(1.0, 0.0)]);
        let err = knn(&tree, Vec2::new(1.0, 0.0), 2).unwrap_err();
        assert_eq!(
            err,
            KnnError::Underflow {
                requested: 2,
                available: 1
            }
        );
    }

    #[test]
    fn single_vector_is_its_own_nearest() {
        let tree = tree_of(&[Vec2::new(1.0, 0.0)]);
        let res = knn(&tree, Vec2::new(0.0, 1.0), 1).unwrap();
        assert_eq!(res, vec![(0.0, Vec2::new(1.0, 0.0))]);
    }

    #[test]
    fn axis_aligned_quartet_returns_expected_set() {
        // S3
        let vectors = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
        ];
        let tree = tree_of(&vectors);
        let res = knn(&tree, Vec2::new(1.0, 0.1), 2).unwrap();
        let mut got: Vec<Vec2> = res.into_iter().map(|(_, v)| v).collect();
        got.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        let mut want = vec![Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        want.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        assert_eq!(got, want);
    }

    #[test]
    fn wrap_around_seam_is_crossed() {
        // S4: angles just below 2*PI must be reachable from a query just
        // above 0 (and vice versa) by wrapping, not by walking the "long
        // way" around through the middle of the range.
        let vectors = [
            Vec2::new(0.01_f64.cos(), 0.01_f64.sin()),
            Vec2::new(0.05_f64.cos(), 0.05_f64.sin()),
            Vec2::new((2.0 * PI - 0.08).cos(), (2.0 * PI - 0.08).sin()),
            Vec2::new((2.0 * PI - 0.01).cos(), (2.0 * PI - 0.01).sin()),
        ];
        let tree = tree_of(&vectors);
        let q_angle = 2.0 * PI - 0.001;
        let q = Vec2::new(q_angle.cos(), q_angle.sin());
        let res = knn(&tree, q, 3).unwrap();
        assert_eq!(res.len(), 3);
        // The angularly farthest point (0.05 rad) must be excluded.
        let farthest = linearize(vectors[1]).unwrap();
        assert!(!res.iter().any(|(k, _)| *k == farthest));
    }
}
