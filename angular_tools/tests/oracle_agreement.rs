//! P5 and S6 from `SPEC_FULL.md` §8: the lock-free index and the
//! brute-force oracle must agree on the result *set* for every `k`, across
//! many random queries against a sizeable indexed population.

use angular_geo::{linearize, Vec2};
use angular_tools::oracle::ReferenceIndex;
use angular_tree::AngularIndex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn distinct_random_vectors(n: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut seen_angles = HashSet::new();
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let x: f64 = rng.gen_range(-10.0..10.0);
        let y: f64 = rng.gen_range(-10.0..10.0);
        let v = Vec2::new(x, y);
        let angle = match linearize(v) {
            Ok(a) => a,
            Err(_) => continue,
        };
        if seen_angles.insert(angle.to_bits()) {
            out.push(v);
        }
    }
    out
}

fn as_set(pairs: &[(f64, Vec2)]) -> HashSet<(u64, u64)> {
    pairs.iter().map(|(_, v)| (v.x.to_bits(), v.y.to_bits())).collect()
}

#[test]
fn s6_oracle_agreement_at_scale() {
    // A few hundred vectors with pairwise distinct angles, 50 random
    // queries, every k from 1 to n — exactly the property the source's
    // Tester enforces.
    let vectors = distinct_random_vectors(300, 7);

    let index = AngularIndex::new();
    index.preprocess(&vectors).unwrap();

    let mut oracle = ReferenceIndex::new();
    oracle.preprocess(&vectors);

    let mut rng = SmallRng::seed_from_u64(99);
    let n = vectors.len();

    for _ in 0..50 {
        let x: f64 = rng.gen_range(-10.0..10.0);
        let y: f64 = rng.gen_range(-10.0..10.0);
        let q = match Vec2::new(x, y) {
            v if v.x != 0.0 || v.y != 0.0 => v,
            _ => continue,
        };

        for k in 1..=n {
            let got = index.query(q, k).unwrap();
            let want = oracle.query(q, k).unwrap();
            assert_eq!(
                as_set(&got),
                as_set(&want),
                "mismatch at k={} for query {:?}",
                k,
                q
            );
        }
    }
}

#[test]
fn p6_requery_is_idempotent_through_the_oracle_too() {
    let vectors = distinct_random_vectors(64, 11);
    let mut oracle = ReferenceIndex::new();
    oracle.preprocess(&vectors);

    let q = Vec2::new(1.0, 0.3);
    let first = oracle.query(q, 5).unwrap();
    let second = oracle.query(q, 5).unwrap();
    assert_eq!(as_set(&first), as_set(&second));
}
