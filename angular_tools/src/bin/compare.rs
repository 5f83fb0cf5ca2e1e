//! `compare <path>` — loads a `word x y` vector file, builds both the
//! lock-free index and the brute-force oracle over it, then for every `k`
//! from `1` to the vector count runs a batch of random queries and checks
//! that both report the same result *set* (order is not compared, per
//! `SPEC_FULL.md` §9). Prints `Vectors are equal!` on full agreement, or a
//! mismatch diagnostic and stops at the first disagreement — matching the
//! source's `test_c` driver.

use angular_geo::Vec2;
use angular_tools::oracle::ReferenceIndex;
use angular_tools::Algorithm;
use angular_tree::AngularIndex;
use rand::Rng;
use std::collections::HashSet;
use std::process;

/// Random queries tried per `k` before moving on to the next `k`.
const REPEATS: usize = 50;

fn main() {
    pretty_env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: compare <path>");
            process::exit(2);
        }
    };

    let (_words, vectors) = match angular_tools::loader::read_vectors(&path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("failed to read {}: {}", path, e);
            process::exit(1);
        }
    };
    log::info!("loaded {} vectors from {}", vectors.len(), path);

    let mut lock_free: Box<dyn Algorithm> = Box::new(AngularIndex::new());
    let mut oracle: Box<dyn Algorithm> = Box::new(ReferenceIndex::new());
    if let Err(e) = lock_free.preprocess(&vectors) {
        eprintln!("failed to build lock-free index: {}", e);
        process::exit(1);
    }
    if let Err(e) = oracle.preprocess(&vectors) {
        eprintln!("failed to build oracle: {}", e);
        process::exit(1);
    }

    let n = vectors.len();
    let (lo, hi) = bounding_box(&vectors);
    let mut rng = rand::thread_rng();

    for k in 1..=n {
        for _ in 0..REPEATS {
            let q = random_query(&mut rng, lo, hi);

            let got = match lock_free.query(q, k) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("lock-free query failed for k={}: {}", k, e);
                    process::exit(1);
                }
            };
            let want = match oracle.query(q, k) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("oracle query failed for k={}: {}", k, e);
                    process::exit(1);
                }
            };

            let got_set: HashSet<VecKey> = got.iter().map(|(_, v)| VecKey::from(*v)).collect();
            let want_set: HashSet<VecKey> = want.iter().map(|(_, v)| VecKey::from(*v)).collect();

            if got_set != want_set {
                println!("Vectors are not equal for k={} query={}", k, q);
                println!("  expected: {:?}", want.iter().map(|(_, v)| v).collect::<Vec<_>>());
                println!("  received: {:?}", got.iter().map(|(_, v)| v).collect::<Vec<_>>());
                process::exit(1);
            }
        }
    }

    println!("Vectors are equal!");
}

/// Bitwise-hashable wrapper so result sets can be compared with a
/// `HashSet` despite `Vec2` having no `Eq`/`Hash` (see `angular_geo`).
#[derive(PartialEq, Eq, Hash)]
struct VecKey(u64, u64);

impl From<Vec2> for VecKey {
    fn from(v: Vec2) -> Self {
        VecKey(v.x.to_bits(), v.y.to_bits())
    }
}

fn bounding_box(vectors: &[Vec2]) -> (Vec2, Vec2) {
    let mut lo = Vec2::new(f64::INFINITY, f64::INFINITY);
    let mut hi = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for v in vectors {
        lo.x = lo.x.min(v.x);
        lo.y = lo.y.min(v.y);
        hi.x = hi.x.max(v.x);
        hi.y = hi.y.max(v.y);
    }
    (lo, hi)
}

fn random_query(rng: &mut impl Rng, lo: Vec2, hi: Vec2) -> Vec2 {
    loop {
        let x = rng.gen_range(lo.x..=hi.x);
        let y = rng.gen_range(lo.y..=hi.y);
        if x != 0.0 || y != 0.0 {
            return Vec2::new(x, y);
        }
    }
}
