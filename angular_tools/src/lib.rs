//! # angular-tools
//!
//! The out-of-scope external collaborators around `angular-tree`: the
//! `word x y` vector file loader, the brute-force [`oracle::ReferenceIndex`]
//! used only as a test oracle, the shared [`Algorithm`] capability both
//! indexes implement, and the `compare` CLI binary. See the workspace root
//! `SPEC_FULL.md` §6.

mod errors;
pub mod loader;
pub mod oracle;

pub use errors::ToolsError;

use angular_geo::Vec2;
use angular_tree::AngularIndex;
use oracle::ReferenceIndex;

/// The capability both the lock-free index and the brute-force oracle
/// expose, so the `compare` binary can drive either one identically.
///
/// Kept small deliberately: `preprocess` to bulk-load, `query` to search.
/// Neither implementor needs more than this to be comparable.
pub trait Algorithm {
    /// Bulk-loads `vectors`. Not safe to call concurrently with other
    /// writers against the same instance.
    fn preprocess(&mut self, vectors: &[Vec2]) -> Result<(), ToolsError>;

    /// The `k` vectors closest to `query`, nearest first.
    fn query(&mut self, query: Vec2, k: usize) -> Result<Vec<(f64, Vec2)>, ToolsError>;
}

impl Algorithm for AngularIndex {
    fn preprocess(&mut self, vectors: &[Vec2]) -> Result<(), ToolsError> {
        AngularIndex::preprocess(self, vectors)?;
        Ok(())
    }

    fn query(&mut self, query: Vec2, k: usize) -> Result<Vec<(f64, Vec2)>, ToolsError> {
        Ok(AngularIndex::query(self, query, k)?)
    }
}

impl Algorithm for ReferenceIndex {
    fn preprocess(&mut self, vectors: &[Vec2]) -> Result<(), ToolsError> {
        ReferenceIndex::preprocess(self, vectors);
        Ok(())
    }

    fn query(&mut self, query: Vec2, k: usize) -> Result<Vec<(f64, Vec2)>, ToolsError> {
        Ok(ReferenceIndex::query(self, query, k)?)
    }
}
