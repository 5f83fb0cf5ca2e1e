//! Error type wrapping the layers `angular_tools` sits on top of, in the
//! same hand-rolled style as `angular_tree::errors`.

use angular_tree::{KnnError, TreeError};
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ToolsError {
    /// Propagated from reading or parsing the input file.
    Io(io::Error),
    /// Propagated from the lock-free index.
    Tree(TreeError),
    /// Propagated from a k-NN query against either index.
    Knn(KnnError),
}

impl fmt::Display for ToolsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ToolsError::Io(e) => write!(f, "{}", e),
            ToolsError::Tree(e) => write!(f, "{}", e),
            ToolsError::Knn(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ToolsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolsError::Io(e) => Some(e),
            ToolsError::Tree(e) => Some(e),
            ToolsError::Knn(e) => Some(e),
        }
    }
}

impl From<io::Error> for ToolsError {
    fn from(e: io::Error) -> Self {
        ToolsError::Io(e)
    }
}

impl From<TreeError> for ToolsError {
    fn from(e: TreeError) -> Self {
        ToolsError::Tree(e)
    }
}

impl From<KnnError> for ToolsError {
    fn from(e: KnnError) -> Self {
        ToolsError::Knn(e)
    }
}
