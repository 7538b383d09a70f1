//! Index structures for fuzzy retrieval.
//!
//! - BK-tree: metric-space index with radius search
//! - Inverted index: frozen token-to-items map

pub mod bktree;
pub mod inverted;

pub use bktree::*;
pub use inverted::*;
