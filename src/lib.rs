//! fuzzyfind - approximate string matching and fuzzy retrieval
//!
//! Three subsystems built on one another:
//! - A generic Levenshtein engine over arbitrary element sequences:
//!   weighted distances, similarity ratios, and approximate subsequence
//!   matches with full edit traces, as eager collections or lazy
//!   iterators over pooled scratch rows.
//! - A BK-tree metric index with insertion, re-grafting deletion, and
//!   radius-bounded nearest search over any discrete metric.
//! - A search provider combining an inverted index of tokenized names
//!   with a BK-tree-backed spell checker.
//!
//! # Distances and matches
//!
//! ```
//! use fuzzyfind::{MatchOptions, distance, first_match};
//!
//! assert_eq!(distance("kitten", "sitting"), 3);
//!
//! let m = first_match("word", "World", MatchOptions::new().with_max_distance(1));
//! assert!(m.success);
//! assert_eq!((m.index, m.length, m.distance), (0, 3, 1));
//! ```
//!
//! # Indexed retrieval
//!
//! ```
//! use fuzzyfind::{BkTree, SearchOptions, SearchProvider, Searcher, SuggestionLimit};
//!
//! let mut tree = BkTree::levenshtein();
//! tree.insert_all(["book", "cook", "cake"].map(String::from));
//! assert_eq!(tree.find(&"cool".to_string(), 2), Some((&"cook".to_string(), 1)));
//!
//! let provider = SearchProvider::new(
//!     vec!["Apple Pie".to_string(), "Apple Tart".to_string()],
//!     Clone::clone,
//! );
//! let options = SearchOptions::new().with_max_suggestions(SuggestionLimit::AtMost(3));
//! let hit = provider.search("Apple Pie", &options);
//! assert!(hit.success());
//! ```

pub mod algorithms;
pub mod buffer;
pub mod comparer;
pub mod error;
pub mod indexing;
pub mod metric;
pub mod search;
pub mod spell;
pub mod tokenize;

pub use algorithms::*;
pub use buffer::{ArrayPool, PooledBuf};
pub use comparer::{ElementComparer, FnComparer, IgnoreCase, Ordinal, TextComparer};
pub use error::Error;
pub use indexing::{BkTree, InvertedIndex};
pub use metric::{FnMetric, LevenshteinMetric, MaxDistance, Metric};
pub use search::{
    CombinedProvider, ProviderConfig, SearchHit, SearchOptions, SearchProvider, Searcher,
    SuggestionLimit,
};
pub use spell::{SpellCheck, SpellChecker};
pub use tokenize::{FnTokenizer, Tokenizer, WordTokenizer};
