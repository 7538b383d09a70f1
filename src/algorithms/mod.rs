//! The approximate-matching engine.
//!
//! Pure functions over element-sequence pairs: weighted distances,
//! similarity ratios, match predicates, and edit-trace match extraction.
//! Everything is generic over the element type and monomorphized over the
//! comparer; string forms collect chars once and delegate.

pub mod levenshtein;
pub mod matches;
pub mod trace;

pub use levenshtein::*;
pub use matches::*;
pub use trace::*;
