//! Inverted index construction.
//!
//! Built once, frozen thereafter. Invariants:
//!
//! 1. No empty buckets: every token maps to at least one item.
//! 2. Set semantics: every bucket holds distinct, sorted item ids.

use ahash::{AHashMap, AHashSet};

/// Frozen mapping from token to the items whose name contained it.
///
/// Token keys are stored in whatever canonical form the caller folded
/// them to; lookups must use the same folding.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    buckets: AHashMap<String, Vec<u32>>,
}

impl InvertedIndex {
    /// Build from `(token, item id)` postings. Duplicate postings
    /// collapse; bucket ids come out sorted.
    #[must_use]
    pub fn build<I>(postings: I) -> Self
    where
        I: IntoIterator<Item = (String, u32)>,
    {
        let mut staging: AHashMap<String, AHashSet<u32>> = AHashMap::new();
        for (token, id) in postings {
            staging.entry(token).or_default().insert(id);
        }

        let buckets = staging
            .into_iter()
            .map(|(token, ids)| {
                let mut ids: Vec<u32> = ids.into_iter().collect();
                ids.sort_unstable();
                (token, ids)
            })
            .collect();
        Self { buckets }
    }

    /// Bucket for a token, if the token was ever indexed.
    #[inline]
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&[u32]> {
        self.buckets.get(token).map(Vec::as_slice)
    }

    /// All indexed tokens, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dedupes_and_sorts() {
        let index = InvertedIndex::build([
            ("apple".to_string(), 2),
            ("apple".to_string(), 0),
            ("apple".to_string(), 2),
            ("pie".to_string(), 0),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("apple"), Some(&[0, 2][..]));
        assert_eq!(index.get("pie"), Some(&[0][..]));
        assert_eq!(index.get("tart"), None);
    }

    #[test]
    fn no_empty_buckets() {
        let index = InvertedIndex::build(Vec::<(String, u32)>::new());
        assert!(index.is_empty());
        let index = InvertedIndex::build([("a".to_string(), 1)]);
        assert!(index.tokens().all(|t| !index.get(t).unwrap().is_empty()));
    }
}
