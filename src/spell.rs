//! Spell checking over a frozen vocabulary.
//!
//! The BK-tree-backed checker holds the vocabulary twice: a folded hash
//! set for the exact-membership fast path and a metric tree for radius
//! suggestions. The per-word radius comes from a [`MaxDistance`] metric.

use ahash::AHashSet;
use rayon::prelude::*;
use std::sync::Arc;

use crate::comparer::TextComparer;
use crate::indexing::BkTree;
use crate::metric::{MaxDistance, Metric};

/// Outcome of a spelling check: correctness plus ranked suggestions,
/// ascending by distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellCheck {
    pub correct: bool,
    pub suggestions: Vec<(String, usize)>,
}

impl SpellCheck {
    fn correct() -> Self {
        Self {
            correct: true,
            suggestions: Vec::new(),
        }
    }
}

struct Backend {
    comparer: Arc<dyn TextComparer>,
    /// Folded vocabulary keys for exact membership.
    vocabulary: AHashSet<String>,
    tree: BkTree<String>,
    max_distance: MaxDistance,
    max_suggestions: Option<usize>,
}

/// Checks words against a vocabulary and proposes nearby replacements.
pub struct SpellChecker {
    backend: Option<Backend>,
}

impl SpellChecker {
    /// Checker that reports every word as correct.
    #[must_use]
    pub fn null() -> Self {
        Self { backend: None }
    }

    /// Checker over a vocabulary. Words fold under `comparer` for
    /// membership; suggestions come from a BK-tree under `metric` with a
    /// per-word radius from `max_distance`.
    pub fn with_vocabulary<I, S>(
        words: I,
        comparer: Arc<dyn TextComparer>,
        metric: Arc<dyn Metric<String>>,
        max_distance: MaxDistance,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = AHashSet::new();
        let mut tree = BkTree::new(metric);
        for word in words {
            let word = word.into();
            vocabulary.insert(comparer.fold(&word).into_owned());
            tree.insert(word);
        }
        Self {
            backend: Some(Backend {
                comparer,
                vocabulary,
                tree,
                max_distance,
                max_suggestions: None,
            }),
        }
    }

    /// Cap the number of suggestions per check. Unlimited by default.
    #[must_use]
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        if let Some(backend) = &mut self.backend {
            backend.max_suggestions = Some(max_suggestions);
        }
        self
    }

    /// Whether the word is in the vocabulary; if not, the nearby
    /// vocabulary words within the word's radius, ascending by distance.
    #[must_use]
    pub fn check_spelling(&self, word: &str) -> SpellCheck {
        let Some(backend) = &self.backend else {
            return SpellCheck::correct();
        };
        if backend.vocabulary.contains(backend.comparer.fold(word).as_ref()) {
            return SpellCheck::correct();
        }

        let radius = backend.max_distance.radius(word);
        let query = word.to_string();
        let suggestions = backend
            .tree
            .find_all(&query, radius, backend.max_suggestions)
            .into_iter()
            .map(|(suggestion, dist)| (suggestion.clone(), dist))
            .collect();
        SpellCheck {
            correct: false,
            suggestions,
        }
    }

    /// The word itself when correctly spelled, otherwise the single
    /// nearest vocabulary word within the word's radius.
    #[must_use]
    pub fn try_fix_spelling(&self, word: &str) -> Option<String> {
        let Some(backend) = &self.backend else {
            return Some(word.to_string());
        };
        if backend.vocabulary.contains(backend.comparer.fold(word).as_ref()) {
            return Some(word.to_string());
        }

        let query = word.to_string();
        backend
            .tree
            .find(&query, backend.max_distance.radius(word))
            .map(|(suggestion, _)| suggestion.clone())
    }

    /// Check many words in parallel.
    #[must_use]
    pub fn batch_check(&self, words: &[String]) -> Vec<SpellCheck> {
        words
            .par_iter()
            .map(|word| self.check_spelling(word))
            .collect()
    }
}

impl std::fmt::Debug for SpellChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            None => f.write_str("SpellChecker::Null"),
            Some(backend) => f
                .debug_struct("SpellChecker")
                .field("vocabulary", &backend.vocabulary.len())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::{IgnoreCase, Ordinal};
    use crate::metric::LevenshteinMetric;

    fn sample_checker() -> SpellChecker {
        SpellChecker::with_vocabulary(
            ["book", "books", "cake", "boo", "boon", "cook", "cape", "cart"],
            Arc::new(Ordinal),
            Arc::new(LevenshteinMetric::new(Ordinal)),
            MaxDistance::default(),
        )
    }

    #[test]
    fn vocabulary_word_is_correct() {
        let checker = sample_checker();
        let result = checker.check_spelling("book");
        assert!(result.correct);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn misspelling_yields_suggestions() {
        let checker = sample_checker();
        // radius ⌊0.25·4⌋ = 1: only "cook" is close enough.
        let result = checker.check_spelling("cool");
        assert!(!result.correct);
        assert_eq!(result.suggestions, [("cook".to_string(), 1)]);
    }

    #[test]
    fn suggestions_are_sorted_by_distance() {
        let checker = SpellChecker::with_vocabulary(
            ["book", "books", "cake", "boo", "boon", "cook", "cape", "cart"],
            Arc::new(Ordinal),
            Arc::new(LevenshteinMetric::new(Ordinal)),
            MaxDistance::fixed(|_| 2),
        );
        let result = checker.check_spelling("cool");
        assert_eq!(
            result.suggestions,
            [
                ("cook".to_string(), 1),
                ("boon".to_string(), 2),
                ("boo".to_string(), 2),
                ("book".to_string(), 2),
            ]
        );
    }

    #[test]
    fn try_fix_returns_nearest() {
        let checker = sample_checker();
        assert_eq!(checker.try_fix_spelling("cool"), Some("cook".to_string()));
        assert_eq!(checker.try_fix_spelling("book"), Some("book".to_string()));
        assert_eq!(checker.try_fix_spelling("zzzz"), None);
    }

    #[test]
    fn null_checker_accepts_everything() {
        let checker = SpellChecker::null();
        assert!(checker.check_spelling("qwxzt").correct);
        assert_eq!(checker.try_fix_spelling("qwxzt"), Some("qwxzt".to_string()));
    }

    #[test]
    fn max_suggestions_caps_results() {
        let checker = SpellChecker::with_vocabulary(
            ["book", "books", "cake", "boo", "boon", "cook", "cape", "cart"],
            Arc::new(Ordinal),
            Arc::new(LevenshteinMetric::new(Ordinal)),
            MaxDistance::fixed(|_| 2),
        )
        .with_max_suggestions(2);
        let result = checker.check_spelling("cool");
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.suggestions[0], ("cook".to_string(), 1));
    }

    #[test]
    fn batch_check_agrees_with_sequential() {
        let checker = sample_checker();
        let words: Vec<String> = ["book", "cool", "zzzz"].iter().map(|s| s.to_string()).collect();
        let batch = checker.batch_check(&words);
        for (word, result) in words.iter().zip(&batch) {
            assert_eq!(result, &checker.check_spelling(word));
        }
    }

    #[test]
    fn folded_membership() {
        let checker = SpellChecker::with_vocabulary(
            ["Apple", "Banana"],
            Arc::new(IgnoreCase),
            Arc::new(LevenshteinMetric::new(IgnoreCase)),
            MaxDistance::default(),
        );
        assert!(checker.check_spelling("apple").correct);
        assert!(checker.check_spelling("APPLE").correct);
        assert_eq!(checker.try_fix_spelling("aple"), Some("Apple".to_string()));
    }
}
