//! Inverted-index search provider with spell-normalized queries.
//!
//! Construction tokenizes every item name into a frozen inverted index
//! and builds a spell checker over the token vocabulary. A query is
//! tokenized, each token spell-normalized, and candidates are ranked by
//! the fraction of query tokens they miss; ties break toward names whose
//! length is closest to the query's.

use ahash::AHashMap;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::comparer::{Ordinal, TextComparer};
use crate::indexing::InvertedIndex;
use crate::metric::{LevenshteinMetric, MaxDistance, Metric};
use crate::spell::SpellChecker;
use crate::tokenize::{Tokenizer, WordTokenizer};

/// Cap on the suggestion list of a search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionLimit {
    /// Emit no suggestions.
    #[default]
    Disabled,
    /// No cap.
    Unlimited,
    /// At most this many.
    AtMost(usize),
}

impl SuggestionLimit {
    fn cap(self) -> Option<usize> {
        match self {
            Self::Disabled => Some(0),
            Self::Unlimited => None,
            Self::AtMost(n) => Some(n),
        }
    }
}

/// Recognized search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_suggestions: SuggestionLimit,
}

impl SearchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_suggestions(mut self, limit: SuggestionLimit) -> Self {
        self.max_suggestions = limit;
        self
    }
}

/// Result of a search: the primary hit, if any, plus ranked suggestions.
///
/// Ranks are in `[0, 1]`: 0 is a perfect token match, 1 a complete miss.
/// Suggestions are sorted ascending by rank, then by the relative-length
/// tiebreak against the query.
#[derive(Debug)]
pub struct SearchHit<'a, T> {
    pub value: Option<&'a T>,
    pub suggestions: Vec<(&'a T, f64)>,
}

impl<T> SearchHit<'_, T> {
    #[inline]
    #[must_use]
    pub fn success(&self) -> bool {
        self.value.is_some()
    }

    fn miss() -> Self {
        SearchHit {
            value: None,
            suggestions: Vec::new(),
        }
    }
}

/// Anything that answers queries with a [`SearchHit`].
pub trait Searcher<T>: Send + Sync {
    fn search(&self, query: &str, options: &SearchOptions) -> SearchHit<'_, T>;

    /// Parity with match-style APIs; identical for index-backed
    /// providers.
    fn search_last(&self, query: &str, options: &SearchOptions) -> SearchHit<'_, T> {
        self.search(query, options)
    }
}

/// Construction-time configuration for [`SearchProvider`].
#[derive(Clone)]
pub struct ProviderConfig {
    /// Distance metric for the token spell checker.
    pub metric: Arc<dyn Metric<String>>,
    pub tokenizer: Arc<dyn Tokenizer>,
    /// Comparer for token keys and the name-equality check.
    pub comparer: Arc<dyn TextComparer>,
    /// Per-token radius for spell fixes.
    pub max_distance: MaxDistance,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            metric: Arc::new(LevenshteinMetric::new(Ordinal)),
            tokenizer: Arc::new(WordTokenizer),
            comparer: Arc::new(Ordinal),
            max_distance: MaxDistance::default(),
        }
    }
}

/// Inverted-index search provider over a fixed item set.
pub struct SearchProvider<T> {
    items: Vec<T>,
    names: Vec<String>,
    index: InvertedIndex,
    spell: SpellChecker,
    tokenizer: Arc<dyn Tokenizer>,
    comparer: Arc<dyn TextComparer>,
}

impl<T> SearchProvider<T> {
    /// Provider with the default configuration: case-sensitive
    /// Levenshtein spell fixes at a 25% length radius, word tokenizer.
    pub fn new(items: Vec<T>, name_of: impl Fn(&T) -> String) -> Self {
        Self::with_config(items, name_of, ProviderConfig::default())
    }

    pub fn with_config(
        items: Vec<T>,
        name_of: impl Fn(&T) -> String,
        config: ProviderConfig,
    ) -> Self {
        let names: Vec<String> = items.iter().map(name_of).collect();

        let mut postings = Vec::new();
        for (id, name) in names.iter().enumerate() {
            for token in config.tokenizer.tokenize(name) {
                postings.push((config.comparer.fold(token).into_owned(), id as u32));
            }
        }
        let index = InvertedIndex::build(postings);

        let spell = SpellChecker::with_vocabulary(
            index.tokens().map(String::from),
            Arc::clone(&config.comparer),
            Arc::clone(&config.metric),
            config.max_distance.clone(),
        );

        Self {
            items,
            names,
            index,
            spell,
            tokenizer: config.tokenizer,
            comparer: config.comparer,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn search_impl(&self, query: &str, options: &SearchOptions) -> SearchHit<'_, T> {
        // Spell-normalize: a fixable token is replaced, an unfixable one
        // passes through unchanged.
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(query)
            .map(|token| {
                let folded = self.comparer.fold(token);
                self.spell
                    .try_fix_spelling(&folded)
                    .unwrap_or_else(|| folded.into_owned())
            })
            .collect();
        if tokens.is_empty() {
            return SearchHit::miss();
        }

        let mut hits: AHashMap<u32, usize> = AHashMap::new();
        for token in &tokens {
            if let Some(bucket) = self.index.get(token) {
                for &id in bucket {
                    *hits.entry(id).or_insert(0) += 1;
                }
            }
        }

        let total = tokens.len() as f64;
        let query_len = query.chars().count();
        let mut candidates: Vec<(u32, f64)> = hits
            .into_iter()
            .map(|(id, hit_count)| (id, 1.0 - hit_count as f64 / total))
            .collect();
        candidates.sort_by(|a, b| {
            let rank = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
            rank.then_with(|| {
                let tiebreak_a = self.length_offset(a.0, query_len);
                let tiebreak_b = self.length_offset(b.0, query_len);
                tiebreak_a.cmp(&tiebreak_b)
            })
            // Item order decides what neither key does, keeping results
            // independent of hash iteration order.
            .then_with(|| a.0.cmp(&b.0))
        });

        let mut value = None;
        let mut suggestions = Vec::new();
        for &(id, rank) in &candidates {
            let at = id as usize;
            if value.is_none()
                && rank == 0.0
                && self.comparer.eq_str(&self.names[at], query)
            {
                value = Some(&self.items[at]);
                continue;
            }
            suggestions.push((&self.items[at], rank));
        }
        if let Some(cap) = options.max_suggestions.cap() {
            suggestions.truncate(cap);
        }

        SearchHit { value, suggestions }
    }

    fn length_offset(&self, id: u32, query_len: usize) -> usize {
        self.names[id as usize].chars().count().abs_diff(query_len)
    }
}

impl<T: Sync> SearchProvider<T> {
    /// Run many queries in parallel.
    #[must_use]
    pub fn batch_search(
        &self,
        queries: &[String],
        options: &SearchOptions,
    ) -> Vec<SearchHit<'_, T>> {
        queries
            .par_iter()
            .map(|query| self.search_impl(query, options))
            .collect()
    }
}

impl<T: Send + Sync> Searcher<T> for SearchProvider<T> {
    fn search(&self, query: &str, options: &SearchOptions) -> SearchHit<'_, T> {
        self.search_impl(query, options)
    }
}

impl<T> std::fmt::Debug for SearchProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchProvider")
            .field("items", &self.items.len())
            .field("tokens", &self.index.len())
            .finish()
    }
}

/// Combinator over an ordered sequence of providers: the first success
/// wins, every provider's suggestions concatenate and re-sort by rank.
pub struct CombinedProvider<T> {
    providers: Vec<Box<dyn Searcher<T>>>,
}

impl<T> CombinedProvider<T> {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn Searcher<T>>>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Box<dyn Searcher<T>>) {
        self.providers.push(provider);
    }
}

impl<T: Send + Sync> Searcher<T> for CombinedProvider<T> {
    fn search(&self, query: &str, options: &SearchOptions) -> SearchHit<'_, T> {
        let uncapped = SearchOptions::new().with_max_suggestions(SuggestionLimit::Unlimited);
        let mut value = None;
        let mut suggestions = Vec::new();
        for provider in &self.providers {
            let hit = provider.search(query, &uncapped);
            if value.is_none() {
                value = hit.value;
            }
            suggestions.extend(hit.suggestions);
        }
        // Stable sort keeps provider order among equal ranks.
        suggestions.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        if let Some(cap) = options.max_suggestions.cap() {
            suggestions.truncate(cap);
        }
        SearchHit { value, suggestions }
    }
}

impl<T> std::fmt::Debug for CombinedProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedProvider")
            .field("providers", &self.providers.len())
            .finish()
    }
}
