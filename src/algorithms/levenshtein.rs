//! Weighted Levenshtein distances over generic element sequences.
//!
//! Two-row dynamic programming with the rolling-row optimization: a single
//! row of `|pattern| + 1` cells plus one diagonal temporary. Rows live on
//! the stack for short patterns and spill to the heap otherwise.
//!
//! Full-match mode measures the whole input against the whole pattern;
//! subsequence mode lets the input begin anywhere inside the pattern and
//! returns the cheapest alignment against any contiguous pattern slice.

use rayon::prelude::*;
use smallvec::SmallVec;

use super::trace::{EditCosts, MatchOptions};
use crate::comparer::{ElementComparer, IgnoreCase};

/// Inline row capacity before spilling to the heap.
pub(crate) const INLINE_ROW: usize = 64;

// ============================================================================
// Kernel
// ============================================================================

/// Rolling-row distance kernel.
///
/// Boundary row is `0, cI, 2·cI, …` in full mode (every pattern prefix
/// costs its insertions) and all zeros in subsequence mode (a match may
/// start anywhere). The result is the final cell in full mode and the
/// final-row minimum in subsequence mode.
pub(crate) fn distance_kernel<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
    subsequence: bool,
) -> usize {
    let n = pattern.len();

    let mut row: SmallVec<[usize; INLINE_ROW]> = if subsequence {
        std::iter::repeat(0).take(n + 1).collect()
    } else {
        (0..=n).map(|j| j * costs.insertion).collect()
    };

    for (i, a) in input.iter().enumerate() {
        let mut diag = row[0];
        row[0] = (i + 1) * costs.deletion;

        for (j, b) in pattern.iter().enumerate() {
            let cost = if comparer.eq(a, b) {
                0
            } else {
                costs.substitution
            };
            let cell = (row[j + 1] + costs.deletion)
                .min(row[j] + costs.insertion)
                .min(diag + cost);
            diag = row[j + 1];
            row[j + 1] = cell;
        }
    }

    if subsequence {
        row.iter().copied().min().unwrap_or(0)
    } else {
        row[n]
    }
}

// ============================================================================
// Distances
// ============================================================================

/// Full-match distance between two element sequences.
///
/// When the input is shorter than the pattern the operands are swapped and
/// the deletion/insertion costs swap with them, keeping the shorter
/// sequence along the row axis.
#[must_use]
pub fn distance_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
) -> usize {
    if input.len() < pattern.len() {
        distance_kernel(pattern, input, comparer, costs.transposed(), false)
    } else {
        distance_kernel(input, pattern, comparer, costs, false)
    }
}

/// Minimum full-match distance between the input and any contiguous slice
/// of the pattern.
#[must_use]
pub fn subsequence_distance_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
) -> usize {
    distance_kernel(input, pattern, comparer, costs, true)
}

/// Full-match distance between two strings under the given comparer and
/// costs.
#[must_use]
pub fn distance_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    costs: EditCosts,
) -> usize {
    if input == pattern {
        return 0;
    }
    let a = chars_of(input);
    let b = chars_of(pattern);
    distance_of(&a, &b, comparer, costs)
}

/// Full-match distance between two strings with the default case-folding
/// comparer and unit costs. Use [`distance_with`] for ordinal comparison.
///
/// # Example
/// ```
/// assert_eq!(fuzzyfind::distance("kitten", "sitting"), 3);
/// assert_eq!(fuzzyfind::distance("hello", "HELLo"), 0);
/// ```
#[inline]
#[must_use]
pub fn distance(input: &str, pattern: &str) -> usize {
    distance_with(input, pattern, &IgnoreCase, EditCosts::UNIT)
}

/// Subsequence distance between two strings under the given comparer and
/// costs.
#[must_use]
pub fn subsequence_distance_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    costs: EditCosts,
) -> usize {
    let a = chars_of(input);
    let b = chars_of(pattern);
    subsequence_distance_of(&a, &b, comparer, costs)
}

/// Subsequence distance with the default case-folding comparer and unit
/// costs.
///
/// # Example
/// ```
/// // One deletion turns "word" into the "Wor" slice of "World".
/// assert_eq!(fuzzyfind::subsequence_distance("word", "World"), 1);
/// ```
#[inline]
#[must_use]
pub fn subsequence_distance(input: &str, pattern: &str) -> usize {
    subsequence_distance_with(input, pattern, &IgnoreCase, EditCosts::UNIT)
}

// ============================================================================
// Bounded distances
// ============================================================================

/// Rolling-row kernel with early termination: once every cell of a row
/// exceeds `max_distance`, no later row can come back under it.
fn bounded_kernel<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
    subsequence: bool,
    max_distance: usize,
) -> Option<usize> {
    let n = pattern.len();

    let mut row: SmallVec<[usize; INLINE_ROW]> = if subsequence {
        std::iter::repeat(0).take(n + 1).collect()
    } else {
        (0..=n).map(|j| j * costs.insertion).collect()
    };

    for (i, a) in input.iter().enumerate() {
        let mut diag = row[0];
        row[0] = (i + 1) * costs.deletion;
        let mut row_min = row[0];

        for (j, b) in pattern.iter().enumerate() {
            let cost = if comparer.eq(a, b) {
                0
            } else {
                costs.substitution
            };
            let cell = (row[j + 1] + costs.deletion)
                .min(row[j] + costs.insertion)
                .min(diag + cost);
            diag = row[j + 1];
            row[j + 1] = cell;
            row_min = row_min.min(cell);
        }

        if row_min > max_distance {
            return None;
        }
    }

    let result = if subsequence {
        row.iter().copied().min().unwrap_or(0)
    } else {
        row[n]
    };
    (result <= max_distance).then_some(result)
}

/// [`distance_of`] with a threshold: `None` once the distance provably
/// exceeds `max_distance`, which lets the kernel stop early.
#[must_use]
pub fn distance_bounded_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
    max_distance: usize,
) -> Option<usize> {
    // A length difference alone forces that many deletions or
    // insertions.
    let (longer, shorter, gap_cost) = if input.len() < pattern.len() {
        (pattern, input, costs.insertion)
    } else {
        (input, pattern, costs.deletion)
    };
    if (longer.len() - shorter.len()).saturating_mul(gap_cost) > max_distance {
        return None;
    }

    if input.len() < pattern.len() {
        bounded_kernel(
            pattern,
            input,
            comparer,
            costs.transposed(),
            false,
            max_distance,
        )
    } else {
        bounded_kernel(input, pattern, comparer, costs, false, max_distance)
    }
}

/// [`subsequence_distance_of`] with a threshold.
#[must_use]
pub fn subsequence_distance_bounded_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
    max_distance: usize,
) -> Option<usize> {
    bounded_kernel(input, pattern, comparer, costs, true, max_distance)
}

/// Bounded full-match distance over strings, default case-folding
/// comparer and unit costs.
///
/// # Example
/// ```
/// assert_eq!(fuzzyfind::distance_bounded("kitten", "sitting", 3), Some(3));
/// assert_eq!(fuzzyfind::distance_bounded("kitten", "sitting", 2), None);
/// ```
#[must_use]
pub fn distance_bounded(input: &str, pattern: &str, max_distance: usize) -> Option<usize> {
    if input == pattern {
        return Some(0);
    }
    let a = chars_of(input);
    let b = chars_of(pattern);
    distance_bounded_of(&a, &b, &IgnoreCase, EditCosts::UNIT, max_distance)
}

/// Bounded subsequence distance over strings, default case-folding
/// comparer and unit costs.
#[must_use]
pub fn subsequence_distance_bounded(
    input: &str,
    pattern: &str,
    max_distance: usize,
) -> Option<usize> {
    let a = chars_of(input);
    let b = chars_of(pattern);
    subsequence_distance_bounded_of(&a, &b, &IgnoreCase, EditCosts::UNIT, max_distance)
}

// ============================================================================
// Ratios
// ============================================================================

/// Normalize a distance against a length: 0 is identical, 1 a complete
/// mismatch. A zero length normalizes to 0 for a zero distance and 1
/// otherwise.
fn normalize(distance: usize, len: usize) -> f64 {
    if len == 0 {
        if distance == 0 {
            0.0
        } else {
            1.0
        }
    } else {
        (distance as f64 / len as f64).clamp(0.0, 1.0)
    }
}

/// Full-match similarity in `[0, 1]` over element sequences:
/// `1 − distance / max(|a|, |b|)`, clamped.
#[must_use]
pub fn ratio_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
) -> f64 {
    let dist = distance_of(input, pattern, comparer, costs);
    1.0 - normalize(dist, input.len().max(pattern.len()))
}

/// Subsequence similarity in `[0, 1]` over element sequences, normalized
/// by the input length.
#[must_use]
pub fn subsequence_ratio_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
) -> f64 {
    let dist = subsequence_distance_of(input, pattern, comparer, costs);
    1.0 - normalize(dist, input.len())
}

/// Full-match similarity in `[0, 1]`: `1 − distance / max(|a|, |b|)`,
/// clamped.
#[must_use]
pub fn ratio_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    costs: EditCosts,
) -> f64 {
    ratio_of(&chars_of(input), &chars_of(pattern), comparer, costs)
}

/// Full-match similarity with the default case-folding comparer and unit
/// costs.
#[inline]
#[must_use]
pub fn ratio(input: &str, pattern: &str) -> f64 {
    ratio_with(input, pattern, &IgnoreCase, EditCosts::UNIT)
}

/// Subsequence similarity in `[0, 1]`, normalized by the input length.
#[must_use]
pub fn subsequence_ratio_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    costs: EditCosts,
) -> f64 {
    subsequence_ratio_of(&chars_of(input), &chars_of(pattern), comparer, costs)
}

/// Subsequence similarity with the default case-folding comparer and unit
/// costs.
#[inline]
#[must_use]
pub fn subsequence_ratio(input: &str, pattern: &str) -> f64 {
    subsequence_ratio_with(input, pattern, &IgnoreCase, EditCosts::UNIT)
}

// ============================================================================
// Predicates
// ============================================================================

/// Default cap used by [`is_match`]: a quarter of the input length,
/// rounded down.
#[inline]
#[must_use]
pub fn default_max_distance(input_len: usize) -> usize {
    input_len / 4
}

/// Whether the pattern contains a slice within `max_distance` of the
/// input.
#[must_use]
pub fn is_match_within(input: &str, pattern: &str, max_distance: usize) -> bool {
    subsequence_distance_bounded(input, pattern, max_distance).is_some()
}

/// [`is_match_within`] under the default cap of a quarter of the input
/// length.
///
/// # Example
/// ```
/// // cap ⌊0.25·4⌋ = 1, and "word" is distance 1 from the "Word" slice.
/// assert!(fuzzyfind::is_match("word", "World"));
/// ```
#[must_use]
pub fn is_match(input: &str, pattern: &str) -> bool {
    is_match_within(input, pattern, default_max_distance(input.chars().count()))
}

/// Comparer- and cost-aware form of [`is_match`]. A missing cap in the
/// options falls back to the default quarter-length cap.
#[must_use]
pub fn is_match_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> bool {
    let cap = options
        .max_distance
        .unwrap_or_else(|| default_max_distance(input.chars().count()));
    let a = chars_of(input);
    let b = chars_of(pattern);
    subsequence_distance_bounded_of(&a, &b, comparer, options.costs, cap).is_some()
}

/// Whether the whole pattern is within `max_distance` of the whole input.
#[must_use]
pub fn is_full_match_within(input: &str, pattern: &str, max_distance: usize) -> bool {
    distance_bounded(input, pattern, max_distance).is_some()
}

/// Comparer- and cost-aware form of [`is_full_match_within`].
#[must_use]
pub fn is_full_match_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> bool {
    let cap = options
        .max_distance
        .unwrap_or_else(|| default_max_distance(input.chars().count()));
    let a = chars_of(input);
    let b = chars_of(pattern);
    distance_bounded_of(&a, &b, comparer, options.costs, cap).is_some()
}

// ============================================================================
// Batch helpers
// ============================================================================

/// Full-match distances from every query to the target, in parallel.
#[must_use]
pub fn batch_distance(queries: &[String], target: &str) -> Vec<usize> {
    queries
        .par_iter()
        .map(|query| distance(query, target))
        .collect()
}

#[inline]
pub(crate) fn chars_of(s: &str) -> SmallVec<[char; INLINE_ROW]> {
    s.chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::Ordinal;

    #[test]
    fn distance_basic() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("abc", "abc"), 0);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("saturday", "sunday"), 3);
    }

    #[test]
    fn distance_unicode() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(distance("日本語", "日本"), 1);
    }

    #[test]
    fn distance_case_folded() {
        assert_eq!(
            distance_with("hello", "HELLo", &IgnoreCase, EditCosts::UNIT),
            0
        );
        assert_eq!(distance("hello", "HELLo"), 0);
        assert_eq!(
            distance_with("hello", "HELLo", &Ordinal, EditCosts::UNIT),
            4
        );
    }

    #[test]
    fn distance_weighted_costs() {
        // One deletion from "abc" reaches "ab".
        let costs = EditCosts::new(5, 1, 1);
        assert_eq!(distance_with("abc", "ab", &Ordinal, costs), 5);
        // Swapped operands must charge the same: deleting from the input
        // is inserting into the pattern.
        assert_eq!(distance_with("ab", "abc", &Ordinal, costs.transposed()), 5);
    }

    #[test]
    fn distance_prefers_cheaper_operation() {
        // Substitution costs more than delete + insert; the kernel must
        // route around it.
        let costs = EditCosts::new(1, 1, 3);
        assert_eq!(distance_with("a", "b", &Ordinal, costs), 2);
    }

    #[test]
    fn subsequence_is_bounded_by_full() {
        for (a, b) in [
            ("word", "World"),
            ("kitten", "sitting"),
            ("abc", "xyzabcxyz"),
            ("", "abc"),
        ] {
            assert!(subsequence_distance(a, b) <= distance(a, b));
        }
    }

    #[test]
    fn subsequence_finds_embedded_slice() {
        assert_eq!(subsequence_distance("abc", "xxabcxx"), 0);
        assert_eq!(subsequence_distance("word", "World"), 1);
        // Empty pattern leaves only deletion of the whole input.
        assert_eq!(subsequence_distance("abc", ""), 3);
        assert_eq!(subsequence_distance("", "abc"), 0);
    }

    #[test]
    fn ratio_formula() {
        assert_eq!(ratio("abc", "abc"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        let r = ratio("kitten", "sitting");
        assert!((r - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn subsequence_ratio_normalizes_by_input() {
        assert_eq!(subsequence_ratio("abc", "xxabcxx"), 1.0);
        let r = subsequence_ratio("word", "World");
        assert!((r - 0.75).abs() < 1e-12);
    }

    #[test]
    fn bounded_distance_thresholds() {
        assert_eq!(distance_bounded("kitten", "sitting", 3), Some(3));
        assert_eq!(distance_bounded("kitten", "sitting", 5), Some(3));
        assert_eq!(distance_bounded("kitten", "sitting", 2), None);
        assert_eq!(distance_bounded("same", "same", 0), Some(0));
        // Length difference alone can reject without running the kernel.
        assert_eq!(distance_bounded("ab", "abcdef", 3), None);
    }

    #[test]
    fn bounded_subsequence_thresholds() {
        assert_eq!(subsequence_distance_bounded("word", "World", 1), Some(1));
        assert_eq!(subsequence_distance_bounded("word", "xyzzy", 1), None);
        assert_eq!(subsequence_distance_bounded("abc", "xxabcxx", 0), Some(0));
        assert_eq!(subsequence_distance_bounded("", "abc", 0), Some(0));
    }

    #[test]
    fn bounded_agrees_with_unbounded() {
        let pairs = [
            ("kitten", "sitting"),
            ("word", "World"),
            ("", "abc"),
            ("abc", ""),
            ("same", "same"),
        ];
        for (a, b) in pairs {
            let full = distance(a, b);
            let sub = subsequence_distance(a, b);
            for cap in 0..8 {
                assert_eq!(
                    distance_bounded(a, b, cap),
                    (full <= cap).then_some(full),
                    "full {a:?}/{b:?} cap {cap}"
                );
                assert_eq!(
                    subsequence_distance_bounded(a, b, cap),
                    (sub <= cap).then_some(sub),
                    "sub {a:?}/{b:?} cap {cap}"
                );
            }
        }
    }

    #[test]
    fn is_match_default_cap() {
        // cap = ⌊0.25 · 4⌋ = 1
        assert!(is_match("word", "World"));
        assert!(!is_match("word", "xyzzy"));
        assert!(is_match_within("word", "xyzzy", 4));
    }

    #[test]
    fn full_match_predicate() {
        assert!(is_full_match_within("kitten", "sitting", 3));
        assert!(!is_full_match_within("kitten", "sitting", 2));
    }

    #[test]
    fn batch_matches_sequential() {
        let queries: Vec<String> = ["kitten", "sitting", "mitten"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let batch = batch_distance(&queries, "kitten");
        let sequential: Vec<usize> = queries.iter().map(|q| distance(q, "kitten")).collect();
        assert_eq!(batch, sequential);
    }
}
