//! Approximate match extraction with full edit traces.
//!
//! The trace kernel runs the same recurrence as the distance kernel but
//! keeps the winning [`EditTrace`] per cell. Its output is the final row:
//! one trace per pattern prefix length. Every consumer — first/last match,
//! the eager collection, the lazy iterator, the counter — reads that row
//! through a single scanning routine, so the extraction rules live in
//! exactly one place.
//!
//! Row scanning: the end index `k` of a cell describes a candidate whose
//! length is `|input| − deletions + insertions` and whose start is
//! `k − length`. Zero-length cells are skipped while the input is
//! non-empty. Consecutive cells sharing a start index form a run; the run
//! collapses to its first minimum-total-edit cell. A capped scan yields
//! every run candidate within the cap; an uncapped scan yields strictly
//! improving candidates and stops at a perfect one.

use serde::{Deserialize, Serialize};

use super::levenshtein::chars_of;
use super::trace::{EditCosts, EditTrace, MatchOptions};
use crate::buffer::{ArrayPool, PooledBuf};
use crate::comparer::{ElementComparer, IgnoreCase};
use crate::error::Error;

/// Process-wide pool backing trace rows.
static TRACE_POOL: ArrayPool<EditTrace> = ArrayPool::new();

/// Number of [`EditTrace`] elements a caller-supplied scratch region must
/// hold for a pattern of `pattern_len` elements: two rolling rows of
/// `pattern_len + 1` traces (six scalar fields per pattern position).
#[inline]
#[must_use]
pub const fn scratch_len(pattern_len: usize) -> usize {
    2 * (pattern_len + 1)
}

// ============================================================================
// Match record
// ============================================================================

/// An approximate match of the input against a pattern slice.
///
/// `index` and `length` locate the slice inside the pattern; `trace`
/// carries the edit counts and `distance` their weighted sum. The default
/// value is the canonical failed match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Start offset of the matched slice inside the pattern.
    pub index: usize,
    /// Length of the matched slice.
    pub length: usize,
    /// Edit counts achieving the match.
    pub trace: EditTrace,
    /// Weighted distance of the match.
    pub distance: usize,
    /// Whether this record describes an actual match.
    pub success: bool,
}

impl Match {
    /// The canonical failed match.
    #[must_use]
    pub fn failed() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn deletions(&self) -> u32 {
        self.trace.deletions
    }

    #[inline]
    #[must_use]
    pub fn insertions(&self) -> u32 {
        self.trace.insertions
    }

    #[inline]
    #[must_use]
    pub fn substitutions(&self) -> u32 {
        self.trace.substitutions
    }

    /// End offset of the matched slice inside the pattern (exclusive).
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.index + self.length
    }
}

// ============================================================================
// Trace kernel
// ============================================================================

/// Run the trace recurrence over `scratch`, which must hold at least
/// [`scratch_len`] elements. On return the final row occupies
/// `scratch[..pattern.len() + 1]`.
pub(crate) fn trace_kernel<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
    subsequence: bool,
    scratch: &mut [EditTrace],
) {
    let n = pattern.len();
    debug_assert!(scratch.len() >= scratch_len(n));

    let (first, rest) = scratch.split_at_mut(n + 1);
    let mut prev: &mut [EditTrace] = first;
    let mut cur: &mut [EditTrace] = &mut rest[..n + 1];

    if subsequence {
        prev.fill(EditTrace::default());
    } else {
        for (j, cell) in prev.iter_mut().enumerate() {
            *cell = EditTrace {
                insertions: j as u32,
                ..EditTrace::default()
            };
        }
    }

    for (i, a) in input.iter().enumerate() {
        cur[0] = EditTrace {
            deletions: i as u32 + 1,
            ..EditTrace::default()
        };

        for (j, b) in pattern.iter().enumerate() {
            let del = prev[j + 1].with_deletion();
            let ins = cur[j].with_insertion();
            let sub = if comparer.eq(a, b) {
                prev[j]
            } else {
                prev[j].with_substitution()
            };

            // Ties prefer deletion, then insertion, then substitution.
            let wd = del.weighted(costs);
            let wi = ins.weighted(costs);
            let ws = sub.weighted(costs);
            cur[j + 1] = if wd <= wi && wd <= ws {
                del
            } else if wi <= ws {
                ins
            } else {
                sub
            };
        }

        std::mem::swap(&mut prev, &mut cur);
    }

    // An odd number of row swaps leaves the final row in the second half.
    if input.len() % 2 == 1 {
        cur.copy_from_slice(prev);
    }
}

/// Rent a pooled buffer, run the subsequence trace kernel, and shrink the
/// buffer to the final row.
fn pooled_final_row<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    costs: EditCosts,
    subsequence: bool,
) -> PooledBuf<EditTrace> {
    let mut buf = TRACE_POOL.rent(scratch_len(pattern.len()));
    trace_kernel(input, pattern, comparer, costs, subsequence, &mut buf);
    buf.truncate(pattern.len() + 1);
    buf
}

// ============================================================================
// Row scanning
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct ScanState {
    pos: usize,
    best: Option<usize>,
    done: bool,
}

impl ScanState {
    fn new() -> Self {
        Self {
            pos: 0,
            best: None,
            done: false,
        }
    }
}

#[inline]
fn length_at(row: &[EditTrace], input_len: usize, k: usize) -> usize {
    let t = row[k];
    debug_assert!(t.deletions as usize <= input_len);
    input_len - t.deletions as usize + t.insertions as usize
}

fn candidate_at(row: &[EditTrace], input_len: usize, costs: EditCosts, k: usize) -> Match {
    let trace = row[k];
    let length = length_at(row, input_len, k);
    Match {
        index: k - length,
        length,
        trace,
        distance: trace.weighted(costs),
        success: true,
    }
}

/// Advance a forward scan to the next yielded match.
fn advance(
    row: &[EditTrace],
    input_len: usize,
    costs: EditCosts,
    max_distance: Option<usize>,
    state: &mut ScanState,
) -> Option<Match> {
    while !state.done && state.pos < row.len() {
        let len = length_at(row, input_len, state.pos);
        if len == 0 && input_len > 0 {
            state.pos += 1;
            continue;
        }
        let start = state.pos - len;

        // Collapse the run of cells sharing `start` to its first
        // minimum-total-edit cell.
        let mut pick = state.pos;
        let mut pick_total = row[pick].total();
        let mut next = state.pos + 1;
        while next < row.len() {
            let next_len = length_at(row, input_len, next);
            if (next_len == 0 && input_len > 0) || next - next_len != start {
                break;
            }
            if row[next].total() < pick_total {
                pick = next;
                pick_total = row[next].total();
            }
            next += 1;
        }
        state.pos = next;

        let m = candidate_at(row, input_len, costs, pick);
        match max_distance {
            Some(cap) => {
                if m.distance <= cap {
                    return Some(m);
                }
            }
            None => {
                if state.best.map_or(true, |best| m.distance < best) {
                    state.best = Some(m.distance);
                    if m.distance == 0 {
                        state.done = true;
                    }
                    return Some(m);
                }
            }
        }
    }
    None
}

/// Scan the final row in reverse and return the first qualifying match.
fn last_candidate(
    row: &[EditTrace],
    input_len: usize,
    costs: EditCosts,
    max_distance: Option<usize>,
) -> Option<Match> {
    let mut end = row.len();
    while end > 0 {
        let k = end - 1;
        let len = length_at(row, input_len, k);
        if len == 0 && input_len > 0 {
            end = k;
            continue;
        }
        let start = k - len;

        // Extend the run leftward to cells sharing `start`, then collapse
        // with the same forward-first-minimum rule.
        let mut begin = k;
        while begin > 0 {
            let p = begin - 1;
            let p_len = length_at(row, input_len, p);
            if (p_len == 0 && input_len > 0) || p - p_len != start {
                break;
            }
            begin = p;
        }
        let mut pick = begin;
        let mut pick_total = row[pick].total();
        for j in begin + 1..end {
            if row[j].total() < pick_total {
                pick = j;
                pick_total = row[j].total();
            }
        }

        let m = candidate_at(row, input_len, costs, pick);
        match max_distance {
            Some(cap) if m.distance > cap => {}
            _ => return Some(m),
        }
        end = begin;
    }
    None
}

/// Single-pass view over a borrowed final trace row.
///
/// Produced by [`enumerate_matches_in`] over caller-supplied scratch and
/// by [`MatchCollection::iter`].
#[derive(Debug)]
pub struct RowScan<'a> {
    row: &'a [EditTrace],
    input_len: usize,
    costs: EditCosts,
    max_distance: Option<usize>,
    state: ScanState,
}

impl Iterator for RowScan<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        advance(
            self.row,
            self.input_len,
            self.costs,
            self.max_distance,
            &mut self.state,
        )
    }
}

// ============================================================================
// Eager collection
// ============================================================================

/// Immutable, re-enumerable view of the matches of one input/pattern
/// pair.
///
/// Owns its pooled trace row from construction until drop and computes
/// match records on demand without copying the row.
#[derive(Debug)]
pub struct MatchCollection {
    row: PooledBuf<EditTrace>,
    input_len: usize,
    costs: EditCosts,
    max_distance: Option<usize>,
}

impl MatchCollection {
    /// Iterate the matches in forward extraction order.
    #[must_use]
    pub fn iter(&self) -> RowScan<'_> {
        RowScan {
            row: &self.row,
            input_len: self.input_len,
            costs: self.costs,
            max_distance: self.max_distance,
            state: ScanState::new(),
        }
    }

    /// Number of matches. Computed by scanning; cache it if hot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Match at `index` in extraction order, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Match> {
        self.iter().nth(index)
    }

    /// First match, or the canonical failed match.
    #[must_use]
    pub fn first(&self) -> Match {
        self.iter().next().unwrap_or_default()
    }

    /// Copy every match into `dst` starting at `index`.
    ///
    /// Fails with [`Error::OutOfRange`] when `index` lies past the end of
    /// `dst` and with [`Error::DestinationTooSmall`] when the remaining
    /// room cannot hold all matches.
    pub fn copy_to(&self, dst: &mut [Match], index: usize) -> Result<(), Error> {
        if index > dst.len() {
            return Err(Error::OutOfRange {
                index,
                len: dst.len(),
            });
        }
        let required = self.len();
        let available = dst.len() - index;
        if available < required {
            return Err(Error::DestinationTooSmall {
                required,
                available,
            });
        }
        for (slot, m) in dst[index..].iter_mut().zip(self.iter()) {
            *slot = m;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MatchCollection {
    type Item = Match;
    type IntoIter = RowScan<'a>;

    fn into_iter(self) -> RowScan<'a> {
        self.iter()
    }
}

// ============================================================================
// Lazy iterator
// ============================================================================

/// Owning single-pass match iterator. Releases its pooled trace row when
/// dropped or exhausted and dropped.
#[derive(Debug)]
pub struct MatchIter {
    row: PooledBuf<EditTrace>,
    input_len: usize,
    costs: EditCosts,
    max_distance: Option<usize>,
    state: ScanState,
}

impl Iterator for MatchIter {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        advance(
            &self.row,
            self.input_len,
            self.costs,
            self.max_distance,
            &mut self.state,
        )
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Eagerly-backed match collection over generic element sequences.
#[must_use]
pub fn matches_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
) -> MatchCollection {
    let row = pooled_final_row(input, pattern, comparer, options.costs, true);
    MatchCollection {
        row,
        input_len: input.len(),
        costs: options.costs,
        max_distance: options.max_distance,
    }
}

/// Lazy match iterator over generic element sequences.
#[must_use]
pub fn enumerate_matches_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
) -> MatchIter {
    let row = pooled_final_row(input, pattern, comparer, options.costs, true);
    MatchIter {
        row,
        input_len: input.len(),
        costs: options.costs,
        max_distance: options.max_distance,
        state: ScanState::new(),
    }
}

/// Lazy match iteration over caller-supplied scratch.
///
/// `scratch` must hold at least [`scratch_len`]`(pattern.len())` elements;
/// anything shorter fails with [`Error::DestinationTooSmall`].
pub fn enumerate_matches_in<'a, E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
    scratch: &'a mut [EditTrace],
) -> Result<RowScan<'a>, Error> {
    let required = scratch_len(pattern.len());
    if scratch.len() < required {
        return Err(Error::DestinationTooSmall {
            required,
            available: scratch.len(),
        });
    }
    trace_kernel(input, pattern, comparer, options.costs, true, scratch);
    Ok(RowScan {
        row: &scratch[..pattern.len() + 1],
        input_len: input.len(),
        costs: options.costs,
        max_distance: options.max_distance,
        state: ScanState::new(),
    })
}

/// Number of matches [`matches_of`] would yield.
#[must_use]
pub fn count_matches_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
) -> usize {
    matches_of(input, pattern, comparer, options).len()
}

/// First match in forward extraction order, or the canonical failed
/// match.
#[must_use]
pub fn first_match_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
) -> Match {
    let row = pooled_final_row(input, pattern, comparer, options.costs, true);
    let mut state = ScanState::new();
    advance(
        &row,
        input.len(),
        options.costs,
        options.max_distance,
        &mut state,
    )
    .unwrap_or_default()
}

/// First qualifying match scanning the final row in reverse, or the
/// canonical failed match.
#[must_use]
pub fn last_match_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
) -> Match {
    let row = pooled_final_row(input, pattern, comparer, options.costs, true);
    last_candidate(&row, input.len(), options.costs, options.max_distance).unwrap_or_default()
}

/// Whole-input-to-whole-pattern match: the trace cell at the last pattern
/// column. `success` reflects the cap when one is set.
#[must_use]
pub fn full_match_of<E, C: ElementComparer<E>>(
    input: &[E],
    pattern: &[E],
    comparer: &C,
    options: MatchOptions,
) -> Match {
    let row = pooled_final_row(input, pattern, comparer, options.costs, false);
    let mut m = candidate_at(&row, input.len(), options.costs, pattern.len());
    m.success = options.max_distance.map_or(true, |cap| m.distance <= cap);
    m
}

// String conveniences. The no-comparer forms use the default
// case-folding comparer; the `_with` forms take any character comparer.

/// [`matches_of`] over strings under an explicit comparer.
#[must_use]
pub fn matches_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> MatchCollection {
    matches_of(&chars_of(input), &chars_of(pattern), comparer, options)
}

/// [`matches_of`] over strings with the default case-folding comparer.
#[must_use]
pub fn matches(input: &str, pattern: &str, options: MatchOptions) -> MatchCollection {
    matches_with(input, pattern, &IgnoreCase, options)
}

/// [`enumerate_matches_of`] over strings under an explicit comparer.
#[must_use]
pub fn enumerate_matches_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> MatchIter {
    enumerate_matches_of(&chars_of(input), &chars_of(pattern), comparer, options)
}

/// [`enumerate_matches_of`] over strings with the default case-folding
/// comparer.
#[must_use]
pub fn enumerate_matches(input: &str, pattern: &str, options: MatchOptions) -> MatchIter {
    enumerate_matches_with(input, pattern, &IgnoreCase, options)
}

/// [`count_matches_of`] over strings under an explicit comparer.
#[must_use]
pub fn count_matches_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> usize {
    count_matches_of(&chars_of(input), &chars_of(pattern), comparer, options)
}

/// [`count_matches_of`] over strings with the default case-folding
/// comparer.
#[must_use]
pub fn count_matches(input: &str, pattern: &str, options: MatchOptions) -> usize {
    count_matches_with(input, pattern, &IgnoreCase, options)
}

/// [`first_match_of`] over strings under an explicit comparer.
#[must_use]
pub fn first_match_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> Match {
    first_match_of(&chars_of(input), &chars_of(pattern), comparer, options)
}

/// [`first_match_of`] over strings with the default case-folding
/// comparer.
#[must_use]
pub fn first_match(input: &str, pattern: &str, options: MatchOptions) -> Match {
    first_match_with(input, pattern, &IgnoreCase, options)
}

/// [`last_match_of`] over strings under an explicit comparer.
#[must_use]
pub fn last_match_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> Match {
    last_match_of(&chars_of(input), &chars_of(pattern), comparer, options)
}

/// [`last_match_of`] over strings with the default case-folding comparer.
#[must_use]
pub fn last_match(input: &str, pattern: &str, options: MatchOptions) -> Match {
    last_match_with(input, pattern, &IgnoreCase, options)
}

/// [`full_match_of`] over strings under an explicit comparer.
#[must_use]
pub fn full_match_with<C: ElementComparer<char>>(
    input: &str,
    pattern: &str,
    comparer: &C,
    options: MatchOptions,
) -> Match {
    full_match_of(&chars_of(input), &chars_of(pattern), comparer, options)
}

/// [`full_match_of`] over strings with the default case-folding comparer.
#[must_use]
pub fn full_match(input: &str, pattern: &str, options: MatchOptions) -> Match {
    full_match_with(input, pattern, &IgnoreCase, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::Ordinal;

    fn opts() -> MatchOptions {
        MatchOptions::new()
    }

    #[test]
    fn exact_slice_is_found() {
        let m = first_match("abc", "xxabcxx", opts().with_max_distance(0));
        assert!(m.success);
        assert_eq!((m.index, m.length, m.distance), (2, 3, 0));
        assert_eq!(m.trace, EditTrace::default());
    }

    #[test]
    fn uncapped_iteration_short_circuits_on_perfect_match() {
        let found: Vec<Match> = matches("abc", "abc xyz abc", opts()).iter().collect();
        // The exact slice at the start wins immediately; nothing after a
        // zero-distance match can improve strictly.
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].index, found[0].length, found[0].distance), (0, 3, 0));
    }

    #[test]
    fn capped_iteration_yields_every_qualifying_run() {
        let found: Vec<Match> =
            matches("abc", "abc xyz abc", opts().with_max_distance(0)).iter().collect();
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].index, found[0].length), (0, 3));
        assert_eq!((found[1].index, found[1].length), (8, 3));
        assert!(found.iter().all(|m| m.distance == 0));
    }

    #[test]
    fn run_collapses_to_tightest_cell() {
        // Every cell of the final row for "word"/"World" shares start 0;
        // the run collapses to the single-deletion "Wor" alignment.
        let m = first_match("word", "World", opts().with_max_distance(1));
        assert!(m.success);
        assert_eq!((m.index, m.length, m.distance), (0, 3, 1));
        assert_eq!(m.deletions(), 1);
        assert_eq!(m.insertions(), 0);
        assert_eq!(m.substitutions(), 0);
    }

    #[test]
    fn failed_match_is_zeroed() {
        let m = first_match("abc", "zzz", opts().with_max_distance(0));
        assert!(!m.success);
        assert_eq!(m, Match::failed());
    }

    #[test]
    fn last_match_scans_in_reverse() {
        let m = last_match("abc", "abc xyz abc", opts().with_max_distance(0));
        assert!(m.success);
        assert_eq!((m.index, m.length, m.distance), (8, 3, 0));
    }

    #[test]
    fn last_match_agrees_on_single_run() {
        let first = first_match("word", "World", opts().with_max_distance(1));
        let last = last_match("word", "World", opts().with_max_distance(1));
        assert_eq!(first, last);
    }

    #[test]
    fn full_match_reads_last_column() {
        let m = full_match("kitten", "sitting", opts());
        assert!(m.success);
        assert_eq!((m.index, m.length), (0, 7));
        assert_eq!(m.distance, 3);
        assert_eq!(m.trace.total(), 3);
        assert_eq!(m.insertions(), 1);

        let capped = full_match("kitten", "sitting", opts().with_max_distance(2));
        assert!(!capped.success);
        assert_eq!(capped.distance, 3);
    }

    #[test]
    fn full_match_of_empty_input() {
        let m = full_match("", "abc", opts());
        assert_eq!((m.index, m.length), (0, 3));
        assert_eq!(m.insertions(), 3);
    }

    #[test]
    fn collection_is_re_enumerable() {
        let coll = matches("abc", "abc xyz abc", opts().with_max_distance(1));
        let first_pass: Vec<Match> = coll.iter().collect();
        let second_pass: Vec<Match> = coll.iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(coll.len(), first_pass.len());
        assert_eq!(coll.get(0), first_pass.first().copied());
        assert_eq!(coll.get(first_pass.len()), None);
    }

    #[test]
    fn iterator_agrees_with_collection() {
        for cap in [None, Some(0), Some(1), Some(2)] {
            let options = MatchOptions {
                costs: EditCosts::UNIT,
                max_distance: cap,
            };
            let eager: Vec<Match> = matches("boko", "book books cook", options).iter().collect();
            let lazy: Vec<Match> = enumerate_matches("boko", "book books cook", options).collect();
            assert_eq!(eager, lazy, "cap {cap:?}");
            assert_eq!(count_matches("boko", "book books cook", options), eager.len());
        }
    }

    #[test]
    fn count_agrees_under_asymmetric_costs() {
        // Named options cannot transpose positional cost arguments.
        let options = MatchOptions {
            costs: EditCosts::new(2, 3, 4),
            max_distance: Some(1),
        };
        let counted = count_matches("abc", "abcabcabc", options);
        let collected = matches("abc", "abcabcabc", options).len();
        assert_eq!(counted, collected);
    }

    #[test]
    fn external_scratch_roundtrip() {
        let mut scratch = vec![EditTrace::default(); scratch_len("xxabcxx".chars().count())];
        let input: Vec<char> = "abc".chars().collect();
        let pattern: Vec<char> = "xxabcxx".chars().collect();
        let options = opts().with_max_distance(0);
        let scanned: Vec<Match> =
            enumerate_matches_in(&input, &pattern, &Ordinal, options, &mut scratch)
                .unwrap()
                .collect();
        let pooled: Vec<Match> = enumerate_matches_of(&input, &pattern, &Ordinal, options).collect();
        assert_eq!(scanned, pooled);
    }

    #[test]
    fn external_scratch_too_small() {
        let mut scratch = vec![EditTrace::default(); 3];
        let input: Vec<char> = "abc".chars().collect();
        let pattern: Vec<char> = "abcdef".chars().collect();
        let err = enumerate_matches_in(&input, &pattern, &Ordinal, opts(), &mut scratch)
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::DestinationTooSmall {
                required: scratch_len(6),
                available: 3
            }
        );
    }

    #[test]
    fn copy_to_validates_destination() {
        let coll = matches("abc", "abc xyz abc", opts().with_max_distance(0));
        assert_eq!(coll.len(), 2);

        let mut dst = [Match::failed(); 4];
        coll.copy_to(&mut dst, 1).unwrap();
        assert!(dst[1].success && dst[2].success);
        assert!(!dst[0].success && !dst[3].success);

        assert_eq!(
            coll.copy_to(&mut dst, 5),
            Err(Error::OutOfRange { index: 5, len: 4 })
        );
        let mut tiny = [Match::failed(); 1];
        assert_eq!(
            coll.copy_to(&mut tiny, 0),
            Err(Error::DestinationTooSmall {
                required: 2,
                available: 1
            })
        );
    }

    #[test]
    fn empty_input_matches_empty_slice() {
        let m = first_match("", "abc", opts());
        assert!(m.success);
        assert_eq!((m.index, m.length, m.distance), (0, 0, 0));
    }

    #[test]
    fn matches_of_non_char_elements() {
        let input = [1u32, 2, 3];
        let pattern = [9u32, 1, 2, 3, 9];
        let m = first_match_of(&input, &pattern, &Ordinal, opts().with_max_distance(0));
        assert!(m.success);
        assert_eq!((m.index, m.length), (1, 3));
    }

    #[test]
    fn explicit_comparer_overrides_default_fold() {
        // Under ordinal comparison "ABC" is nowhere near "abc".
        let folded = first_match("ABC", "xxabcxx", opts().with_max_distance(0));
        assert!(folded.success);
        let ordinal = first_match_with("ABC", "xxabcxx", &Ordinal, opts().with_max_distance(0));
        assert!(!ordinal.success);

        assert_eq!(
            count_matches_with("ABC", "xxabcxx", &Ordinal, opts().with_max_distance(0)),
            0
        );
        assert_eq!(
            matches_with("ABC", "xxabcxx", &Ordinal, opts().with_max_distance(0)).len(),
            0
        );
    }

    #[test]
    fn weighted_costs_flow_into_match_distance() {
        let options = MatchOptions {
            costs: EditCosts::new(1, 1, 10),
            max_distance: Some(2),
        };
        // A substitution at cost 10 loses to delete + insert at 2.
        let full = full_match("ab", "xb", options);
        assert!(full.success);
        assert_eq!(full.distance, 2);
        assert_eq!(
            (full.deletions(), full.insertions(), full.substitutions()),
            (1, 1, 0)
        );

        // Subsequence mode does better still: drop 'a' and take the
        // "b" slice for a single deletion.
        let m = first_match("ab", "xb", options);
        assert!(m.success);
        assert_eq!((m.index, m.length, m.distance), (1, 1, 1));
    }
}
