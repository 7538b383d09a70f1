//! Distance metrics over arbitrary value domains.
//!
//! A metric pairs a distance function with the value equality its zero
//! distance induces. Index structures share metrics behind
//! `Arc<dyn Metric<V>>`; the engine's own entry points stay monomorphic.

use std::sync::Arc;

use crate::algorithms::{distance_with, EditCosts};
use crate::comparer::TextComparer;
use crate::error::{validate_ratio, Error};

/// A discrete distance over values of type `V`.
///
/// Contract: `distance(a, a) == 0`, distances are non-negative, and
/// `distance(a, b) == distance(b, a)` whenever the underlying costs are
/// symmetric. `eq` must agree with the zero-distance condition.
pub trait Metric<V: ?Sized>: Send + Sync {
    fn distance(&self, a: &V, b: &V) -> usize;

    /// Value equality induced by the metric.
    fn eq(&self, a: &V, b: &V) -> bool {
        self.distance(a, b) == 0
    }
}

/// Full-match Levenshtein distance composed from an element comparer and
/// edit unit costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMetric<C> {
    comparer: C,
    costs: EditCosts,
}

impl<C: TextComparer> LevenshteinMetric<C> {
    pub fn new(comparer: C) -> Self {
        Self {
            comparer,
            costs: EditCosts::UNIT,
        }
    }

    pub fn with_costs(comparer: C, costs: EditCosts) -> Self {
        Self { comparer, costs }
    }
}

impl<C: TextComparer, S: AsRef<str> + ?Sized> Metric<S> for LevenshteinMetric<C> {
    fn distance(&self, a: &S, b: &S) -> usize {
        distance_with(a.as_ref(), b.as_ref(), &self.comparer, self.costs)
    }

    fn eq(&self, a: &S, b: &S) -> bool {
        self.comparer.eq_str(a.as_ref(), b.as_ref())
    }
}

/// Metric wrapping a caller-supplied distance function; value equality
/// derives from the zero-distance condition.
pub struct FnMetric<V: ?Sized> {
    distance: Arc<dyn Fn(&V, &V) -> usize + Send + Sync>,
}

impl<V: ?Sized> Clone for FnMetric<V> {
    fn clone(&self) -> Self {
        Self {
            distance: Arc::clone(&self.distance),
        }
    }
}

impl<V: ?Sized> FnMetric<V> {
    pub fn new(distance: impl Fn(&V, &V) -> usize + Send + Sync + 'static) -> Self {
        Self {
            distance: Arc::new(distance),
        }
    }
}

impl<V: ?Sized> Metric<V> for FnMetric<V> {
    fn distance(&self, a: &V, b: &V) -> usize {
        (self.distance)(a, b)
    }
}

impl<V: ?Sized> std::fmt::Debug for FnMetric<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnMetric")
    }
}

/// Maps a source word to the largest distance still considered a match
/// for it.
#[derive(Clone)]
pub enum MaxDistance {
    /// Caller-supplied radius function.
    Fixed(Arc<dyn Fn(&str) -> usize + Send + Sync>),
    /// `⌊chars(source) · ratio⌋` with a ratio in `[0, 1]`.
    LengthRatio(f64),
}

impl MaxDistance {
    /// Radius from a caller-supplied function.
    pub fn fixed(radius: impl Fn(&str) -> usize + Send + Sync + 'static) -> Self {
        Self::Fixed(Arc::new(radius))
    }

    /// Radius proportional to the source length. The ratio must be finite
    /// and within `[0, 1]`.
    pub fn length_ratio(ratio: f64) -> Result<Self, Error> {
        Ok(Self::LengthRatio(validate_ratio(ratio)?))
    }

    /// Allowed radius for `source`.
    #[must_use]
    pub fn radius(&self, source: &str) -> usize {
        match self {
            Self::Fixed(radius) => radius(source),
            Self::LengthRatio(ratio) => {
                (source.chars().count() as f64 * ratio).floor() as usize
            }
        }
    }
}

impl Default for MaxDistance {
    /// A quarter of the source length, the engine-wide default cap.
    fn default() -> Self {
        Self::LengthRatio(0.25)
    }
}

impl std::fmt::Debug for MaxDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(_) => f.write_str("MaxDistance::Fixed"),
            Self::LengthRatio(ratio) => write!(f, "MaxDistance::LengthRatio({ratio})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::{IgnoreCase, Ordinal};

    #[test]
    fn levenshtein_metric_distance_and_eq() {
        let ordinal = LevenshteinMetric::new(Ordinal);
        assert_eq!(Metric::<str>::distance(&ordinal, "kitten", "sitting"), 3);
        assert!(!Metric::<str>::eq(&ordinal, "hello", "HELLo"));

        let folded = LevenshteinMetric::new(IgnoreCase);
        assert_eq!(Metric::<str>::distance(&folded, "hello", "HELLo"), 0);
        assert!(Metric::<str>::eq(&folded, "hello", "HELLo"));
    }

    #[test]
    fn metric_eq_agrees_with_zero_distance() {
        let metric = LevenshteinMetric::new(Ordinal);
        for (a, b) in [("book", "book"), ("book", "boko"), ("", "")] {
            assert_eq!(
                Metric::<str>::eq(&metric, a, b),
                Metric::<str>::distance(&metric, a, b) == 0
            );
        }
    }

    #[test]
    fn fn_metric_derives_equality() {
        let metric = FnMetric::new(|a: &u64, b: &u64| a.abs_diff(*b) as usize);
        assert_eq!(metric.distance(&7, &3), 4);
        assert!(metric.eq(&5, &5));
        assert!(!metric.eq(&5, &6));
    }

    #[test]
    fn length_ratio_radius() {
        let max = MaxDistance::length_ratio(0.25).unwrap();
        assert_eq!(max.radius("word"), 1);
        assert_eq!(max.radius("abc"), 0);
        assert_eq!(max.radius("a quarter cap"), 3);
        assert_eq!(MaxDistance::default().radius("word"), 1);
    }

    #[test]
    fn length_ratio_rejects_out_of_range() {
        assert!(MaxDistance::length_ratio(1.5).is_err());
        assert!(MaxDistance::length_ratio(-0.5).is_err());
        assert!(MaxDistance::length_ratio(1.0).is_ok());
    }

    #[test]
    fn fixed_radius_delegates() {
        let max = MaxDistance::fixed(|s| s.len() / 2);
        assert_eq!(max.radius("abcdef"), 3);
    }
}
