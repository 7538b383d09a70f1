//! Edit-trace value records.

use serde::{Deserialize, Serialize};

/// Unit costs for the three edit operations. Defaults to 1 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCosts {
    /// Cost of deleting one element from the input.
    pub deletion: usize,
    /// Cost of inserting one element into the input.
    pub insertion: usize,
    /// Cost of substituting one input element.
    pub substitution: usize,
}

impl EditCosts {
    pub const UNIT: EditCosts = EditCosts {
        deletion: 1,
        insertion: 1,
        substitution: 1,
    };

    #[must_use]
    pub const fn new(deletion: usize, insertion: usize, substitution: usize) -> Self {
        Self {
            deletion,
            insertion,
            substitution,
        }
    }

    /// Costs with the deletion and insertion roles exchanged, for use when
    /// the operands of a full match are swapped.
    #[must_use]
    pub(crate) const fn transposed(self) -> Self {
        Self {
            deletion: self.insertion,
            insertion: self.deletion,
            substitution: self.substitution,
        }
    }
}

impl Default for EditCosts {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Counts of the edits transforming an input into a pattern slice:
/// deletions from the input, insertions into the input, substitutions.
///
/// The zero value is the canonical "no edits" record and doubles as the
/// trace of a failed match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTrace {
    pub deletions: u32,
    pub insertions: u32,
    pub substitutions: u32,
}

impl EditTrace {
    /// Total number of edits, all operations weighted equally.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u32 {
        self.deletions + self.insertions + self.substitutions
    }

    /// Weighted distance under the given unit costs.
    #[inline]
    #[must_use]
    pub fn weighted(&self, costs: EditCosts) -> usize {
        self.deletions as usize * costs.deletion
            + self.insertions as usize * costs.insertion
            + self.substitutions as usize * costs.substitution
    }

    #[inline]
    pub(crate) fn with_deletion(self) -> Self {
        Self {
            deletions: self.deletions + 1,
            ..self
        }
    }

    #[inline]
    pub(crate) fn with_insertion(self) -> Self {
        Self {
            insertions: self.insertions + 1,
            ..self
        }
    }

    #[inline]
    pub(crate) fn with_substitution(self) -> Self {
        Self {
            substitutions: self.substitutions + 1,
            ..self
        }
    }
}

/// Canonical argument record for the matching operations.
///
/// Every convenience entry point builds one of these, so positional cost
/// arguments cannot be transposed on the way to the kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub costs: EditCosts,
    /// Candidates with a weighted distance above the cap are rejected.
    /// With no cap, iteration yields strictly improving candidates.
    pub max_distance: Option<usize>,
}

impl MatchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    #[must_use]
    pub fn with_costs(mut self, costs: EditCosts) -> Self {
        self.costs = costs;
        self
    }
}
