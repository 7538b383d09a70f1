//! BK-tree (Burkhard-Keller tree).
//!
//! A metric tree over any value domain with a discrete distance. Children
//! hang off their parent keyed by the distance to it; the triangle
//! inequality prunes radius searches to a fraction of the tree.
//!
//! Child keys are kept in insertion order, and tree iteration (root first,
//! then each sub-tree in key-insertion order) is a contractual part of the
//! API, not an accident of the backing map.

use rayon::prelude::*;
use std::sync::Arc;

use crate::comparer::Ordinal;
use crate::metric::{LevenshteinMetric, Metric};

/// Radius ceiling for nearest-neighbor searches. Stops the expanding
/// search from degenerating into a full scan when nothing is close.
const MAX_NEAREST_RADIUS: usize = 20;

/// A node owns its value and its children, keyed by distance to the
/// value. Keys are unique per node.
#[derive(Clone)]
struct BkNode<V> {
    value: V,
    children: Vec<(usize, BkNode<V>)>,
}

impl<V> BkNode<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }
}

/// BK-tree over values of type `V` under a shared distance metric.
///
/// A tree instance is safe to search from multiple threads once built;
/// insertion and removal require exclusive access.
#[derive(Clone)]
pub struct BkTree<V> {
    metric: Arc<dyn Metric<V>>,
    root: Option<BkNode<V>>,
    size: usize,
}

impl BkTree<String> {
    /// Tree over strings under case-sensitive unit-cost Levenshtein
    /// distance.
    #[must_use]
    pub fn levenshtein() -> Self {
        Self::with_metric(LevenshteinMetric::new(Ordinal))
    }
}

impl<V> BkTree<V> {
    pub fn new(metric: Arc<dyn Metric<V>>) -> Self {
        Self {
            metric,
            root: None,
            size: 0,
        }
    }

    pub fn with_metric<M: Metric<V> + 'static>(metric: M) -> Self {
        Self::new(Arc::new(metric))
    }

    /// Number of values in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Add a value. Returns `false` when an equal value (distance zero
    /// under the metric) is already present.
    pub fn insert(&mut self, value: V) -> bool {
        let metric = Arc::clone(&self.metric);
        match self.root.as_mut() {
            None => {
                self.root = Some(BkNode::new(value));
                self.size = 1;
                true
            }
            Some(root) => {
                if insert_under(metric.as_ref(), root, value) {
                    self.size += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Add every value from an iterator, skipping duplicates.
    pub fn insert_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.insert(value);
        }
    }

    /// Remove a value. Its descendants are detached and re-inserted
    /// starting from the removed node's parent, which restores the
    /// distance-key invariant; this makes removal more expensive than
    /// insertion.
    pub fn remove(&mut self, value: &V) -> bool {
        let metric = Arc::clone(&self.metric);
        let Some(root) = self.root.as_mut() else {
            return false;
        };

        if metric.eq(&root.value, value) {
            // Root removal re-seeds the tree from the drained sub-tree.
            let root = self.root.take().expect("root checked above");
            let mut orphans = Vec::new();
            drain_values(root.children, &mut orphans);
            self.size = 0;
            for orphan in orphans {
                self.insert(orphan);
            }
            return true;
        }

        if remove_under(metric.as_ref(), root, value) {
            self.size -= 1;
            true
        } else {
            false
        }
    }

    /// Whether an equal value is present.
    #[must_use]
    pub fn contains(&self, value: &V) -> bool {
        self.find(value, 0).is_some()
    }

    /// Nearest value within `max_distance`, if any.
    ///
    /// Depth-first walk with an explicit stack; the running best tightens
    /// the pruning radius as closer values turn up. Ties go to the value
    /// visited later.
    #[must_use]
    pub fn find(&self, value: &V, max_distance: usize) -> Option<(&V, usize)> {
        let root = self.root.as_ref()?;
        let mut best: Option<(&V, usize)> = None;
        let mut best_distance = max_distance;
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            let dist = self.metric.distance(value, &node.value);
            if dist <= best_distance {
                best = Some((&node.value, dist));
                best_distance = dist;
            }
            for (key, child) in &node.children {
                if key.abs_diff(dist) <= best_distance {
                    stack.push(child);
                }
            }
        }
        best
    }

    /// All values within `max_distance`, ordered ascending by distance,
    /// optionally capped at `limit` results.
    ///
    /// Once the result list is full, the effective radius tightens to the
    /// worst accepted distance, and closer finds evict the worst entry.
    #[must_use]
    pub fn find_all(
        &self,
        value: &V,
        max_distance: usize,
        limit: Option<usize>,
    ) -> Vec<(&V, usize)> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        if limit == Some(0) {
            return Vec::new();
        }

        let mut accepted: Vec<(&V, usize)> = Vec::new();
        let mut cap = max_distance;
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            let dist = self.metric.distance(value, &node.value);
            if dist <= cap {
                // Insert ahead of entries at equal or greater distance.
                let at = accepted
                    .iter()
                    .position(|&(_, d)| d >= dist)
                    .unwrap_or(accepted.len());
                accepted.insert(at, (&node.value, dist));
                if let Some(limit) = limit {
                    accepted.truncate(limit);
                    if accepted.len() == limit {
                        cap = accepted.last().map_or(cap, |&(_, d)| d);
                    }
                }
            }
            for (key, child) in &node.children {
                if key.abs_diff(dist) <= cap {
                    stack.push(child);
                }
            }
        }
        accepted
    }

    /// Up to `k` nearest values, ascending by distance.
    ///
    /// Expands the search radius geometrically until `k` values turn up
    /// or the radius hits its ceiling, so close neighbors are found
    /// without scanning the whole tree.
    #[must_use]
    pub fn find_nearest(&self, value: &V, k: usize) -> Vec<(&V, usize)> {
        if k == 0 || self.root.is_none() {
            return Vec::new();
        }

        let mut radius = 1;
        loop {
            let found = self.find_all(value, radius, Some(k));
            if found.len() >= k || radius >= MAX_NEAREST_RADIUS {
                return found;
            }
            radius = radius.saturating_mul(2).min(MAX_NEAREST_RADIUS);
        }
    }

    /// Pre-order iteration: the root first, then each sub-tree in
    /// insertion order of the child-distance keys.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: self.root.as_ref().into_iter().collect(),
        }
    }

    /// Visit every parent/key/child edge. Test support for the
    /// distance-key invariant.
    #[cfg(test)]
    pub(crate) fn for_each_edge(&self, f: &mut impl FnMut(&V, usize, &V)) {
        fn walk<V>(node: &BkNode<V>, f: &mut impl FnMut(&V, usize, &V)) {
            for (key, child) in &node.children {
                f(&node.value, *key, &child.value);
                walk(child, f);
            }
        }
        if let Some(root) = &self.root {
            walk(root, f);
        }
    }
}

impl<V: Sync> BkTree<V> {
    /// Radius search for many queries in parallel.
    #[must_use]
    pub fn batch_search(&self, queries: &[V], max_distance: usize) -> Vec<Vec<(&V, usize)>> {
        queries
            .par_iter()
            .map(|query| self.find_all(query, max_distance, None))
            .collect()
    }
}

impl<V> std::fmt::Debug for BkTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BkTree").field("size", &self.size).finish()
    }
}

fn insert_under<V>(metric: &dyn Metric<V>, node: &mut BkNode<V>, value: V) -> bool {
    let dist = metric.distance(&node.value, &value);
    if dist == 0 {
        return false;
    }
    match node.children.iter_mut().find(|(key, _)| *key == dist) {
        Some((_, child)) => insert_under(metric, child, value),
        None => {
            node.children.push((dist, BkNode::new(value)));
            true
        }
    }
}

fn remove_under<V>(metric: &dyn Metric<V>, node: &mut BkNode<V>, value: &V) -> bool {
    let dist = metric.distance(&node.value, value);
    let Some(at) = node.children.iter().position(|(key, _)| *key == dist) else {
        return false;
    };
    if metric.eq(&node.children[at].1.value, value) {
        let (_, removed) = node.children.remove(at);
        let mut orphans = Vec::new();
        drain_values(removed.children, &mut orphans);
        for orphan in orphans {
            insert_under(metric, node, orphan);
        }
        true
    } else {
        remove_under(metric, &mut node.children[at].1, value)
    }
}

/// Drain a detached forest into its values, pre-order.
fn drain_values<V>(children: Vec<(usize, BkNode<V>)>, out: &mut Vec<V>) {
    for (_, node) in children {
        out.push(node.value);
        drain_values(node.children, out);
    }
}

/// Pre-order tree iterator.
pub struct Iter<'a, V> {
    stack: Vec<&'a BkNode<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let node = self.stack.pop()?;
        for (_, child) in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(&node.value)
    }
}

impl<'a, V> IntoIterator for &'a BkTree<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}
