//! Directed road distances between stops.

use std::collections::HashMap;

use crate::domain::StopId;

/// Road distances in meters, keyed by `(from, to)`.
///
/// Distances are asymmetric. Recording `A -> B` also fills `B -> A` with the
/// same length, but only while `B -> A` is still unknown: explicit entries
/// always win over mirrored ones.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    meters: HashMap<(StopId, StopId), u64>,
}

impl DistanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `from -> to` and mirror it to `to -> from` if that direction is unknown.
    pub fn set(&mut self, from: StopId, to: StopId, meters: u64) {
        self.meters.insert((from, to), meters);
        self.meters.entry((to, from)).or_insert(meters);
    }

    /// Record exactly `from -> to`, leaving the reverse direction alone.
    pub fn set_directed(&mut self, from: StopId, to: StopId, meters: u64) {
        self.meters.insert((from, to), meters);
    }

    /// Forget `from -> to`.
    #[cfg(test)]
    pub(crate) fn remove(&mut self, from: StopId, to: StopId) {
        self.meters.remove(&(from, to));
    }

    /// Distance from `from` to `to`, if registered.
    pub fn get(&self, from: StopId, to: StopId) -> Option<u64> {
        self.meters.get(&(from, to)).copied()
    }

    /// Number of directed entries.
    pub fn len(&self) -> usize {
        self.meters.len()
    }

    /// Returns true if no distance is registered.
    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }

    /// All directed entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (StopId, StopId, u64)> + '_ {
        self.meters
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn triples() -> impl Strategy<Value = Vec<(u32, u32, u64)>> {
        proptest::collection::vec((0u32..6, 0u32..6, 1u64..10_000), 0..40)
    }

    proptest! {
        /// Every applied triple is readable forward; the reverse equals the
        /// triple's length unless some entry for the reverse pair came first.
        #[test]
        fn mirror_fill_law(batch in triples()) {
            let mut table = DistanceTable::new();
            for (i, &(from, to, meters)) in batch.iter().enumerate() {
                table.set(StopId(from), StopId(to), meters);

                prop_assert_eq!(table.get(StopId(from), StopId(to)), Some(meters));

                let reverse_seen_before = batch[..i]
                    .iter()
                    .any(|&(f, t, _)| (f, t) == (to, from) || (f, t) == (from, to));
                if !reverse_seen_before {
                    prop_assert_eq!(table.get(StopId(to), StopId(from)), Some(meters));
                }
            }
        }

        /// Applying the same triple twice changes nothing
        #[test]
        fn idempotent(batch in triples(), extra in (0u32..6, 0u32..6, 1u64..10_000)) {
            let mut once = DistanceTable::new();
            let mut twice = DistanceTable::new();
            for &(from, to, meters) in &batch {
                once.set(StopId(from), StopId(to), meters);
                twice.set(StopId(from), StopId(to), meters);
            }
            let (from, to, meters) = extra;
            once.set(StopId(from), StopId(to), meters);
            twice.set(StopId(from), StopId(to), meters);
            twice.set(StopId(from), StopId(to), meters);

            let mut a: Vec<_> = once.iter().collect();
            let mut b: Vec<_> = twice.iter().collect();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }
    }
}
