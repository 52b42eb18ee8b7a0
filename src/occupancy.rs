//! C2: Stand Occupancy Index — per-stand interval index supporting overlap
//! queries with a separation gap.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct Interval {
    end: i64,
}

/// An interval index for a single stand, keyed by interval start. Overlap
/// queries scan only intervals whose start precedes the query's end
/// (`BTreeMap::range`), which is `O(log n + k)` for `k` candidates — an
/// idiomatic-Rust stand-in for the interval index spec.md §4.2 asks for; it
/// is not grounded in a corpus example, the original Python uses a linear
/// scan per stand instead.
#[derive(Debug, Clone, Default)]
pub struct StandIndex {
    by_start: BTreeMap<i64, Vec<Interval>>,
}

impl StandIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, start: i64, end: i64) {
        debug_assert!(end > start, "interval must be non-empty");
        self.by_start.entry(start).or_default().push(Interval { end });
    }

    /// True if any existing interval intersects `[start, end)`.
    pub fn has_overlap(&self, start: i64, end: i64) -> bool {
        self.by_start
            .range(..end)
            .any(|(&s, intervals)| s < end && intervals.iter().any(|iv| iv.end > start))
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }
}

/// Per-stand occupancy indices, seeded with maintenance intervals at
/// construction (spec.md §3 Lifecycle) and mutated only by the greedy
/// allocator thereafter.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    stands: BTreeMap<String, StandIndex>,
}

impl OccupancyIndex {
    pub fn new(stand_names: impl IntoIterator<Item = String>) -> Self {
        let stands = stand_names.into_iter().map(|n| (n, StandIndex::new())).collect();
        OccupancyIndex { stands }
    }

    pub fn seed_maintenance(&mut self, stand_name: &str, start: i64, end: i64) {
        if let Some(idx) = self.stands.get_mut(stand_name) {
            idx.insert(start, end);
        }
    }

    /// Probe with the gap already applied by the caller (spec.md §4.2: the
    /// allocator queries `[a - gap, b + gap)`).
    pub fn has_overlap(&self, stand_name: &str, start: i64, end: i64) -> bool {
        self.stands
            .get(stand_name)
            .map(|idx| idx.has_overlap(start, end))
            .unwrap_or(false)
    }

    /// Insert a flight occupancy at its natural (unexpanded) bounds.
    pub fn insert_flight(&mut self, stand_name: &str, start: i64, end: i64) {
        if let Some(idx) = self.stands.get_mut(stand_name) {
            idx.insert(start, end);
        }
    }
}
