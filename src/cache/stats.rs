//! Cache Statistics Module
//!
//! Tracks performance counters: hits, misses, policy refreshes and
//! capacity evictions.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for one cache engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that required a fresh computation
    pub misses: u64,
    /// Number of entries evicted by capacity compaction
    pub evictions: u64,
    /// Number of values recomputed by the hit-limit or age-limit policies
    pub refreshes: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Increments the refresh counter.
    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    /// Updates the entry count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
