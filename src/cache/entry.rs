//! Cache Entry Module
//!
//! Defines the stored record for one memoized result: the owning call
//! descriptor, the cached value and its bookkeeping (timestamps, hit
//! counter, computation duration).

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::call::{CallArgs, CallDescriptor};

// == Cache Entry ==
/// One cached result, exclusively owned by the entry store.
///
/// Mutated in place across accesses: the hit counter and access timestamp
/// advance on every reuse, and a policy refresh overwrites the value
/// without replacing the record. The insertion timestamp is set once at
/// construction and deliberately never reset by a refresh.
#[derive(Debug, Clone)]
pub struct CacheEntry<A: CallArgs, V> {
    /// The call this entry answers
    pub call: CallDescriptor<A>,
    /// The cached result
    pub value: V,
    /// When the entry was first admitted
    pub inserted_at: DateTime<Utc>,
    /// When the entry was last accessed
    pub accessed_at: DateTime<Utc>,
    /// Number of successful reuses, incremented on every access
    pub hits: u64,
    /// How long the original computation took; informational only
    pub call_duration: Duration,
}

impl<A: CallArgs, V> CacheEntry<A, V> {
    // == Constructor ==
    /// Creates a fresh entry with zero hits, timestamped now.
    pub fn new(call: CallDescriptor<A>, value: V, call_duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            call,
            value,
            inserted_at: now,
            accessed_at: now,
            hits: 0,
            call_duration,
        }
    }

    // == Age ==
    /// Elapsed time since the entry was first admitted.
    ///
    /// A refresh overwrites the value but not the insertion timestamp, so
    /// age keeps growing until the entry is evicted or the cache cleared.
    pub fn age(&self) -> TimeDelta {
        Utc::now() - self.inserted_at
    }

    // == Snapshot ==
    /// Produces a read-only, serializable copy of this entry's metadata
    /// for diagnostics. Never aliases the live entry.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            signature: self.call.signature().as_str().to_string(),
            hits: self.hits,
            inserted_at: self.inserted_at,
            accessed_at: self.accessed_at,
            call_duration_ms: self.call_duration.as_millis() as u64,
        }
    }
}

// == Entry Snapshot ==
/// Read-only view of one cache entry, safe to hand to callers.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    /// Signature the entry is stored under
    pub signature: String,
    /// Hit counter at snapshot time
    pub hits: u64,
    /// Insertion timestamp
    pub inserted_at: DateTime<Utc>,
    /// Last access timestamp
    pub accessed_at: DateTime<Utc>,
    /// Original computation duration in milliseconds
    pub call_duration_ms: u64,
}
