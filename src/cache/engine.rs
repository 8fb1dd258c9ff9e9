//! Cache Engine Module
//!
//! Owns the entry store, the eviction policy and the wrapped callable.
//! Implements lookup, admission, refresh-on-expiry and capacity
//! compaction: the full revalidation sequence that runs on every access.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, EntrySnapshot, EntryStore};
use crate::call::{CallArgs, CallDescriptor, Signature};
use crate::config::CachePolicy;
use crate::error::{CacheError, Result};
use crate::timing::Stopwatch;

// == Cache Engine ==
/// Memoization engine for one wrapped callable.
///
/// Single-threaded and non-reentrant: the whole revalidation sequence for
/// a signature runs as one uninterrupted critical section. The store is
/// exclusively owned; callers introspect through scoped borrows or
/// snapshots.
pub struct CacheEngine<A: CallArgs, V, F> {
    /// The wrapped callable
    callable: F,
    /// Capacity, hit and age limits
    policy: CachePolicy,
    /// Signature-keyed entry storage
    store: EntryStore<A, V>,
    /// Performance counters
    stats: CacheStats,
}

impl<A, V, F> CacheEngine<A, V, F>
where
    A: CallArgs,
    V: Clone,
    F: FnMut(&A) -> anyhow::Result<V>,
{
    // == Constructor ==
    /// Creates an engine wrapping `callable` under `policy`.
    pub fn new(policy: CachePolicy, callable: F) -> Self {
        Self {
            callable,
            policy,
            store: EntryStore::new(),
            stats: CacheStats::new(),
        }
    }

    // == Resolve ==
    /// Returns the value for a call, from cache or fresh computation.
    ///
    /// With `bypass` set the cache is never consulted for the returned
    /// value, but the freshly computed result still replaces the entry
    /// for that signature. Errors from the wrapped callable propagate
    /// unchanged and admit nothing.
    pub fn resolve(&mut self, call: CallDescriptor<A>, bypass: bool) -> Result<V> {
        let signature = call.signature();

        if bypass {
            info!("{}: cache bypassed, entry still refreshed", signature);
        } else if let Some(entry) = self.store.take(&signature) {
            debug!("{}: cache entry found", signature);
            self.stats.record_hit();
            return self.revalidate(signature, entry);
        } else {
            info!("{}: no cache entry, computing", signature);
        }

        self.stats.record_miss();
        let (value, duration) = self.invoke(&call)?;
        self.revalidate(signature, CacheEntry::new(call, value, duration))
    }

    // == Revalidate ==
    /// Runs the fixed hit/age check sequence on an entry and returns its
    /// current value.
    ///
    /// The entry is out of the store for the duration of the sequence
    /// and goes back in at the most-recently-used position at the end;
    /// a freshly admitted entry takes the same path starting from zero
    /// hits, so it leaves here carrying `hits == 1`.
    fn revalidate(&mut self, signature: Signature, mut entry: CacheEntry<A, V>) -> Result<V> {
        let mut stopwatch = Stopwatch::started("update");

        // Hit accounting. A refresh overwrites the value only; the
        // counter keeps counting from where it left off.
        entry.hits += 1;
        if let Some(limit) = self.policy.max_hits {
            if entry.hits > limit {
                info!("{}: entry exceeded {} hits, refreshing", signature, limit);
                self.store.remove(&signature);
                let (value, _) = self.invoke(&entry.call)?;
                entry.value = value;
                self.stats.record_refresh();
            }
        }

        // Age accounting. inserted_at is never reset, so an entry past
        // the limit refreshes on every access until capacity eviction or
        // clear() retires it.
        entry.accessed_at = Utc::now();
        if let Some(limit) = self.policy.max_age {
            if entry.accessed_at - entry.inserted_at > limit {
                info!("{}: entry exceeded age limit, refreshing", signature);
                self.store.remove(&signature);
                let (value, _) = self.invoke(&entry.call)?;
                entry.value = value;
                self.stats.record_refresh();
            }
        }

        // The entry returns to the store as most recently used.
        let value = entry.value.clone();
        self.store.put(signature.clone(), entry);

        self.compact();
        self.stats.set_total_entries(self.store.len());

        stopwatch.stop();
        debug!(
            "{}: cache {} took {:?}",
            signature,
            stopwatch.name(),
            stopwatch.elapsed()
        );
        Ok(value)
    }

    // == Invoke ==
    /// Calls the wrapped callable, timing it with the stopwatch.
    fn invoke(&mut self, call: &CallDescriptor<A>) -> Result<(V, std::time::Duration)> {
        debug!("{}: invoking wrapped callable", call);
        let mut stopwatch = Stopwatch::started("call");
        let value = (self.callable)(call.args())?;
        stopwatch.stop();

        let duration = stopwatch.elapsed();
        debug!("{}: {} took {:?}", call, stopwatch.name(), duration);
        Ok((value, duration))
    }

    // == Compact ==
    /// Evicts least-recently-used entries until the capacity limit holds.
    /// No-op when no limit is set or the store fits.
    fn compact(&mut self) {
        let Some(max_size) = self.policy.max_size else {
            return;
        };
        let before = self.store.len();
        while self.store.len() > max_size {
            if let Some(evicted) = self.store.evict_oldest() {
                debug!("{}: evicted by capacity compaction", evicted);
                self.stats.record_eviction();
            } else {
                break;
            }
        }
        if self.store.len() < before {
            info!("Cache size reduced from {} to {}", before, self.store.len());
        }
    }

    // == Clear ==
    /// Empties the store; policy and counters keep their values.
    pub fn clear(&mut self) {
        self.store.clear();
        self.stats.set_total_entries(0);
        info!("Cache cleared");
    }

    // == Search ==
    /// Pure lookup for introspection: no hit bookkeeping, no reordering,
    /// no policy checks. Fails with [`CacheError::NotFound`] if absent.
    pub fn search(&self, call: &CallDescriptor<A>) -> Result<&CacheEntry<A, V>> {
        let signature = call.signature();
        let mut stopwatch = Stopwatch::started("search");
        let result = self.store.get(&signature).ok_or_else(|| {
            info!("{}: no cache entry found", signature);
            CacheError::NotFound(signature.to_string())
        });
        stopwatch.stop();

        debug!(
            "{}: cache {} took {:?}",
            signature,
            stopwatch.name(),
            stopwatch.elapsed()
        );
        result
    }

    // == Diagnostics ==
    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Walks `(signature, entry)` pairs from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &CacheEntry<A, V>)> {
        self.store.iter()
    }

    /// Read-only snapshots of every entry, in recency order.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.store.iter().map(|(_, entry)| entry.snapshot()).collect()
    }

    /// Current performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    /// The configured eviction policy.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }
}

// == Display ==
/// Human-readable dump of the policy and every entry in recency order.
impl<A, V, F> fmt::Display for CacheEngine<A, V, F>
where
    A: CallArgs,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CacheEngine(")?;
        writeln!(f, "|  max_size={:?},", self.policy.max_size)?;
        writeln!(f, "|  max_hits={:?},", self.policy.max_hits)?;
        writeln!(f, "|  max_age={:?},", self.policy.max_age)?;
        writeln!(f, "|  entries=[")?;
        for (signature, entry) in self.store.iter() {
            writeln!(
                f,
                "|  |  {}: value={:?}, hits={}, inserted_at={}, accessed_at={}, call_duration={:?},",
                signature,
                entry.value,
                entry.hits,
                entry.inserted_at,
                entry.accessed_at,
                entry.call_duration,
            )?;
        }
        writeln!(f, "|  ]")?;
        write!(f, ")")
    }
}
