//! Entry Store Module
//!
//! Ordered mapping from call signature to cache entry. Iteration and
//! eviction follow recency order; every insertion or touch makes an
//! entry the most recently used. Policy decisions (capacity, hit and
//! age limits) live in the engine; the store only keeps order.

use std::collections::HashMap;

use crate::cache::{CacheEntry, RecencyList};
use crate::call::{CallArgs, Signature};
use crate::error::{CacheError, Result};

// == Entry Store ==
/// Signature-keyed storage with recency tracking.
///
/// At most one entry per signature. Entries are exclusively owned here;
/// callers get scoped borrows or take ownership via [`EntryStore::take`].
#[derive(Debug)]
pub struct EntryStore<A: CallArgs, V> {
    /// Signature to entry mapping
    entries: HashMap<Signature, CacheEntry<A, V>>,
    /// Access order, least to most recently used
    recency: RecencyList,
}

impl<A: CallArgs, V> EntryStore<A, V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
        }
    }

    // == Get ==
    /// Looks up an entry without altering recency order.
    pub fn get(&self, signature: &Signature) -> Option<&CacheEntry<A, V>> {
        self.entries.get(signature)
    }

    // == Put ==
    /// Inserts or overwrites the entry for a signature; either way the
    /// entry becomes most recently used.
    pub fn put(&mut self, signature: Signature, entry: CacheEntry<A, V>) {
        self.recency.touch(&signature);
        self.entries.insert(signature, entry);
    }

    // == Touch ==
    /// Moves an existing entry to the most-recently-used position.
    ///
    /// Fails with [`CacheError::NotFound`] if the signature is absent;
    /// the caller must insert instead.
    pub fn touch(&mut self, signature: &Signature) -> Result<()> {
        if !self.entries.contains_key(signature) {
            return Err(CacheError::NotFound(signature.to_string()));
        }
        self.recency.touch(signature);
        Ok(())
    }

    // == Take ==
    /// Removes the entry for a signature and hands over ownership.
    pub fn take(&mut self, signature: &Signature) -> Option<CacheEntry<A, V>> {
        let entry = self.entries.remove(signature)?;
        self.recency.remove(signature);
        Some(entry)
    }

    // == Remove ==
    /// Deletes the entry for a signature; absence counts as already done.
    pub fn remove(&mut self, signature: &Signature) {
        self.entries.remove(signature);
        self.recency.remove(signature);
    }

    // == Evict Oldest ==
    /// Removes the least-recently-used entry, returning its signature.
    /// Used only by compaction.
    pub fn evict_oldest(&mut self) -> Option<Signature> {
        let signature = self.recency.pop_oldest()?;
        self.entries.remove(&signature);
        Some(signature)
    }

    // == Size ==
    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    // == Iterate ==
    /// Walks `(signature, entry)` pairs from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &CacheEntry<A, V>)> {
        self.recency
            .iter()
            .filter_map(|signature| self.entries.get(signature).map(|entry| (signature, entry)))
    }
}

impl<A: CallArgs, V> Default for EntryStore<A, V> {
    fn default() -> Self {
        Self::new()
    }
}
