//! Recency List Module
//!
//! Tracks access order of signatures for least-recently-used eviction.

use std::collections::VecDeque;

use crate::call::Signature;

// == Recency List ==
/// Access order of cached signatures.
///
/// Front = least recently used, back = most recently used, so iterating
/// front-to-back walks entries in eviction order.
#[derive(Debug, Default)]
pub struct RecencyList {
    order: VecDeque<Signature>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty recency list.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a signature as most recently used, inserting it if new.
    pub fn touch(&mut self, signature: &Signature) {
        self.remove(signature);
        self.order.push_back(signature.clone());
    }

    // == Remove ==
    /// Drops a signature from the order; no-op if absent.
    pub fn remove(&mut self, signature: &Signature) {
        self.order.retain(|tracked| tracked != signature);
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used signature.
    pub fn pop_oldest(&mut self) -> Option<Signature> {
        self.order.pop_front()
    }

    /// Returns the least recently used signature without removing it.
    pub fn peek_oldest(&self) -> Option<&Signature> {
        self.order.front()
    }

    // == Iterate ==
    /// Walks signatures from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.order.iter()
    }

    /// Number of tracked signatures.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forgets all tracked signatures.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}
