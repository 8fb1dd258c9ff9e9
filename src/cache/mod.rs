//! Cache Module
//!
//! The memoization core: entry model, recency-ordered store and the
//! engine that runs eviction and refresh policies on every lookup.

mod engine;
mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use engine::CacheEngine;
pub use entry::{CacheEntry, EntrySnapshot};
pub use recency::RecencyList;
pub use stats::CacheStats;
pub use store::EntryStore;
