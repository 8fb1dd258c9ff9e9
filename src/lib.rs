//! Memento - a memoization layer with bounded growth
//!
//! Caches the results of a wrapped callable keyed by structural call
//! signature, with three independent eviction policies: an LRU capacity
//! limit, a per-entry hit limit and a per-entry age limit.

pub mod cache;
pub mod call;
pub mod config;
pub mod error;
pub mod memoize;
pub mod timing;

pub use cache::{CacheEngine, CacheEntry, CacheStats, EntrySnapshot, EntryStore};
pub use call::{CallArgs, CallDescriptor, Signature, SignatureArg};
pub use config::CachePolicy;
pub use error::{CacheError, Result};
pub use memoize::Memoized;
pub use timing::Stopwatch;
