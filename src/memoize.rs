//! Memoized Wrapper Module
//!
//! Explicit higher-order construction around the cache engine: takes a
//! callable and a policy, returns an object exposing the cached call
//! surface plus an engine handle for introspection.
//!
//! The bypass decision is an API method, never an argument, so it can
//! never leak into a call signature.

use crate::cache::CacheEngine;
use crate::call::{CallArgs, CallDescriptor};
use crate::config::CachePolicy;
use crate::error::Result;

// == Memoized ==
/// A callable wrapped with a memoizing cache.
///
/// ```
/// use memento::{CachePolicy, Memoized};
///
/// let mut square = Memoized::new("square", CachePolicy::new().with_max_size(16), |args: &(i64,)| {
///     Ok(args.0 * args.0)
/// });
///
/// assert_eq!(square.call((12,)).unwrap(), 144);
/// assert_eq!(square.call((12,)).unwrap(), 144); // served from cache
/// assert_eq!(square.engine().len(), 1);
/// ```
pub struct Memoized<A: CallArgs, V, F> {
    /// Name used in signatures and log lines
    name: String,
    /// The cache engine owning the callable
    engine: CacheEngine<A, V, F>,
}

impl<A, V, F> Memoized<A, V, F>
where
    A: CallArgs,
    V: Clone,
    F: FnMut(&A) -> anyhow::Result<V>,
{
    // == Constructor ==
    /// Wraps `callable` under `policy`. The name becomes the leading part
    /// of every signature, so it should be unique per wrapped callable.
    pub fn new(name: impl Into<String>, policy: CachePolicy, callable: F) -> Self {
        Self {
            name: name.into(),
            engine: CacheEngine::new(policy, callable),
        }
    }

    // == Call ==
    /// Invokes through the cache: a hit is revalidated and served, a miss
    /// computes and admits.
    pub fn call(&mut self, args: A) -> Result<V> {
        self.engine
            .resolve(CallDescriptor::new(self.name.clone(), args), false)
    }

    // == Call Uncached ==
    /// Computes fresh, skipping the cache for the returned value; the
    /// result still replaces the cache entry for that signature.
    pub fn call_uncached(&mut self, args: A) -> Result<V> {
        self.engine
            .resolve(CallDescriptor::new(self.name.clone(), args), true)
    }

    // == Introspection ==
    /// The wrapped callable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds the descriptor this wrapper would use for `args`; handy for
    /// [`CacheEngine::search`].
    pub fn describe(&self, args: A) -> CallDescriptor<A> {
        CallDescriptor::new(self.name.clone(), args)
    }

    /// Read-only handle to the underlying engine.
    pub fn engine(&self) -> &CacheEngine<A, V, F> {
        &self.engine
    }

    /// Mutable handle to the underlying engine, e.g. for `clear()`.
    pub fn engine_mut(&mut self) -> &mut CacheEngine<A, V, F> {
        &mut self.engine
    }
}
