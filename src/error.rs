//! Error types for the memoization layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the memoization layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No entry exists for the given signature
    #[error("No cache entry for {0}")]
    NotFound(String),

    /// The wrapped callable failed; the underlying error is carried verbatim
    /// and nothing is admitted to the cache for that attempt
    #[error("Wrapped callable failed: {0}")]
    Computation(#[from] anyhow::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the memoization layer.
pub type Result<T> = std::result::Result<T, CacheError>;
