//! Cache Policy Module
//!
//! Per-callable eviction policy: capacity, hit-count and age limits.

use chrono::TimeDelta;

/// Eviction policy parameters for one wrapped callable.
///
/// The three limits are independent and all optional; `None` means
/// "no limit for that dimension". The default policy is unbounded.
#[derive(Debug, Clone, Default)]
pub struct CachePolicy {
    /// Maximum number of entries; exceeding it evicts least-recently-used
    pub max_size: Option<usize>,
    /// Maximum hits per entry; exceeding it refreshes the entry's value
    pub max_hits: Option<u64>,
    /// Maximum age of an entry since insertion; exceeding it refreshes
    pub max_age: Option<TimeDelta>,
}

impl CachePolicy {
    /// Creates an unbounded policy.
    pub fn new() -> Self {
        Self::default()
    }

    // == Builder Methods ==
    /// Sets the maximum entry count.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Sets the maximum hit count per entry.
    pub fn with_max_hits(mut self, max_hits: u64) -> Self {
        self.max_hits = Some(max_hits);
        self
    }

    /// Sets the maximum entry age.
    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default_unbounded() {
        let policy = CachePolicy::default();
        assert!(policy.max_size.is_none());
        assert!(policy.max_hits.is_none());
        assert!(policy.max_age.is_none());
    }

    #[test]
    fn test_policy_builder() {
        let policy = CachePolicy::new()
            .with_max_size(100)
            .with_max_hits(5)
            .with_max_age(TimeDelta::seconds(30));

        assert_eq!(policy.max_size, Some(100));
        assert_eq!(policy.max_hits, Some(5));
        assert_eq!(policy.max_age, Some(TimeDelta::seconds(30)));
    }

    #[test]
    fn test_policy_dimensions_independent() {
        let policy = CachePolicy::new().with_max_hits(2);
        assert!(policy.max_size.is_none());
        assert_eq!(policy.max_hits, Some(2));
        assert!(policy.max_age.is_none());
    }
}
