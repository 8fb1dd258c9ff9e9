//! Stopwatch Module
//!
//! Monotonic stopwatch used to time invocations of the wrapped callable.
//! The measured duration is stored on cache entries for diagnostics and
//! never participates in any eviction decision.

use std::time::{Duration, Instant};

// == Stopwatch ==
/// A named, restartable stopwatch over a monotonic clock.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    /// Label used in log lines
    name: &'static str,
    /// Set while the stopwatch is running
    started: Option<Instant>,
    /// Time accumulated across completed start/stop spans
    accumulated: Duration,
}

impl Stopwatch {
    // == Constructor ==
    /// Creates a stopped stopwatch with zero elapsed time.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            started: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Creates the stopwatch and starts it immediately.
    pub fn started(name: &'static str) -> Self {
        let mut stopwatch = Self::new(name);
        stopwatch.start();
        stopwatch
    }

    // == Start ==
    /// Starts (or resumes) the stopwatch. No-op if already running.
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    // == Stop ==
    /// Stops the stopwatch, folding the running span into the total.
    /// No-op if not running.
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    // == Elapsed ==
    /// Returns total elapsed time. A running stopwatch reports the time
    /// accumulated so far without stopping.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }

    /// Returns the stopwatch label.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
