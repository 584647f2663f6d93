//! Retry policy for generation requests.
//!
//! The observed contract retries forever: every non-success outcome rotates
//! to the next credential and tries again with the next timeout in the
//! escalation cycle. There is no circuit breaker, so an upstream that never
//! recovers keeps the caller waiting indefinitely. Bounded policies exist
//! for tests and for operators who set `retry.max_attempts`.

use std::time::Duration;

/// Timeout escalation cycle used when nothing else is configured
pub const DEFAULT_TIMEOUTS: [Duration; 4] = [
    Duration::from_secs(60),
    Duration::from_secs(90),
    Duration::from_secs(120),
    Duration::from_secs(180),
];

/// Every HTTP status is treated as recoverable, including ones that are
/// logically permanent such as a malformed request.
pub fn all_statuses_recoverable(_status: u16) -> bool {
    true
}

/// Per-attempt timeout cycle, attempt cap and status classification
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    timeouts: Vec<Duration>,
    max_attempts: Option<usize>,
    recoverable_status: fn(u16) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeouts: DEFAULT_TIMEOUTS.to_vec(),
            max_attempts: None,
            recoverable_status: all_statuses_recoverable,
        }
    }
}

impl RetryPolicy {
    /// Replace the timeout cycle; an empty list keeps the default
    pub fn with_timeouts(mut self, timeouts: Vec<Duration>) -> Self {
        if !timeouts.is_empty() {
            self.timeouts = timeouts;
        }
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_recoverable_status(mut self, predicate: fn(u16) -> bool) -> Self {
        self.recoverable_status = predicate;
        self
    }

    /// Timeout for a 0-based attempt index
    pub fn timeout_for(&self, attempt: usize) -> Duration {
        self.timeouts[attempt % self.timeouts.len()]
    }

    /// Whether another attempt may follow `attempts_made` failed ones
    pub fn allows_attempt(&self, attempts_made: usize) -> bool {
        self.max_attempts.is_none_or(|max| attempts_made < max)
    }

    pub fn is_recoverable_status(&self, status: u16) -> bool {
        (self.recoverable_status)(status)
    }
}
