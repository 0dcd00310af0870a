//! Retry budget and backoff schedule.

use std::time::Duration;

/// Linear backoff retry policy.
///
/// The `k`-th retry (1-indexed) waits `k × base_delay`. There is no jitter
/// and no cap other than the retry budget itself.
///
/// # Defaults
///
/// - `max_retries`: 3 (4 attempts in total)
/// - `base_delay`: 1 second
///
/// # Example
///
/// ```
/// use inkress::client::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new().with_max_retries(2);
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay_for_retry(2), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    ///
    /// Zero disables retrying.
    pub max_retries: u32,

    /// Unit of the linear backoff.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Default retry budget.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default backoff unit (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff unit.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Total attempts, including the first one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before the given retry (1 = first retry).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(retry)
    }

    /// Returns true if another retry fits in the budget.
    ///
    /// `retries_used` counts retries already performed, not attempts.
    #[must_use]
    pub const fn should_retry(&self, retries_used: u32) -> bool {
        retries_used < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
