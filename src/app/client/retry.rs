//! Retry policy with exponential backoff and jitter
//!
//! The delay before retry `n + 1` is `base_delay * 2^n` plus a uniform
//! random jitter in `[0, max_jitter]`, where `n` is the zero-based index of
//! the attempt that just failed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest exponent applied to the base delay
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Per-host retry budget and backoff timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt on each host
    pub max_retries: u32,
    /// Delay before the first retry (before jitter)
    pub base_delay: Duration,
    /// Upper bound of the random jitter
    pub max_jitter: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_jitter,
        }
    }

    /// Single attempt per host, no backoff
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO)
    }

    /// Total attempts made against one host
    pub fn attempts_per_host(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after the attempt with index `attempt` failed
    pub fn next_delay(&self, attempt: u32) -> Duration {
        backoff_delay(self.base_delay, attempt) + jitter(self.max_jitter)
    }
}

/// Exponential component of the backoff, without jitter
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    let exponent = attempt.min(MAX_BACKOFF_EXPONENT);
    base_delay.saturating_mul(1u32 << exponent)
}

fn jitter(max_jitter: Duration) -> Duration {
    let max_millis = max_jitter.as_millis() as u64;
    if max_millis == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(fastrand::u64(0..=max_millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_calculation() {
        let base = Duration::from_millis(1000);

        assert_eq!(backoff_delay(base, 0).as_millis(), 1000);
        assert_eq!(backoff_delay(base, 1).as_millis(), 2000);
        assert_eq!(backoff_delay(base, 2).as_millis(), 4000);
        assert_eq!(backoff_delay(base, 3).as_millis(), 8000);
    }

    #[test]
    fn test_backoff_exponent_is_capped() {
        let base = Duration::from_millis(1);
        assert_eq!(backoff_delay(base, 100), backoff_delay(base, MAX_BACKOFF_EXPONENT));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = RetryPolicy::new(2, Duration::from_millis(100), Duration::from_millis(50));

        for _ in 0..200 {
            let delay = policy.next_delay(1);
            assert!(delay >= Duration::from_millis(200));
            assert!(delay <= Duration::from_millis(250));
        }
    }

    #[test]
    fn test_policy_without_retries() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.attempts_per_host(), 1);
        assert_eq!(policy.next_delay(0), Duration::ZERO);
    }
}
