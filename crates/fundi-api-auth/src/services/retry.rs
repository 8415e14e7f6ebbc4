//! Bounded exponential backoff for profile reconciliation.
//!
//! Registration (identity + profile write) and resolution (profile read)
//! are not transactionally linked, so a resolver call can legitimately race
//! a still-propagating write. The policy here retries *absence* — not
//! errors — a fixed number of times with growing delay before treating the
//! profile as genuinely missing. Exhausting the budget is not an error in
//! itself; it means the caller must complete registration or
//! re-authenticate.

use std::time::Duration;
use tracing::debug;

/// Retry policy for absence-tolerant reads.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt (0 = no retries).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Delay cap.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given retry budget and base delay. The
    /// delay cap defaults to 2 seconds.
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(2),
        }
    }

    /// A policy that never waits — for tests.
    #[must_use]
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before the retry following `attempt` (0-based), using
    /// exponential backoff capped at `max_delay`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        exponential.min(self.max_delay)
    }

    /// Run an absence-returning operation until it yields a value or the
    /// retry budget is exhausted.
    ///
    /// `Ok(Some(_))` returns immediately. `Ok(None)` sleeps and retries
    /// while budget remains, then returns `Ok(None)`. Errors are never
    /// retried — a store failure is not propagation lag.
    pub async fn run_until_present<F, Fut, T, E>(
        &self,
        operation_name: &str,
        mut f: F,
    ) -> Result<Option<T>, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<Option<T>, E>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match f().await? {
                Some(value) => {
                    if attempt > 0 {
                        debug!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            "Read succeeded after retries"
                        );
                    }
                    return Ok(Some(value));
                }
                None if attempt >= self.max_retries => {
                    debug!(
                        operation = operation_name,
                        attempts = attempt + 1,
                        "Retry budget exhausted, reporting genuine absence"
                    );
                    return Ok(None);
                }
                None => {
                    let delay = self.delay_for(attempt);
                    debug!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Not visible yet, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_delay_exponential_backoff() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
    }

    #[test]
    fn test_delay_capped_at_max() {
        let policy = RetryPolicy::new(10, Duration::from_millis(500));
        assert_eq!(policy.delay_for(5), Duration::from_secs(2)); // 16s capped to 2s
    }

    #[tokio::test]
    async fn test_present_on_first_try() {
        let policy = RetryPolicy::immediate(3);
        let result: Result<Option<i32>, Infallible> = policy
            .run_until_present("test_op", || async { Ok(Some(42)) })
            .await;
        assert_eq!(result.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_present_after_retries() {
        let policy = RetryPolicy::immediate(5);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<Option<i32>, Infallible> = policy
            .run_until_present("test_op", move || {
                let counter = counter_clone.clone();
                async move {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    if attempt < 3 {
                        Ok(None)
                    } else {
                        Ok(Some(99))
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), Some(99));
        assert_eq!(counter.load(Ordering::SeqCst), 4); // initial + 3 retries
    }

    #[tokio::test]
    async fn test_budget_exhaustion_is_absence_not_error() {
        let policy = RetryPolicy::immediate(2);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<Option<i32>, Infallible> = policy
            .run_until_present("test_op", move || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                }
            })
            .await;

        assert_eq!(result.unwrap(), None);
        assert_eq!(counter.load(Ordering::SeqCst), 3); // 1 initial + 2 retries
    }

    #[tokio::test]
    async fn test_errors_are_not_retried() {
        let policy = RetryPolicy::immediate(5);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<Option<i32>, &'static str> = policy
            .run_until_present("test_op", move || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("store down")
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1); // only one attempt
    }

    #[tokio::test]
    async fn test_zero_budget_single_attempt() {
        let policy = RetryPolicy::immediate(0);
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<Option<i32>, Infallible> = policy
            .run_until_present("test_op", move || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                }
            })
            .await;

        assert_eq!(result.unwrap(), None);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
