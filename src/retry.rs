//! Retry with exponential backoff for transient failures.
//!
//! Wraps a suspendable operation in a bounded retry loop: only failures
//! the error type classifies as retryable are retried, the delay between
//! attempts grows geometrically up to a cap, and attempts are strictly
//! sequential. Sleeps go through tokio, so cancelling the calling task
//! cancels an in-flight backoff wait.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::RetryConfigSection;

/// A failure that knows whether retrying could help.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub const fn from_settings(settings: &RetryConfigSection) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff_factor: settings.backoff_factor,
        }
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        delay.mul_f64(self.backoff_factor).min(self.max_delay)
    }
}

/// Runs `op`, retrying retryable failures up to `config.max_attempts`
/// total attempts.
///
/// Non-retryable failures propagate immediately. The delay is awaited
/// before each retry but never after the final attempt; exhausting all
/// attempts returns the last captured failure.
pub async fn retry<T, E, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay = config.initial_delay;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || attempt >= max_attempts {
                    return Err(err);
                }
                warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt, max_attempts, err, delay
                );
                tokio::time::sleep(delay).await;
                delay = config.next_delay(delay);
                attempt += 1;
            }
        }
    }
}

/// Like [`retry`], but bounds the whole loop by an overall deadline.
///
/// If the cumulative time exceeds `overall`, the operation fails with
/// `on_timeout()` regardless of remaining attempts.
pub async fn retry_with_timeout<T, E, F, Fut>(
    config: &RetryConfig,
    overall: Duration,
    on_timeout: impl FnOnce() -> E,
    op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    match tokio::time::timeout(overall, retry(config, op)).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct TestError {
        retryable: bool,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test error (retryable: {})", self.retryable)
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            self.retryable
        }
    }

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            backoff_factor: 2.0,
        }
    }

    #[tokio::test]
    async fn always_failing_runs_exactly_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), TestError> = retry(&fast_config(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError { retryable: true }) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn success_on_second_attempt_stops_retrying() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, TestError> = retry(&fast_config(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 2 {
                    Err(TestError { retryable: true })
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_retryable_fails_on_first_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<(), TestError> = retry(&fast_config(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError { retryable: false }) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn immediate_success_makes_one_call() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, TestError> = retry(&fast_config(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(7) }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn overall_deadline_cuts_off_remaining_attempts() {
        let config = RetryConfig {
            max_attempts: 10,
            initial_delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(60),
            backoff_factor: 1.0,
        };
        let calls = AtomicU32::new(0);

        let result: Result<(), TestError> = retry_with_timeout(
            &config,
            Duration::from_millis(20),
            || TestError { retryable: false },
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError { retryable: true }) }
            },
        )
        .await;

        assert!(result.is_err());
        // First attempt ran, then the deadline expired during backoff.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delay_growth_is_capped() {
        let config = fast_config();
        let d1 = config.next_delay(Duration::from_millis(1));
        let d2 = config.next_delay(d1);
        let d3 = config.next_delay(d2);
        assert_eq!(d1, Duration::from_millis(2));
        assert_eq!(d2, Duration::from_millis(4));
        assert_eq!(d3, Duration::from_millis(4));
    }

    #[test]
    fn from_settings_converts_units() {
        let section = RetryConfigSection::default();
        let config = RetryConfig::from_settings(&section);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(500));
        assert_eq!(config.max_delay, Duration::from_secs(10));
    }
}
