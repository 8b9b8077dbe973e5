//! Retry for chat completion requests
//!
//! Transient failures back off exponentially. A 429 that names a wait
//! (`retry_after`) is retried after that wait instead, never longer than
//! `max_delay_ms`.

use std::future::Future;
use std::time::{Duration, SystemTime};
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
    /// Ceiling for both computed backoff and server hints
    pub max_delay_ms: u64,
    /// Spread computed delays by +/-20%
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            backoff_multiplier: 2.0,
            max_delay_ms: 30_000,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Backoff before retry number `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponential =
            self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let mut delay = exponential.min(self.max_delay_ms as f64);
        if self.jitter {
            delay *= 0.8 + jitter_fraction() * 0.4;
        }
        Duration::from_millis(delay as u64)
    }

    /// Server-requested wait, clamped to `max_delay_ms`
    pub fn hinted_delay(&self, retry_after_ms: u64) -> Duration {
        Duration::from_millis(retry_after_ms.min(self.max_delay_ms))
    }
}

/// Cheap 0.0..1.0 value from the clock
fn jitter_fraction() -> f64 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClassification {
    /// Transient
    Retry,
    /// Permanent
    NoRetry,
    /// Rate limited, with the server's wait when it sent one
    RateLimited { retry_after_ms: Option<u64> },
}

impl RetryClassification {
    /// How long to wait before retry number `attempt`, `None` to give up now
    pub fn delay(self, config: &RetryConfig, attempt: u32) -> Option<Duration> {
        match self {
            RetryClassification::NoRetry => None,
            _ if attempt >= config.max_retries => None,
            RetryClassification::RateLimited {
                retry_after_ms: Some(ms),
            } => Some(config.hinted_delay(ms)),
            RetryClassification::RateLimited { .. } | RetryClassification::Retry => {
                Some(config.delay_for_attempt(attempt))
            }
        }
    }
}

pub trait RetryableError {
    fn classify(&self) -> RetryClassification;
}

/// Run `operation` until it succeeds, fails permanently, or runs out of
/// retries
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    E: RetryableError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let classification = err.classify();
        let Some(delay) = classification.delay(config, attempt) else {
            if classification == RetryClassification::NoRetry {
                debug!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    error = %err,
                    "not retryable"
                );
            } else {
                warn!(
                    operation = operation_name,
                    max_retries = config.max_retries,
                    error = %err,
                    "retries exhausted"
                );
            }
            return Err(err);
        };

        warn!(
            operation = operation_name,
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "retrying"
        );
        sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig {
            jitter: false,
            ..Default::default()
        };

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(4000));
        assert_eq!(config.delay_for_attempt(6), Duration::from_millis(30_000));
    }

    #[test]
    fn test_jitter_stays_in_band() {
        let config = RetryConfig::default();
        let delay = config.delay_for_attempt(0).as_millis();
        assert!((800..=1200).contains(&delay), "{}", delay);
    }

    #[test]
    fn test_classification_delay() {
        let config = RetryConfig {
            jitter: false,
            ..Default::default()
        };
        let hinted = RetryClassification::RateLimited {
            retry_after_ms: Some(2500),
        };

        assert_eq!(hinted.delay(&config, 0), Some(Duration::from_millis(2500)));
        assert_eq!(
            RetryClassification::RateLimited {
                retry_after_ms: Some(120_000)
            }
            .delay(&config, 0),
            Some(Duration::from_millis(30_000))
        );
        assert_eq!(
            RetryClassification::RateLimited { retry_after_ms: None }.delay(&config, 1),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(RetryClassification::NoRetry.delay(&config, 0), None);
        assert_eq!(hinted.delay(&config, config.max_retries), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, ProviderError> =
            with_retry(&RetryConfig::default(), "test", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(ProviderError::ServerError("busy".into()))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_waits_for_server_hint() {
        let config = RetryConfig {
            jitter: false,
            ..Default::default()
        };
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<(), ProviderError> = with_retry(&config, "test", || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ProviderError::RateLimited {
                    retry_after_ms: Some(7_000),
                })
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(result, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // 7s from the hint, not the 1s first backoff step
        let waited = started.elapsed();
        assert!(
            waited >= Duration::from_millis(7_000) && waited < Duration::from_millis(7_500),
            "{:?}",
            waited
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ProviderError> =
            with_retry(&RetryConfig::default(), "test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::Authentication("bad key".into()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig {
            max_retries: 2,
            ..Default::default()
        };
        let result: Result<(), ProviderError> = with_retry(&config, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Network("reset".into()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
