use std::collections::hash_map::RandomState;
use std::future::Future;
use std::hash::BuildHasher;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for connection attempts.
///
/// The delay doubles (by default) after each failure, capped at
/// `max_delay_ms`. Jitter spreads out reconnect storms when several
/// instances restart at once.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay to sleep after the nth consecutive failure (1-based).
    fn delay_after(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1) as i32;
        let nominal = (self.initial_delay_ms as f64) * self.backoff_multiplier.powi(exponent);
        let mut millis = (nominal as u64).min(self.max_delay_ms);

        if self.use_jitter {
            // Scale to 50-100% of nominal, seeded from the clock
            let roll = RandomState::new().hash_one(std::time::SystemTime::now()) % 50;
            millis = millis * (50 + roll) / 100;
        }

        Duration::from_millis(millis)
    }
}

/// Run `operation` until it succeeds or the retry budget is spent.
///
/// Startup connections go through this so a database that is still coming
/// up does not take the whole process down with it.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut failures = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if failures > 0 {
                    debug!("Operation succeeded after {} retries", failures);
                }
                return Ok(value);
            }
            Err(e) if failures >= config.max_retries => {
                warn!("Giving up after {} attempts: {}", failures + 1, e);
                return Err(e);
            }
            Err(e) => {
                failures += 1;
                let delay = config.delay_after(failures);
                debug!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    failures,
                    config.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick() -> RetryConfig {
        RetryConfig::default().with_initial_delay(10).without_jitter()
    }

    #[tokio::test]
    async fn test_first_attempt_success_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = retry_with_backoff(
            || {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("connected")
                }
            },
            quick(),
        )
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = retry_with_backoff(
            || {
                let calls = calls_clone.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(format!("attempt {} refused", n + 1))
                    } else {
                        Ok("connected")
                    }
                }
            },
            quick(),
        )
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_once_budget_spent() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = retry_with_backoff(
            || {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<String, _>("refused")
                }
            },
            quick().with_max_retries(2),
        )
        .await;

        assert_eq!(result.unwrap_err(), "refused");
        // 1 initial attempt + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let config = quick();
        assert_eq!(config.delay_after(1), Duration::from_millis(10));
        assert_eq!(config.delay_after(2), Duration::from_millis(20));
        assert_eq!(config.delay_after(3), Duration::from_millis(40));
        assert_eq!(config.delay_after(30), Duration::from_millis(5000));
    }

    #[test]
    fn test_jitter_stays_within_half_window() {
        let config = RetryConfig::default().with_initial_delay(1000);
        for _ in 0..10 {
            let delay = config.delay_after(1);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }
}
