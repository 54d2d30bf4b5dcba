// src/infrastructure/retry.rs
// Timed re-invocation of failed venue calls

use std::cmp;
use std::future::Future;
use std::time::Duration;

/// Re-invokes a failed operation after a delay, with the original
/// arguments.
///
/// The operation is an `FnMut` closure, so every re-invocation recaptures
/// exactly the arguments the caller closed over. Delay, backoff and the
/// attempt cap are explicit parameters; `max_attempts: None` retries until
/// the operation succeeds or the returned future is dropped. Dropping the
/// future while a retry is pending cancels the scheduled sleep, which is
/// the only cancellation this policy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    initial_delay: Duration,
    multiplier: u32,
    max_delay: Duration,
    max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Fixed interval between attempts, no attempt cap.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            multiplier: 1,
            max_delay: delay,
            max_attempts: None,
        }
    }

    /// Delay doubles after each failure, up to `max_delay`. No attempt cap.
    pub fn exponential(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            multiplier: 2,
            max_delay,
            max_attempts: None,
        }
    }

    /// Cap the total number of invocations (first attempt included).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(cmp::max(max_attempts, 1));
        self
    }

    /// Override the per-failure delay multiplier.
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = cmp::max(multiplier, 1);
        self
    }

    /// Override the delay ceiling the backoff grows toward.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = cmp::max(max_delay, self.initial_delay);
        self
    }

    /// Run `op`, re-invoking it after each failure until it succeeds or the
    /// attempt cap is reached. The last error is returned on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, name: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delay = self.initial_delay;
        let mut attempt: u32 = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if let Some(max) = self.max_attempts {
                        if attempt >= max {
                            log::error!("{} failed after {} attempts: {}", name, attempt, e);
                            return Err(e);
                        }
                    }

                    log::debug!("{} returned an error, retrying in {:?}: {}", name, delay, e);
                    tokio::time::sleep(delay).await;

                    attempt += 1;
                    delay = cmp::min(delay * self.multiplier, self.max_delay);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    /// The background-polling default: fixed 10 second interval.
    fn default() -> Self {
        Self::fixed(Duration::from_secs(10))
    }
}
