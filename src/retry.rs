use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{Result, TestkitError};

/// Retry budget and backoff spacing for a fallible async operation.
///
/// Attempts are numbered 0 to `max_attempts - 1`. Between attempt `i` and
/// `i + 1` the calling task sleeps `base_delay * 2^i` — deterministic
/// exponential backoff, no jitter. The sleep suspends only the calling task;
/// other tasks on the runtime keep running.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy, rejecting a zero attempt budget up front.
    ///
    /// A policy that never invokes its operation would silently return
    /// nothing, so `max_attempts == 0` fails fast with
    /// [`TestkitError::InvalidArgument`].
    pub fn new(max_attempts: u32, base_delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(TestkitError::InvalidArgument(
                "max_attempts must be at least 1".to_owned(),
            ));
        }
        Ok(Self {
            max_attempts,
            base_delay,
        })
    }

    /// Attempt budget, including the first attempt.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the second attempt; later delays double each time.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Runs `operation` until it succeeds or the attempt budget is exhausted.
    ///
    /// The first success is returned immediately with no further delay.
    /// Intermediate failures are logged at `warn` and followed by the backoff
    /// sleep; the failure of the final attempt is returned to the caller
    /// untouched, so its type and identity survive for root-cause matching.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Display,
    {
        let mut attempt = 0u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(
                        "attempt {} of {} failed: {}",
                        attempt + 1,
                        self.max_attempts,
                        err
                    );
                    if attempt + 1 >= self.max_attempts {
                        return Err(err);
                    }
                    let delay = self.backoff_delay(attempt);
                    debug!("retrying in {} ms", delay.as_millis());
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        // Cap the exponent so the shift cannot overflow on large budgets.
        let exp = attempt.min(16);
        let multiplier = 1u64 << exp;
        let millis = (self.base_delay.as_millis() as u64).saturating_mul(multiplier);
        Duration::from_millis(millis)
    }
}

/// Runs `operation` under the default policy (3 attempts, 1 s base delay).
pub async fn retry<T, E, F, Fut>(operation: F) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    RetryPolicy::default().run(operation).await
}
