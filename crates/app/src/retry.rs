//! Bounded re-execution of transactions that lost a race.

use std::{fmt::Display, future::Future, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

/// Exponential backoff applied between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles afterwards.
    pub base_delay: Duration,

    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);

        self.base_delay
            .saturating_mul(1_u32 << exponent)
            .min(self.max_delay)
    }
}

/// Errors that can signal a lost race worth retrying.
pub trait Contended: Sized {
    /// Whether re-running the whole transaction may succeed.
    fn is_contended(&self) -> bool;

    /// Error to surface once every attempt has been used.
    #[must_use]
    fn into_exhausted(self) -> Self;
}

/// Run `operation` until it succeeds, fails with a non-contended error, or
/// the policy's attempts are used up.
///
/// # Errors
///
/// Returns the first non-contended error, or the exhausted form of the last
/// contended one.
pub async fn retry_on_conflict<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut attempt_fn: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Contended + Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match attempt_fn().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation, attempt, "succeeded after retry");
                }

                return Ok(value);
            }
            Err(error) if error.is_contended() => {
                if attempt >= max_attempts {
                    warn!(operation, attempt, "giving up after contention: {error}");

                    return Err(error.into_exhausted());
                }

                let delay = policy.delay_after(attempt);

                warn!(
                    operation,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "retrying after contention: {error}"
                );

                sleep(delay).await;

                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
