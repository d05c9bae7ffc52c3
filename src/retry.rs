//! Bounded retry with exponential backoff.
//!
//! Both connection establishment and issue creation run through
//! [`execute`]. The backoff math is identical for every caller and is
//! parameterized only by the [`RetryPolicy`]; the sleep function is
//! injectable so tests can assert the exact delay sequence.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Default number of retries after the initial attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default initial backoff delay in milliseconds.
const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

/// Retry configuration for fallible operations.
///
/// An operation is attempted `max_retries + 1` times in total. After
/// the i-th failed attempt (1-indexed), the caller sleeps
/// `initial_delay * 2^(i-1)` before trying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt. Zero means a
    /// single attempt with no sleeping.
    pub max_retries: u32,
    /// Delay before the first retry; doubles after each failure.
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given retry count and initial delay.
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Total number of attempts this policy allows.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Backoff delay after `attempt` (1-indexed) has failed.
    fn backoff_after(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.pow(attempt - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
        }
    }
}

/// Terminal error after a policy's attempts are used up.
///
/// Wraps the failure of the final attempt and records how many
/// attempts were made in total.
#[derive(Debug, Error)]
#[error("failed after {attempts} attempts: {cause}")]
pub struct RetryExhausted<E>
where
    E: fmt::Display + fmt::Debug,
{
    /// How many attempts were made, including the initial one.
    pub attempts: u32,
    /// The failure of the last attempt.
    pub cause: E,
}

/// Run `op` under `policy`, sleeping with `tokio::time::sleep` between
/// attempts.
///
/// Returns the first success, or [`RetryExhausted`] wrapping the last
/// failure once the policy's attempts are used up. The waits are plain
/// sequential awaits; no other work proceeds for this call while
/// backing off.
pub async fn execute<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    op: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display + fmt::Debug,
{
    execute_with_sleep(policy, operation, op, tokio::time::sleep).await
}

/// Like [`execute`], but with a caller-supplied sleep function.
pub async fn execute_with_sleep<T, E, F, Fut, S, SFut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
    mut sleep: S,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
    E: fmt::Display + fmt::Debug,
{
    let total = policy.total_attempts();
    let mut attempt = 0;

    loop {
        attempt += 1;
        debug!(operation, attempt, total, "executing operation");

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < total => {
                let delay = policy.backoff_after(attempt);
                warn!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "attempt failed, backing off"
                );
                sleep(delay).await;
            }
            Err(e) => {
                warn!(operation, attempts = attempt, error = %e, "all attempts exhausted");
                return Err(RetryExhausted {
                    attempts: attempt,
                    cause: e,
                });
            }
        }
    }
}
