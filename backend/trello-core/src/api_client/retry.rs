//! Rate-limit retry policy.
//!
//! Only HTTP 429 re-enters the loop. The wait before the next attempt is the
//! response's `Retry-After` seconds when present, otherwise the next step of
//! an unjittered exponential schedule (`base_delay * 2^attempt`).

use crate::error::ApiClientError;

use std::future::Future;
use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use reqwest::header::{HeaderMap, RETRY_AFTER};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);
pub const BACKOFF_MULTIPLIER: f64 = 2.0;
/// Ceiling for a single computed delay.
pub const MAX_BACKOFF_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

/// Where the delay for a retry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelaySource {
    RetryAfter,
    Backoff,
}

/// A scheduled pause between two attempts of the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryWait {
    /// Zero-based index of the attempt that was rate limited.
    pub attempt: u32,
    pub delay: Duration,
    pub source: DelaySource,
}

/// Outcome of a single attempt, as seen by the retry loop.
#[derive(Debug)]
pub enum AttemptFailure {
    RateLimited { retry_after: Option<Duration> },
    Fatal(ApiClientError),
}

#[derive(Debug)]
pub enum RetryError {
    Exhausted { attempts: u32 },
    Fatal(ApiClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first attempt; values below one are raised to one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// A fresh delay schedule for one logical call.
    ///
    /// No jitter and no elapsed-time limit: `next_backoff()` yields
    /// `base_delay`, then doubles until `MAX_BACKOFF_INTERVAL`. The attempt
    /// budget is enforced by `execute`, not by the schedule.
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.base_delay,
            initial_interval: self.base_delay,
            randomization_factor: 0.0,
            multiplier: BACKOFF_MULTIPLIER,
            max_interval: MAX_BACKOFF_INTERVAL,
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// Drive `operation` until it succeeds, fails fatally, or the attempt budget is spent.
    ///
    /// `operation` receives the zero-based attempt number. `wait` is awaited
    /// between a rate-limited attempt and the next one; the client passes
    /// `tokio::time::sleep`, tests pass a recorder.
    pub async fn execute<T, Op, OpFut, Wait, WaitFut>(
        &self,
        mut operation: Op,
        mut wait: Wait,
    ) -> Result<T, RetryError>
    where
        Op: FnMut(u32) -> OpFut,
        OpFut: Future<Output = Result<T, AttemptFailure>>,
        Wait: FnMut(RetryWait) -> WaitFut,
        WaitFut: Future<Output = ()>,
    {
        let mut attempt = 0;
        let mut backoff = self.backoff();

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(AttemptFailure::Fatal(error)) => return Err(RetryError::Fatal(error)),
                Err(AttemptFailure::RateLimited { retry_after }) => {
                    let attempts_made = attempt + 1;
                    if attempts_made >= self.max_attempts {
                        return Err(RetryError::Exhausted {
                            attempts: attempts_made,
                        });
                    }

                    // The schedule advances on every 429, so an honoured
                    // Retry-After does not shift later backoff steps.
                    let computed = backoff.next_backoff().unwrap_or(MAX_BACKOFF_INTERVAL);
                    let pause = match retry_after {
                        Some(delay) => RetryWait {
                            attempt,
                            delay,
                            source: DelaySource::RetryAfter,
                        },
                        None => RetryWait {
                            attempt,
                            delay: computed,
                            source: DelaySource::Backoff,
                        },
                    };

                    wait(pause).await;
                    attempt = attempts_made;
                }
            }
        }
    }
}

/// Integer seconds from `Retry-After`; anything unparseable counts as absent.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
