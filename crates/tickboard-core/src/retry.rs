//! Opt-in retry policy for chart fetches.
//!
//! The service fails fast by default: [`RetryConfig::default`] is disabled and
//! callers decide whether to try again. Enabling retries only ever repeats
//! transport failures and transient HTTP statuses; a provider saying the
//! symbol does not exist is final.

use std::time::Duration;

use crate::data_source::{SourceError, SourceErrorKind};

/// Backoff strategy for retrying failed requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        /// Delay between retries.
        delay: Duration,
    },
    /// Uses an exponential delay between retries.
    ///
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(500),
            factor: 2.0,
            max: Duration::from_secs(8),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let scale = factor.powi(attempt as i32);
                let seconds = base.as_secs_f64() * scale;
                let capped_seconds = seconds.min(max.as_secs_f64());

                let mut delay = Duration::from_secs_f64(capped_seconds);

                if jitter {
                    let jitter_ms = (delay.as_millis() as f64 * 0.5) as u64;
                    let random_offset = fastrand::u64(0..=(jitter_ms * 2));
                    let total_ms =
                        delay.as_millis() as i64 + (random_offset as i64 - jitter_ms as i64);
                    delay = Duration::from_millis(total_ms.max(0) as u64);
                }

                delay
            }
        }
    }
}

/// Configuration for the optional retry mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    pub enabled: bool,
    /// Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub backoff: Backoff,
    /// HTTP status codes that count as transient.
    pub retry_on_status: Vec<u16>,
    pub retry_on_timeout: bool,
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryConfig {
    /// Exponential backoff with jitter, retrying up to `max_retries` times.
    pub fn exponential(max_retries: u32) -> Self {
        Self {
            enabled: max_retries > 0,
            max_retries,
            backoff: Backoff::default(),
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }

    /// Fixed backoff, retrying up to `max_retries` times.
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            backoff: Backoff::Fixed { delay },
            ..Self::exponential(max_retries)
        }
    }

    /// Fail fast: every error goes straight back to the caller.
    pub fn no_retry() -> Self {
        Self {
            enabled: false,
            max_retries: 0,
            ..Self::exponential(0)
        }
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Whether `error`, raised on attempt number `attempt` (0-based), earns another try.
    pub fn should_retry(&self, error: &SourceError, attempt: u32) -> bool {
        if !self.enabled || attempt >= self.max_retries {
            return false;
        }

        match error.kind() {
            SourceErrorKind::HttpStatus => error
                .status()
                .map(|status| self.should_retry_status(status))
                .unwrap_or(false),
            SourceErrorKind::Timeout => self.retry_on_timeout,
            SourceErrorKind::Transport => self.retry_on_connect && error.retryable(),
            SourceErrorKind::Provider | SourceErrorKind::Parse | SourceErrorKind::Unavailable => {
                false
            }
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}
