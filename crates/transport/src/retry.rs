use std::time::Duration;

use crate::config::TransportConfig;

/// Bounded retry with capped exponential backoff.
///
/// After the `n`-th failed attempt the next try waits
/// `base_delay * 2^(n-1)`, never more than `max_delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    retry_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
        retry_statuses: Vec<u16>,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            retry_statuses,
        }
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.base_delay,
            config.max_delay,
            config.retry_statuses.clone(),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn has_attempts_left(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }

    /// Delay to wait after `attempts` failed attempts.
    pub fn backoff(&self, attempts: u32) -> Duration {
        let exponent = attempts.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}
