use std::time::Duration;

/// Configuration for the [`ResilientTransport`](crate::ResilientTransport).
///
/// API calls and raw file fetches carry independent timeouts. Retries apply
/// only to API calls; file fetches are single attempts.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Maximum idle pooled connections kept per host.
    pub pool_max_idle_per_host: usize,

    /// Total attempts (first try included) for a retried request.
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on every further retry.
    pub base_delay: Duration,

    /// Upper bound on a single backoff delay.
    pub max_delay: Duration,

    /// Response statuses that trigger a retry.
    pub retry_statuses: Vec<u16>,

    /// Per-attempt timeout for API calls.
    pub api_timeout: Duration,

    /// Timeout for a raw file fetch.
    pub fetch_timeout: Duration,

    /// Skip TLS certificate verification on outbound calls.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            retry_statuses: vec![500, 502, 503, 504],
            api_timeout: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(30),
            accept_invalid_certs: true,
        }
    }
}

impl TransportConfig {
    /// Set the total number of attempts for retried requests.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the base and maximum backoff delays.
    #[must_use]
    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max;
        self
    }

    /// Set the API call timeout.
    #[must_use]
    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    /// Set the file fetch timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_statuses, [500, 502, 503, 504]);
        assert_eq!(config.api_timeout, Duration::from_secs(60));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn builder_methods() {
        let config = TransportConfig::default()
            .with_max_attempts(2)
            .with_backoff(Duration::from_millis(5), Duration::from_millis(20))
            .with_api_timeout(Duration::from_secs(5))
            .with_fetch_timeout(Duration::from_secs(3))
            .with_accept_invalid_certs(false);
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.base_delay, Duration::from_millis(5));
        assert_eq!(config.max_delay, Duration::from_millis(20));
        assert_eq!(config.api_timeout, Duration::from_secs(5));
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert!(!config.accept_invalid_certs);
    }
}
