use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::config::TransportConfig;
use crate::error::{FailureClass, TransportError};
use crate::retry::RetryPolicy;

/// Pooled HTTP client with bounded retry.
///
/// Clone is cheap: clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ResilientTransport {
    client: Client,
    config: TransportConfig,
    policy: RetryPolicy,
}

impl ResilientTransport {
    /// Build a transport with its own connection pool.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for outbound calls");
        }

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self::with_client(config, client))
    }

    /// Build a transport around an existing `reqwest::Client`.
    ///
    /// Per-request timeouts from `config` still apply.
    pub fn with_client(config: TransportConfig, client: Client) -> Self {
        let policy = RetryPolicy::from_config(&config);
        Self {
            client,
            config,
            policy,
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// POST a JSON payload, retrying retryable statuses and connection
    /// failures. Returns the first 2xx response.
    #[instrument(skip(self, payload, headers), fields(url = %url))]
    pub async fn send<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        headers: &HeaderMap,
    ) -> Result<Response, TransportError> {
        let body =
            serde_json::to_vec(payload).map_err(|e| TransportError::Request(e.to_string()))?;
        let mut request_headers = headers.clone();
        request_headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        let mut attempts = 0;
        loop {
            attempts += 1;
            debug!(attempt = attempts, "sending request");

            let result = self
                .client
                .post(url)
                .headers(request_headers.clone())
                .timeout(self.config.api_timeout)
                .body(body.clone())
                .send()
                .await;

            let err = match result {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    if self.policy.is_retryable_status(status)
                        && self.policy.has_attempts_left(attempts)
                    {
                        self.wait_before_retry(attempts, &format!("HTTP {status}"))
                            .await;
                        continue;
                    }
                    let body = response.text().await.unwrap_or_default();
                    TransportError::Status {
                        url: url.to_owned(),
                        status,
                        attempts,
                        body,
                    }
                }
                Err(e) => {
                    let err = TransportError::from_reqwest(url, self.config.api_timeout, &e);
                    if err.class() == FailureClass::Connection
                        && self.policy.has_attempts_left(attempts)
                    {
                        self.wait_before_retry(attempts, &err.to_string()).await;
                        continue;
                    }
                    err
                }
            };

            log_failure(&err);
            return Err(err);
        }
    }

    /// GET a file in a single attempt and return its bytes.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, TransportError> {
        let result = self.fetch_once(url).await;
        if let Err(err) = &result {
            log_failure(err);
        }
        result
    }

    async fn fetch_once(&self, url: &str) -> Result<Bytes, TransportError> {
        let timeout = self.config.fetch_timeout;
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, timeout, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
                attempts: 1,
                body,
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(url, timeout, &e))
    }

    async fn wait_before_retry(&self, attempts: u32, cause: &str) {
        let delay = self.policy.backoff(attempts);
        warn!(
            attempt = attempts,
            max_attempts = self.policy.max_attempts(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            cause,
            "retrying request"
        );
        tokio::time::sleep(delay).await;
    }
}

fn log_failure(err: &TransportError) {
    match err.class() {
        FailureClass::Timeout => error!(error = %err, "request timed out"),
        FailureClass::Connection => error!(error = %err, "connection failed"),
        FailureClass::Http => error!(error = %err, "request failed with non-success status"),
        FailureClass::Request => error!(error = %err, "request could not be built"),
    }
}
