use async_trait::async_trait;
use courier_core::OutboundEmail;
use courier_provider::{MailRelay, ProviderError};
use courier_transport::ResilientTransport;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, instrument};

use crate::config::RelayConfig;
use crate::types::RelayPayload;

/// Client for the HTTP email relay.
pub struct RelayClient {
    config: RelayConfig,
    transport: ResilientTransport,
    headers: HeaderMap,
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RelayClient {
    /// Create a relay client over the shared transport.
    pub fn new(config: RelayConfig, transport: ResilientTransport) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        if let Some(value) = &config.authorization {
            let mut value = HeaderValue::from_str(value).map_err(|e| {
                ProviderError::Configuration(format!("invalid relay authorization: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            config,
            transport,
            headers,
        })
    }
}

#[async_trait]
impl MailRelay for RelayClient {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "relay"
    }

    #[instrument(skip(self, email), fields(endpoint = %self.config.endpoint))]
    async fn send(&self, email: &OutboundEmail) -> Result<u16, ProviderError> {
        let payload = RelayPayload::new(&self.config, email);
        debug!(
            recipients = email.recipients.len(),
            attachments = email.attachments.len(),
            "submitting message to relay"
        );

        let response = self
            .transport
            .send(&self.config.endpoint, &payload, &self.headers)
            .await?;

        let status = response.status().as_u16();
        info!(status, "relay accepted message");
        Ok(status)
    }
}
