use async_trait::async_trait;
use bytes::Bytes;
use courier_transport::ResilientTransport;

use crate::error::ProviderError;

/// Where attachment bytes come from.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Fetch the raw content behind `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, ProviderError>;
}

/// [`FileSource`] that downloads over the shared transport, one attempt per
/// file with the transport's fetch timeout.
#[derive(Debug, Clone)]
pub struct HttpFileSource {
    transport: ResilientTransport,
}

impl HttpFileSource {
    pub fn new(transport: ResilientTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl FileSource for HttpFileSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, ProviderError> {
        Ok(self.transport.fetch_bytes(url).await?)
    }
}
