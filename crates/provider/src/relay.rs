use async_trait::async_trait;
use courier_core::OutboundEmail;

use crate::error::ProviderError;

/// An email relay that accepts fully composed messages.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Return the relay name (e.g. `"mailgrid"`, `"log"`).
    fn name(&self) -> &str;

    /// Submit the message. Returns the relay's HTTP status code on acceptance.
    async fn send(&self, email: &OutboundEmail) -> Result<u16, ProviderError>;
}
