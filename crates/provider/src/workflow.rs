use async_trait::async_trait;

use crate::error::ProviderError;

/// The external workflow system that owns cards and company contacts.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Return every contact-email value recorded for the named company.
    ///
    /// Values are returned as found; callers deduplicate and drop blanks.
    async fn find_contact_emails(&self, company_name: &str) -> Result<Vec<String>, ProviderError>;

    /// Write `value` into the card's delivery-status field.
    async fn update_card_status(&self, card_id: &str, value: &str) -> Result<(), ProviderError>;
}
