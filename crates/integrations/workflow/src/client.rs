use async_trait::async_trait;
use courier_provider::{ProviderError, WorkflowApi};
use courier_transport::ResilientTransport;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::WorkflowConfig;
use crate::error::WorkflowError;
use crate::types::{
    FIND_RECORDS_QUERY, FindRecordsData, FindRecordsVariables, GraphQlRequest, GraphQlResponse,
    UPDATE_CARD_FIELD_MUTATION, UpdateCardFieldData, UpdateCardFieldVariables,
};

/// GraphQL client for the workflow system.
pub struct WorkflowClient {
    config: WorkflowConfig,
    transport: ResilientTransport,
    headers: HeaderMap,
}

impl std::fmt::Debug for WorkflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WorkflowClient {
    /// Create a client over the shared transport.
    ///
    /// Returns a [`ProviderError::Configuration`] if the token cannot be used
    /// as a header value.
    pub fn new(config: WorkflowConfig, transport: ResilientTransport) -> Result<Self, ProviderError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| ProviderError::Configuration(format!("invalid workflow token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            config,
            transport,
            headers,
        })
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    async fn execute<V: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T, ProviderError> {
        let request = GraphQlRequest { query, variables };
        let response = self
            .transport
            .send(&self.config.endpoint, &request, &self.headers)
            .await?;

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| WorkflowError::Malformed(e.to_string()))?;
        Ok(envelope.into_data()?)
    }
}

#[async_trait]
impl WorkflowApi for WorkflowClient {
    #[instrument(skip(self), fields(table = %self.config.contacts_table_id))]
    async fn find_contact_emails(&self, company_name: &str) -> Result<Vec<String>, ProviderError> {
        let variables = FindRecordsVariables {
            table_id: &self.config.contacts_table_id,
            field_id: &self.config.company_field_id,
            field_value: company_name,
        };
        let data: FindRecordsData = self.execute(FIND_RECORDS_QUERY, variables).await?;
        let emails = data.values_of(&self.config.contact_email_field_id);
        debug!(count = emails.len(), "contact emails found");
        Ok(emails)
    }

    #[instrument(skip(self, value), fields(field = %self.config.status_field_id))]
    async fn update_card_status(&self, card_id: &str, value: &str) -> Result<(), ProviderError> {
        let variables = UpdateCardFieldVariables {
            card_id,
            field_id: &self.config.status_field_id,
            value,
        };
        let data: UpdateCardFieldData = self.execute(UPDATE_CARD_FIELD_MUTATION, variables).await?;
        match data.update_card_field {
            Some(result) if result.success => {
                info!("card status updated");
                Ok(())
            }
            _ => Err(WorkflowError::Unsuccessful.into()),
        }
    }
}
