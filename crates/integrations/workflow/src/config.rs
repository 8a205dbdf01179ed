/// Configuration for the workflow GraphQL client.
#[derive(Clone)]
pub struct WorkflowConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,

    /// Bearer token sent in the `Authorization` header.
    pub token: String,

    /// Table holding company contact records.
    pub contacts_table_id: String,

    /// Field searched with the company name.
    pub company_field_id: String,

    /// Field whose values are contact email addresses.
    pub contact_email_field_id: String,

    /// Card field that receives the delivery status.
    pub status_field_id: String,
}

impl std::fmt::Debug for WorkflowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("contacts_table_id", &self.contacts_table_id)
            .field("company_field_id", &self.company_field_id)
            .field("contact_email_field_id", &self.contact_email_field_id)
            .field("status_field_id", &self.status_field_id)
            .finish()
    }
}

impl WorkflowConfig {
    /// Create a configuration with the production endpoint and field ids.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoint: "https://api.pipefy.com/graphql".to_owned(),
            token: token.into(),
            contacts_table_id: "zaSzaB-T".to_owned(),
            company_field_id: "nome_da_empresa".to_owned(),
            contact_email_field_id: "email_do_contato".to_owned(),
            status_field_id: "informa_es_do_email".to_owned(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_contacts_table(mut self, table_id: impl Into<String>) -> Self {
        self.contacts_table_id = table_id.into();
        self
    }

    #[must_use]
    pub fn with_status_field(mut self, field_id: impl Into<String>) -> Self {
        self.status_field_id = field_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WorkflowConfig::new("tok");
        assert_eq!(config.endpoint, "https://api.pipefy.com/graphql");
        assert_eq!(config.contacts_table_id, "zaSzaB-T");
        assert_eq!(config.company_field_id, "nome_da_empresa");
        assert_eq!(config.contact_email_field_id, "email_do_contato");
        assert_eq!(config.status_field_id, "informa_es_do_email");
    }

    #[test]
    fn debug_redacts_token() {
        let debug = format!("{:?}", WorkflowConfig::new("super-secret"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
