use courier_core::{DispatchConfig, RecipientSet};
use courier_provider::WorkflowApi;
use tracing::{debug, instrument, warn};

/// Builds the recipient set for a company and department.
#[derive(Debug, Clone)]
pub struct RecipientResolver<'a> {
    config: &'a DispatchConfig,
}

impl<'a> RecipientResolver<'a> {
    pub fn new(config: &'a DispatchConfig) -> Self {
        Self { config }
    }

    /// Query the company's contacts and merge them with the routing rules.
    ///
    /// A failed contact query is logged and treated as "no contacts"; the
    /// caller decides whether the merged set is usable.
    #[instrument(skip(self, workflow))]
    pub async fn resolve(
        &self,
        company_name: &str,
        department: &str,
        workflow: &dyn WorkflowApi,
    ) -> RecipientSet {
        let contacts = match workflow.find_contact_emails(company_name).await {
            Ok(contacts) => {
                debug!(found = contacts.len(), "contact query returned");
                contacts
            }
            Err(err) => {
                warn!(error = %err, "contact query failed, continuing without contacts");
                Vec::new()
            }
        };
        self.merge(department, contacts)
    }

    /// Union of contacts, the department's extra recipients, and the
    /// monitoring address. Unknown departments add nothing and leave the
    /// reply-to empty.
    pub fn merge<I, S>(&self, department: &str, contacts: I) -> RecipientSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let route = self.config.route(department);
        if route.is_none() {
            warn!(department, "no routing rule for department");
        }

        let reply_to = route.map(|r| r.reply_to.as_str()).unwrap_or_default();
        let mut recipients = RecipientSet::new(reply_to);
        recipients.extend(contacts);
        if let Some(route) = route {
            recipients.extend(&route.recipients);
        }
        if let Some(address) = &self.config.monitoring_address {
            recipients.insert(address);
        }
        recipients
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use courier_provider::ProviderError;

    use super::*;

    struct Contacts {
        result: Result<Vec<String>, String>,
        queried: Mutex<Vec<String>>,
    }

    impl Contacts {
        fn returning(emails: &[&str]) -> Self {
            Self {
                result: Ok(emails.iter().map(|e| (*e).to_owned()).collect()),
                queried: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err("HTTP 503".to_owned()),
                queried: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WorkflowApi for Contacts {
        async fn find_contact_emails(&self, company_name: &str) -> Result<Vec<String>, ProviderError> {
            self.queried.lock().unwrap().push(company_name.to_owned());
            self.result.clone().map_err(ProviderError::InvalidResponse)
        }

        async fn update_card_status(&self, _card_id: &str, _value: &str) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn merges_contacts_route_and_monitoring() {
        let config = DispatchConfig::default();
        let workflow = Contacts::returning(&["c@acme.com"]);
        let set = RecipientResolver::new(&config)
            .resolve("Acme", "FISCAL", &workflow)
            .await;

        assert_eq!(set.reply_to(), "fiscal@odoscontabilidade.com.br");
        assert_eq!(
            set.to_vec(),
            [
                "c@acme.com",
                "integracao.odos@gmail.com",
                "samuel@odoscontabilidade.com.br",
            ]
        );
        assert_eq!(*workflow.queried.lock().unwrap(), ["Acme"]);
    }

    #[tokio::test]
    async fn duplicates_and_blanks_collapse() {
        let config = DispatchConfig::default();
        let workflow = Contacts::returning(&["a@x", "a@x", "", "  ", " a@x "]);
        let set = RecipientResolver::new(&config)
            .resolve("X", "LEGAL", &workflow)
            .await;

        assert_eq!(set.iter().filter(|a| *a == "a@x").count(), 1);
        assert!(set.iter().all(|a| !a.is_empty()));
        assert!(set.contains("barbara@odoscontabilidade.com.br"));
        assert_eq!(set.len(), 3);
    }

    #[tokio::test]
    async fn query_failure_is_not_fatal() {
        let config = DispatchConfig::default();
        let set = RecipientResolver::new(&config)
            .resolve("Acme", "CONTÁBIL", &Contacts::failing())
            .await;

        assert_eq!(set.reply_to(), "contabil@odoscontabilidade.com.br");
        assert!(set.contains("nathalialeal@odoscontabilidade.com.br"));
        assert!(set.contains("integracao.odos@gmail.com"));
    }

    #[test]
    fn unknown_department_has_empty_reply_to() {
        let config = DispatchConfig::default();
        let set = RecipientResolver::new(&config).merge("MARKETING", ["c@acme.com"]);
        assert_eq!(set.reply_to(), "");
        assert_eq!(set.to_vec(), ["c@acme.com", "integracao.odos@gmail.com"]);
    }

    #[test]
    fn empty_without_monitoring_address() {
        let config = DispatchConfig::default().with_monitoring_address(None);
        let set = RecipientResolver::new(&config).merge("UNKNOWN", Vec::<String>::new());
        assert!(set.is_empty());
    }

    #[test]
    fn department_code_is_trimmed() {
        let config = DispatchConfig::default();
        let set = RecipientResolver::new(&config).merge(" SUCESSO ", Vec::<String>::new());
        assert_eq!(set.reply_to(), "sucesso@odoscontabilidade.com.br");
    }
}
