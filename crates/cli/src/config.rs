use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use courier_core::DispatchConfig;
use courier_relay::RelayConfig;
use courier_transport::TransportConfig;
use courier_workflow::WorkflowConfig;
use serde::Deserialize;

/// Contents of `courier.toml`. Every section is optional; secrets never
/// live here and are read from the environment instead.
#[derive(Debug, Default, Deserialize)]
pub struct CourierConfig {
    /// Routing tables, MIME types, and message strings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// HTTP pool, retry, and timeout overrides.
    #[serde(default)]
    pub transport: TransportSection,
    /// Workflow API overrides.
    #[serde(default)]
    pub workflow: WorkflowSection,
    /// Email relay overrides.
    #[serde(default)]
    pub relay: RelaySection,
}

impl CourierConfig {
    /// Load the file at `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransportSection {
    pub pool_max_idle_per_host: Option<usize>,
    pub max_attempts: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub retry_statuses: Option<Vec<u16>>,
    pub api_timeout_seconds: Option<u64>,
    pub fetch_timeout_seconds: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

impl TransportSection {
    pub fn to_config(&self) -> TransportConfig {
        let mut config = TransportConfig::default();
        if let Some(size) = self.pool_max_idle_per_host {
            config.pool_max_idle_per_host = size;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if let Some(ms) = self.base_delay_ms {
            config.base_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.max_delay_ms {
            config.max_delay = Duration::from_millis(ms);
        }
        if let Some(statuses) = &self.retry_statuses {
            config.retry_statuses.clone_from(statuses);
        }
        if let Some(secs) = self.api_timeout_seconds {
            config.api_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.fetch_timeout_seconds {
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(accept) = self.accept_invalid_certs {
            config.accept_invalid_certs = accept;
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkflowSection {
    pub endpoint: Option<String>,
    pub contacts_table_id: Option<String>,
    pub status_field_id: Option<String>,
}

impl WorkflowSection {
    pub fn apply(&self, mut config: WorkflowConfig) -> WorkflowConfig {
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(table) = &self.contacts_table_id {
            config = config.with_contacts_table(table);
        }
        if let Some(field) = &self.status_field_id {
            config = config.with_status_field(field);
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RelaySection {
    pub endpoint: Option<String>,
    pub sender_address: Option<String>,
    pub sender_name: Option<String>,
}

impl RelaySection {
    pub fn apply(&self, mut config: RelayConfig) -> RelayConfig {
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(address) = &self.sender_address {
            config = config.with_sender_address(address);
        }
        if let Some(name) = &self.sender_name {
            config = config.with_sender_name(name);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: CourierConfig = toml::from_str("").unwrap();
        assert_eq!(config.dispatch, DispatchConfig::default());

        let transport = config.transport.to_config();
        assert_eq!(transport.max_attempts, 5);
        assert_eq!(transport.api_timeout, Duration::from_secs(60));
        assert_eq!(transport.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r#"
            [dispatch]
            monitoring_address = "ops@example.com"
            writeback_utc_offset_hours = 0

            [dispatch.departments.RH]
            reply_to = "rh@example.com"
            recipients = ["lead@example.com"]

            [transport]
            max_attempts = 3
            base_delay_ms = 250
            accept_invalid_certs = false

            [workflow]
            endpoint = "http://localhost:9000/graphql"

            [relay]
            sender_name = "Example"
        "#;
        let config: CourierConfig = toml::from_str(toml).unwrap();

        assert_eq!(
            config.dispatch.monitoring_address.as_deref(),
            Some("ops@example.com")
        );
        assert_eq!(config.dispatch.writeback_utc_offset_hours, 0);
        assert_eq!(config.dispatch.route("RH").unwrap().reply_to, "rh@example.com");
        // Supplying a department table replaces the defaults.
        assert!(config.dispatch.route("FISCAL").is_none());

        let transport = config.transport.to_config();
        assert_eq!(transport.max_attempts, 3);
        assert_eq!(transport.base_delay, Duration::from_millis(250));
        assert!(!transport.accept_invalid_certs);
        assert_eq!(transport.retry_statuses, [500, 502, 503, 504]);

        let workflow = config.workflow.apply(WorkflowConfig::new("t"));
        assert_eq!(workflow.endpoint, "http://localhost:9000/graphql");
        assert_eq!(workflow.contacts_table_id, "zaSzaB-T");

        let relay = config.relay.apply(RelayConfig::new("smtp.h", "u@h", "p"));
        assert_eq!(relay.sender_name, "Example");
        assert_eq!(relay.sender_address, "u@h");
    }

    #[test]
    fn missing_file_is_default() {
        let config = CourierConfig::load(Path::new("/nonexistent/courier.toml")).unwrap();
        assert!(config.workflow.endpoint.is_none());
    }
}
