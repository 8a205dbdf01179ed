use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Routing rule for a department code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRoute {
    /// Address placed in the outbound message's reply-to header.
    pub reply_to: String,

    /// Additional recipients copied on every message for this department.
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl DepartmentRoute {
    pub fn new(reply_to: impl Into<String>, recipients: &[&str]) -> Self {
        Self {
            reply_to: reply_to.into(),
            recipients: recipients.iter().map(|r| (*r).to_owned()).collect(),
        }
    }
}

/// File-extension to MIME-type lookup table.
///
/// Lookups are case-insensitive; unknown extensions resolve to `fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeTable {
    /// Lower-case extension (without the dot) to MIME type.
    pub types: BTreeMap<String, String>,

    /// MIME type used when the extension is missing or unknown.
    pub fallback: String,
}

impl MimeTable {
    /// Resolve the MIME type for an extension.
    pub fn lookup(&self, extension: &str) -> &str {
        self.types
            .get(&extension.to_ascii_lowercase())
            .map_or(self.fallback.as_str(), String::as_str)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        let types = [
            ("pdf", "application/pdf"),
            ("xls", "application/vnd.ms-excel"),
            (
                "xlsx",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            ("doc", "application/msword"),
            (
                "docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            ("zip", "application/zip"),
        ]
        .into_iter()
        .map(|(ext, mime)| (ext.to_owned(), mime.to_owned()))
        .collect();

        Self {
            types,
            fallback: "application/octet-stream".to_owned(),
        }
    }
}

/// Literal strings of the branded message and the card writeback line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplate {
    /// Heading at the top of the HTML message.
    pub brand: String,
    /// Appended to the request type on the headline (`"<type> está concluída!"`).
    pub completion_suffix: String,
    /// Heading of the attachment download-links block.
    pub links_heading: String,
    /// Signature lines (HTML) placed above the reply-to link.
    pub signature: String,
    /// Contact phone shown under the signature.
    pub phone: String,
    /// Footer line.
    pub footer: String,
    /// Prefix of the writeback line, followed by the recipient list.
    pub writeback_sent_to: String,
    /// Prefix of the writeback timestamp.
    pub writeback_sent_at: String,
    /// `chrono` format string for the writeback timestamp.
    pub writeback_time_format: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            brand: "oDos".to_owned(),
            completion_suffix: "está concluída!".to_owned(),
            links_heading: "Clique aqui para baixar os Anexos:".to_owned(),
            signature: "Obrigado,<br>ODOS ACELERADORA".to_owned(),
            phone: "(98) 3022-7277".to_owned(),
            footer: "© 2024 ODOS Contabilidade. Todos os direitos reservados.".to_owned(),
            writeback_sent_to: "📧 Email enviado com sucesso para os destinatários:".to_owned(),
            writeback_sent_at: "⏰ Enviado em:".to_owned(),
            writeback_time_format: "%d/%m/%Y %H:%M:%S".to_owned(),
        }
    }
}

/// Configuration injected into the dispatch pipeline.
///
/// `Default` reproduces the production routing and MIME tables. Every
/// field may be overridden from a TOML file.
///
/// # Examples
///
/// ```
/// use courier_core::DispatchConfig;
///
/// let config = DispatchConfig::default();
/// assert_eq!(config.route("FISCAL").unwrap().reply_to, "fiscal@odoscontabilidade.com.br");
/// assert!(config.route("UNKNOWN").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Department code to routing rule.
    pub departments: BTreeMap<String, DepartmentRoute>,

    /// Operational address added to every recipient set, if any.
    pub monitoring_address: Option<String>,

    /// Extension to MIME-type table used by the attachment processor.
    pub mime_types: MimeTable,

    /// Strings used to compose the message and the writeback line.
    pub template: MessageTemplate,

    /// UTC offset, in hours, of the writeback timestamp.
    pub writeback_utc_offset_hours: i32,

    /// Maximum number of attachment fetches in flight at once.
    pub max_concurrent_fetches: usize,
}

impl DispatchConfig {
    /// Look up the routing rule for a department code.
    pub fn route(&self, department: &str) -> Option<&DepartmentRoute> {
        self.departments.get(department.trim())
    }

    /// Set the monitoring address.
    #[must_use]
    pub fn with_monitoring_address(mut self, address: Option<String>) -> Self {
        self.monitoring_address = address;
        self
    }

    /// Add or replace a department routing rule.
    #[must_use]
    pub fn with_department(mut self, code: impl Into<String>, route: DepartmentRoute) -> Self {
        self.departments.insert(code.into(), route);
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        let departments = [
            (
                "FISCAL",
                DepartmentRoute::new(
                    "fiscal@odoscontabilidade.com.br",
                    &["samuel@odoscontabilidade.com.br"],
                ),
            ),
            (
                "CONTÁBIL",
                DepartmentRoute::new(
                    "contabil@odoscontabilidade.com.br",
                    &["nathalialeal@odoscontabilidade.com.br"],
                ),
            ),
            (
                "LEGAL",
                DepartmentRoute::new(
                    "centraldesolucoes@odoscontabilidade.com.br",
                    &["barbara@odoscontabilidade.com.br"],
                ),
            ),
            (
                "SUCESSO",
                DepartmentRoute::new("sucesso@odoscontabilidade.com.br", &[]),
            ),
        ]
        .into_iter()
        .map(|(code, route)| (code.to_owned(), route))
        .collect();

        Self {
            departments,
            monitoring_address: Some("integracao.odos@gmail.com".to_owned()),
            mime_types: MimeTable::default(),
            template: MessageTemplate::default(),
            writeback_utc_offset_hours: -3,
            max_concurrent_fetches: 10,
        }
    }
}
