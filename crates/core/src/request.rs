use serde::{Deserialize, Deserializer};

use crate::error::DispatchError;

/// One notification request, as delivered by the workflow trigger.
///
/// Field names on the wire are the workflow's Portuguese field ids. Missing
/// or `null` fields default to empty; numeric values (card ids are often
/// sent as numbers) are accepted as strings.
///
/// # Examples
///
/// ```
/// use courier_core::NotificationRequest;
///
/// let request = NotificationRequest::from_value(serde_json::json!({
///     "card_id": 1125069880,
///     "departamento": "LEGAL",
///     "anexos": "https://h/a.pdf, https://h/b.docx"
/// }))
/// .unwrap();
/// assert_eq!(request.card_id, "1125069880");
/// assert_eq!(request.attachment_urls.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub card_id: String,

    #[serde(
        default,
        rename = "tipo_de_solicitacao",
        deserialize_with = "lenient_string"
    )]
    pub request_type: String,

    /// Free-text body (may contain HTML).
    #[serde(default, rename = "corpo_do_email", deserialize_with = "lenient_string")]
    pub body: String,

    #[serde(default, rename = "assunto", deserialize_with = "lenient_string")]
    pub subject: String,

    #[serde(default, rename = "nome_da_empresa", deserialize_with = "lenient_string")]
    pub company_name: String,

    #[serde(default, rename = "departamento", deserialize_with = "lenient_string")]
    pub department: String,

    /// Attachment URLs in input order. Blank entries are kept so positions
    /// stay observable; use [`non_blank_urls`](Self::non_blank_urls) to skip them.
    #[serde(default, rename = "anexos", deserialize_with = "attachment_list")]
    pub attachment_urls: Vec<String>,
}

impl NotificationRequest {
    /// Parse a request from an arbitrary JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DispatchError> {
        if !value.is_object() {
            return Err(DispatchError::InvalidInput(
                "expected a JSON object".to_owned(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DispatchError::InvalidInput(e.to_string()))
    }

    /// Attachment URLs with blank entries removed, in input order.
    pub fn non_blank_urls(&self) -> Vec<&str> {
        self.attachment_urls
            .iter()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
            .collect()
    }
}

/// Split a `", "`-separated attachment list, trimming each entry.
///
/// A bare comma is not a separator: URLs may legally contain one.
pub fn split_attachment_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(", ").map(|url| url.trim().to_owned()).collect()
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

fn attachment_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    lenient_string(deserializer).map(|raw| split_attachment_list(&raw))
}
