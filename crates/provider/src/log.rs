use async_trait::async_trait;
use courier_core::OutboundEmail;
use tracing::info;

use crate::error::ProviderError;
use crate::relay::MailRelay;

/// A relay that logs the message and reports acceptance without performing
/// any external I/O.
///
/// Useful for dry runs and local development where no relay credentials
/// are available.
pub struct LogRelay {
    name: String,
}

impl LogRelay {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl MailRelay for LogRelay {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, email: &OutboundEmail) -> Result<u16, ProviderError> {
        let attachment_keys: Vec<String> =
            email.attachments.keys().map(ToString::to_string).collect();
        info!(
            relay = %self.name,
            recipients = %email.recipients.join(", "),
            reply_to = %email.reply_to,
            subject = %email.subject,
            attachments = %attachment_keys.join(", "),
            "log relay accepted message"
        );
        Ok(200)
    }
}

#[cfg(test)]
mod tests {
    use courier_core::AttachmentMap;

    use super::*;

    #[test]
    fn log_relay_name() {
        assert_eq!(LogRelay::new("dry-run").name(), "dry-run");
    }

    #[tokio::test]
    async fn log_relay_accepts() {
        let email = OutboundEmail {
            reply_to: "reply@x.com".into(),
            recipients: vec!["a@x.com".into()],
            subject: "s".into(),
            html_body: "<p>b</p>".into(),
            text_body: "b".into(),
            attachments: AttachmentMap::new(),
        };
        let status = LogRelay::new("dry-run").send(&email).await.unwrap();
        assert_eq!(status, 200);
    }
}
