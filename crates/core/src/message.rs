use crate::attachment::AttachmentMap;

/// A fully composed message, ready to hand to a mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Reply-to address chosen by department. May be empty.
    pub reply_to: String,
    /// Deduplicated recipient addresses.
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
    /// Plain-text fallback body.
    pub text_body: String,
    pub attachments: AttachmentMap,
}
