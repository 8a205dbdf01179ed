use thiserror::Error;

/// Pipeline-level failures that terminate a dispatch run.
///
/// Per-file attachment failures and recipient-query failures never appear
/// here directly; they are absorbed by their stage and only escalate through
/// the aggregate [`NoAttachmentProcessed`](Self::NoAttachmentProcessed) and
/// [`NoRecipientFound`](Self::NoRecipientFound) variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request was not a JSON object or a field had the wrong shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The attachment field held no non-blank URL.
    #[error("no files found")]
    NoFilesFound,

    /// Every attachment URL failed to fetch.
    #[error("no attachment processed")]
    NoAttachmentProcessed,

    /// The resolved recipient set was empty.
    #[error("no recipient found")]
    NoRecipientFound,

    /// The email relay was unreachable or rejected the message.
    #[error("failed to send email: {0}")]
    Send(String),

    /// A stage panicked.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DispatchError::NoFilesFound.to_string(), "no files found");
        assert_eq!(
            DispatchError::NoAttachmentProcessed.to_string(),
            "no attachment processed"
        );
        assert_eq!(
            DispatchError::NoRecipientFound.to_string(),
            "no recipient found"
        );
        assert_eq!(
            DispatchError::InvalidInput("expected a JSON object".into()).to_string(),
            "invalid input: expected a JSON object"
        );
        assert_eq!(
            DispatchError::Send("HTTP 503".into()).to_string(),
            "failed to send email: HTTP 503"
        );
    }
}
