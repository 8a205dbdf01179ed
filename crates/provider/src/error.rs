use courier_transport::{FailureClass, TransportError};
use thiserror::Error;

/// Errors that can occur when talking to an external collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying HTTP call failed (timeout, connection, or status).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The collaborator answered, but the body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The collaborator answered and reported a business-level failure.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The provider was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// The transport failure class, when the error came from the wire.
    pub fn transport_class(&self) -> Option<FailureClass> {
        match self {
            Self::Transport(err) => Some(err.class()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn transport_errors_keep_their_class() {
        let err: ProviderError = TransportError::Timeout {
            url: "http://h".into(),
            timeout: Duration::from_secs(30),
        }
        .into();
        assert_eq!(err.transport_class(), Some(FailureClass::Timeout));
        assert_eq!(err.to_string(), "request to http://h timed out after 30s");
    }

    #[test]
    fn non_transport_errors_have_no_class() {
        assert_eq!(
            ProviderError::Rejected("success=false".into()).transport_class(),
            None
        );
    }

    #[test]
    fn error_display() {
        let err = ProviderError::InvalidResponse("missing data".into());
        assert_eq!(err.to_string(), "invalid response: missing data");

        let err = ProviderError::Configuration("empty token".into());
        assert_eq!(err.to_string(), "invalid configuration: empty token");
    }
}
