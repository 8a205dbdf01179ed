use std::time::Duration;

use thiserror::Error;

/// Coarse failure class at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Deadline exceeded without a response.
    Timeout,
    /// No connection could be established or it broke mid-request.
    Connection,
    /// A non-success response after retries were exhausted.
    Http,
    /// The request could not be built or the client misconfigured.
    Request,
}

/// Errors returned by the [`ResilientTransport`](crate::ResilientTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within its timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// A connection-level failure occurred.
    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// The endpoint answered with a non-success status.
    #[error("{url} returned HTTP {status} after {attempts} attempt(s): {body}")]
    Status {
        url: String,
        status: u16,
        attempts: u32,
        body: String,
    },

    /// The request payload could not be serialized or the request built.
    #[error("invalid request: {0}")]
    Request(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl TransportError {
    pub(crate) fn from_reqwest(url: &str, timeout: Duration, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_owned(),
                timeout,
            }
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Connection {
                url: url.to_owned(),
                message: err.to_string(),
            }
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            Self::Timeout { .. } => FailureClass::Timeout,
            Self::Connection { .. } => FailureClass::Connection,
            Self::Status { .. } => FailureClass::Http,
            Self::Request(_) | Self::Build(_) => FailureClass::Request,
        }
    }

    /// The response status, if the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        let timeout = TransportError::Timeout {
            url: "http://h".into(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(timeout.class(), FailureClass::Timeout);
        assert_eq!(timeout.status(), None);

        let status = TransportError::Status {
            url: "http://h".into(),
            status: 503,
            attempts: 5,
            body: "unavailable".into(),
        };
        assert_eq!(status.class(), FailureClass::Http);
        assert_eq!(status.status(), Some(503));

        assert_eq!(
            TransportError::Build("tls".into()).class(),
            FailureClass::Request
        );
    }

    #[test]
    fn error_display() {
        let err = TransportError::Status {
            url: "http://h/send/".into(),
            status: 502,
            attempts: 5,
            body: "bad gateway".into(),
        };
        assert_eq!(
            err.to_string(),
            "http://h/send/ returned HTTP 502 after 5 attempt(s): bad gateway"
        );

        let err = TransportError::Timeout {
            url: "http://h".into(),
            timeout: Duration::from_millis(500),
        };
        assert_eq!(err.to_string(), "request to http://h timed out after 500ms");
    }
}
